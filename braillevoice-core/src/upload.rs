use thiserror::Error;

pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

pub const ALLOWED_IMAGE_TYPES: [&str; 6] = [
    "image/png",
    "image/jpeg",
    "image/jpg",
    "image/bmp",
    "image/tiff",
    "image/webp",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("Please select a valid image file (PNG, JPG, BMP, TIFF, WEBP)")]
    UnsupportedType,
    #[error("Please select an image smaller than 10MB")]
    TooLarge,
}

/// Accepts a file iff its declared MIME type is in the allowed set and it
/// fits the size cap. Runs before any network call.
pub fn validate_upload(mime_type: &str, size_bytes: u64) -> Result<(), UploadError> {
    if !ALLOWED_IMAGE_TYPES.contains(&mime_type) {
        return Err(UploadError::UnsupportedType);
    }
    if size_bytes > MAX_UPLOAD_BYTES {
        return Err(UploadError::TooLarge);
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// The caption shown under the preview image, e.g. `photo.png • 12.34 KB`.
    pub fn info_line(&self) -> String {
        let kb = self.size_bytes() as f64 / 1024.0;
        format!("{} • {:.2} KB", self.file_name, kb)
    }
}
