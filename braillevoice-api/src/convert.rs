use crate::request::{Body, HttpRequest, join_url};
use braillevoice_core::upload::SelectedFile;
use std::time::Duration;

/// The conversion call runs OCR plus speech synthesis server-side, so it
/// gets a much longer budget than the auth endpoints.
pub const CONVERT_TIMEOUT: Duration = Duration::from_secs(60);

pub fn build_health_request(base_url: &str) -> HttpRequest {
    HttpRequest {
        method: "GET".into(),
        url: join_url(base_url, "/health"),
        headers: vec![],
        body: Body::Empty,
    }
}

/// Multipart upload of the selected image as field `file`.
pub fn build_convert_request(base_url: &str, file: &SelectedFile) -> HttpRequest {
    let boundary = format!("Boundary-{}", uuid::Uuid::new_v4());

    let mut body: Vec<u8> = Vec::new();
    append_file(
        &mut body,
        &boundary,
        "file",
        &file.file_name,
        &file.mime_type,
        &file.bytes,
    );
    body.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());

    HttpRequest {
        method: "POST".into(),
        url: join_url(base_url, "/api/convert"),
        headers: vec![
            (
                "Content-Type".into(),
                format!("multipart/form-data; boundary={}", boundary),
            ),
            ("Accept".into(), "application/json".into()),
        ],
        body: Body::MultipartFormData { boundary, bytes: body },
    }
}

fn append_file(
    body: &mut Vec<u8>,
    boundary: &str,
    name: &str,
    filename: &str,
    mime_type: &str,
    bytes: &[u8],
) {
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            name, filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", mime_type).as_bytes());
    body.extend_from_slice(bytes);
    body.extend_from_slice(b"\r\n");
}
