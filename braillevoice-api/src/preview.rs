use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use braillevoice_core::upload::SelectedFile;

/// The inline preview shown after a file is picked or dropped. Generating it
/// never gates the file-selected transition; callers run it off to the side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub data_url: String,
    pub info_line: String,
}

pub fn render_preview(file: &SelectedFile) -> Preview {
    Preview {
        data_url: data_url(&file.mime_type, &file.bytes),
        info_line: file.info_line(),
    }
}

pub fn data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_a_base64_data_url() {
        assert_eq!(data_url("image/png", b"abc"), "data:image/png;base64,YWJj");
    }

    #[test]
    fn preview_carries_the_info_line() {
        let file = SelectedFile {
            file_name: "scan.png".into(),
            mime_type: "image/png".into(),
            bytes: vec![0u8; 1024],
        };
        let preview = render_preview(&file);
        assert!(preview.data_url.starts_with("data:image/png;base64,"));
        assert_eq!(preview.info_line, "scan.png • 1.00 KB");
    }
}
