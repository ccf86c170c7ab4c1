use base64::{Engine as _, engine::general_purpose::STANDARD};
use std::fs;
use std::io;
use std::path::Path;

/// A meal photo ready to be sent inline to the vision model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub bytes: Vec<u8>,
    pub mime: String,
}

impl ImagePayload {
    pub fn new(bytes: Vec<u8>, mime: impl Into<String>) -> Self {
        Self {
            bytes,
            mime: mime.into(),
        }
    }

    /// Read a photo from disk; the mime type is inferred from the extension.
    pub fn from_path(path: &Path) -> io::Result<Self> {
        let bytes = fs::read(path)?;
        if bytes.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("image file is empty: {}", path.display()),
            ));
        }

        let mime = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(mime_from_ext)
            .unwrap_or("application/octet-stream");

        Ok(Self::new(bytes, mime))
    }

    /// `data:` URL with the base64-encoded bytes.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.bytes))
    }
}

fn mime_from_ext(ext: &str) -> Option<&'static str> {
    match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "heic" => Some("image/heic"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_mime_from_ext() {
        assert_eq!(mime_from_ext("jpg"), Some("image/jpeg"));
        assert_eq!(mime_from_ext("JPEG"), Some("image/jpeg"));
        assert_eq!(mime_from_ext("png"), Some("image/png"));
        assert_eq!(mime_from_ext("webp"), Some("image/webp"));
        assert_eq!(mime_from_ext("heic"), Some("image/heic"));
        assert_eq!(mime_from_ext("gif"), None);
    }

    #[test]
    fn data_url_is_base64() {
        let img = ImagePayload::new(b"abc".to_vec(), "image/png");
        assert_eq!(img.data_url(), "data:image/png;base64,YWJj");
    }

    #[test]
    fn from_path_reads_bytes_and_mime() {
        let mut f = tempfile::Builder::new()
            .suffix(".jpg")
            .tempfile()
            .expect("tempfile");
        f.write_all(&[0xff, 0xd8, 0xff]).expect("write");

        let img = ImagePayload::from_path(f.path()).expect("read");
        assert_eq!(img.mime, "image/jpeg");
        assert_eq!(img.bytes, vec![0xff, 0xd8, 0xff]);
    }

    #[test]
    fn empty_file_is_rejected() {
        let f = tempfile::Builder::new()
            .suffix(".png")
            .tempfile()
            .expect("tempfile");
        let err = ImagePayload::from_path(f.path()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
