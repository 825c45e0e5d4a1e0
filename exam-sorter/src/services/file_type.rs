//! PDF content detection
//!
//! Magic-byte sniffing with `infer`, falling back to a `%PDF-` scan of the
//! file header for documents with leading garbage (some scanners prepend a
//! few bytes before the signature).

use crate::types::FileTypeProbe;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const PDF_MIME: &str = "application/pdf";
const PDF_SIGNATURE: &[u8] = b"%PDF-";
const HEADER_SCAN_BYTES: usize = 1024;

/// Content-based PDF probe
#[derive(Debug, Clone, Copy, Default)]
pub struct MagicPdfProbe;

impl MagicPdfProbe {
    pub fn new() -> Self {
        Self
    }

    fn header_has_signature(path: &Path) -> std::io::Result<bool> {
        let mut header = Vec::with_capacity(HEADER_SCAN_BYTES);
        File::open(path)?
            .take(HEADER_SCAN_BYTES as u64)
            .read_to_end(&mut header)?;

        Ok(header
            .windows(PDF_SIGNATURE.len())
            .any(|window| window == PDF_SIGNATURE))
    }
}

impl FileTypeProbe for MagicPdfProbe {
    fn is_pdf(&self, path: &Path) -> bool {
        match infer::get_from_path(path) {
            Ok(Some(kind)) if kind.mime_type() == PDF_MIME => return true,
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(file = %path.display(), error = %e, "Cannot read file header");
                return false;
            }
        }

        match Self::header_has_signature(path) {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(file = %path.display(), error = %e, "Cannot scan file header");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn pdf_content_is_detected_regardless_of_name() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("scan_without_extension");
        fs::write(&path, b"%PDF-1.7\n%\xe2\xe3\xcf\xd3\n1 0 obj\n").unwrap();

        assert!(MagicPdfProbe::new().is_pdf(&path));
    }

    #[test]
    fn signature_after_leading_bytes_is_detected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("odd.pdf");
        let mut content = b"\r\n\r\n   ".to_vec();
        content.extend_from_slice(b"%PDF-1.4\n");
        fs::write(&path, content).unwrap();

        assert!(MagicPdfProbe::new().is_pdf(&path));
    }

    #[test]
    fn other_content_is_not_pdf() {
        let temp = TempDir::new().unwrap();
        let png = temp.path().join("photo.pdf");
        fs::write(&png, [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0]).unwrap();
        let text = temp.path().join("notes.txt");
        fs::write(&text, "just some notes").unwrap();

        let probe = MagicPdfProbe::new();
        assert!(!probe.is_pdf(&png));
        assert!(!probe.is_pdf(&text));
    }

    #[test]
    fn missing_file_is_not_pdf() {
        assert!(!MagicPdfProbe::new().is_pdf(Path::new("/nonexistent/x.pdf")));
    }
}
