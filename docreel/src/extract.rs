//! Document text extraction. Dispatches on file extension: `pdf` and `txt`
//! are the only accepted types.

use std::path::Path;

use tracing::info;

use crate::error::{Error, Result};

/// Extract plain text from a document on disk.
pub fn extract_text(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(Error::DocumentNotFound {
            path: path.to_path_buf(),
        });
    }

    let filename = path
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default();
    let bytes = std::fs::read(path)?;

    extract_text_from_bytes(&bytes, &filename)
}

/// Extract plain text from in-memory document bytes.
///
/// `filename` is only consulted for its extension; the extension decides the
/// parser, not the content.
pub fn extract_text_from_bytes(bytes: &[u8], filename: &str) -> Result<String> {
    let extension = filename
        .rsplit('.')
        .next()
        .filter(|ext| *ext != filename)
        .map(str::to_lowercase)
        .unwrap_or_default();

    let text = match extension.as_str() {
        "pdf" => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| Error::DocumentParse(format!("pdf extraction failed: {e}")))?,
        "txt" => String::from_utf8(bytes.to_vec())
            .map_err(|e| Error::DocumentParse(format!("text file is not valid UTF-8: {e}")))?,
        _ => return Err(Error::UnsupportedDocument(extension.clone())),
    };

    if text.trim().is_empty() {
        return Err(Error::EmptyDocument);
    }

    info!(chars = text.len(), %extension, "document text extracted");
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_txt_passthrough() {
        let text = extract_text_from_bytes("hello world".as_bytes(), "notes.txt").unwrap();
        assert_eq!(text, "hello world");
    }

    #[test]
    fn test_txt_extension_case_insensitive() {
        let text = extract_text_from_bytes(b"content", "NOTES.TXT").unwrap();
        assert_eq!(text, "content");
    }

    #[test]
    fn test_unsupported_extension() {
        let err = extract_text_from_bytes(b"...", "report.docx").unwrap_err();
        match err {
            Error::UnsupportedDocument(ext) => assert_eq!(ext, "docx"),
            other => panic!("expected UnsupportedDocument, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_extension() {
        let err = extract_text_from_bytes(b"...", "README").unwrap_err();
        assert!(matches!(err, Error::UnsupportedDocument(ext) if ext.is_empty()));
    }

    #[test]
    fn test_empty_text_rejected() {
        let err = extract_text_from_bytes(b"   \n\t ", "blank.txt").unwrap_err();
        assert!(matches!(err, Error::EmptyDocument));
    }

    #[test]
    fn test_invalid_utf8_rejected() {
        let err = extract_text_from_bytes(&[0xff, 0xfe, 0x00], "bad.txt").unwrap_err();
        assert!(matches!(err, Error::DocumentParse(_)));
    }

    #[test]
    fn test_document_not_found() {
        let err = extract_text(Path::new("/nonexistent/file.txt")).unwrap_err();
        assert!(matches!(err, Error::DocumentNotFound { .. }));
    }

    #[test]
    fn test_extract_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        std::fs::write(&path, "from disk").unwrap();
        assert_eq!(extract_text(&path).unwrap(), "from disk");
    }
}
