use std::path::PathBuf;

/// All errors that can occur in docreel.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unsupported document type: \"{0}\" — only pdf and txt are accepted")]
    UnsupportedDocument(String),

    #[error("document not found: {path}")]
    DocumentNotFound { path: PathBuf },

    #[error("document parse error: {0}")]
    DocumentParse(String),

    #[error("document contains no extractable text")]
    EmptyDocument,

    #[error("summarization error: {0}")]
    Summarization(String),

    #[error("speech synthesis error: {0}")]
    Synthesis(String),

    #[error("transcription error: {0}")]
    Transcription(String),

    #[error("audio decoding error: {0}")]
    AudioDecode(String),

    #[error("compositing error: {0}")]
    Compositing(String),

    #[error("background video not found: {path}")]
    BackgroundNotFound { path: PathBuf },

    #[error("model error: {0}")]
    Model(String),

    #[error("model not found: {path}")]
    ModelNotFound { path: PathBuf },

    #[error("model download failed: {0}")]
    ModelDownload(String),

    #[error("whisper error: {0}")]
    Whisper(#[from] whisper_rs::WhisperError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_unsupported_document() {
        let e = Error::UnsupportedDocument("docx".into());
        let msg = e.to_string();
        assert!(msg.contains("docx"));
        assert!(msg.contains("pdf and txt"));
    }

    #[test]
    fn test_error_display_document_not_found() {
        let e = Error::DocumentNotFound {
            path: PathBuf::from("/tmp/report.pdf"),
        };
        assert!(e.to_string().contains("/tmp/report.pdf"));
    }

    #[test]
    fn test_error_display_background_not_found() {
        let e = Error::BackgroundNotFound {
            path: PathBuf::from("/assets/bg.mp4"),
        };
        assert!(e.to_string().contains("/assets/bg.mp4"));
    }

    #[test]
    fn test_error_display_synthesis() {
        let e = Error::Synthesis("piper exited with status 1".into());
        assert_eq!(
            e.to_string(),
            "speech synthesis error: piper exited with status 1"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let e: Error = io_err.into();
        assert!(matches!(e, Error::Io(_)));
        assert!(e.to_string().contains("file not found"));
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<String>("invalid json").unwrap_err();
        let e: Error = json_err.into();
        assert!(matches!(e, Error::Json(_)));
    }

    #[test]
    fn test_error_debug_impl() {
        let e = Error::Compositing("test error".into());
        let debug = format!("{:?}", e);
        assert!(debug.contains("Compositing"));
    }
}
