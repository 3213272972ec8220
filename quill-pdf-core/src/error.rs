use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PdfError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Unknown page size: {0}")]
    UnknownPageSize(String),

    #[error("Undefined font: {family} {style}")]
    UndefinedFont { family: String, style: String },

    #[error("No font has been set")]
    NoFontSelected,

    #[error("No page has been added yet")]
    NoPage,

    #[error("The document is closed")]
    DocumentClosed,

    #[error("Incorrect rotation value: {0}")]
    InvalidRotation(i32),

    #[error("Unable to write output file {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid PDF structure: {0}")]
    InvalidStructure(String),
}

pub type Result<T> = std::result::Result<T, PdfError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::io::{Error as IoError, ErrorKind};

    #[test]
    fn test_configuration_error_display() {
        let error = PdfError::Configuration("Incorrect unit: furlong".to_string());
        assert_eq!(
            error.to_string(),
            "Configuration error: Incorrect unit: furlong"
        );
    }

    #[test]
    fn test_unknown_page_size_display() {
        let error = PdfError::UnknownPageSize("b52".to_string());
        assert_eq!(error.to_string(), "Unknown page size: b52");
    }

    #[test]
    fn test_undefined_font_display() {
        let error = PdfError::UndefinedFont {
            family: "comic".to_string(),
            style: "B".to_string(),
        };
        assert_eq!(error.to_string(), "Undefined font: comic B");
    }

    #[test]
    fn test_lifecycle_errors_display() {
        assert_eq!(PdfError::NoPage.to_string(), "No page has been added yet");
        assert_eq!(PdfError::DocumentClosed.to_string(), "The document is closed");
        assert_eq!(PdfError::NoFontSelected.to_string(), "No font has been set");
        assert_eq!(
            PdfError::InvalidRotation(45).to_string(),
            "Incorrect rotation value: 45"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = IoError::new(ErrorKind::NotFound, "file not found");
        let pdf_error: PdfError = io_error.into();

        match pdf_error {
            PdfError::Io(ref err) => assert_eq!(err.kind(), ErrorKind::NotFound),
            _ => panic!("Expected IO error variant"),
        }
    }

    #[test]
    fn test_output_write_keeps_source() {
        let error = PdfError::OutputWrite {
            path: PathBuf::from("/readonly/out.pdf"),
            source: IoError::new(ErrorKind::PermissionDenied, "permission denied"),
        };

        assert_eq!(
            error.to_string(),
            "Unable to write output file /readonly/out.pdf: permission denied"
        );
        let source = error.source().expect("source is kept");
        assert_eq!(source.to_string(), "permission denied");
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_error() -> Result<u32> {
            Err(PdfError::NoPage)
        }

        assert!(matches!(returns_error(), Err(PdfError::NoPage)));
    }
}
