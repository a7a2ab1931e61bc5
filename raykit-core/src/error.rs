//! Error types for raykit

use thiserror::Error;

/// Main error type for raykit operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Algorithm error: {0}")]
    Algorithm(String),

    #[error("Image error: {0}")]
    Image(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Result type alias for raykit operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        fn open_missing() -> Result<std::fs::File> {
            Ok(std::fs::File::open("/definitely/not/here.raykit")?)
        }

        match open_missing() {
            Err(Error::Io(_)) => {}
            other => panic!("expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn test_error_messages() {
        let err = Error::InvalidData("face index 9 out of range".to_string());
        assert_eq!(err.to_string(), "Invalid data: face index 9 out of range");
        let err = Error::UnsupportedFormat("stl".to_string());
        assert_eq!(err.to_string(), "Unsupported format: stl");
    }
}
