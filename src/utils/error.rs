use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdScanError {
    #[error("Image load error: {0}")]
    ImageLoadError(String),
    #[error("Recognition error: {0}")]
    RecognitionError(String),
    #[error("Empty transcript: {0}")]
    EmptyTranscript(String),
    #[error("Engine unavailable: {0}")]
    EngineUnavailable(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("IO error: {0}")]
    IoError(String),
}

impl From<std::io::Error> for IdScanError {
    fn from(err: std::io::Error) -> Self {
        IdScanError::IoError(err.to_string())
    }
}

impl From<image::ImageError> for IdScanError {
    fn from(err: image::ImageError) -> Self {
        IdScanError::ImageLoadError(err.to_string())
    }
}
