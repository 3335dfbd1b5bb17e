// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Error types for the segmental CoM library.

use std::fmt;

/// Result type alias for CoM estimation operations.
pub type Result<T> = std::result::Result<T, ComError>;

/// Main error type for the segmental CoM library.
#[derive(Debug)]
pub enum ComError {
    /// A segment needs a joint index the landmark store was never given.
    LandmarkNotFound(usize),
    /// Error decoding or processing an input image.
    ImageError(String),
    /// Error loading the ONNX pose model.
    ModelLoadError(String),
    /// Error during model inference.
    InferenceError(String),
    /// Model output could not be decoded into landmarks.
    PostProcessingError(String),
    /// Invalid configuration provided.
    ConfigError(String),
    /// IO error (file not found, permission denied, etc.).
    IoError(String),
    /// Wrapped `std::io::Error`
    Io(std::io::Error),
    /// Visualizer error.
    VisualizerError(String),
}

impl fmt::Display for ComError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LandmarkNotFound(index) => write!(f, "Landmark not found: index {index}"),
            Self::ImageError(msg) => write!(f, "Image error: {msg}"),
            Self::ModelLoadError(msg) => write!(f, "Model load error: {msg}"),
            Self::InferenceError(msg) => write!(f, "Inference error: {msg}"),
            Self::PostProcessingError(msg) => write!(f, "Post-processing error: {msg}"),
            Self::ConfigError(msg) => write!(f, "Config error: {msg}"),
            Self::IoError(msg) => write!(f, "IO error: {msg}"),
            Self::Io(err) => write!(f, "IO error: {err}"),
            Self::VisualizerError(msg) => write!(f, "Visualizer error: {msg}"),
        }
    }
}

impl std::error::Error for ComError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ComError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<image::ImageError> for ComError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ComError::LandmarkNotFound(26);
        assert_eq!(err.to_string(), "Landmark not found: index 26");

        let err = ComError::ImageError("truncated".to_string());
        assert_eq!(err.to_string(), "Image error: truncated");

        let err = ComError::ModelLoadError("test".to_string());
        assert_eq!(err.to_string(), "Model load error: test");
    }

    #[test]
    fn test_io_error_source() {
        use std::error::Error;

        let err = ComError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(err.source().is_some());
        assert!(ComError::LandmarkNotFound(0).source().is_none());
    }
}
