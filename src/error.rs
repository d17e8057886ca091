use std::fmt;
use std::path::PathBuf;

/// Errors that can occur while configuring the UI
#[derive(Debug)]
pub enum UiError {
    /// Config file could not be read
    Io(std::io::Error),

    /// Config file is not valid JSON for the expected layout
    Config(serde_json::Error),

    /// A configured font file does not exist
    FontNotFound(PathBuf),

    /// A font file is not TrueType or OpenType
    FontFormat(PathBuf),

    /// Font size must be a positive, finite pixel size
    InvalidFontSize(f32),
}

impl fmt::Display for UiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UiError::Io(e) => write!(f, "IO error: {}", e),
            UiError::Config(e) => write!(f, "Config error: {}", e),
            UiError::FontNotFound(path) => {
                write!(f, "Font file not found: {}", path.display())
            }
            UiError::FontFormat(path) => {
                write!(f, "Not a TrueType/OpenType font: {}", path.display())
            }
            UiError::InvalidFontSize(size) => write!(f, "Invalid font size: {}", size),
        }
    }
}

impl std::error::Error for UiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UiError::Io(e) => Some(e),
            UiError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for UiError {
    fn from(err: std::io::Error) -> Self {
        UiError::Io(err)
    }
}

impl From<serde_json::Error> for UiError {
    fn from(err: serde_json::Error) -> Self {
        UiError::Config(err)
    }
}

impl From<UiError> for String {
    fn from(error: UiError) -> Self {
        error.to_string()
    }
}
