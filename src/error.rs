//! Error module for the Rusty LIF library.
use std::error::Error;
use std::fmt;

/// Error types for the library.
///
/// Every variant is a configuration error: it is raised while loading parameters or
/// preparing a run, never once the integrator has started stepping.
#[derive(Debug, PartialEq)]
pub enum LIFError {
    /// Error for a parameter set violating its invariants, e.g., a non-positive time constant.
    InvalidParameter(String),
    /// Error for an unrecognized simulation mode.
    InvalidMode(String),
    /// Error for an invalid exponential toggle value.
    InvalidToggle(String),
    /// Error for invalid run arguments, e.g., a non-positive duration.
    InvalidArgument(String),
    /// Error for I/O operations, e.g., a missing parameter file.
    IOError(String),
    /// Error while decoding or encoding JSON.
    ParseError(String),
}

impl fmt::Display for LIFError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LIFError::InvalidParameter(e) => write!(f, "Invalid parameters: {}", e),
            LIFError::InvalidMode(e) => {
                write!(f, "Invalid mode: {} (expected \"current\" or \"spike\")", e)
            }
            LIFError::InvalidToggle(e) => {
                write!(f, "Invalid exponential toggle: {} (expected 0 or 1)", e)
            }
            LIFError::InvalidArgument(e) => write!(f, "Invalid argument: {}", e),
            LIFError::IOError(e) => write!(f, "I/O error: {}", e),
            LIFError::ParseError(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl Error for LIFError {}

impl From<std::io::Error> for LIFError {
    fn from(e: std::io::Error) -> Self {
        LIFError::IOError(e.to_string())
    }
}

impl From<serde_json::Error> for LIFError {
    fn from(e: serde_json::Error) -> Self {
        match e.classify() {
            serde_json::error::Category::Io => LIFError::IOError(e.to_string()),
            _ => LIFError::ParseError(e.to_string()),
        }
    }
}
