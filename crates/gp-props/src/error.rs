//! Property calculation errors.

use thiserror::Error;

/// Result type for property operations.
pub type PropsResult<T> = Result<T, PropsError>;

/// Errors that can occur while computing gas properties.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PropsError {
    /// Non-physical values (zero temperature in a density law, negative c_p, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// Value outside the range a provider can serve.
    #[error("Value out of range for {what}")]
    OutOfRange { what: &'static str },

    /// Degenerate arithmetic in a derived formula (zero divisor, negative sqrt argument).
    #[error("Domain error in {what}: {detail}")]
    Domain { what: &'static str, detail: String },

    /// Invalid or unparsable configuration.
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl From<serde_yaml::Error> for PropsError {
    fn from(err: serde_yaml::Error) -> Self {
        PropsError::Config {
            message: err.to_string(),
        }
    }
}
