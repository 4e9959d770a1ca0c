//! Error handling for the IP enrichment pipeline

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IpIntelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input error: {0}")]
    Input(String),

    #[error("Lookup error: {0}")]
    Lookup(String),

    #[error("Summary error: {0}")]
    Summary(String),

    #[error("Output error: {0}")]
    Output(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl IpIntelError {
    /// True for errors that abort the whole run instead of marking one row.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, IpIntelError::Lookup(_) | IpIntelError::Summary(_))
    }
}

pub type Result<T> = std::result::Result<T, IpIntelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_row_errors_are_not_fatal() {
        assert!(!IpIntelError::Lookup("unreachable".to_string()).is_fatal());
        assert!(!IpIntelError::Summary("empty response".to_string()).is_fatal());
    }

    #[test]
    fn test_run_level_errors_are_fatal() {
        assert!(IpIntelError::Input("missing ip column".to_string()).is_fatal());
        assert!(IpIntelError::Output("disk full".to_string()).is_fatal());
        assert!(IpIntelError::Configuration("missing key".to_string()).is_fatal());
    }

    #[test]
    fn test_error_messages_carry_context() {
        let err = IpIntelError::Lookup("connection refused".to_string());
        assert_eq!(err.to_string(), "Lookup error: connection refused");
    }
}
