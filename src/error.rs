use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Current,
    Predict,
    Status,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Current => "/system/current",
            Endpoint::Predict => "/predict",
            Endpoint::Status => "/status",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("request to {endpoint} failed: {reason}")]
    Network { endpoint: Endpoint, reason: String },

    #[error("{endpoint} returned status {status}")]
    Protocol { endpoint: Endpoint, status: u16 },

    #[error("{endpoint} returned an unexpected body: {reason}")]
    Shape { endpoint: Endpoint, reason: String },
}

impl FetchError {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            FetchError::Network { endpoint, .. }
            | FetchError::Protocol { endpoint, .. }
            | FetchError::Shape { endpoint, .. } => *endpoint,
        }
    }
}

pub type FetchResult<T> = std::result::Result<T, FetchError>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Export error: {0}")]
    Export(String),

    #[error("TUI error: {0}")]
    Tui(String),

    #[error("Runtime error: {0}")]
    Runtime(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(Endpoint::Current.path(), "/system/current");
        assert_eq!(Endpoint::Predict.path(), "/predict");
        assert_eq!(Endpoint::Status.to_string(), "/status");
    }

    #[test]
    fn test_fetch_error_reports_endpoint() {
        let err = FetchError::Protocol { endpoint: Endpoint::Status, status: 500 };
        assert_eq!(err.endpoint(), Endpoint::Status);
        assert_eq!(err.to_string(), "/status returned status 500");
    }

    #[test]
    fn test_crate_error_messages() {
        let io: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
        assert_eq!(io.to_string(), "IO error: missing");
        assert_eq!(
            Error::Config("bad key".to_string()).to_string(),
            "Configuration error: bad key"
        );
    }
}
