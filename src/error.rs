//! Error types for fetching and ranking articles.
//!
//! Nothing below `main` recovers from these; they bubble up with `?` and
//! are reported once as a structured error object on stderr.

use thiserror::Error;

/// Errors that can occur while building, sending, or decoding the upstream request.
#[derive(Debug, Error)]
pub enum NewsError {
    /// The HTTP request itself failed (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The GDELT API answered, but not with a usable article list.
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The response body was JSON but not in the expected shape.
    #[error("decode error: {0}")]
    Decode(String),

    /// Invalid configuration file or value.
    #[error("config error: {0}")]
    Config(String),

    /// Reading a local file (the config) failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Convenience type alias for results in this crate.
pub type Result<T> = std::result::Result<T, NewsError>;

impl From<serde_json::Error> for NewsError {
    fn from(err: serde_json::Error) -> Self {
        NewsError::Decode(err.to_string())
    }
}

impl From<serde_yaml::Error> for NewsError {
    fn from(err: serde_yaml::Error) -> Self {
        NewsError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_api() {
        let err = NewsError::Api {
            status: 200,
            message: "The specified phrase is too short.".into(),
        };
        assert_eq!(
            err.to_string(),
            "API error (status 200): The specified phrase is too short."
        );
    }

    #[test]
    fn display_config() {
        let err = NewsError::Config("timeout_secs must be > 0".into());
        assert_eq!(err.to_string(), "config error: timeout_secs must be > 0");
    }

    #[test]
    fn decode_from_serde_json() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("[1,");
        let err: NewsError = parse.unwrap_err().into();
        assert!(matches!(err, NewsError::Decode(_)));
    }

    #[test]
    fn io_from_std() {
        let err: NewsError = std::io::Error::from(std::io::ErrorKind::NotFound).into();
        assert!(matches!(err, NewsError::Io(_)));
        assert!(err.to_string().starts_with("I/O error: "));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NewsError>();
    }
}
