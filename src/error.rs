use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Search term must not be empty")]
    InvalidTerm,
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
    #[error("Decode error: {0}")]
    DecodeError(#[from] serde_json::Error),
    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),
    #[error("Malformed {variant} item: {reason}")]
    MalformedItem {
        variant: &'static str,
        reason: String,
    },
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Other error: {0}")]
    Other(String),
}

impl AppError {
    /// Errors the user only ever sees as "network error".
    pub fn is_network_failure(&self) -> bool {
        matches!(
            self,
            AppError::NetworkError(_) | AppError::DecodeError(_) | AppError::UnexpectedShape(_)
        )
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::Configuration(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_and_shape_errors_collapse_to_network_failure() {
        let decode = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(AppError::from(decode).is_network_failure());
        assert!(AppError::UnexpectedShape("array".into()).is_network_failure());
    }

    #[test]
    fn malformed_item_is_not_a_network_failure() {
        let err = AppError::MalformedItem {
            variant: "track",
            reason: "missing field `trackName`".into(),
        };
        assert!(!err.is_network_failure());
        assert_eq!(
            err.to_string(),
            "Malformed track item: missing field `trackName`"
        );
    }
}
