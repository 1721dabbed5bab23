use thiserror::Error;

#[derive(Error, Debug)]
pub enum PricecheckError {
    #[error("API Error: {0}")]
    ApiError(String),

    #[error("Network Error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Parse Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Pattern Error: {0}")]
    Pattern(#[from] regex::Error),

    /// The header block (Item Class / Rarity) could not be isolated.
    #[error("Malformed Input: {0}")]
    MalformedInput(String),

    #[error("Unsupported Language: {0}")]
    UnsupportedLanguage(String),
}

pub type Result<T> = std::result::Result<T, PricecheckError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = PricecheckError::ApiError("test error".to_string());
        assert_eq!(error.to_string(), "API Error: test error");

        let error = PricecheckError::MalformedInput("no rarity line".to_string());
        assert_eq!(error.to_string(), "Malformed Input: no rarity line");
    }

    #[test]
    fn test_json_error_conversion() {
        let err = serde_json::from_str::<u32>("not json").unwrap_err();
        let error: PricecheckError = err.into();
        assert!(matches!(error, PricecheckError::Json(_)));
    }
}
