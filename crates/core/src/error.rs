use thiserror::Error;

pub type AnalyticsResult<T> = Result<T, AnalyticsError>;
pub type StoreResult<T> = Result<T, StoreError>;

/// Failures raised by record stores and report history logs.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Corrupt history entry at line {line}: {reason}")]
    Corrupt { line: usize, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Invalid {field} date '{value}': expected YYYY-MM-DD")]
    DateParse { field: &'static str, value: String },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AnalyticsError {
    pub fn is_date_parse(&self) -> bool {
        matches!(self, AnalyticsError::DateParse { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_converts() {
        let err: AnalyticsError = StoreError::Unavailable("db down".into()).into();
        assert!(matches!(err, AnalyticsError::Store(StoreError::Unavailable(_))));
        assert!(!err.is_date_parse());
        assert_eq!(err.to_string(), "Store error: Store unavailable: db down");
    }

    #[test]
    fn test_date_parse_message() {
        let err = AnalyticsError::DateParse {
            field: "start",
            value: "not-a-date".into(),
        };
        assert!(err.is_date_parse());
        assert!(err.to_string().contains("'not-a-date'"));
    }
}
