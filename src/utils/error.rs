use thiserror::Error;

#[derive(Error, Debug)]
pub enum LeaderboardError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Invalid score {value:?} for {name:?}: {source}")]
    InvalidScoreError {
        name: String,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("Malformed row at line {line}: expected 2 fields, found {fields}")]
    MalformedRowError { line: u64, fields: usize },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value {value:?} for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl LeaderboardError {
    /// 呼叫端輸入錯誤（相對於儲存或資料損毀）
    pub fn is_client_error(&self) -> bool {
        matches!(self, LeaderboardError::ValidationError { .. })
    }

    /// 儲存內容無法解析
    pub fn is_parse_error(&self) -> bool {
        match self {
            LeaderboardError::InvalidScoreError { .. }
            | LeaderboardError::MalformedRowError { .. } => true,
            LeaderboardError::CsvError(e) => !matches!(e.kind(), csv::ErrorKind::Io(_)),
            _ => false,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            LeaderboardError::IoError(e) if e.kind() == std::io::ErrorKind::NotFound => {
                "Leaderboard store does not exist yet".to_string()
            }
            LeaderboardError::IoError(_) => "Leaderboard store could not be accessed".to_string(),
            LeaderboardError::CsvError(_)
            | LeaderboardError::InvalidScoreError { .. }
            | LeaderboardError::MalformedRowError { .. } => {
                "Leaderboard store contains a malformed record".to_string()
            }
            LeaderboardError::ValidationError { message } => message.clone(),
            LeaderboardError::ConfigValidationError { .. }
            | LeaderboardError::InvalidConfigValueError { .. } => {
                format!("Invalid configuration: {}", self)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            LeaderboardError::IoError(e) if e.kind() == std::io::ErrorKind::NotFound => {
                "Submit at least one score before reading the leaderboard"
            }
            LeaderboardError::IoError(_) => "Check the store path and its permissions",
            LeaderboardError::CsvError(_)
            | LeaderboardError::InvalidScoreError { .. }
            | LeaderboardError::MalformedRowError { .. } => {
                "Fix or remove the offending row in the store file"
            }
            LeaderboardError::ValidationError { .. } => "Correct the request and retry",
            LeaderboardError::ConfigValidationError { .. }
            | LeaderboardError::InvalidConfigValueError { .. } => {
                "Check the command line flags or the TOML configuration file"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, LeaderboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_score_is_parse_error() {
        let source = "notanumber".parse::<i64>().unwrap_err();
        let err = LeaderboardError::InvalidScoreError {
            name: "x".to_string(),
            value: "notanumber".to_string(),
            source,
        };
        assert!(err.is_parse_error());
        assert!(!err.is_client_error());
        assert!(err.to_string().contains("notanumber"));
    }

    #[test]
    fn test_missing_store_message() {
        let err = LeaderboardError::from(std::io::Error::from(std::io::ErrorKind::NotFound));
        assert!(!err.is_parse_error());
        assert_eq!(err.user_friendly_message(), "Leaderboard store does not exist yet");
    }

    #[test]
    fn test_validation_is_client_error() {
        let err = LeaderboardError::ValidationError {
            message: "name must not be empty".to_string(),
        };
        assert!(err.is_client_error());
        assert_eq!(err.user_friendly_message(), "name must not be empty");
    }
}
