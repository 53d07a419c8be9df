use thiserror::Error;

#[derive(Error, Debug)]
pub enum PetAgeError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required field: {field}")]
    MissingFieldError { field: String },

    #[error("Invalid {field}: {message}")]
    ValidationError { field: String, message: String },

    #[error("Health guide service error: {message}")]
    GuideServiceError { message: String },
}

/// 錯誤分類，用於日誌與退出碼
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Input,
    Configuration,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PetAgeError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingFieldError {
            field: field.into(),
        }
    }

    pub fn guide_service(message: impl Into<String>) -> Self {
        Self::GuideServiceError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::HttpError(_) | Self::GuideServiceError { .. } => ErrorCategory::Network,
            Self::MissingFieldError { .. } | Self::ValidationError { .. } => ErrorCategory::Input,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::CsvError(_) | Self::SerializationError(_) => ErrorCategory::Data,
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 健康指南失敗一律以備用文字遮蔽，不影響計算結果
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Configuration | ErrorCategory::Data => {
                ErrorSeverity::High
            }
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 給使用者看的訊息（不含內部細節）
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::MissingFieldError { field } => format!("Please provide the pet's {}.", field),
            Self::ValidationError { field, message } => {
                format!("The {} you entered is not valid: {}", field, message)
            }
            Self::HttpError(_) | Self::GuideServiceError { .. } => {
                "The health guide service is currently unavailable.".to_string()
            }
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::ConfigValidationError { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration problem in '{}': {}", field, reason)
            }
            Self::CsvError(e) => format!("Could not read the CSV data: {}", e),
            Self::SerializationError(e) => format!("Could not encode the result: {}", e),
            Self::IoError(e) => format!("File system error: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::MissingFieldError { .. } => "Fill in the missing field and submit again",
            Self::ValidationError { .. } => {
                "Use a known species and a non-negative numeric age (fractions are allowed)"
            }
            Self::HttpError(_) | Self::GuideServiceError { .. } => {
                "Check the guide endpoint and network connection, or run with --no-guide"
            }
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => {
                "Review the configuration file and command-line flags"
            }
            Self::CsvError(_) => "Make sure the input has the headers species,breed,age",
            Self::SerializationError(_) => "Retry without --json or report the issue",
            Self::IoError(_) => "Check that the file exists and is readable/writable",
        }
    }
}

pub type Result<T> = std::result::Result<T, PetAgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_are_input_category() {
        let err = PetAgeError::missing_field("age");
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(err.user_friendly_message(), "Please provide the pet's age.");
    }

    #[test]
    fn test_guide_error_is_recoverable() {
        let err = PetAgeError::guide_service("503 Service Unavailable");
        assert_eq!(err.category(), ErrorCategory::Network);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn test_io_error_is_critical() {
        let err = PetAgeError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing.csv",
        ));
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }
}
