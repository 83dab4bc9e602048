use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogueError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Seed error: {message}")]
    Seed { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Storage,
    Seed,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CatalogueError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn brand_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "Brand",
            id: id.into(),
        }
    }

    pub fn model_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "Model",
            id: id.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation { .. } | Self::InvalidArgument { .. } => ErrorCategory::Validation,
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::Storage { .. } | Self::Io(_) | Self::Serialization(_) => ErrorCategory::Storage,
            Self::Http(_) | Self::Seed { .. } => ErrorCategory::Seed,
            Self::Config { .. }
            | Self::ConfigValidation { .. }
            | Self::InvalidConfigValue { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation | ErrorCategory::NotFound => ErrorSeverity::Low,
            ErrorCategory::Seed => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    /// Short message suitable for showing to the person at the keyboard.
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Validation { message } => message.clone(),
            Self::InvalidArgument { message } => format!("Invalid request: {}", message),
            Self::NotFound { entity, id } => format!("{} '{}' no longer exists", entity, id),
            Self::Storage { .. } | Self::Io(_) | Self::Serialization(_) => {
                "Unable to read or write the catalogue".to_string()
            }
            Self::Http(_) | Self::Seed { .. } => "Unable to load the seed catalogue".to_string(),
            Self::Config { message } => format!("Configuration problem: {}", message),
            Self::ConfigValidation { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            Self::InvalidConfigValue { field, reason, .. } => {
                format!("Configuration problem in '{}': {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Validation => "Correct the highlighted input and submit again",
            ErrorCategory::NotFound => "Refresh the catalogue listing; the entry may have been removed",
            ErrorCategory::Storage => "Check that the data directory exists and is writable",
            ErrorCategory::Seed => "Check the seed source location or start with an empty catalogue",
            ErrorCategory::Configuration => "Review the configuration file and command-line flags",
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogueError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_and_severity() {
        let err = CatalogueError::brand_not_found("brand-1");
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert_eq!(err.to_string(), "Brand not found: brand-1");

        let err = CatalogueError::Storage {
            message: "disk full".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_validation_message_is_shown_verbatim() {
        let err = CatalogueError::validation("Brand name is required.");
        assert_eq!(err.user_friendly_message(), "Brand name is required.");
    }
}
