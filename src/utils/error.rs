use thiserror::Error;

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Template render error: {message}")]
    TemplateRenderError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Config,
    Data,
    Render,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl LookupError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ApiError(_) => ErrorCategory::Network,
            Self::IoError(_) => ErrorCategory::System,
            Self::SerializationError(_) | Self::ProcessingError { .. } => ErrorCategory::Data,
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Config,
            Self::TemplateRenderError { .. } => ErrorCategory::Render,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Render => ErrorSeverity::High,
            ErrorCategory::Config | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => {
                "Check that the extraction and CRM services are reachable and retry"
            }
            ErrorCategory::Config => "Fix the configuration value and restart the service",
            ErrorCategory::Data => "Inspect the collaborator response payload for shape changes",
            ErrorCategory::Render => {
                "Verify the CRM collaborator returns company/premises/stage/invoice columns"
            }
            ErrorCategory::System => "Check file permissions and that the bind address is free",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ApiError(_) => "An upstream service did not respond properly".to_string(),
            Self::TemplateRenderError { .. } => {
                "The results page could not be rendered from the CRM data".to_string()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LookupError>;
