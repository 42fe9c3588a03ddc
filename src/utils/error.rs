use thiserror::Error;

#[derive(Error, Debug)]
pub enum MixError {
    /// 計算失敗的唯一類型：型別轉換錯誤或算術錯誤
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Unknown operation: {name}")]
    UnknownOperation { name: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    ValidationError {
        field: String,
        value: String,
        reason: String,
    },
}

impl MixError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        MixError::InvalidInput {
            message: message.into(),
        }
    }

    /// 是否屬於呼叫端輸入造成的錯誤 (對應 HTTP 400)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            MixError::InvalidInput { .. }
                | MixError::UnknownOperation { .. }
                | MixError::SerializationError(_)
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            MixError::InvalidInput { message } => format!("Invalid input: {}", message),
            MixError::UnknownOperation { name } => format!("No calculation named '{}'", name),
            MixError::IoError(e) => format!("Could not read or write a file: {}", e),
            MixError::SerializationError(e) => format!("Request is not valid JSON: {}", e),
            MixError::ConfigError { message } => format!("Configuration problem: {}", message),
            MixError::ValidationError { field, reason, .. } => {
                format!("Configuration value '{}' rejected: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            MixError::InvalidInput { .. } => {
                "Check that every parameter is numeric and that lengths and dilutions are not zero"
            }
            MixError::UnknownOperation { .. } => "Run with --list to see the available calculations",
            MixError::IoError(_) => "Check the file path and permissions",
            MixError::SerializationError(_) => "Send a JSON object as the request body",
            MixError::ConfigError { .. } | MixError::ValidationError { .. } => {
                "Fix the defaults file and try again"
            }
        }
    }

    pub fn exit_code(&self) -> i32 {
        if self.is_client_error() {
            2
        } else {
            1
        }
    }
}

pub type Result<T> = std::result::Result<T, MixError>;
