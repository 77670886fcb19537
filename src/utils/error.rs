use thiserror::Error;

#[derive(Error, Debug)]
pub enum NumcheckError {
    #[error("Unsupported country code: {code}")]
    UnsupportedCountryCode { code: String },

    #[error("Quantity {value} is out of range ({min}-{max})")]
    QuantityOutOfRange { value: u32, min: u32, max: u32 },

    #[error("Validator request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Validator responded with status {status}")]
    UpstreamStatus { status: u16 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Store error: {message}")]
    StoreError { message: String },

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
}

impl NumcheckError {
    /// 使用者輸入錯誤 (不支援的國碼、數量超出範圍)
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            NumcheckError::UnsupportedCountryCode { .. } | NumcheckError::QuantityOutOfRange { .. }
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            NumcheckError::UnsupportedCountryCode { code } => {
                format!("Unsupported country code: {}", code)
            }
            NumcheckError::QuantityOutOfRange { min, max, .. } => {
                format!("Quantity must be between {} and {}", min, max)
            }
            NumcheckError::ApiError(_) | NumcheckError::UpstreamStatus { .. } => {
                "The validation service is unavailable".to_string()
            }
            NumcheckError::IoError(_) | NumcheckError::StoreError { .. } => {
                "The document store is unavailable".to_string()
            }
            NumcheckError::SerializationError(_) => "Malformed data".to_string(),
            NumcheckError::ConfigValidationError { .. }
            | NumcheckError::InvalidConfigValueError { .. }
            | NumcheckError::MissingConfigError { .. } => format!("Invalid configuration: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, NumcheckError>;
