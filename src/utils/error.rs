use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Ledger query failed: {message}")]
    OracleError { message: String },

    #[error("Insufficient balance: recorded {balance}, required {required}")]
    InsufficientBalanceError { balance: u128, required: u128 },

    #[error("Fulfillment provider rejected the order")]
    FulfillmentRejectedError,
}

pub type Result<T> = std::result::Result<T, RelayError>;
