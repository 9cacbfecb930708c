use thiserror::Error;

/// Errors raised while loading configuration from the environment or from
/// the watch seed file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read watches file {path}: {source}")]
    WatchesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse watches file: {0}")]
    WatchesFileParse(#[source] serde_yaml::Error),

    #[error("watches validation error: {0}")]
    Validation(String),
}

/// The sheet header does not satisfy the product-record contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("duplicate column header: {0}")]
    DuplicateColumn(String),

    #[error("sheet has no header row")]
    EmptySheet,
}

/// A mail transport could not deliver an alert.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("invalid address {address}: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("failed to build message: {0}")]
    Message(String),

    #[error("mail transport rejected the message: {0}")]
    Rejected(String),
}

/// Session-level misuse: bad watch input, oversized selection, or asking
/// for summaries before anything has been loaded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("brand name must be non-empty")]
    EmptyBrand,

    #[error("invalid notification email for brand '{brand}': {email}")]
    InvalidEmail { brand: String, email: String },

    #[error("at most {max} brands can be selected, got {requested}")]
    TooManyBrands { max: usize, requested: usize },

    #[error("no stock data loaded yet; run a load first")]
    NotLoaded,
}
