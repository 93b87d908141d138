use thiserror::Error;

/// Errors raised by the checkout core and its adapters.
///
/// Every variant except `Startup` and `Config` is recovered at the boundary of the
/// action that triggered it and surfaced to the user as a notification.
#[derive(Error, Debug)]
pub enum CheckoutError {
    #[error("no payment method selected")]
    NoSelection,
    #[error("unknown payment method: {0}")]
    UnknownMethod(String),
    #[error("payment submission failed: {0}")]
    SubmissionFailure(String),
    #[error("clipboard copy failed: {0}")]
    ClipboardFailure(String),
    #[error("start-up failed: {0}")]
    Startup(String),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CheckoutError>;
