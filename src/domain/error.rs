use thiserror::Error;

pub const INVALID_URL_MESSAGE: &str = "Please enter a valid URL";
pub const MISSING_API_KEY_MESSAGE: &str =
    "API key is not set. Set MEDIA_API_KEY in .env or your environment before running the app.";
pub const EMPTY_PAYLOAD_MESSAGE: &str = "Received empty file - please try again";
pub const SAVE_FAILED_MESSAGE: &str = "Failed to save file - please try again";
pub const NETWORK_FAILURE_MESSAGE: &str =
    "Network error - please check your connection and try again";

/// Every failure the downloader can surface. The display string is what the
/// user sees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("{}", INVALID_URL_MESSAGE)]
    Validation,

    #[error("{}", MISSING_API_KEY_MESSAGE)]
    Configuration,

    #[error("{0}")]
    Download(String),

    #[error("{}", EMPTY_PAYLOAD_MESSAGE)]
    EmptyPayload,

    #[error("{}", SAVE_FAILED_MESSAGE)]
    Save,

    #[error("{}", NETWORK_FAILURE_MESSAGE)]
    Network,
}
