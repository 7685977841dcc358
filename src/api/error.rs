use thiserror::Error;

/// Failures talking to the fulfillment backend.
///
/// Nothing here is fatal to the process: callers surface the message and
/// leave it to the user to re-trigger. There is no automatic retry.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connect, timeout, body decode).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },
}

pub type Result<T> = std::result::Result<T, ApiError>;
