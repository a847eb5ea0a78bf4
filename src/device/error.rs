use std::io;

/// Failure of a single backend call. Poll failures are logged and dropped,
/// command failures are shown to the user; nothing here is ever panicked
/// across the client boundary.
#[derive(thiserror::Error, Debug)]
pub enum DeviceError {
    #[error("request failed: {0}")]
    Transport(#[from] ureq::Error),

    #[error("malformed response: {0}")]
    Malformed(#[from] io::Error),

    /// Backend answered but flagged the operation as failed.
    #[error("{0}")]
    Rejected(String),

    #[error("unreadable temperature: {0:?}")]
    BadReading(String),
}
