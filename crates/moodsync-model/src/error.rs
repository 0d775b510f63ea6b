use thiserror::Error;

/// Failures talking to the target store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("target store returned status {status}: {message}")]
    Api { status: u16, message: String },
    #[error("malformed store response: {0}")]
    Malformed(String),
}

/// Failures talking to the title generation service.
#[derive(Debug, Error)]
pub enum TitleError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("title service returned status {status}: {message}")]
    Api { status: u16, message: String },
    #[error("malformed title response: {0}")]
    Malformed(String),
}
