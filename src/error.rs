use thiserror::Error;

/// Library errors using thiserror for structured error handling.
///
/// Playback failures are absorbed by the clip state machine and degrade to
/// silence; these types only surface through setup-time APIs (manifest
/// loading) and through logs.

#[derive(Error, Debug)]
pub enum DeviceError {
    #[error("Failed to initialize audio output stream")]
    StreamInit(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Failed to bind audio session")]
    BindFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Failed to prepare audio session")]
    PrepareFailed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("Sound asset not found: {path}")]
    NotFound { path: String },

    #[error("Failed to read sound asset: {path}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Failed to read sound manifest from {path}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse sound manifest")]
    ParseFailed(#[source] serde_json::Error),

    #[error("Invalid sound manifest: {0}")]
    Invalid(String),
}

/// Type alias for application Results using anyhow for context chaining
pub type SfxResult<T> = anyhow::Result<T>;
