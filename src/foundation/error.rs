/// Convenience result type used across cardkit.
pub type CardResult<T> = Result<T, CardError>;

/// Error taxonomy for builder operations.
///
/// Every variant is scoped to the operation that raised it: callers report it and keep the
/// editor running.
#[derive(thiserror::Error, Debug)]
pub enum CardError {
    /// Invalid user-provided data (non-image file, non-positive size, bad colour).
    #[error("validation error: {0}")]
    Validation(String),

    /// An element needs a test asset that has not been uploaded in this session.
    #[error("missing asset: {0}")]
    MissingAsset(String),

    /// The target element is locked against manipulation.
    #[error("locked element: {0}")]
    Locked(String),

    /// Operation is not legal in the current crop session state.
    #[error("session state error: {0}")]
    SessionState(String),

    /// Image bytes could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Rasterization or encoding failed.
    #[error("render error: {0}")]
    Render(String),

    /// The upload collaborator rejected or failed the request.
    #[error("upload error: {0}")]
    Upload(String),

    /// Errors when serializing data for a store.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CardError {
    /// Build a [`CardError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CardError::MissingAsset`] value.
    pub fn missing_asset(msg: impl Into<String>) -> Self {
        Self::MissingAsset(msg.into())
    }

    /// Build a [`CardError::Locked`] value.
    pub fn locked(msg: impl Into<String>) -> Self {
        Self::Locked(msg.into())
    }

    /// Build a [`CardError::SessionState`] value.
    pub fn session_state(msg: impl Into<String>) -> Self {
        Self::SessionState(msg.into())
    }

    /// Build a [`CardError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`CardError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`CardError::Upload`] value.
    pub fn upload(msg: impl Into<String>) -> Self {
        Self::Upload(msg.into())
    }

    /// Build a [`CardError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// `true` for errors caused by transient IO (decode, render, upload) where a retry may
    /// succeed without changing the input.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Decode(_) | Self::Render(_) | Self::Upload(_) | Self::Other(_)
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
