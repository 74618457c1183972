use std::sync::Arc;

use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::foundation::error::{CardError, CardResult};

/// Immutable byte payload tagged with a MIME type.
///
/// Cloning is cheap; the bytes are shared.
#[derive(Clone, PartialEq, Eq)]
pub struct Blob {
    mime: String,
    bytes: Arc<[u8]>,
}

impl std::fmt::Debug for Blob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Blob")
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl Blob {
    /// Wrap `bytes` with MIME type `mime`.
    pub fn new(mime: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            mime: mime.into(),
            bytes: Arc::from(bytes.into()),
        }
    }

    /// MIME type, e.g. `image/jpeg`.
    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// Raw bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Payload length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// `true` when the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// `true` when the MIME type is in the `image/` family.
    pub fn is_image(&self) -> bool {
        is_image_mime(&self.mime)
    }

    /// Encode as a base64 `data:` URL.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.bytes))
    }

    /// Decode a base64 `data:` URL produced by [`Blob::to_data_url`].
    pub fn from_data_url(url: &str) -> CardResult<Self> {
        let rest = url
            .strip_prefix("data:")
            .ok_or_else(|| CardError::validation("data url must start with 'data:'"))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| CardError::validation("data url is missing ',' separator"))?;
        let mime = header.strip_suffix(";base64").ok_or_else(|| {
            CardError::validation("only base64-encoded data urls are supported")
        })?;
        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|e| CardError::validation(format!("invalid base64 payload: {e}")))?;
        Ok(Self::new(mime, bytes))
    }
}

/// `true` for MIME types in the `image/` family (case-insensitive).
pub fn is_image_mime(mime: &str) -> bool {
    mime.trim().to_ascii_lowercase().starts_with("image/")
}

#[cfg(test)]
#[path = "../../tests/unit/assets/blob.rs"]
mod tests;
