use crate::assets::url::ObjectUrl;

/// Client-generated asset identifier, independent of any backend id.
#[derive(
    Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct AssetId(String);

impl AssetId {
    /// Fresh random identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Wrap an existing identifier, e.g. one read back from a saved template.
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Slot an asset is uploaded into. Drives sizing conventions only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetRole {
    /// Card background; resizes the canvas when committed.
    Background,
    /// Speaker headshot test asset.
    Headshot,
    /// Company logo test asset.
    Logo,
}

impl AssetRole {
    /// Lowercase name used in logs and upload metadata.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Headshot => "headshot",
            Self::Logo => "logo",
        }
    }
}

impl std::fmt::Display for AssetRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An uploaded or cropped image held by the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Asset {
    /// Client-side identifier.
    pub id: AssetId,
    /// Slot this asset belongs to.
    pub role: AssetRole,
    /// Session-local preview reference; revoked when the asset is superseded.
    pub local_preview_url: ObjectUrl,
    /// Durable URL, set once an upload round-trip completes.
    pub remote_url: Option<String>,
    /// Identifier assigned by the upload collaborator, if uploaded.
    pub server_id: Option<String>,
    /// Natural width in pixels.
    pub width: u32,
    /// Natural height in pixels.
    pub height: u32,
}

/// Headshot/logo assets available for manual placement. Never persisted.
#[derive(Clone, Debug, Default)]
pub struct TestAssets {
    /// Latest committed headshot.
    pub headshot: Option<Asset>,
    /// Latest committed logo.
    pub logo: Option<Asset>,
}

impl TestAssets {
    /// Test asset for `role`; always `None` for [`AssetRole::Background`].
    pub fn get(&self, role: AssetRole) -> Option<&Asset> {
        match role {
            AssetRole::Headshot => self.headshot.as_ref(),
            AssetRole::Logo => self.logo.as_ref(),
            AssetRole::Background => None,
        }
    }

    pub(crate) fn slot_mut(&mut self, role: AssetRole) -> Option<&mut Option<Asset>> {
        match role {
            AssetRole::Headshot => Some(&mut self.headshot),
            AssetRole::Logo => Some(&mut self.logo),
            AssetRole::Background => None,
        }
    }
}

/// A file picked by the user, before any validation.
#[derive(Clone, Debug)]
pub struct SelectedFile {
    /// Original file name.
    pub name: String,
    /// Declared MIME type.
    pub mime: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    /// Construct from parts.
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes,
        }
    }
}
