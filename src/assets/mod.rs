//! Asset handling: blobs, object URLs, decoding, uploads and the select → crop → commit pipeline.

/// Asset identity, roles and test-asset slots.
pub mod asset;
/// In-memory binary payloads.
pub mod blob;
/// Image decoding helpers.
pub mod decode;
/// Select → crop → commit sequencing and asset ownership.
pub mod pipeline;
/// Upload collaborator boundary.
pub mod upload;
/// Session-local object URLs.
pub mod url;
