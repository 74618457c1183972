//! Card template document: an ordered stack of placed elements on a fixed-size stage.

/// Element types.
pub mod element;
/// The mutable document.
pub mod model;
/// Default element sizes and sample texts.
pub mod placement;
/// Serializable document copies.
pub mod snapshot;
