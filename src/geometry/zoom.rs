use crate::foundation::core::Size;

/// Natural/container ratio above which a freshly loaded image is zoomed out.
pub const AUTO_ZOOM_RATIO: f64 = 2.0;

/// Fixed zoom applied when [`AUTO_ZOOM_RATIO`] is exceeded on either axis.
///
/// This is deliberately not a best-fit zoom.
pub const AUTO_ZOOM_TARGET: f64 = 0.3;

/// Return `true` when either natural dimension exceeds twice the container dimension.
pub fn needs_auto_zoom(natural: Size, container: Size) -> bool {
    natural.width > AUTO_ZOOM_RATIO * container.width
        || natural.height > AUTO_ZOOM_RATIO * container.height
}

/// Zoom level the crop viewport should switch to after layout, if any.
pub fn auto_zoom(natural: Size, container: Size) -> Option<f64> {
    needs_auto_zoom(natural, container).then_some(AUTO_ZOOM_TARGET)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/zoom.rs"]
mod tests;
