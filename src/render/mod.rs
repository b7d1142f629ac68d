//! Board rendering: frames, background, parallel sprite preparation and the tick timeline.

/// Board background canvas.
pub mod background;
/// Owned premultiplied RGBA8 frames.
pub mod frame;
/// Indexed worker pool with first-error short-circuit.
pub mod parallel;
/// Per-tick frame selection and compositing.
pub mod timeline;
