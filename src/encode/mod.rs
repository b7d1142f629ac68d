//! Encoding sinks.
//!
//! Sinks consume composited board frames in tick order and are driven by `Stickerboard::render`.

/// `ffmpeg`-based sink (animated WebP/GIF via system `ffmpeg`).
pub mod ffmpeg;
/// Generic frame sink trait and built-in sinks.
pub mod sink;
