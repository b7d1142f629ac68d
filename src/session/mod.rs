//! Board service: configuration, render passes and the published output slot.

/// The `Stickerboard` render service.
pub mod board;
/// Board configuration.
pub mod config;
/// Single-slot published output cache.
pub mod ready;
