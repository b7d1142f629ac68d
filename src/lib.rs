//! Stickerboard composites uploaded stickers (static or animated) onto one shared canvas and
//! encodes the result as a looping animated image.
//!
//! A render pass is driven by [`Stickerboard::render`]:
//!
//! - Snapshot the visible items from an [`ItemSource`]
//! - Decode, reconstruct and scale every sticker in parallel
//! - Composite each output tick over the background and stream it into a [`FrameSink`]
//! - Publish the encoded bytes for readers ([`Stickerboard::output`])
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod effects;

/// Sticker decoding, reconstruction and scaling.
pub mod assets;
/// Encoding sinks.
pub mod encode;
/// Board items and item sources.
pub mod items;
/// Rendering primitives and the tick timeline.
pub mod render;
/// The board service.
pub mod session;

pub use crate::foundation::core::{Canvas, Fps, PlacementRect, Rgba8Premul, TickIndex};
pub use crate::foundation::error::{BoardError, BoardResult};

pub use crate::assets::sniff::{ImageKind, sniff};
pub use crate::encode::ffmpeg::{AnimatedCodec, FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::items::descriptor::{ItemDescriptor, ItemSource, MemoryItemSource};
pub use crate::items::store::JsonItemStore;
pub use crate::render::background::Background;
pub use crate::render::frame::FrameRGBA;
pub use crate::session::board::{RenderReport, Stickerboard};
pub use crate::session::config::BoardConfig;
pub use crate::session::ready::ReadySwap;
