//! Sticker sources: format sniffing, decoding, GIF frame reconstruction and scaling.

/// Per-format decoders producing premultiplied frames.
pub mod decode;
/// Scaling and placement of reconstructed frames.
pub mod normalize;
/// Disposal-aware reconstruction of animated sources.
pub mod reconstruct;
/// Magic-byte container classification.
pub mod sniff;
