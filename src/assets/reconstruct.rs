//! Turns raw animated-container frames (partial sub-images plus disposal instructions) into
//! self-contained full-size frames.

use crate::effects::composite::{clear_region, draw_over};
use crate::foundation::error::{BoardError, BoardResult};
use crate::render::frame::FrameRGBA;

/// How the drawing surface is prepared *after* a frame has been shown, before the next one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Disposal {
    /// No instruction; treated like [`Disposal::Keep`].
    #[default]
    None,
    /// Leave the frame in place.
    Keep,
    /// Clear the frame's own region to transparent.
    RestoreBackground,
    /// Restore the surface to what it was before the frame was drawn.
    RestorePrevious,
}

impl From<gif::DisposalMethod> for Disposal {
    fn from(d: gif::DisposalMethod) -> Self {
        match d {
            gif::DisposalMethod::Any => Self::None,
            gif::DisposalMethod::Keep => Self::Keep,
            gif::DisposalMethod::Background => Self::RestoreBackground,
            gif::DisposalMethod::Previous => Self::RestorePrevious,
        }
    }
}

/// One raw sub-image of an animated container.
#[derive(Clone, Debug)]
pub struct SourceFrame {
    /// Horizontal offset on the logical screen.
    pub left: u32,
    /// Vertical offset on the logical screen.
    pub top: u32,
    /// Sub-image pixels (premultiplied).
    pub image: FrameRGBA,
    /// Display duration in centiseconds.
    pub delay_centis: u32,
    /// Disposal applied before the *next* frame is drawn.
    pub disposal: Disposal,
}

/// A decoded animated container: logical screen size plus raw frames in order.
#[derive(Clone, Debug)]
pub struct AnimatedSource {
    /// Logical screen width.
    pub width: u32,
    /// Logical screen height.
    pub height: u32,
    /// Raw frames in display order.
    pub frames: Vec<SourceFrame>,
}

/// Fully composited frames ready for scaling.
///
/// `delays` is empty for still images and otherwise has one entry (centiseconds) per frame.
#[derive(Clone, Debug)]
pub struct ReconstructedFrames {
    /// Independent full-size frames; never empty.
    pub frames: Vec<FrameRGBA>,
    /// Per-frame display durations in centiseconds.
    pub delays: Vec<u32>,
}

impl ReconstructedFrames {
    /// Wrap a single still image.
    pub fn still(frame: FrameRGBA) -> Self {
        Self {
            frames: vec![frame],
            delays: Vec::new(),
        }
    }
}

/// Replay `source` onto a running composite, applying each frame's disposal before the next
/// frame is drawn, and emit a deep copy of the composite after every frame.
pub fn reconstruct(source: &AnimatedSource) -> BoardResult<ReconstructedFrames> {
    if source.frames.is_empty() {
        return Err(BoardError::decode("animated source contains no frames"));
    }

    let mut composite = FrameRGBA::transparent(source.width, source.height);
    let mut restore_to: Option<FrameRGBA> = None;
    let mut prev: Option<&SourceFrame> = None;

    let mut frames = Vec::with_capacity(source.frames.len());
    let mut delays = Vec::with_capacity(source.frames.len());

    for frame in &source.frames {
        if let Some(p) = prev {
            match p.disposal {
                Disposal::RestoreBackground => clear_region(
                    &mut composite,
                    i64::from(p.left),
                    i64::from(p.top),
                    p.image.width,
                    p.image.height,
                ),
                Disposal::RestorePrevious => {
                    if let Some(snapshot) = restore_to.take() {
                        composite = snapshot;
                    }
                }
                Disposal::None | Disposal::Keep => {}
            }
        }

        if frame.disposal == Disposal::RestorePrevious {
            restore_to = Some(composite.clone());
        }

        draw_over(
            &mut composite,
            &frame.image,
            i64::from(frame.left),
            i64::from(frame.top),
            frame.image.width,
            frame.image.height,
        );

        frames.push(composite.clone());
        delays.push(frame.delay_centis);
        prev = Some(frame);
    }

    Ok(ReconstructedFrames { frames, delays })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/reconstruct.rs"]
mod tests;
