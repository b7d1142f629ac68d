use image::imageops::{self, FilterType};

use crate::assets::reconstruct::ReconstructedFrames;
use crate::foundation::core::PlacementRect;
use crate::foundation::error::{BoardError, BoardResult};
use crate::foundation::math::clamp_premul_in_place;
use crate::render::frame::FrameRGBA;

/// Where and how large a sticker is placed, in the uploader's bottom-left-origin convention.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Horizontal offset from the canvas left edge.
    pub offset_x: i32,
    /// Vertical offset from the canvas *bottom* edge.
    pub offset_y: i32,
    /// Uniform scale factor, finite and > 0.
    pub scale: f64,
}

/// One sticker ready to draw: scaled frames, their delays and a fixed placement rectangle.
#[derive(Clone, Debug)]
pub struct RenderedSprite {
    /// Scaled frames; never empty.
    pub frames: Vec<FrameRGBA>,
    /// Per-frame delays in centiseconds; empty or single-entry means static.
    pub delays: Vec<u32>,
    /// Canvas-space rectangle shared by every frame for the whole render pass.
    pub rect: PlacementRect,
}

impl RenderedSprite {
    /// Return `true` when the sprite animates (more than one frame).
    pub fn is_animated(&self) -> bool {
        self.frames.len() > 1
    }
}

/// `floor(w * scale) x floor(h * scale)`.
pub fn scaled_dims(width: u32, height: u32, scale: f64) -> (u32, u32) {
    let w = (f64::from(width) * scale).floor().max(0.0) as u32;
    let h = (f64::from(height) * scale).floor().max(0.0) as u32;
    (w, h)
}

/// Flip a bottom-left-origin offset into a top-left-origin rectangle of the given size.
pub fn placement_rect(
    offset_x: i32,
    offset_y: i32,
    width: u32,
    height: u32,
    canvas_height: u32,
) -> PlacementRect {
    let x0 = i64::from(offset_x);
    let y0 = i64::from(canvas_height) - i64::from(offset_y) - i64::from(height);
    PlacementRect {
        x0,
        y0,
        x1: x0 + i64::from(width),
        y1: y0 + i64::from(height),
    }
}

/// Smoothly resample a premultiplied frame (Catmull-Rom) to `width x height`.
pub fn resample(frame: &FrameRGBA, width: u32, height: u32) -> BoardResult<FrameRGBA> {
    if width == frame.width && height == frame.height {
        return Ok(frame.clone());
    }
    if width == 0 || height == 0 || frame.width == 0 || frame.height == 0 {
        return Ok(FrameRGBA::transparent(width, height));
    }

    let view = image::ImageBuffer::<image::Rgba<u8>, &[u8]>::from_raw(
        frame.width,
        frame.height,
        frame.data.as_slice(),
    )
    .ok_or_else(|| BoardError::validation("frame buffer smaller than its dimensions"))?;

    let mut data = imageops::resize(&view, width, height, FilterType::CatmullRom).into_raw();
    clamp_premul_in_place(&mut data);
    FrameRGBA::from_premul(width, height, data)
}

/// Scale every reconstructed frame and compute the sprite's placement once, from the first frame.
///
/// Later frames keep their own scaled size but are drawn inside the first frame's rectangle.
pub fn normalize(
    decoded: ReconstructedFrames,
    placement: Placement,
    canvas_height: u32,
) -> BoardResult<RenderedSprite> {
    if !placement.scale.is_finite() || placement.scale <= 0.0 {
        return Err(BoardError::validation(format!(
            "sticker scale must be finite and > 0, got {}",
            placement.scale
        )));
    }
    let first = decoded
        .frames
        .first()
        .ok_or_else(|| BoardError::decode("sticker has no frames"))?;

    let (rect_w, rect_h) = scaled_dims(first.width, first.height, placement.scale);
    let rect = placement_rect(
        placement.offset_x,
        placement.offset_y,
        rect_w,
        rect_h,
        canvas_height,
    );

    let frames = decoded
        .frames
        .iter()
        .map(|f| {
            let (w, h) = scaled_dims(f.width, f.height, placement.scale);
            resample(f, w, h)
        })
        .collect::<BoardResult<Vec<_>>>()?;

    Ok(RenderedSprite {
        frames,
        delays: decoded.delays,
        rect,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/normalize.rs"]
mod tests;
