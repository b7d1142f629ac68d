use crate::assets::decode::decode_image;
use crate::assets::normalize::resample;
use crate::effects::composite::draw_over;
use crate::foundation::core::{Canvas, Rgba8Premul};
use crate::foundation::error::{BoardError, BoardResult};
use crate::render::frame::FrameRGBA;

/// The board's base canvas; each tick starts from a copy of it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Background {
    frame: FrameRGBA,
}

impl Background {
    /// Opaque black canvas.
    pub fn solid(canvas: Canvas) -> Self {
        Self {
            frame: FrameRGBA::filled(canvas.width, canvas.height, Rgba8Premul::black()),
        }
    }

    /// Scale an encoded image to the canvas and lay it over opaque black.
    pub fn from_image_bytes(canvas: Canvas, bytes: &[u8]) -> BoardResult<Self> {
        let image = decode_image(bytes)?;
        let scaled = resample(&image, canvas.width, canvas.height)?;
        let mut out = Self::solid(canvas);
        draw_over(&mut out.frame, &scaled, 0, 0, canvas.width, canvas.height);
        Ok(out)
    }

    /// Wrap an already composed premultiplied frame.
    pub fn from_frame(frame: FrameRGBA) -> BoardResult<Self> {
        if frame.width == 0 || frame.height == 0 {
            return Err(BoardError::validation("background must be non-empty"));
        }
        Ok(Self { frame })
    }

    /// Canvas size of this background.
    pub fn canvas(&self) -> Canvas {
        self.frame.canvas()
    }

    /// Borrow the background pixels.
    pub fn frame(&self) -> &FrameRGBA {
        &self.frame
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/background.rs"]
mod tests;
