use std::io::Cursor;

use crate::assets::reconstruct::{AnimatedSource, ReconstructedFrames, SourceFrame, reconstruct};
use crate::assets::sniff::ImageKind;
use crate::foundation::error::{BoardError, BoardResult};
use crate::foundation::math::premultiply_rgba8_in_place;
use crate::render::frame::FrameRGBA;

/// Decode encoded image bytes (any supported format) into premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> BoardResult<FrameRGBA> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| BoardError::decode(format!("decode image from memory: {e}")))?;
    into_premul_frame(dyn_img)
}

/// Decode a single-frame image of a known container format.
pub fn decode_still(bytes: &[u8], kind: ImageKind) -> BoardResult<FrameRGBA> {
    let format = match kind {
        ImageKind::Jpeg => image::ImageFormat::Jpeg,
        ImageKind::Png => image::ImageFormat::Png,
        ImageKind::Webp => image::ImageFormat::WebP,
        ImageKind::Gif => image::ImageFormat::Gif,
        ImageKind::Unknown => {
            return Err(BoardError::decode("no decoder available for UNKNOWN"));
        }
    };
    let dyn_img = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| BoardError::decode(format!("decode {kind} image: {e}")))?;
    into_premul_frame(dyn_img)
}

/// Parse every raw frame of a GIF, keeping sub-image offsets, delays and disposal methods.
pub fn decode_gif(bytes: &[u8]) -> BoardResult<AnimatedSource> {
    let mut opts = gif::DecodeOptions::new();
    opts.set_color_output(gif::ColorOutput::RGBA);
    let mut decoder = opts
        .read_info(Cursor::new(bytes))
        .map_err(|e| BoardError::decode(format!("read gif header: {e}")))?;

    let width = u32::from(decoder.width());
    let height = u32::from(decoder.height());
    let mut frames = Vec::new();

    while let Some(frame) = decoder
        .read_next_frame()
        .map_err(|e| BoardError::decode(format!("gif frame {}: {e}", frames.len())))?
    {
        let mut rgba = frame.buffer.to_vec();
        premultiply_rgba8_in_place(&mut rgba);
        let image = FrameRGBA::from_premul(u32::from(frame.width), u32::from(frame.height), rgba)
            .map_err(|e| BoardError::decode(format!("gif frame {}: {e}", frames.len())))?;
        frames.push(SourceFrame {
            left: u32::from(frame.left),
            top: u32::from(frame.top),
            image,
            delay_centis: u32::from(frame.delay),
            disposal: frame.dispose.into(),
        });
    }

    Ok(AnimatedSource {
        width,
        height,
        frames,
    })
}

/// Decode a sticker of the given format into self-contained frames.
///
/// GIFs go through disposal-aware reconstruction; every other format yields one still frame.
pub fn decode_sticker(bytes: &[u8], kind: ImageKind) -> BoardResult<ReconstructedFrames> {
    if kind.is_animated_container() {
        let source = decode_gif(bytes)?;
        return reconstruct(&source);
    }
    decode_still(bytes, kind).map(ReconstructedFrames::still)
}

fn into_premul_frame(dyn_img: image::DynamicImage) -> BoardResult<FrameRGBA> {
    let rgba = dyn_img.into_rgba8();
    let (width, height) = rgba.dimensions();
    let mut data = rgba.into_raw();
    premultiply_rgba8_in_place(&mut data);
    FrameRGBA::from_premul(width, height, data)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
