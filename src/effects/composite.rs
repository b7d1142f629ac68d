use crate::foundation::math::mul_div255_u8;
use crate::render::frame::FrameRGBA;

pub type PremulRgba8 = [u8; 4];

/// Source-over for one premultiplied pixel.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    let sa = src[3];
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(sa);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255(u16::from(dst[i]), inv));
    }
    out
}

/// Source-over `src` onto `dst` with `src`'s top-left at `(x, y)` in `dst` space.
///
/// At most `max_w x max_h` source pixels are drawn. Everything outside `dst` is clipped.
pub fn draw_over(dst: &mut FrameRGBA, src: &FrameRGBA, x: i64, y: i64, max_w: u32, max_h: u32) {
    let Some(span) = clip_span(dst, x, y, src.width.min(max_w), src.height.min(max_h)) else {
        return;
    };

    let dst_stride = dst.width as usize * 4;
    let src_stride = src.width as usize * 4;
    for row in 0..span.rows {
        let d_off = (span.dst_y + row) * dst_stride + span.dst_x * 4;
        let s_off = (span.src_y + row) * src_stride + span.src_x * 4;
        let d_row = &mut dst.data[d_off..d_off + span.cols * 4];
        let s_row = &src.data[s_off..s_off + span.cols * 4];
        for (d, s) in d_row.chunks_exact_mut(4).zip(s_row.chunks_exact(4)) {
            let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
            d.copy_from_slice(&out);
        }
    }
}

/// Overwrite a `w x h` region at `(x, y)` with transparent pixels, clipped to `dst`.
pub fn clear_region(dst: &mut FrameRGBA, x: i64, y: i64, w: u32, h: u32) {
    let Some(span) = clip_span(dst, x, y, w, h) else {
        return;
    };

    let dst_stride = dst.width as usize * 4;
    for row in 0..span.rows {
        let d_off = (span.dst_y + row) * dst_stride + span.dst_x * 4;
        dst.data[d_off..d_off + span.cols * 4].fill(0);
    }
}

#[derive(Debug, PartialEq, Eq)]
struct ClipSpan {
    dst_x: usize,
    dst_y: usize,
    src_x: usize,
    src_y: usize,
    cols: usize,
    rows: usize,
}

fn clip_span(dst: &FrameRGBA, x: i64, y: i64, w: u32, h: u32) -> Option<ClipSpan> {
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + i64::from(w)).min(i64::from(dst.width));
    let y1 = (y + i64::from(h)).min(i64::from(dst.height));
    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    Some(ClipSpan {
        dst_x: x0 as usize,
        dst_y: y0 as usize,
        src_x: (x0 - x) as usize,
        src_y: (y0 - y) as usize,
        cols: (x1 - x0) as usize,
        rows: (y1 - y0) as usize,
    })
}

fn mul_div255(x: u16, y: u16) -> u8 {
    mul_div255_u8(x, y)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
