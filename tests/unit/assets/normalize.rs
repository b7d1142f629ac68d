use super::*;
use crate::foundation::core::Rgba8Premul;

fn still(w: u32, h: u32, color: Rgba8Premul) -> ReconstructedFrames {
    ReconstructedFrames::still(FrameRGBA::filled(w, h, color))
}

#[test]
fn scaled_dims_floor() {
    assert_eq!(scaled_dims(100, 50, 0.5), (50, 25));
    assert_eq!(scaled_dims(33, 33, 0.5), (16, 16));
    assert_eq!(scaled_dims(3, 3, 0.1), (0, 0));
}

#[test]
fn placement_flips_vertical_axis() {
    let r = placement_rect(10, 20, 40, 50, 480);
    assert_eq!(r.x0, 10);
    assert_eq!(r.y0, 480 - 20 - 50);
    assert_eq!(r.y0, 410);
    assert_eq!(r.x1, 50);
    assert_eq!(r.y1, 460);
}

#[test]
fn placement_allows_offscreen_offsets() {
    let r = placement_rect(-30, -10, 40, 50, 480);
    assert_eq!((r.x0, r.y0, r.x1, r.y1), (-30, 440, 10, 490));
}

#[test]
fn normalize_scales_and_places_still() {
    let sprite = normalize(
        still(100, 100, Rgba8Premul::black()),
        Placement {
            offset_x: 10,
            offset_y: 20,
            scale: 0.5,
        },
        480,
    )
    .unwrap();

    assert_eq!(sprite.frames.len(), 1);
    assert!(!sprite.is_animated());
    assert_eq!((sprite.frames[0].width, sprite.frames[0].height), (50, 50));
    assert_eq!(sprite.rect.y0, 410);
    assert_eq!(sprite.rect.width(), 50);
}

#[test]
fn resample_keeps_solid_color_and_valid_premul() {
    let src = FrameRGBA::filled(8, 8, Rgba8Premul::from_straight_rgba(200, 100, 50, 128));
    let out = resample(&src, 3, 5).unwrap();
    assert_eq!((out.width, out.height), (3, 5));
    for px in out.data.chunks_exact(4) {
        assert!(px[0] <= px[3] && px[1] <= px[3] && px[2] <= px[3]);
        assert!(px[3].abs_diff(128) <= 1);
    }
}

#[test]
fn resample_same_size_is_identity() {
    let mut src = FrameRGBA::transparent(2, 2);
    src.data[0..4].copy_from_slice(&[10, 20, 30, 40]);
    assert_eq!(resample(&src, 2, 2).unwrap(), src);
}

#[test]
fn rect_comes_from_first_frame_even_if_later_frames_differ() {
    let decoded = ReconstructedFrames {
        frames: vec![
            FrameRGBA::filled(10, 10, Rgba8Premul::black()),
            FrameRGBA::filled(20, 6, Rgba8Premul::black()),
        ],
        delays: vec![5, 5],
    };
    let sprite = normalize(
        decoded,
        Placement {
            offset_x: 0,
            offset_y: 0,
            scale: 1.0,
        },
        100,
    )
    .unwrap();

    assert_eq!(sprite.rect.width(), 10);
    assert_eq!(sprite.rect.height(), 10);
    assert_eq!((sprite.frames[1].width, sprite.frames[1].height), (20, 6));
    assert_eq!(sprite.delays, vec![5, 5]);
}

#[test]
fn tiny_scale_produces_empty_frames_not_errors() {
    let sprite = normalize(
        still(3, 3, Rgba8Premul::black()),
        Placement {
            offset_x: 0,
            offset_y: 0,
            scale: 0.1,
        },
        10,
    )
    .unwrap();
    assert!(sprite.rect.is_empty());
    assert!(sprite.frames[0].data.is_empty());
}

#[test]
fn invalid_scale_is_rejected() {
    for scale in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let res = normalize(
            still(4, 4, Rgba8Premul::black()),
            Placement {
                offset_x: 0,
                offset_y: 0,
                scale,
            },
            10,
        );
        assert!(matches!(res, Err(BoardError::Validation(_))));
    }
}
