use super::*;
use crate::foundation::core::Rgba8Premul;

const RED: [u8; 4] = [255, 0, 0, 255];
const GREEN: [u8; 4] = [0, 255, 0, 255];
const CLEAR: [u8; 4] = [0, 0, 0, 0];

fn solid(w: u32, h: u32, px: [u8; 4]) -> FrameRGBA {
    FrameRGBA::filled(
        w,
        h,
        Rgba8Premul {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        },
    )
}

fn frame(left: u32, top: u32, image: FrameRGBA, delay: u32, disposal: Disposal) -> SourceFrame {
    SourceFrame {
        left,
        top,
        image,
        delay_centis: delay,
        disposal,
    }
}

#[test]
fn restore_background_clears_previous_region() {
    let source = AnimatedSource {
        width: 4,
        height: 4,
        frames: vec![
            frame(0, 0, solid(2, 2, RED), 10, Disposal::RestoreBackground),
            frame(2, 2, solid(2, 2, GREEN), 20, Disposal::None),
        ],
    };

    let out = reconstruct(&source).unwrap();
    assert_eq!(out.frames.len(), 2);
    assert_eq!(out.delays, vec![10, 20]);

    // Disposal affects the next frame's surface, not the frame itself.
    assert_eq!(out.frames[0].pixel(0, 0), Some(RED));
    assert_eq!(out.frames[1].pixel(0, 0), Some(CLEAR));
    assert_eq!(out.frames[1].pixel(1, 1), Some(CLEAR));
    assert_eq!(out.frames[1].pixel(3, 3), Some(GREEN));
}

#[test]
fn keep_accumulates_frames() {
    let source = AnimatedSource {
        width: 4,
        height: 1,
        frames: vec![
            frame(0, 0, solid(1, 1, RED), 5, Disposal::Keep),
            frame(3, 0, solid(1, 1, GREEN), 5, Disposal::None),
        ],
    };

    let out = reconstruct(&source).unwrap();
    assert_eq!(out.frames[1].pixel(0, 0), Some(RED));
    assert_eq!(out.frames[1].pixel(3, 0), Some(GREEN));
}

#[test]
fn restore_previous_rewinds_to_pre_frame_snapshot() {
    let source = AnimatedSource {
        width: 2,
        height: 1,
        frames: vec![
            frame(0, 0, solid(1, 1, RED), 5, Disposal::Keep),
            frame(1, 0, solid(1, 1, GREEN), 5, Disposal::RestorePrevious),
            frame(0, 0, solid(1, 1, CLEAR), 5, Disposal::None),
        ],
    };

    let out = reconstruct(&source).unwrap();
    assert_eq!(out.frames[1].pixel(1, 0), Some(GREEN));
    // Frame 1 (green) is undone before frame 2 draws; frame 0's red survives.
    assert_eq!(out.frames[2].pixel(0, 0), Some(RED));
    assert_eq!(out.frames[2].pixel(1, 0), Some(CLEAR));
}

#[test]
fn emitted_frames_are_independent_copies() {
    let source = AnimatedSource {
        width: 1,
        height: 1,
        frames: vec![
            frame(0, 0, solid(1, 1, RED), 5, Disposal::RestoreBackground),
            frame(0, 0, solid(1, 1, CLEAR), 5, Disposal::None),
        ],
    };
    let out = reconstruct(&source).unwrap();
    assert_eq!(out.frames[0].pixel(0, 0), Some(RED));
    assert_eq!(out.frames[1].pixel(0, 0), Some(CLEAR));
}

#[test]
fn sub_images_past_the_logical_screen_are_clipped() {
    let source = AnimatedSource {
        width: 2,
        height: 2,
        frames: vec![frame(1, 1, solid(3, 3, GREEN), 5, Disposal::None)],
    };
    let out = reconstruct(&source).unwrap();
    assert_eq!(out.frames[0].width, 2);
    assert_eq!(out.frames[0].pixel(1, 1), Some(GREEN));
    assert_eq!(out.frames[0].pixel(0, 0), Some(CLEAR));
}

#[test]
fn empty_source_is_a_decode_error() {
    let source = AnimatedSource {
        width: 1,
        height: 1,
        frames: vec![],
    };
    assert!(matches!(reconstruct(&source), Err(BoardError::Decode(_))));
}

#[test]
fn gif_disposal_methods_map_one_to_one() {
    assert_eq!(Disposal::from(gif::DisposalMethod::Any), Disposal::None);
    assert_eq!(Disposal::from(gif::DisposalMethod::Keep), Disposal::Keep);
    assert_eq!(
        Disposal::from(gif::DisposalMethod::Background),
        Disposal::RestoreBackground
    );
    assert_eq!(
        Disposal::from(gif::DisposalMethod::Previous),
        Disposal::RestorePrevious
    );
}
