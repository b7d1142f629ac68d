use super::*;
use crate::assets::sniff::ImageKind;
use crate::encode::sink::InMemorySink;
use crate::foundation::core::Canvas;
use crate::items::descriptor::MemoryItemSource;

fn small_cfg() -> BoardConfig {
    BoardConfig {
        canvas: Canvas {
            width: 4,
            height: 4,
        },
        ticks: 3,
        decode_workers: Some(2),
        ..BoardConfig::default()
    }
}

fn item(hash: &str, kind: ImageKind) -> ItemDescriptor {
    ItemDescriptor {
        hash: hash.to_string(),
        kind,
        offset_x: 0,
        offset_y: 0,
        scale: 1.0,
        visible: true,
    }
}

#[test]
fn empty_board_publishes_background_frames() {
    let board = Stickerboard::new(small_cfg()).unwrap();
    let mut sink = InMemorySink::new();
    let report = board.render(&MemoryItemSource::new(), &mut sink).unwrap();

    assert_eq!(report.items, 0);
    assert_eq!(report.ticks, 3);
    assert_eq!(report.bytes, 3 * 4 * 4 * 4);
    assert!(board.is_ready());
    let out = board.output().unwrap();
    assert!(out.chunks_exact(4).all(|p| p == [0, 0, 0, 255]));
}

#[test]
fn item_errors_name_the_item() {
    let board = Stickerboard::new(small_cfg()).unwrap();
    let source = MemoryItemSource::new().with_item(item("feed", ImageKind::Png), b"junk".to_vec());
    let err = board.render(&source, &mut InMemorySink::new()).unwrap_err();
    assert!(matches!(err, BoardError::Decode(ref m) if m.starts_with("item 0 (feed)")));
    assert!(!board.is_ready());
}

#[test]
fn background_must_match_canvas() {
    let board = Stickerboard::new(small_cfg()).unwrap();
    assert!(
        board
            .set_background(Background::solid(Canvas {
                width: 2,
                height: 2
            }))
            .is_err()
    );
    board
        .set_background(Background::solid(small_cfg().canvas))
        .unwrap();
}

#[test]
fn invalid_config_is_rejected_up_front() {
    let cfg = BoardConfig {
        ticks: 0,
        ..small_cfg()
    };
    assert!(Stickerboard::new(cfg).is_err());
}
