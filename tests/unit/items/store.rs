use super::*;

const DB: &str = r#"{
    "stickers": [
        {
            "created": "2023-01-02T03:04:05Z",
            "user_address": "127.0.0.1",
            "user_name": "a",
            "user_url": "",
            "message": "hi",
            "visible": true,
            "offset_x": 10,
            "offset_y": 20,
            "image_scale": 0.5,
            "image_height": 100,
            "image_width": 100,
            "image_type": "PNG",
            "image_hash": "abc123"
        },
        {
            "visible": false,
            "offset_x": 0,
            "offset_y": 0,
            "image_scale": 1.0,
            "image_type": "GIF",
            "image_hash": "hidden"
        },
        {
            "visible": true,
            "offset_x": -5,
            "offset_y": 7,
            "image_scale": 2.0,
            "image_type": "BMP",
            "image_hash": "def456"
        }
    ]
}"#;

#[test]
fn snapshot_keeps_visible_items_in_order() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(DATABASE_FILE), DB).unwrap();

    let items = JsonItemStore::new(dir.path()).snapshot().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].hash, "abc123");
    assert_eq!(items[0].kind, ImageKind::Png);
    assert_eq!((items[0].offset_x, items[0].offset_y), (10, 20));
    assert_eq!(items[0].scale, 0.5);
    assert_eq!(items[1].hash, "def456");
    assert_eq!(items[1].kind, ImageKind::Unknown);
}

#[test]
fn missing_database_is_an_empty_board() {
    let dir = tempfile::tempdir().unwrap();
    assert!(JsonItemStore::new(dir.path()).snapshot().unwrap().is_empty());
}

#[test]
fn malformed_database_is_a_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(DATABASE_FILE), "{not json").unwrap();
    assert!(matches!(
        JsonItemStore::new(dir.path()).snapshot(),
        Err(BoardError::Decode(_))
    ));
}

#[test]
fn blobs_are_read_by_hash() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("abc123"), b"bytes").unwrap();
    let store = JsonItemStore::new(dir.path());

    assert_eq!(store.read_blob("abc123").unwrap(), b"bytes");
    assert!(matches!(
        store.read_blob("missing"),
        Err(BoardError::Decode(_))
    ));
}

#[test]
fn blob_hash_cannot_escape_the_data_dir() {
    let store = JsonItemStore::new("data");
    for bad in ["", "../etc/passwd", "a/b", "database.json"] {
        assert!(store.read_blob(bad).is_err(), "{bad}");
    }
}
