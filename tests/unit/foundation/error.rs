use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        BoardError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(BoardError::decode("x").to_string().contains("decode error:"));
    assert!(BoardError::encode("x").to_string().contains("encode error:"));
}

#[test]
fn encode_exit_reports_code_and_keeps_log() {
    let err = BoardError::encode_exit("ffmpeg failed", Some(1), "Unknown encoder 'libwebp'");
    assert_eq!(err.to_string(), "encode error: ffmpeg failed (exit code 1)");
    assert_eq!(err.encoder_log(), Some("Unknown encoder 'libwebp'"));
    assert!(BoardError::decode("x").encoder_log().is_none());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = BoardError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
