use super::*;
use crate::foundation::core::Fps;

fn cfg() -> SinkConfig {
    SinkConfig {
        width: 854,
        height: 480,
        fps: Fps::new(20, 1).unwrap(),
    }
}

fn args_as_strings(opts: &FfmpegSinkOpts) -> Vec<String> {
    encoder_args(opts, &cfg())
        .into_iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect()
}

#[test]
fn webp_args_stream_raw_rgba_and_loop_forever() {
    let mut opts = FfmpegSinkOpts::new("out/board.webp");
    opts.threads = 8;
    let args = args_as_strings(&opts);

    let joined = args.join(" ");
    assert!(joined.starts_with("-y -threads 8 -f rawvideo -pix_fmt rgba -s 854x480"));
    assert!(joined.contains("-framerate 20/1 -i pipe:0"));
    assert!(joined.contains("-vcodec libwebp -compression_level 4 -q:v 75"));
    assert!(joined.ends_with("-loop 0 out/board.webp"));
}

#[test]
fn gif_args_skip_webp_quality_flags() {
    let mut opts = FfmpegSinkOpts::new("board.gif");
    opts.codec = AnimatedCodec::Gif;
    opts.overwrite = false;
    let args = args_as_strings(&opts);

    assert_eq!(args[0], "-n");
    assert!(args.windows(2).any(|w| w == ["-vcodec", "gif"]));
    assert!(!args.iter().any(|a| a == "-q:v"));
    assert_eq!(AnimatedCodec::Gif.extension(), "gif");
}

#[test]
fn flatten_premul_alpha_0_returns_bg() {
    let src = vec![0u8, 0, 0, 0];
    let mut dst = vec![0u8; 4];
    flatten_premul_over_bg_to_opaque_rgba8(&mut dst, &src, [10, 20, 30, 255]).unwrap();
    assert_eq!(dst, vec![10, 20, 30, 255]);
}

#[test]
fn flatten_premul_alpha_255_is_identity() {
    let src = vec![1u8, 2, 3, 255];
    let mut dst = vec![0u8; 4];
    flatten_premul_over_bg_to_opaque_rgba8(&mut dst, &src, [10, 20, 30, 255]).unwrap();
    assert_eq!(dst, src);
}

#[test]
fn push_before_begin_is_an_encode_error() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("unused.webp"));
    assert!(matches!(
        sink.push_frame(TickIndex(0), &FrameRGBA::transparent(1, 1)),
        Err(BoardError::Encode { .. })
    ));
    assert!(sink.end().is_err());
}

#[test]
fn codec_names_deserialize_lowercase() {
    let c: AnimatedCodec = serde_json::from_str("\"gif\"").unwrap();
    assert_eq!(c, AnimatedCodec::Gif);
}
