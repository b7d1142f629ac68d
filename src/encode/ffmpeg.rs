use std::ffi::OsString;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::thread::JoinHandle;

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Canvas, TickIndex};
use crate::foundation::error::{BoardError, BoardResult};
use crate::foundation::math::mul_div255_u16;
use crate::render::frame::FrameRGBA;

/// Looping animated container produced by the encoder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimatedCodec {
    /// Animated WebP through `libwebp`.
    #[default]
    Webp,
    /// Animated GIF through ffmpeg's native encoder.
    Gif,
}

impl AnimatedCodec {
    /// Conventional file extension for this container.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Webp => "webp",
            Self::Gif => "gif",
        }
    }
}

/// Options for [`FfmpegSink`] output.
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    /// Output file path.
    pub out_path: PathBuf,
    /// Overwrite output file if it already exists.
    pub overwrite: bool,
    /// Output container/codec.
    pub codec: AnimatedCodec,
    /// Encoder quality, `0..=100`.
    pub quality: u8,
    /// `libwebp` compression effort, `0..=6`.
    pub compression_level: u8,
    /// Encoder thread count passed as `-threads`.
    pub threads: usize,
    /// Emit a loop-forever animation.
    pub loop_forever: bool,
    /// Background color used to flatten alpha (RGBA8, straight alpha).
    pub bg_rgba: [u8; 4],
}

impl FfmpegSinkOpts {
    /// Create options for a looping animated WebP at `out_path`.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            codec: AnimatedCodec::Webp,
            quality: 75,
            compression_level: 4,
            threads: std::thread::available_parallelism().map_or(1, |n| n.get()),
            loop_forever: true,
            bg_rgba: [0, 0, 0, 255],
        }
    }
}

type DrainHandle = JoinHandle<std::io::Result<Vec<u8>>>;

/// Sink that spawns the system `ffmpeg` and streams raw frames to its stdin.
///
/// `end` waits for the process, then reads the finished file back into memory.
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,

    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stdout_drain: Option<DrainHandle>,
    stderr_drain: Option<DrainHandle>,

    scratch: Vec<u8>,
    cfg: Option<SinkConfig>,
    last_idx: Option<TickIndex>,
}

impl FfmpegSink {
    /// Create a new sink that streams into `ffmpeg`.
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            child: None,
            stdin: None,
            stdout_drain: None,
            stderr_drain: None,
            scratch: Vec::new(),
            cfg: None,
            last_idx: None,
        }
    }

    /// Output path this sink writes to.
    pub fn out_path(&self) -> &Path {
        &self.opts.out_path
    }

    fn collect_log(&mut self) -> String {
        let mut log = Vec::new();
        for handle in [self.stdout_drain.take(), self.stderr_drain.take()]
            .into_iter()
            .flatten()
        {
            match handle.join() {
                Ok(Ok(bytes)) => log.extend_from_slice(&bytes),
                Ok(Err(e)) => log.extend_from_slice(format!("<log read failed: {e}>\n").as_bytes()),
                Err(_) => log.extend_from_slice(b"<log drain thread panicked>\n"),
            }
        }
        String::from_utf8_lossy(&log).into_owned()
    }

    fn abort_after_write_failure(&mut self, reason: String) -> BoardError {
        drop(self.stdin.take());
        self.cfg = None;
        let Some(mut child) = self.child.take() else {
            return BoardError::encode(reason);
        };
        let status = child.wait();
        let log = self.collect_log();
        let exit_code = status.as_ref().ok().and_then(|s| s.code());
        tracing::error!(?exit_code, log = %log.trim(), "ffmpeg stopped reading frames");
        match status {
            Ok(status) => BoardError::encode_exit(
                format!("{reason} (ffmpeg exited with status {status})"),
                exit_code,
                log,
            ),
            Err(e) => BoardError::encode_exit(
                format!("{reason} (failed to wait for ffmpeg: {e})"),
                None,
                log,
            ),
        }
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> BoardResult<()> {
        if cfg.fps.num == 0 || cfg.fps.den == 0 {
            return Err(BoardError::validation("fps must be non-zero"));
        }
        if cfg.width == 0 || cfg.height == 0 {
            return Err(BoardError::validation(
                "ffmpeg sink width/height must be non-zero",
            ));
        }
        if self.child.is_some() {
            return Err(BoardError::encode("ffmpeg sink already started"));
        }

        ensure_parent_dir(&self.opts.out_path)?;
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(BoardError::validation(format!(
                "output file '{}' already exists",
                self.opts.out_path.display()
            )));
        }

        if !is_ffmpeg_on_path() {
            return Err(BoardError::encode(
                "ffmpeg is required for board encoding, but was not found on PATH",
            ));
        }

        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .args(encoder_args(&self.opts, &cfg));

        let mut child = cmd.spawn().map_err(|e| {
            BoardError::encode(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| BoardError::encode("failed to open ffmpeg stdin (unexpected)"))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| BoardError::encode("failed to open ffmpeg stdout (unexpected)"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| BoardError::encode("failed to open ffmpeg stderr (unexpected)"))?;

        self.scratch = vec![
            0u8;
            Canvas {
                width: cfg.width,
                height: cfg.height,
            }
            .byte_len()
        ];
        self.stdout_drain = Some(spawn_drain(stdout));
        self.stderr_drain = Some(spawn_drain(stderr));
        self.child = Some(child);
        self.stdin = Some(stdin);
        self.cfg = Some(cfg);
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: TickIndex, frame: &FrameRGBA) -> BoardResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| BoardError::encode("ffmpeg sink not started"))?;
        if let Some(last) = self.last_idx
            && idx <= last
        {
            return Err(BoardError::encode(
                "ffmpeg sink received out-of-order tick index",
            ));
        }
        self.last_idx = Some(idx);

        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(BoardError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }

        // ffmpeg has no premultiplied rgba input; flatten first.
        flatten_premul_over_bg_to_opaque_rgba8(&mut self.scratch, &frame.data, self.opts.bg_rgba)?;

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(BoardError::encode("ffmpeg sink is already finalized"));
        };

        use std::io::Write as _;
        if let Err(e) = stdin.write_all(&self.scratch) {
            // ffmpeg closed its stdin early; its exit status and log carry the real cause.
            return Err(self.abort_after_write_failure(format!(
                "failed to write tick {} to ffmpeg stdin: {e}",
                idx.0
            )));
        }
        Ok(())
    }

    fn end(&mut self) -> BoardResult<Vec<u8>> {
        drop(self.stdin.take());
        let mut child = self
            .child
            .take()
            .ok_or_else(|| BoardError::encode("ffmpeg sink not started"))?;
        self.cfg = None;

        let status = child
            .wait()
            .map_err(|e| BoardError::encode(format!("failed to wait for ffmpeg to finish: {e}")))?;
        let log = self.collect_log();

        if !status.success() {
            tracing::error!(
                exit_code = ?status.code(),
                log = %log.trim(),
                "ffmpeg exited unsuccessfully"
            );
            return Err(BoardError::encode_exit(
                format!("ffmpeg exited with status {status}"),
                status.code(),
                log,
            ));
        }

        std::fs::read(&self.opts.out_path).map_err(|e| {
            BoardError::encode_exit(
                format!(
                    "failed to read encoded output '{}': {e}",
                    self.opts.out_path.display()
                ),
                status.code(),
                log,
            )
        })
    }
}

impl Drop for FfmpegSink {
    fn drop(&mut self) {
        drop(self.stdin.take());
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

/// Full ffmpeg argument list for one encode.
pub fn encoder_args(opts: &FfmpegSinkOpts, cfg: &SinkConfig) -> Vec<OsString> {
    let mut args: Vec<OsString> = Vec::new();
    let mut push = |s: &str| args.push(OsString::from(s));

    push(if opts.overwrite { "-y" } else { "-n" });
    push("-threads");
    push(&opts.threads.max(1).to_string());
    push("-f");
    push("rawvideo");
    push("-pix_fmt");
    push("rgba");
    push("-s");
    push(&format!("{}x{}", cfg.width, cfg.height));
    // Rational input rate, before `-i`.
    push("-framerate");
    push(&format!("{}/{}", cfg.fps.num, cfg.fps.den));
    push("-i");
    push("pipe:0");

    match opts.codec {
        AnimatedCodec::Webp => {
            push("-vcodec");
            push("libwebp");
            push("-compression_level");
            push(&opts.compression_level.to_string());
            push("-q:v");
            push(&opts.quality.to_string());
        }
        AnimatedCodec::Gif => {
            push("-vcodec");
            push("gif");
        }
    }
    push("-loop");
    push(if opts.loop_forever { "0" } else { "-1" });

    args.push(opts.out_path.clone().into_os_string());
    args
}

fn spawn_drain<R: Read + Send + 'static>(mut reader: R) -> DrainHandle {
    std::thread::spawn(move || {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Ok(bytes)
    })
}

fn flatten_premul_over_bg_to_opaque_rgba8(
    dst: &mut [u8],
    src_premul: &[u8],
    bg_rgba: [u8; 4],
) -> BoardResult<()> {
    if dst.len() != src_premul.len() || !dst.len().is_multiple_of(4) {
        return Err(BoardError::validation(
            "flatten_premul_over_bg_to_opaque_rgba8 expects equal-length rgba8 buffers",
        ));
    }

    let bg = [
        u16::from(bg_rgba[0]),
        u16::from(bg_rgba[1]),
        u16::from(bg_rgba[2]),
    ];
    for (d, s) in dst.chunks_exact_mut(4).zip(src_premul.chunks_exact(4)) {
        if s[3] == 255 {
            d.copy_from_slice(s);
            continue;
        }
        let inv = 255u16 - u16::from(s[3]);
        for c in 0..3 {
            d[c] = (u16::from(s[c]) + mul_div255_u16(bg[c], inv)).min(255) as u8;
        }
        d[3] = 255;
    }
    Ok(())
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> BoardResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
