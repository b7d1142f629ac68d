use std::path::{Path, PathBuf};

use crate::encode::ffmpeg::{AnimatedCodec, FfmpegSinkOpts};
use crate::foundation::core::{Canvas, Fps, TickIndex};
use crate::foundation::error::{BoardError, BoardResult};

/// Board configuration; every field has a default so partial JSON files are accepted.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoardConfig {
    /// Output canvas size.
    pub canvas: Canvas,
    /// Number of output ticks per render pass.
    pub ticks: u32,
    /// Output frame rate.
    pub fps: Fps,
    /// Output container.
    pub codec: AnimatedCodec,
    /// Encoder quality, `0..=100`.
    pub quality: u8,
    /// WebP compression effort, `0..=6`.
    pub compression_level: u8,
    /// Encoder thread count; `None` uses available parallelism.
    pub encoder_threads: Option<usize>,
    /// Decode worker count; `None` uses available parallelism.
    pub decode_workers: Option<usize>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 854,
                height: 480,
            },
            ticks: 100,
            fps: Fps { num: 20, den: 1 },
            codec: AnimatedCodec::Webp,
            quality: 75,
            compression_level: 4,
            encoder_threads: None,
            decode_workers: None,
        }
    }
}

impl BoardConfig {
    /// Load a JSON config file and validate it.
    pub fn from_path(path: &Path) -> BoardResult<Self> {
        use anyhow::Context as _;
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_str(&text).map_err(|e| {
            BoardError::validation(format!("parse config '{}': {e}", path.display()))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject configurations no render pass could use.
    pub fn validate(&self) -> BoardResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(BoardError::validation("canvas width/height must be > 0"));
        }
        if self.ticks == 0 {
            return Err(BoardError::validation("ticks must be > 0"));
        }
        Fps::new(self.fps.num, self.fps.den)?;
        if self.quality > 100 {
            return Err(BoardError::validation("quality must be in 0..=100"));
        }
        if self.compression_level > 6 {
            return Err(BoardError::validation("compression_level must be in 0..=6"));
        }
        if self.encoder_threads == Some(0) || self.decode_workers == Some(0) {
            return Err(BoardError::validation("thread counts must be >= 1 when set"));
        }
        Ok(())
    }

    /// Tick duration in centiseconds (`5` at the default 20 fps).
    pub fn tick_centis(&self) -> u64 {
        self.fps.elapsed_centis(TickIndex(1))
    }

    /// Encoder options for writing this board to `out_path`.
    pub fn ffmpeg_opts(&self, out_path: impl Into<PathBuf>) -> FfmpegSinkOpts {
        let mut opts = FfmpegSinkOpts::new(out_path);
        opts.codec = self.codec;
        opts.quality = self.quality;
        opts.compression_level = self.compression_level;
        if let Some(n) = self.encoder_threads {
            opts.threads = n;
        }
        opts
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/config.rs"]
mod tests;
