use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use crate::assets::decode::decode_sticker;
use crate::assets::normalize::{RenderedSprite, normalize};
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::error::{BoardError, BoardResult};
use crate::items::descriptor::{ItemDescriptor, ItemSource};
use crate::render::background::Background;
use crate::render::parallel::{build_thread_pool, run_indexed};
use crate::render::timeline::TimelineCompositor;
use crate::session::config::BoardConfig;
use crate::session::ready::ReadySwap;

/// Summary of one successful render pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderReport {
    /// Items composited onto the board.
    pub items: usize,
    /// Ticks pushed to the sink.
    pub ticks: u32,
    /// Length of the published output.
    pub bytes: usize,
    /// Wall time of the whole pass.
    pub elapsed: Duration,
}

/// Owns the board's configuration, background and published output.
///
/// Render passes are not serialized here; callers run at most one at a time.
pub struct Stickerboard {
    cfg: BoardConfig,
    pool: rayon::ThreadPool,
    background: RwLock<Arc<Background>>,
    ready: ReadySwap,
}

impl std::fmt::Debug for Stickerboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stickerboard")
            .field("cfg", &self.cfg)
            .field("decode_workers", &self.pool.current_num_threads())
            .field("ready", &self.ready.is_ready())
            .finish_non_exhaustive()
    }
}

impl Stickerboard {
    /// Create a board with an opaque black background.
    pub fn new(cfg: BoardConfig) -> BoardResult<Self> {
        cfg.validate()?;
        let pool = build_thread_pool(cfg.decode_workers)?;
        let background = Background::solid(cfg.canvas);
        Ok(Self {
            cfg,
            pool,
            background: RwLock::new(Arc::new(background)),
            ready: ReadySwap::new(),
        })
    }

    /// Board configuration.
    pub fn config(&self) -> &BoardConfig {
        &self.cfg
    }

    /// Background used by the next render pass.
    pub fn background(&self) -> Arc<Background> {
        Arc::clone(&self.background.read().unwrap_or_else(|p| p.into_inner()))
    }

    /// Replace the background. A pass already in flight keeps the one it started with.
    pub fn set_background(&self, background: Background) -> BoardResult<()> {
        if background.canvas() != self.cfg.canvas {
            let c = background.canvas();
            return Err(BoardError::validation(format!(
                "background is {}x{}, board canvas is {}x{}",
                c.width, c.height, self.cfg.canvas.width, self.cfg.canvas.height
            )));
        }
        *self.background.write().unwrap_or_else(|p| p.into_inner()) = Arc::new(background);
        Ok(())
    }

    /// Most recently published output, if any pass has succeeded.
    pub fn output(&self) -> Option<Arc<[u8]>> {
        self.ready.load()
    }

    /// Return `true` once any pass has published output.
    pub fn is_ready(&self) -> bool {
        self.ready.is_ready()
    }

    /// Run one full render pass and publish its output.
    ///
    /// Every item is decoded and normalized before the sink is started, so a bad item means
    /// no frame reaches the encoder. On any failure the previous output stays published.
    #[tracing::instrument(skip_all, fields(ticks = self.cfg.ticks))]
    pub fn render(
        &self,
        source: &dyn ItemSource,
        sink: &mut dyn FrameSink,
    ) -> BoardResult<RenderReport> {
        let started = Instant::now();
        let background = self.background();
        let items = source.snapshot()?;

        let sprites = self.prepare_sprites(source, &items)?;
        let compositor =
            TimelineCompositor::new(background.frame(), &sprites, self.cfg.ticks, self.cfg.fps)?;

        sink.begin(SinkConfig {
            width: self.cfg.canvas.width,
            height: self.cfg.canvas.height,
            fps: self.cfg.fps,
        })?;
        let ticks = compositor.emit_all(sink)?;
        let bytes = sink.end()?;

        let report = RenderReport {
            items: sprites.len(),
            ticks,
            bytes: bytes.len(),
            elapsed: started.elapsed(),
        };
        self.ready.store(bytes);
        tracing::info!(
            items = report.items,
            ticks = report.ticks,
            bytes = report.bytes,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "board rendered"
        );
        Ok(report)
    }

    fn prepare_sprites(
        &self,
        source: &dyn ItemSource,
        items: &[ItemDescriptor],
    ) -> BoardResult<Vec<RenderedSprite>> {
        let canvas_height = self.cfg.canvas.height;
        run_indexed(&self.pool, items.len(), |i| {
            let item = &items[i];
            let sprite = source
                .read_blob(&item.hash)
                .and_then(|bytes| decode_sticker(&bytes, item.kind))
                .and_then(|frames| normalize(frames, item.placement(), canvas_height))
                .map_err(|e| with_item_context(i, item, e))?;
            tracing::debug!(
                index = i,
                hash = %item.hash,
                kind = %item.kind,
                frames = sprite.frames.len(),
                "sticker prepared"
            );
            Ok(sprite)
        })
    }
}

fn with_item_context(index: usize, item: &ItemDescriptor, err: BoardError) -> BoardError {
    match err {
        BoardError::Decode(msg) => {
            BoardError::decode(format!("item {index} ({}): {msg}", item.hash))
        }
        BoardError::Validation(msg) => {
            BoardError::validation(format!("item {index} ({}): {msg}", item.hash))
        }
        other => other,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/board.rs"]
mod tests;
