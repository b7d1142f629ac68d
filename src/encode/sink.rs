use crate::foundation::core::{Fps, TickIndex};
use crate::foundation::error::{BoardError, BoardResult};
use crate::render::frame::FrameRGBA;

/// Configuration provided to a [`FrameSink`] at the start of a render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Output frames-per-second.
    pub fps: Fps,
}

/// Sink contract for consuming composited board frames in tick order.
///
/// Ordering contract: `push_frame` is called in strictly increasing `TickIndex` order, and
/// only between one `begin` and the matching `end`.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> BoardResult<()>;
    /// Push one frame in strictly increasing tick order.
    fn push_frame(&mut self, idx: TickIndex, frame: &FrameRGBA) -> BoardResult<()>;
    /// Finalize the stream and return the encoded output bytes.
    fn end(&mut self) -> BoardResult<Vec<u8>>;
}

/// In-memory sink for tests and debugging.
///
/// Its "encoded" output is the raw premultiplied frames concatenated in tick order.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    begun: u32,
    pub(crate) frames: Vec<(TickIndex, FrameRGBA)>,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(TickIndex, FrameRGBA)] {
        &self.frames
    }

    /// Number of times `begin` has been called.
    pub fn begin_count(&self) -> u32 {
        self.begun
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> BoardResult<()> {
        self.cfg = Some(cfg);
        self.begun += 1;
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: TickIndex, frame: &FrameRGBA) -> BoardResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| BoardError::encode("in-memory sink not started"))?;
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(BoardError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        if let Some((last, _)) = self.frames.last()
            && idx <= *last
        {
            return Err(BoardError::encode(
                "in-memory sink received out-of-order tick index",
            ));
        }
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> BoardResult<Vec<u8>> {
        if self.cfg.is_none() {
            return Err(BoardError::encode("in-memory sink not started"));
        }
        Ok(self
            .frames
            .iter()
            .flat_map(|(_, f)| f.data.iter().copied())
            .collect())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
