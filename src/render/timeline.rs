use crate::assets::normalize::RenderedSprite;
use crate::effects::composite::draw_over;
use crate::encode::sink::FrameSink;
use crate::foundation::core::{Fps, TickIndex};
use crate::foundation::error::{BoardError, BoardResult};
use crate::render::frame::FrameRGBA;

/// Index of the frame on display `elapsed_centis` into a cyclic delay sequence.
///
/// Walks the delays, accumulating display time, until the running total exceeds the
/// (loop-reduced) elapsed time. Single-frame sequences and sequences whose delays sum to zero
/// always show frame 0.
pub fn frame_for_elapsed(delays: &[u32], elapsed_centis: u64) -> usize {
    if delays.len() <= 1 {
        return 0;
    }
    let total: u64 = delays.iter().copied().map(u64::from).sum();
    if total == 0 {
        return 0;
    }

    let into_loop = elapsed_centis % total;
    let mut acc = 0u64;
    for (i, d) in delays.iter().enumerate() {
        acc += u64::from(*d);
        if acc > into_loop {
            return i;
        }
    }
    0
}

/// Precomputed tick -> frame lookup for one sprite over one render pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameClock {
    by_tick: Vec<usize>,
}

impl FrameClock {
    /// Build the lookup for `ticks` ticks at `fps`, clamped to `frame_count` frames.
    pub fn new(delays: &[u32], frame_count: usize, ticks: u32, fps: Fps) -> Self {
        let last = frame_count.saturating_sub(1);
        let by_tick = (0..ticks)
            .map(|t| frame_for_elapsed(delays, fps.elapsed_centis(TickIndex(t))).min(last))
            .collect();
        Self { by_tick }
    }

    /// Frame index to draw at `tick`; ticks past the precomputed range show frame 0.
    pub fn frame_at(&self, tick: TickIndex) -> usize {
        self.by_tick.get(tick.0 as usize).copied().unwrap_or(0)
    }
}

/// Draws every sprite, in order, over a fresh copy of the background for each output tick.
#[derive(Debug)]
pub struct TimelineCompositor<'a> {
    background: &'a FrameRGBA,
    sprites: &'a [RenderedSprite],
    clocks: Vec<FrameClock>,
    ticks: u32,
}

impl<'a> TimelineCompositor<'a> {
    /// Prepare a compositor; every sprite's placement and frame clock is fixed from here on.
    pub fn new(
        background: &'a FrameRGBA,
        sprites: &'a [RenderedSprite],
        ticks: u32,
        fps: Fps,
    ) -> BoardResult<Self> {
        if let Some(i) = sprites.iter().position(|s| s.frames.is_empty()) {
            return Err(BoardError::validation(format!("sprite {i} has no frames")));
        }
        let clocks = sprites
            .iter()
            .map(|s| FrameClock::new(&s.delays, s.frames.len(), ticks, fps))
            .collect();
        Ok(Self {
            background,
            sprites,
            clocks,
            ticks,
        })
    }

    /// Number of output ticks this compositor emits.
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Compose tick `tick` into `canvas`, overwriting its previous contents.
    pub fn compose_into(&self, tick: TickIndex, canvas: &mut FrameRGBA) {
        canvas.width = self.background.width;
        canvas.height = self.background.height;
        canvas.data.clear();
        canvas.data.extend_from_slice(&self.background.data);

        for (sprite, clock) in self.sprites.iter().zip(&self.clocks) {
            let frame = &sprite.frames[clock.frame_at(tick)];
            let rect = sprite.rect;
            draw_over(canvas, frame, rect.x0, rect.y0, rect.width(), rect.height());
        }
    }

    /// Compose tick `tick` into a new frame.
    pub fn compose(&self, tick: TickIndex) -> FrameRGBA {
        let mut canvas = self.background.clone();
        self.compose_into(tick, &mut canvas);
        canvas
    }

    /// Push every tick, in order, to `sink`. The caller owns `begin`/`end`.
    pub fn emit_all(&self, sink: &mut dyn FrameSink) -> BoardResult<u32> {
        let mut canvas = self.background.clone();
        for t in 0..self.ticks {
            let tick = TickIndex(t);
            self.compose_into(tick, &mut canvas);
            sink.push_frame(tick, &canvas)?;
        }
        Ok(self.ticks)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/timeline.rs"]
mod tests;
