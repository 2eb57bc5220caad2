//! Frame pacing for the explorer.
//!
//! [`FrameLoop`] calls a per-frame closure at a target rate, sleeping off the
//! rest of each frame's budget. With a rate of 0 it runs unpaced, which is
//! what headless runs and tests use.

use std::ops::ControlFlow;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

/// Frames slower than this many budgets are reported.
const SLOW_FRAME_FACTOR: u32 = 4;

pub struct FrameLoop {
    frame_budget: Option<Duration>,
    frame_count: u64,
    slow_frames: u64,
}

impl FrameLoop {
    /// `target_fps = 0` disables pacing.
    pub fn new(target_fps: u32) -> Self {
        let frame_budget =
            (target_fps > 0).then(|| Duration::from_secs_f64(1.0 / f64::from(target_fps)));
        Self {
            frame_budget,
            frame_count: 0,
            slow_frames: 0,
        }
    }

    pub fn unpaced() -> Self {
        Self::new(0)
    }

    pub fn frame_budget(&self) -> Option<Duration> {
        self.frame_budget
    }

    /// Frames run so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Frames that overran the budget by [`SLOW_FRAME_FACTOR`] or more.
    pub fn slow_frames(&self) -> u64 {
        self.slow_frames
    }

    /// Run up to `max_frames` frames. `frame_fn` gets the frame index and may
    /// stop the loop early with `ControlFlow::Break`. Returns the number of
    /// frames run by this call.
    pub fn run(
        &mut self,
        max_frames: u64,
        mut frame_fn: impl FnMut(u64) -> ControlFlow<()>,
    ) -> u64 {
        let mut ran = 0;
        while ran < max_frames {
            let started = Instant::now();
            let flow = frame_fn(self.frame_count);
            self.frame_count += 1;
            ran += 1;
            self.pace(started.elapsed());
            if flow.is_break() {
                debug!(frame = self.frame_count, "frame loop stopped early");
                break;
            }
        }
        ran
    }

    fn pace(&mut self, elapsed: Duration) {
        let Some(budget) = self.frame_budget else {
            return;
        };
        if elapsed >= budget * SLOW_FRAME_FACTOR {
            self.slow_frames += 1;
            warn!(
                "Frame took {:.1}ms, budget is {:.1}ms",
                elapsed.as_secs_f64() * 1000.0,
                budget.as_secs_f64() * 1000.0
            );
        }
        if let Some(remaining) = budget.checked_sub(elapsed) {
            std::thread::sleep(remaining);
        }
    }
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new(60)
    }
}
