//! Frame statistics for the diagnostic dump
//!
//! Written by the render and event loops, read on demand. Values only need
//! to become visible eventually, so relaxed atomics are enough.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Timing figures shared between the two loops
#[derive(Debug, Default)]
pub struct FrameStats {
    last_frame_render_time_ms: AtomicU64,
    last_frame_event_time_ms: AtomicU64,
    frames_per_second_last_second: AtomicU64,
    frames_total: AtomicU64,
}

/// Plain copy of `FrameStats`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStatsSnapshot {
    pub last_frame_render_time_ms: u64,
    pub last_frame_event_time_ms: u64,
    pub frames_per_second_last_second: u64,
    pub frames_total: u64,
}

impl FrameStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_frame(&self, render_time: Duration) {
        self.last_frame_render_time_ms
            .store(render_time.as_millis() as u64, Ordering::Relaxed);
        self.frames_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_event_wait(&self, event_time: Duration) {
        self.last_frame_event_time_ms
            .store(event_time.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn record_frames_per_second(&self, frames: u64) {
        self.frames_per_second_last_second.store(frames, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> FrameStatsSnapshot {
        FrameStatsSnapshot {
            last_frame_render_time_ms: self.last_frame_render_time_ms.load(Ordering::Relaxed),
            last_frame_event_time_ms: self.last_frame_event_time_ms.load(Ordering::Relaxed),
            frames_per_second_last_second: self.frames_per_second_last_second.load(Ordering::Relaxed),
            frames_total: self.frames_total.load(Ordering::Relaxed),
        }
    }
}

impl FrameStatsSnapshot {
    /// Frame rate implied by the last frame's render time
    pub fn estimated_fps(&self) -> f64 {
        if self.last_frame_render_time_ms == 0 {
            f64::INFINITY
        } else {
            1000.0 / self.last_frame_render_time_ms as f64
        }
    }
}

/// Counts frames per wall-clock second on the render thread
#[derive(Debug)]
pub struct FpsCounter {
    window_start: Instant,
    frames: u64,
}

impl FpsCounter {
    pub fn new(now: Instant) -> Self {
        Self {
            window_start: now,
            frames: 0,
        }
    }

    /// Count one frame; returns the finished count when a second has passed
    pub fn tick(&mut self, now: Instant) -> Option<u64> {
        let finished = if now.duration_since(self.window_start) > Duration::from_secs(1) {
            let frames = self.frames;
            self.window_start = now;
            self.frames = 0;
            Some(frames)
        } else {
            None
        };
        self.frames += 1;
        finished
    }
}
