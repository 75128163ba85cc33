//! Renderer module for CGUI
//!
//! This module owns the render side of the two-thread design: a dedicated
//! thread that presents frames as fast as the swap chain allows, gated by
//! `RenderSync` so it never draws while the event thread is mid-resize.

use crate::geometry::IntPoint;
use crate::utils::error::{CguiError, Result};
use log::{debug, error, info, warn};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

pub mod gl_renderer;
pub mod shader;
pub mod stats;
pub mod sync;

pub use gl_renderer::{GlFrameTarget, GlSurfaceBundle};
pub use stats::{FrameStats, FrameStatsSnapshot};
pub use sync::{RenderSync, SyncState};

/// Pause between polls while the window has an empty framebuffer
const EMPTY_FRAMEBUFFER_BACKOFF: Duration = Duration::from_millis(16);

/// Something that can draw and present one frame
///
/// Implementations are created on, and only ever used from, the render thread.
pub trait FrameTarget {
    /// Draw and present one frame at `framebuffer_size`
    fn present(&mut self, framebuffer_size: IntPoint) -> Result<()>;
}

/// Run frames until the gate closes
///
/// Each frame waits for settled geometry, then presents while still holding
/// the gate's lock. Frame errors are logged and do not stop the loop.
pub fn run_render_loop<T: FrameTarget + ?Sized>(target: &mut T, sync: &RenderSync, stats: &FrameStats) {
    let mut fps = stats::FpsCounter::new(Instant::now());
    let mut failed_frames: u64 = 0;

    loop {
        let frame_start = Instant::now();

        let presented = {
            let Some(state) = sync.wait_settled() else {
                break;
            };

            let size = state.framebuffer_size;
            if size.x <= 0 || size.y <= 0 {
                false
            } else {
                if let Err(e) = target.present(size) {
                    failed_frames += 1;
                    if failed_frames == 1 {
                        warn!("Frame presentation failed: {}", e);
                    } else {
                        debug!("Frame presentation failed ({} so far): {}", failed_frames, e);
                    }
                }
                true
            }
        };

        if !presented {
            // Minimized or not yet mapped
            thread::sleep(EMPTY_FRAMEBUFFER_BACKOFF);
            continue;
        }

        let now = Instant::now();
        stats.record_frame(now.duration_since(frame_start));
        if let Some(frames) = fps.tick(now) {
            stats.record_frames_per_second(frames);
        }
    }

    if failed_frames > 0 {
        warn!("Render loop finished with {} failed frames", failed_frames);
    }
}

/// Handle to the render thread
pub struct RenderThread {
    handle: Option<JoinHandle<()>>,
    sync: Arc<RenderSync>,
}

impl RenderThread {
    /// Spawn the render thread
    ///
    /// `init` runs on the new thread and builds the frame target there, so
    /// thread-affine resources such as a GL context are attached to the
    /// render thread only. If `init` fails, `on_fatal` receives the error and
    /// the thread exits without drawing.
    pub fn spawn<T, F, E>(init: F, sync: Arc<RenderSync>, stats: Arc<FrameStats>, on_fatal: E) -> Result<Self>
    where
        T: FrameTarget,
        F: FnOnce() -> Result<T> + Send + 'static,
        E: FnOnce(CguiError) + Send + 'static,
    {
        let thread_sync = sync.clone();
        let handle = thread::Builder::new()
            .name("cgui-render".to_string())
            .spawn(move || {
                info!("Renderer has been assigned to thread {:?}", thread::current().id());

                let mut target = match init() {
                    Ok(target) => target,
                    Err(e) => {
                        error!("Render thread initialization failed: {}", e);
                        on_fatal(e);
                        return;
                    }
                };

                run_render_loop(&mut target, &thread_sync, &stats);
                debug!("Render thread is exiting");
            })
            .map_err(|e| CguiError::Sync(format!("Failed to spawn render thread: {}", e)))?;

        Ok(Self {
            handle: Some(handle),
            sync,
        })
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().map(|h| !h.is_finished()).unwrap_or(false)
    }

    /// Close the gate and join the thread
    ///
    /// A thread stuck inside a blocking graphics call is not interrupted;
    /// this returns once that call does.
    pub fn shutdown(&mut self) {
        self.sync.close();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("Render thread panicked");
            }
        }
    }
}

impl Drop for RenderThread {
    fn drop(&mut self) {
        self.shutdown();
    }
}
