//! Capture-display loop.
//!
//! Each iteration grabs a frame, copies it into the loop-owned pixel
//! buffer under the display lock, hands the frame back to the camera,
//! fixes the byte order if needed, and presents the buffer. A missing
//! or wrong-sized frame is logged and skipped; the buffer and the
//! display stay untouched for that iteration.
//!
//! The loop itself never exits in firmware (`run` is called with an
//! always-true condition); tests bound it by iteration count through
//! the same condition.

use crate::camera::frame::{self, FrameError};
use crate::camera::Camera;
use embassy_futures::yield_now;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::Mutex;

/// Where presented frames go. Implementations blit the pixel buffer to
/// the panel and queue the region for redraw.
pub trait PreviewSurface {
    fn present(&mut self, pixels: &[u8]);
}

/// What one iteration did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    /// A frame was copied and presented.
    Presented,
    /// The camera produced nothing this iteration.
    NoFrame,
    /// The frame was rejected before touching the buffer.
    BadFrame(FrameError),
}

/// Iteration counters. Used by test stop-conditions; the firmware
/// never escalates on them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PreviewStats {
    pub presented: u32,
    pub skipped: u32,
}

/// The capture-display loop: a camera, the loop-owned frame buffer,
/// and the byte-order policy.
pub struct Preview<'b, C> {
    camera: C,
    frame_buf: &'b mut [u8],
    swap_bytes: bool,
    stats: PreviewStats,
}

impl<'b, C: Camera> Preview<'b, C> {
    /// Take ownership of the camera and the (pre-allocated) buffer.
    pub fn new(camera: C, frame_buf: &'b mut [u8], swap_bytes: bool) -> Self {
        Self {
            camera,
            frame_buf,
            swap_bytes,
            stats: PreviewStats::default(),
        }
    }

    pub fn stats(&self) -> PreviewStats {
        self.stats
    }

    /// Run one iteration against the shared display.
    ///
    /// The surface lock is taken only after a frame has arrived and is
    /// held across copy, swap, and present; the captured frame is
    /// released right after the copy, before any display work.
    pub async fn tick<M, S>(&mut self, surface: &Mutex<M, S>) -> TickOutcome
    where
        M: RawMutex,
        S: PreviewSurface,
    {
        let Some(src) = self.camera.grab().await else {
            #[cfg(feature = "defmt")]
            defmt::warn!("camera returned no frame, skipping");
            self.stats.skipped += 1;
            return TickOutcome::NoFrame;
        };

        let mut surface = surface.lock().await;
        let copied = frame::copy_into(self.frame_buf, src);
        // The frame borrow ends with the copy; hand the capture buffer
        // back before any display work, whether or not the copy took.
        self.camera.release();

        match copied {
            Ok(()) => {
                if self.swap_bytes {
                    frame::swap_pixel_bytes(self.frame_buf);
                }
                surface.present(self.frame_buf);
                self.stats.presented += 1;
                TickOutcome::Presented
            }
            Err(err) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("dropping frame: {}", err);
                self.stats.skipped += 1;
                TickOutcome::BadFrame(err)
            }
        }
    }

    /// Drive the loop while `keep_going` holds, yielding between
    /// iterations so button and redraw work can run.
    pub async fn run<M, S>(
        &mut self,
        surface: &Mutex<M, S>,
        mut keep_going: impl FnMut(&PreviewStats) -> bool,
    ) where
        M: RawMutex,
        S: PreviewSurface,
    {
        while keep_going(&self.stats) {
            let _ = self.tick(surface).await;
            yield_now().await;
        }
    }
}
