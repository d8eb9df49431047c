//! Camera service abstraction.
//!
//! The preview loop only ever talks to the [`Camera`] trait; the
//! concrete OV9655/DCMI implementation lives behind the `embedded`
//! feature and host tests substitute a scripted mock.

pub mod frame;
#[cfg(feature = "embedded")]
pub mod ov9655;
pub mod preview;

/// Pixel format delivered by the sensor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PixelFormat {
    /// 16 bits per pixel, two bytes per DCMI transfer.
    Rgb565,
}

/// Fixed capture configuration, chosen once at startup.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CameraConfig {
    pub width: u16,
    pub height: u16,
    pub format: PixelFormat,
}

impl CameraConfig {
    /// Exact byte length of one frame in this configuration.
    pub fn frame_len(&self) -> usize {
        let bpp = match self.format {
            PixelFormat::Rgb565 => 2,
        };
        self.width as usize * self.height as usize * bpp
    }
}

/// Camera failures. Only `init` reports errors; a capture that yields
/// nothing is an `Option`, not an error (soft-fail policy).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CameraError {
    /// Sensor did not answer on the SCCB bus.
    Probe,
    /// Sensor answered but reported an unexpected product id.
    WrongSensor { pid: u16 },
    /// An SCCB register transaction failed.
    Bus,
    /// The requested configuration is not supported by the sensor.
    BadConfig,
}

/// One camera sensor plus its capture engine.
///
/// Frame ownership: the slice returned by [`grab`](Camera::grab)
/// borrows the driver's capture buffer and must be handed back with
/// [`release`](Camera::release) once copied; the borrow itself keeps
/// the caller honest about not retaining it.
#[allow(async_fn_in_trait)]
pub trait Camera {
    /// Power up and configure the sensor. Called exactly once; failure
    /// is fatal to the caller.
    async fn init(&mut self, config: &CameraConfig) -> Result<(), CameraError>;

    /// Apply sensor orientation corrections. Called once, post-init.
    async fn set_orientation(&mut self, vflip: bool, hmirror: bool) -> Result<(), CameraError>;

    /// Capture one frame; awaits hardware readiness. `None` means this
    /// capture produced nothing and the iteration should be skipped.
    async fn grab(&mut self) -> Option<&[u8]>;

    /// Hand the capture buffer back for reuse.
    fn release(&mut self);
}
