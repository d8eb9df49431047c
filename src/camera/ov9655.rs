//! OV9655 camera: sensor configuration over SCCB, capture over DCMI.
//!
//! The sensor is configured once for QQVGA RGB565 and then streams
//! continuously; each `grab` arms the DCMI/DMA engine for one frame
//! and awaits the frame-complete interrupt.

use crate::camera::{Camera, CameraConfig, CameraError, PixelFormat};
use crate::config::{PREVIEW_HEIGHT, PREVIEW_WIDTH};
use defmt::{debug, info};
use embassy_stm32::dcmi::Dcmi;
use embassy_stm32::peripherals::{DCMI, DMA2_CH1};
use embassy_time::{Duration, Timer};
use embedded_hal::i2c::I2c;

/// SCCB address of the OV9655 (7-bit).
const SCCB_ADDR: u8 = 0x30;

/// Expected PID/VER readback.
const PRODUCT_ID: u16 = 0x9657;

/// Sensor registers used here. Names follow the datasheet.
mod reg {
    pub const PID: u8 = 0x0A;
    pub const VER: u8 = 0x0B;
    pub const CLKRC: u8 = 0x11;
    pub const COM7: u8 = 0x12;
    pub const COM8: u8 = 0x13;
    pub const COM9: u8 = 0x14;
    pub const MVFP: u8 = 0x1E;
    pub const HSTART: u8 = 0x17;
    pub const HSTOP: u8 = 0x18;
    pub const VSTRT: u8 = 0x19;
    pub const VSTOP: u8 = 0x1A;
    pub const HREF: u8 = 0x32;
    pub const TSLB: u8 = 0x3A;
    pub const COM14: u8 = 0x3E;
    pub const COM15: u8 = 0x40;
    pub const POIDX: u8 = 0x72;
    pub const PCKDV: u8 = 0x73;
}

/// COM7 soft-reset bit.
const COM7_RESET: u8 = 0x80;

/// MVFP horizontal-mirror and vertical-flip bits.
const MVFP_MIRROR: u8 = 0x20;
const MVFP_VFLIP: u8 = 0x10;

/// QQVGA RGB565 profile, reduced from the vendor reference sequence.
/// Window and pixel-clock divider settings scale the 1.3 MP array down
/// to 160×120 at a pixel rate DMA keeps up with.
const QQVGA_RGB565: &[(u8, u8)] = &[
    (reg::COM7, 0x63),   // RGB output, QVGA array scan
    (reg::CLKRC, 0x01),  // internal clock = XCLK / 2
    (reg::COM15, 0xD0),  // RGB565, full output range
    (reg::TSLB, 0xCC),   // UV ordering, no auto-window reset
    (reg::COM14, 0x02),  // manual scaling enable
    (reg::POIDX, 0x22),  // 1/4 horizontal and vertical sub-sample
    (reg::PCKDV, 0x02),  // pixel clock divided to match
    (reg::HSTART, 0x18),
    (reg::HSTOP, 0x04),
    (reg::HREF, 0x12),
    (reg::VSTRT, 0x01),
    (reg::VSTOP, 0x81),
    (reg::COM8, 0xE7),   // AGC, AWB, AEC on
    (reg::COM9, 0x2A),   // max AGC gain 8x
];

/// OV9655 sensor plus the DCMI capture engine and its word-aligned
/// DMA buffer.
pub struct Ov9655<'d, I2C> {
    sccb: I2C,
    dcmi: Dcmi<'d, DCMI, DMA2_CH1>,
    words: &'d mut [u32],
}

impl<'d, I2C: I2c> Ov9655<'d, I2C> {
    /// Wrap an already-constructed DCMI engine and SCCB bus.
    ///
    /// `words` is the capture DMA buffer; its byte length must equal
    /// one frame.
    pub fn new(sccb: I2C, dcmi: Dcmi<'d, DCMI, DMA2_CH1>, words: &'d mut [u32]) -> Self {
        Self { sccb, dcmi, words }
    }

    fn write_reg(&mut self, reg: u8, value: u8) -> Result<(), CameraError> {
        self.sccb
            .write(SCCB_ADDR, &[reg, value])
            .map_err(|_| CameraError::Bus)
    }

    fn read_reg(&mut self, reg: u8) -> Result<u8, CameraError> {
        // SCCB has no repeated start: address write, then a separate read.
        self.sccb
            .write(SCCB_ADDR, &[reg])
            .map_err(|_| CameraError::Bus)?;
        let mut value = [0u8];
        self.sccb
            .read(SCCB_ADDR, &mut value)
            .map_err(|_| CameraError::Bus)?;
        Ok(value[0])
    }

    fn modify_reg(&mut self, reg: u8, clear: u8, set: u8) -> Result<(), CameraError> {
        let value = self.read_reg(reg)?;
        self.write_reg(reg, (value & !clear) | set)
    }

    fn probe(&mut self) -> Result<(), CameraError> {
        let pid = self.read_reg(reg::PID).map_err(|_| CameraError::Probe)?;
        let ver = self.read_reg(reg::VER).map_err(|_| CameraError::Probe)?;
        let id = u16::from_be_bytes([pid, ver]);
        if id != PRODUCT_ID {
            return Err(CameraError::WrongSensor { pid: id });
        }
        Ok(())
    }
}

impl<'d, I2C: I2c> Camera for Ov9655<'d, I2C> {
    async fn init(&mut self, config: &CameraConfig) -> Result<(), CameraError> {
        // Only the profile the register table encodes is supported.
        let supported = config.width == PREVIEW_WIDTH
            && config.height == PREVIEW_HEIGHT
            && config.format == PixelFormat::Rgb565;
        if !supported {
            return Err(CameraError::BadConfig);
        }

        self.probe()?;

        self.write_reg(reg::COM7, COM7_RESET)?;
        // Datasheet: settle for at least 1 ms after soft reset.
        Timer::after(Duration::from_millis(2)).await;

        for &(r, v) in QQVGA_RGB565 {
            self.write_reg(r, v)?;
        }

        info!("OV9655 configured: {}x{} RGB565", config.width, config.height);
        Ok(())
    }

    async fn set_orientation(&mut self, vflip: bool, hmirror: bool) -> Result<(), CameraError> {
        let set = if vflip { MVFP_VFLIP } else { 0 } | if hmirror { MVFP_MIRROR } else { 0 };
        self.modify_reg(reg::MVFP, MVFP_VFLIP | MVFP_MIRROR, set)?;
        debug!("sensor orientation: vflip={} hmirror={}", vflip, hmirror);
        Ok(())
    }

    async fn grab(&mut self) -> Option<&[u8]> {
        if let Err(err) = self.dcmi.capture(self.words).await {
            debug!("dcmi capture error: {}", err);
            return None;
        }
        Some(word_bytes(self.words))
    }

    fn release(&mut self) {
        // Single capture buffer: nothing to requeue, the next grab
        // overwrites it. The trait call still marks the handback point.
    }
}

/// View a word buffer as bytes. DCMI DMA fills whole little-endian
/// words, so the byte view is exactly the sensor's output stream.
fn word_bytes(words: &[u32]) -> &[u8] {
    unsafe { core::slice::from_raw_parts(words.as_ptr().cast(), core::mem::size_of_val(words)) }
}
