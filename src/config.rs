//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, ADC thresholds, timing parameters, and
//! display geometry live here so they can be tuned in one place.

// Display

/// LCD panel width in pixels (ST7735, landscape).
pub const DISPLAY_WIDTH: u16 = 160;

/// LCD panel height in pixels.
pub const DISPLAY_HEIGHT: u16 = 128;

/// Camera preview width in pixels (QQVGA).
pub const PREVIEW_WIDTH: u16 = 160;

/// Camera preview height in pixels.
pub const PREVIEW_HEIGHT: u16 = 120;

/// Bytes per preview pixel (RGB565).
pub const PREVIEW_BPP: usize = 2;

/// Size of the preview frame buffer - exactly one full frame.
pub const PREVIEW_FRAME_BYTES: usize =
    PREVIEW_WIDTH as usize * PREVIEW_HEIGHT as usize * PREVIEW_BPP;

/// The DCMI engine stores RGB565 little-endian; the panel expects
/// big-endian pixel data over SPI, so each 16-bit pixel is swapped in
/// place before the blit.
pub const PREVIEW_SWAP_BYTES: bool = true;

/// Top-left corner of the preview region on the panel (centered
/// vertically: (128 - 120) / 2).
pub const PREVIEW_ORIGIN_X: i32 = 0;
pub const PREVIEW_ORIGIN_Y: i32 = 4;

// Sensor orientation corrections for how the module is mounted on the
// board (lens up, ribbon toward the LCD).

pub const SENSOR_VFLIP: bool = true;
pub const SENSOR_HMIRROR: bool = false;

// Menu layout

/// Upper bound on menu entries (render buffer capacity).
pub const MAX_MENU_ENTRIES: usize = 8;

/// Maximum characters per rendered menu line, marker included.
pub const MENU_LINE_CHARS: usize = 36;

/// X offset of the menu text column.
pub const MENU_LEFT: i32 = 10;

/// Y offset of the first menu row baseline.
pub const MENU_TOP: i32 = 14;

/// Vertical pitch between menu rows.
pub const MENU_ROW_PITCH: i32 = 14;

// Buttons
//
// Four buttons share one ADC channel through a resistor ladder; each
// button pulls the channel into its own voltage band. Band centers
// (from the board schematic): MENU 2410 mV, PLAY 1980 mV, DOWN 820 mV,
// UP 380 mV, each +/- 100 mV. A fifth button (BOOT) is a plain
// active-low GPIO.

/// ADC band for the MENU button (millivolts, inclusive).
pub const BTN_MENU_MV: (u16, u16) = (2310, 2510);

/// ADC band for the PLAY button.
pub const BTN_PLAY_MV: (u16, u16) = (1880, 2080);

/// ADC band for the DOWN button.
pub const BTN_DOWN_MV: (u16, u16) = (720, 920);

/// ADC band for the UP button.
pub const BTN_UP_MV: (u16, u16) = (280, 480);

/// ADC ladder sampling period (ms).
pub const BUTTON_POLL_MS: u64 = 10;

/// Consecutive identical samples required before a press is reported.
pub const BUTTON_DEBOUNCE_SAMPLES: u8 = 3;

/// ADC reference voltage (millivolts) for the ladder conversion.
pub const ADC_VREF_MV: u32 = 3300;

/// Full-scale ADC reading (12-bit).
pub const ADC_FULL_SCALE: u32 = 4095;

// Timing

/// How long the startup greeting stays on screen (ms).
pub const GREETING_MS: u64 = 800;

// GPIO / peripheral assignments (qrpod rev A board)
//
// These are logical names; the concrete `embassy_stm32::peripherals::*`
// types are selected in `main.rs`.
//
//   LCD SPI SCK    → PA5  (SPI1)
//   LCD SPI MOSI   → PA7  (SPI1)
//   LCD CS         → PD6
//   LCD D/C        → PD7
//   LCD RESET      → PD5
//   LCD BACKLIGHT  → PD4
//   Button ladder  → PA1  (ADC1 IN1)
//   BOOT button    → PA0  (active low)
//   Camera SCCB    → PB10/PB11 (I2C2)
//   Camera XCLK    → PA8  (MCO1)
//   Camera DCMI    → D0..D7 PC6 PC7 PE0 PE1 PE4 PB6 PE5 PE6,
//                    VSYNC PB7, HSYNC PA4, PIXCLK PA6

/// LCD SPI clock frequency (Hz).
pub const LCD_SPI_HZ: u32 = 40_000_000;

/// SCCB (I2C) clock frequency for sensor configuration (Hz).
pub const SCCB_HZ: u32 = 100_000;
