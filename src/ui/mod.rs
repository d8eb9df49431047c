//! User interface subsystem - SPI LCD + ADC button ladder.
//!
//! The menu controller reacts to logical button presses and renders a
//! single-level menu on the panel; page activation hands the screen to
//! the selected page.
//!
//! ## Components
//!
//! - **Display**: ST7735 160×128 LCD, drawn through `embedded-graphics`
//! - **Buttons**: 4-button resistor ladder on one ADC channel (MENU,
//!   PLAY, UP, DOWN) plus an active-low BOOT GPIO

#[cfg(feature = "embedded")]
pub mod buttons;
pub mod display;
pub mod input;
pub mod menu;

/// Logical button presses (after ladder decoding and debouncing).
///
/// Decoupled from the sensing mechanism: the ADC band (or GPIO level)
/// that produced the press is configuration data in `config.rs`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    /// Activate the selected menu entry.
    Menu,
    /// Leave the running page, back to the menu.
    Play,
    /// Move the selection up (previous entry).
    Up,
    /// Move the selection down (next entry).
    Down,
}
