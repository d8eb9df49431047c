//! Host-testable library for qrpod.
//!
//! The firmware binary (`main.rs`, behind the `embedded` feature) and
//! the host test suite share this crate. Menu logic, button-ladder
//! decoding, frame handling, and the capture-display loop are
//! hardware-free and run on the host; the DCMI camera driver, the ADC
//! polling task, and panel wiring are gated behind `embedded`.
//!
//! Usage: `cargo test --lib`

#![cfg_attr(not(test), no_std)]

pub mod camera;
pub mod config;
pub mod ui;

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests
// ═══════════════════════════════════════════════════════════════════════════
