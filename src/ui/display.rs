//! Panel drawing: menu screen, banners, and the preview blit.
//!
//! Generic over `embedded_graphics::DrawTarget` so the same code runs
//! against the ST7735 on target and an in-memory canvas in host tests.
//! The concrete mipidsi panel writes through on draw, so a completed
//! draw call is the redraw.

use crate::camera::preview::PreviewSurface;
use crate::config::{
    MENU_LEFT, MENU_ROW_PITCH, MENU_TOP, PREVIEW_ORIGIN_X, PREVIEW_ORIGIN_Y, PREVIEW_WIDTH,
};
use crate::ui::menu::MenuState;
use embedded_graphics::image::{Image, ImageRawBE};
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Alignment, Text};

fn text_style() -> MonoTextStyle<'static, Rgb565> {
    MonoTextStyleBuilder::new()
        .font(&FONT_6X10)
        .text_color(Rgb565::WHITE)
        .build()
}

/// The one drawable surface. Shared between the menu renderer and the
/// preview loop behind a mutex; whoever holds the guard may draw.
pub struct Screen<D> {
    target: D,
}

impl<D: DrawTarget<Color = Rgb565>> Screen<D> {
    pub fn new(target: D) -> Self {
        Self { target }
    }

    /// Give the wrapped draw target back (test inspection).
    pub fn into_inner(self) -> D {
        self.target
    }

    /// Clear the whole panel to black.
    pub fn clear(&mut self) {
        let _ = self.target.clear(Rgb565::BLACK);
    }

    /// Render the menu: cleared screen, one line per entry, selected
    /// entry marked.
    pub fn draw_menu(&mut self, menu: &MenuState) {
        self.clear();
        for (row, line) in menu.render_lines().iter().enumerate() {
            let y = MENU_TOP + row as i32 * MENU_ROW_PITCH;
            let _ = Text::new(line.as_str(), Point::new(MENU_LEFT, y), text_style())
                .draw(&mut self.target);
        }
    }

    /// Clear and draw one centered line of text (greeting, page
    /// placeholders).
    pub fn draw_banner(&mut self, message: &str) {
        self.clear();
        let bounds = self.target.bounding_box();
        let center = bounds.center();
        let _ = Text::with_alignment(message, center, text_style(), Alignment::Center)
            .draw(&mut self.target);
    }
}

impl<D: DrawTarget<Color = Rgb565>> PreviewSurface for Screen<D> {
    /// Blit one big-endian RGB565 frame into the preview region.
    fn present(&mut self, pixels: &[u8]) {
        let raw: ImageRawBE<Rgb565> = ImageRawBE::new(pixels, PREVIEW_WIDTH as u32);
        let _ = Image::new(&raw, Point::new(PREVIEW_ORIGIN_X, PREVIEW_ORIGIN_Y))
            .draw(&mut self.target);
    }
}
