//! Pure button-ladder decoding: ADC level → logical button.
//!
//! Kept free of hardware types so the mapping and the debounce policy
//! can be tested on the host.

use crate::config::{
    ADC_FULL_SCALE, ADC_VREF_MV, BTN_DOWN_MV, BTN_MENU_MV, BTN_PLAY_MV, BTN_UP_MV,
    BUTTON_DEBOUNCE_SAMPLES,
};
use crate::ui::ButtonEvent;

/// Convert a raw 12-bit ADC reading to millivolts.
pub fn counts_to_mv(counts: u16) -> u16 {
    (counts as u32 * ADC_VREF_MV / ADC_FULL_SCALE) as u16
}

/// Map a ladder voltage to the button whose band contains it.
///
/// Levels outside every band (idle ladder, contact bounce between
/// bands) map to no button at all.
pub fn button_for_level(mv: u16) -> Option<ButtonEvent> {
    const BANDS: [((u16, u16), ButtonEvent); 4] = [
        (BTN_MENU_MV, ButtonEvent::Menu),
        (BTN_PLAY_MV, ButtonEvent::Play),
        (BTN_DOWN_MV, ButtonEvent::Down),
        (BTN_UP_MV, ButtonEvent::Up),
    ];

    BANDS
        .iter()
        .find(|((lo, hi), _)| (*lo..=*hi).contains(&mv))
        .map(|(_, event)| *event)
}

/// Debouncing single-click decoder for the button ladder.
///
/// Feed one ADC sample per poll period; a press is reported exactly
/// once after the level has been stable for
/// `BUTTON_DEBOUNCE_SAMPLES` samples, and not again until the ladder
/// has returned to idle (or moved to a different band).
pub struct LadderDecoder {
    candidate: Option<ButtonEvent>,
    stable: u8,
    reported: bool,
}

impl LadderDecoder {
    pub const fn new() -> Self {
        Self {
            candidate: None,
            stable: 0,
            reported: false,
        }
    }

    /// Process one sample (millivolts); returns a press when one has
    /// just been confirmed.
    pub fn sample(&mut self, mv: u16) -> Option<ButtonEvent> {
        let current = button_for_level(mv);

        if current == self.candidate {
            self.stable = self.stable.saturating_add(1);
        } else {
            self.candidate = current;
            self.stable = 1;
            self.reported = false;
        }

        if self.stable >= BUTTON_DEBOUNCE_SAMPLES && !self.reported {
            self.reported = true;
            return self.candidate;
        }

        None
    }
}

impl Default for LadderDecoder {
    fn default() -> Self {
        Self::new()
    }
}
