//! Integration tests for qrpod host-testable logic.

use embassy_futures::block_on;
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::mutex::Mutex;
use qrpod::camera::preview::{Preview, PreviewSurface};
use qrpod::camera::{Camera, CameraConfig, CameraError};
use qrpod::ui::input::{button_for_level, counts_to_mv, LadderDecoder};
use qrpod::ui::menu::{MenuAction, MenuState, Mode, PageId, MAIN_MENU};
use qrpod::ui::ButtonEvent;

/// Drive the menu the way the UI task does: ladder sample stream in,
/// dispatch decisions out.
#[test]
fn ladder_press_stream_navigates_and_activates() {
    let mut decoder = LadderDecoder::new();
    let mut menu = MenuState::new(MAIN_MENU);

    // One debounced DOWN press (820 mV band), then release.
    let mut actions = Vec::new();
    for mv in [0, 820, 820, 820, 820, 0, 0] {
        if let Some(event) = decoder.sample(mv) {
            actions.extend(menu.dispatch(event));
        }
    }
    assert_eq!(actions, vec![MenuAction::Redraw]);
    assert_eq!(menu.selected(), 1);

    // One debounced MENU press activates the selected entry.
    let mut actions = Vec::new();
    for mv in [2410, 2410, 2410, 0] {
        if let Some(event) = decoder.sample(mv) {
            actions.extend(menu.dispatch(event));
        }
    }
    assert_eq!(actions, vec![MenuAction::Activate(PageId::QrScan)]);
    assert_eq!(menu.mode(), Mode::ActionRunning);
}

#[test]
fn raw_adc_counts_map_through_to_buttons() {
    // 12-bit counts at each band center (mv * 4095 / 3300).
    for (counts, expected) in [
        (2991u16, ButtonEvent::Menu),
        (2457, ButtonEvent::Play),
        (1018, ButtonEvent::Down),
        (472, ButtonEvent::Up),
    ] {
        assert_eq!(button_for_level(counts_to_mv(counts)), Some(expected));
    }
    assert_eq!(button_for_level(counts_to_mv(0)), None);
    assert_eq!(button_for_level(counts_to_mv(4095)), None);
}

/// Camera that misses a configurable number of captures before
/// streaming one fixed frame forever.
struct FlakyCamera {
    misses: u32,
    frame: Vec<u8>,
}

impl Camera for FlakyCamera {
    async fn init(&mut self, _config: &CameraConfig) -> Result<(), CameraError> {
        Ok(())
    }

    async fn set_orientation(&mut self, _vflip: bool, _hmirror: bool) -> Result<(), CameraError> {
        Ok(())
    }

    async fn grab(&mut self) -> Option<&[u8]> {
        if self.misses > 0 {
            self.misses -= 1;
            return None;
        }
        Some(&self.frame)
    }

    fn release(&mut self) {}
}

#[derive(Default)]
struct RecordingSurface {
    presents: usize,
    last: Vec<u8>,
}

impl PreviewSurface for RecordingSurface {
    fn present(&mut self, pixels: &[u8]) {
        self.presents += 1;
        self.last = pixels.to_vec();
    }
}

#[test]
fn preview_loop_absorbs_misses_then_presents() {
    let camera = FlakyCamera {
        misses: 3,
        frame: vec![0x11, 0x22, 0x33, 0x44],
    };
    let mut frame_buf = [0u8; 4];
    let mut preview = Preview::new(camera, &mut frame_buf, true);
    let surface: Mutex<NoopRawMutex, RecordingSurface> = Mutex::new(RecordingSurface::default());

    block_on(preview.run(&surface, |stats| stats.presented + stats.skipped < 4));

    let stats = preview.stats();
    assert_eq!(stats.skipped, 3);
    assert_eq!(stats.presented, 1);

    let surface = surface.into_inner();
    assert_eq!(surface.presents, 1);
    // Byte-swapped on the way to the panel.
    assert_eq!(surface.last, vec![0x22, 0x11, 0x44, 0x33]);
}
