//! Menu controller - selection state machine over a fixed entry list.
//!
//! Pure logic: the controller decides *what* should happen in response
//! to a button press; drawing and page execution are the caller's job
//! (the UI task holds the display lock while acting on the result).

use crate::config::{MAX_MENU_ENTRIES, MENU_LINE_CHARS};
use crate::ui::ButtonEvent;
use heapless::{String, Vec};

/// Pages the menu can activate.
///
/// A closed set dispatched through a single `match`, rather than stored
/// function pointers, so adding a page is a compile-time checked change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PageId {
    QrGenerate,
    QrScan,
}

/// One menu row: display name plus the page it activates.
pub struct MenuEntry {
    pub name: &'static str,
    pub page: PageId,
}

/// The main menu, in display order.
pub static MAIN_MENU: &[MenuEntry] = &[
    MenuEntry {
        name: "QR Generate",
        page: PageId::QrGenerate,
    },
    MenuEntry {
        name: "QR Scan",
        page: PageId::QrScan,
    },
];

/// Where the controller currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Navigating the entry list.
    Menu,
    /// A page is on screen; only PLAY (back) is honored.
    ActionRunning,
}

/// What the caller should do after a dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuAction {
    /// Selection (or mode) changed; redraw the menu.
    Redraw,
    /// Clear the screen and run the given page.
    Activate(PageId),
}

/// Menu selection state. Exactly one instance, owned by the UI task;
/// mutated only through [`dispatch`](MenuState::dispatch).
pub struct MenuState {
    entries: &'static [MenuEntry],
    selected: usize,
    mode: Mode,
}

impl MenuState {
    /// Create a controller over a non-empty entry list.
    ///
    /// Panics if `entries` is empty; every later operation assumes at
    /// least one entry.
    pub fn new(entries: &'static [MenuEntry]) -> Self {
        assert!(!entries.is_empty());
        Self {
            entries,
            selected: 0,
            mode: Mode::Menu,
        }
    }

    pub fn entries(&self) -> &'static [MenuEntry] {
        self.entries
    }

    /// Index of the currently selected entry; always in `[0, N)`.
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Apply one logical button press.
    ///
    /// Buttons that have no meaning in the current mode are silently
    /// ignored (no state change, no action).
    pub fn dispatch(&mut self, button: ButtonEvent) -> Option<MenuAction> {
        let n = self.entries.len();
        match self.mode {
            Mode::Menu => match button {
                ButtonEvent::Up => {
                    // +n-1 instead of -1 keeps the arithmetic unsigned.
                    self.selected = (self.selected + n - 1) % n;
                    Some(MenuAction::Redraw)
                }
                ButtonEvent::Down => {
                    self.selected = (self.selected + 1) % n;
                    Some(MenuAction::Redraw)
                }
                ButtonEvent::Menu => {
                    self.mode = Mode::ActionRunning;
                    Some(MenuAction::Activate(self.entries[self.selected].page))
                }
                ButtonEvent::Play => None,
            },
            Mode::ActionRunning => match button {
                ButtonEvent::Play => {
                    self.mode = Mode::Menu;
                    Some(MenuAction::Redraw)
                }
                _ => None,
            },
        }
    }

    /// Format the menu as display lines, one per entry, the selected
    /// one prefixed with `>`.
    pub fn render_lines(&self) -> Vec<String<MENU_LINE_CHARS>, MAX_MENU_ENTRIES> {
        let mut lines = Vec::new();
        for (i, entry) in self.entries.iter().enumerate() {
            let mut line: String<MENU_LINE_CHARS> = String::new();
            let _ = line.push_str(if i == self.selected { "> " } else { "  " });
            let _ = line.push_str(entry.name);
            if lines.push(line).is_err() {
                break;
            }
        }
        lines
    }
}
