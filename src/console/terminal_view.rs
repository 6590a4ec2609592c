use crate::domain::display::{DEFAULT_ADDRESS_TEXT, DisplayFields, TextField};
use std::io::{self, IsTerminal, Write};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::warn;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Slot {
    Latitude,
    Longitude,
    Altitude,
    Accuracy,
    Address,
}

impl Slot {
    fn index(self) -> usize {
        self as usize
    }
}

/// A single screen on stdout showing the four coordinate fields and the address. Every change redraws the screen.
#[derive(Debug)]
pub struct TerminalView {
    texts: Mutex<[String; 5]>,
    interactive: bool,
}

impl TerminalView {
    pub fn new() -> Arc<Self> {
        Arc::new(TerminalView {
            texts: Mutex::new([
                "Latitude: ".to_string(),
                "Longitude: ".to_string(),
                "Altitude: ".to_string(),
                "Accuracy: ".to_string(),
                DEFAULT_ADDRESS_TEXT.to_string(),
            ]),
            interactive: io::stdout().is_terminal(),
        })
    }

    pub fn fields(self: &Arc<Self>) -> DisplayFields {
        let field = |slot| -> Arc<dyn TextField> { Arc::new(TerminalField { view: self.clone(), slot }) };

        DisplayFields {
            latitude: field(Slot::Latitude),
            longitude: field(Slot::Longitude),
            altitude: field(Slot::Altitude),
            accuracy: field(Slot::Accuracy),
            address: field(Slot::Address),
        }
    }

    pub fn render(&self) -> String {
        let texts = self.texts.lock().unwrap_or_else(PoisonError::into_inner);
        let [latitude, longitude, altitude, accuracy, address] = &*texts;

        format!("🥾 Hiker's Watch\n\n{}\n{}\n{}\n{}\n\n{}\n", latitude, longitude, altitude, accuracy, address)
    }

    pub fn redraw(&self) {
        let screen = self.render();
        let mut stdout = io::stdout().lock();
        let clear = if self.interactive { CLEAR_SCREEN } else { "" };

        if let Err(e) = write!(stdout, "{}{}", clear, screen).and_then(|_| stdout.flush()) {
            warn!("⚠️ Unable to draw the view: {}", e);
        }
    }

    fn set(&self, slot: Slot, text: &str) {
        {
            let mut texts = self.texts.lock().unwrap_or_else(PoisonError::into_inner);
            if texts[slot.index()] == text {
                return;
            }
            texts[slot.index()] = text.to_string();
        }
        self.redraw();
    }

    fn get(&self, slot: Slot) -> String {
        self.texts.lock().unwrap_or_else(PoisonError::into_inner)[slot.index()].clone()
    }
}

#[derive(Debug)]
struct TerminalField {
    view: Arc<TerminalView>,
    slot: Slot,
}

impl TextField for TerminalField {
    fn set_text(&self, text: &str) {
        self.view.set(self.slot, text);
    }

    fn text(&self) -> String {
        self.view.get(self.slot)
    }
}
