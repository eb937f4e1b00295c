//! Test helpers shared by the TUI test modules.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

use super::{handler::handle_key, view, State};
use crate::appearance::Appearance;
use crate::settings::Settings;
use crate::storage::PreferenceStorage;
use crate::store::PreferenceStore;

/// Constant for general rendering width
pub const RENDER_WIDTH: u16 = 80;

/// Tall enough for the settings panel, the preview and the status line
pub const RENDER_HEIGHT: u16 = 26;

/// Key press without modifiers
pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

/// Feed each character of `text` to the key handler
pub fn type_text<S: PreferenceStorage>(text: &str, state: &mut State, store: &mut PreferenceStore<S>) {
    for c in text.chars() {
        handle_key(key(KeyCode::Char(c)), state, store);
    }
}

/// Helper to extract lines from buffer
pub fn buffer_lines(buf: &Buffer) -> Vec<String> {
    let area = buf.area();
    (0..area.height)
        .map(|y| {
            (0..area.width)
                .map(|x| buf[(x, y)].symbol())
                .collect::<String>()
        })
        .collect()
}

/// Render the whole screen for `settings` and return its lines
pub fn render_lines(state: &State, settings: &Settings) -> Vec<String> {
    let backend = TestBackend::new(RENDER_WIDTH, RENDER_HEIGHT);
    let mut terminal = Terminal::new(backend).unwrap();
    let appearance = Appearance::derive(settings);
    terminal
        .draw(|f| view::render(f, f.area(), state, settings, &appearance))
        .unwrap();
    buffer_lines(terminal.backend().buffer())
}
