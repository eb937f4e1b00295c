pub mod color;
pub mod handler;
pub mod state;
pub mod view;

#[cfg(test)]
pub mod testing;

pub use state::State;

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use crate::appearance::Appearance;
use crate::storage::PreferenceStorage;
use crate::store::PreferenceStore;

/// Apply every pending system reading. Returns true if the record changed.
fn drain_motion_readings<S: PreferenceStorage>(
    motion_rx: &mut mpsc::Receiver<bool>,
    state: &mut State,
    store: &mut PreferenceStore<S>,
) -> bool {
    let mut changed = false;
    while let Ok(prefers_reduce) = motion_rx.try_recv() {
        if store.apply_system_motion(prefers_reduce) {
            state.set_status(format!("System reduced motion: {}", store.get().reduced_motion));
            changed = true;
        }
    }
    changed
}

/// Main entry point for TUI mode
pub fn run<S: PreferenceStorage>(
    store: &mut PreferenceStore<S>,
    mut motion_rx: mpsc::Receiver<bool>,
) -> Result<(), io::Error> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let appearance = Rc::new(RefCell::new(Appearance::derive(store.get())));
    let _subscription = {
        let appearance = Rc::clone(&appearance);
        store.subscribe(move |settings| {
            *appearance.borrow_mut() = Appearance::derive(settings);
        })
    };

    let mut state = State::new();

    let result = (|| -> Result<(), io::Error> {
        loop {
            if drain_motion_readings(&mut motion_rx, &mut state, store) {
                tracing::debug!("LOOP: applied system reduced motion");
            }
            state.clear_expired_status(Instant::now());

            terminal.draw(|f| {
                view::render(f, f.area(), &state, store.get(), &appearance.borrow());
            })?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        handler::handle_key(key, &mut state, store);
                    }
                }
            }

            if state.should_quit {
                break;
            }
        }
        Ok(())
    })();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::memory_store;
    use crate::settings::{ReducedMotion, Setting};

    #[test]
    fn test_drain_applies_system_reading_from_no_preference() {
        let mut store = memory_store(true);
        let mut state = State::new();
        let (tx, mut rx) = mpsc::channel(4);
        tx.try_send(false).unwrap();
        tx.try_send(true).unwrap();
        tx.try_send(false).unwrap();

        assert!(drain_motion_readings(&mut rx, &mut state, &mut store));
        // The later "no preference" reading does not undo the reduce
        assert_eq!(store.get().reduced_motion, ReducedMotion::Reduce);
        assert_eq!(
            state.status.as_ref().unwrap().text,
            "System reduced motion: reduce"
        );
        assert!(!drain_motion_readings(&mut rx, &mut state, &mut store));
    }

    #[test]
    fn test_drain_respects_latch() {
        let mut store = memory_store(true);
        let mut state = State::new();
        store.update(Setting::ReducedMotion(ReducedMotion::NoPreference));
        let (tx, mut rx) = mpsc::channel(4);
        tx.try_send(true).unwrap();

        assert!(!drain_motion_readings(&mut rx, &mut state, &mut store));
        assert_eq!(store.get().reduced_motion, ReducedMotion::NoPreference);
        assert!(state.status.is_none());
    }
}
