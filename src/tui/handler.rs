use crossterm::event::{KeyCode, KeyEvent};

use super::State;
use crate::settings::{Choice, Setting, SettingKey, Settings};
use crate::storage::PreferenceStorage;
use crate::store::PreferenceStore;
use crate::validate::{MAX_LEVEL, MIN_LEVEL};

/// Step for percentage sliders
pub const LEVEL_STEP: i32 = 5;

/// Accent colors offered by Left/Right on the accent row
pub const ACCENT_PRESETS: [&str; 6] = ["#00f0d3", "#ff0066", "#00ff88", "#ffd700", "#8a70e5", "#ffffff"];

/// Handle a key press. Returns true if the key was consumed.
pub fn handle_key<S: PreferenceStorage>(
    key: KeyEvent,
    state: &mut State,
    store: &mut PreferenceStore<S>,
) -> bool {
    if let Some(edit_buffer) = state.editing.take() {
        return handle_editing_mode(key, state, store, edit_buffer);
    }

    let num_settings = SettingKey::ALL.len();

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            if state.selected_setting_index > 0 {
                state.selected_setting_index -= 1;
            }
            true
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.selected_setting_index + 1 < num_settings {
                state.selected_setting_index += 1;
            }
            true
        }
        KeyCode::Left | KeyCode::Char('h') => {
            adjust(state, store, -1);
            true
        }
        KeyCode::Right | KeyCode::Char('l') => {
            adjust(state, store, 1);
            true
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            let key = state.selected_key();
            if key == SettingKey::AccentColor {
                state.editing = Some(store.get().accent_color.clone());
                state.set_status("Editing accent color (Enter to save, Esc to cancel)");
                tracing::info!("Started editing accent color");
            } else {
                adjust(state, store, 1);
            }
            true
        }
        KeyCode::Char('r') => {
            store.reset_to_defaults();
            state.set_status("Settings reset to defaults");
            true
        }
        KeyCode::Char('q') | KeyCode::Esc => {
            state.should_quit = true;
            true
        }
        _ => false,
    }
}

/// Step the selected setting forwards (`direction > 0`) or backwards
fn adjust<S: PreferenceStorage>(state: &mut State, store: &mut PreferenceStore<S>, direction: i32) {
    let key = state.selected_key();
    let setting = next_value(key, store.get(), direction);
    store.update(setting);
    state.set_status(format!("{}: {}", key.label(), store.get().value_of(key)));
}

fn step<T: Choice>(value: T, direction: i32) -> T {
    if direction < 0 {
        value.prev()
    } else {
        value.next()
    }
}

fn step_level(value: i32, direction: i32) -> i32 {
    (value + direction.signum() * LEVEL_STEP).clamp(MIN_LEVEL, MAX_LEVEL)
}

fn step_accent(current: &str, direction: i32) -> String {
    let len = ACCENT_PRESETS.len();
    let next = match ACCENT_PRESETS.iter().position(|c| c.eq_ignore_ascii_case(current)) {
        Some(i) if direction < 0 => (i + len - 1) % len,
        Some(i) => (i + 1) % len,
        None => 0,
    };
    ACCENT_PRESETS[next].to_string()
}

/// The value one step away from the current one. Sliders stay within range.
pub fn next_value(key: SettingKey, settings: &Settings, direction: i32) -> Setting {
    match key {
        SettingKey::Theme => Setting::Theme(step(settings.theme, direction)),
        SettingKey::ParticleDensity => {
            Setting::ParticleDensity(step_level(settings.particle_density, direction))
        }
        SettingKey::AnimationIntensity => {
            Setting::AnimationIntensity(step_level(settings.animation_intensity, direction))
        }
        SettingKey::AccentColor => Setting::AccentColor(step_accent(&settings.accent_color, direction)),
        SettingKey::FontFamily => Setting::FontFamily(step(settings.font_family, direction)),
        SettingKey::BackgroundPattern => {
            Setting::BackgroundPattern(step(settings.background_pattern, direction))
        }
        SettingKey::EnableParticles => Setting::EnableParticles(!settings.enable_particles),
        SettingKey::EnableGlitch => Setting::EnableGlitch(!settings.enable_glitch),
        SettingKey::ReducedMotion => Setting::ReducedMotion(step(settings.reduced_motion, direction)),
    }
}

/// Handle key events while typing an accent color
fn handle_editing_mode<S: PreferenceStorage>(
    key: KeyEvent,
    state: &mut State,
    store: &mut PreferenceStore<S>,
    mut edit_buffer: String,
) -> bool {
    match key.code {
        KeyCode::Enter => {
            let value = edit_buffer.trim().to_string();
            if value.is_empty() {
                state.set_error("Accent color cannot be empty");
                state.editing = Some(edit_buffer);
                return true;
            }
            tracing::info!("Saved accent color {}", value);
            store.update(Setting::AccentColor(value.clone()));
            state.set_status(format!("Accent Color: {}", value));
        }
        KeyCode::Esc => {
            state.set_status("Editing cancelled");
            tracing::info!("Cancelled editing accent color");
        }
        KeyCode::Backspace => {
            edit_buffer.pop();
            state.editing = Some(edit_buffer);
        }
        KeyCode::Char(c) => {
            edit_buffer.push(c);
            state.editing = Some(edit_buffer);
        }
        _ => {
            state.editing = Some(edit_buffer);
        }
    }
    true
}
