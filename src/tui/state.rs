use std::time::{Duration, Instant};

use crate::settings::SettingKey;

/// How long a status message stays on screen
pub const STATUS_DURATION: Duration = Duration::from_secs(3);

/// A transient message shown in the status line
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
    pub shown_at: Instant,
}

pub struct State {
    /// Index of the selected row in `SettingKey::ALL`
    pub selected_setting_index: usize,
    /// Edit buffer while typing an accent color
    pub editing: Option<String>,
    pub status: Option<StatusMessage>,
    pub should_quit: bool,
}

impl State {
    pub fn new() -> Self {
        State {
            selected_setting_index: 0,
            editing: None,
            status: None,
            should_quit: false,
        }
    }

    pub fn selected_key(&self) -> SettingKey {
        SettingKey::ALL[self.selected_setting_index.min(SettingKey::ALL.len() - 1)]
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: false,
            shown_at: Instant::now(),
        });
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: true,
            shown_at: Instant::now(),
        });
    }

    /// Drop the status message once it has been shown long enough
    pub fn clear_expired_status(&mut self, now: Instant) {
        if let Some(status) = &self.status {
            if now.saturating_duration_since(status.shown_at) >= STATUS_DURATION {
                self.status = None;
            }
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
