use anyhow::Result;

use crate::settings::{SettingKey, Settings};
use crate::storage::PreferenceStorage;
use crate::store::PreferenceStore;

/// Render the record as an aligned two-column listing
pub fn format_settings(settings: &Settings) -> String {
    let width = SettingKey::ALL
        .iter()
        .map(|k| k.name().len())
        .max()
        .unwrap_or(0);

    let mut output = String::new();
    output.push_str("\nTheme Settings\n");
    output.push_str(&format!("{}\n", "═".repeat(40)));
    for key in SettingKey::ALL {
        output.push_str(&format!("{:<width$}  {}\n", key.name(), settings.value_of(key), width = width));
    }
    output
}

pub fn run<S: PreferenceStorage>(store: &PreferenceStore<S>) -> Result<()> {
    print!("{}", format_settings(store.get()));
    Ok(())
}
