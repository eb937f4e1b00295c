use anyhow::{Context, Result};

use crate::commands::show::format_settings;
use crate::storage::PreferenceStorage;
use crate::store::PreferenceStore;

pub fn run<S: PreferenceStorage>(store: &mut PreferenceStore<S>, field: &str, value: &str) -> Result<()> {
    let settings = store
        .update_field(field, value)
        .with_context(|| format!("Failed to set '{}'", field))?;
    print!("{}", format_settings(settings));
    Ok(())
}
