use anyhow::Result;

use crate::commands::show::format_settings;
use crate::storage::PreferenceStorage;
use crate::store::PreferenceStore;

pub fn run<S: PreferenceStorage>(store: &mut PreferenceStore<S>) -> Result<()> {
    let settings = store.reset_to_defaults();
    print!("{}", format_settings(settings));
    Ok(())
}
