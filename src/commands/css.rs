use anyhow::Result;

use crate::appearance::Appearance;
use crate::settings::Settings;
use crate::storage::PreferenceStorage;
use crate::store::PreferenceStore;

/// Stylesheet fragment for the current record, with the body attributes as a comment
pub fn format_css(settings: &Settings) -> String {
    let appearance = Appearance::derive(settings);
    format!("/* <body {}> */\n{}", appearance.to_attributes(), appearance.to_css())
}

pub fn run<S: PreferenceStorage>(store: &PreferenceStore<S>) -> Result<()> {
    print!("{}", format_css(store.get()));
    Ok(())
}
