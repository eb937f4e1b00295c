pub mod css;
pub mod reset;
pub mod set;
pub mod show;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::motion::MotionProbe;
use crate::storage::{FileStorage, PreferenceStorage};
use crate::store::PreferenceStore;

/// Open the store over the configured storage area and run the initial load
pub fn open_store(config: &Config) -> Result<PreferenceStore<FileStorage>> {
    let path = config
        .storage_path()
        .context("Unable to determine local storage path")?;
    let storage = FileStorage::new(path);
    tracing::debug!("Using storage area {}", storage.path().display());
    Ok(PreferenceStore::open(config.store_options(), storage))
}

/// Take one reading from `probe` and feed it to the store, so one-shot
/// commands report the same reduced motion value as the switcher.
pub async fn follow_system_motion<S: PreferenceStorage>(
    store: &mut PreferenceStore<S>,
    probe: &dyn MotionProbe,
) {
    match probe.prefers_reduced_motion().await {
        Some(prefers_reduce) => {
            if store.apply_system_motion(prefers_reduce) {
                tracing::debug!("Following system reduced motion: {}", store.get().reduced_motion);
            }
        }
        None => tracing::debug!("System reduced motion preference unknown"),
    }
}
