/// Fixture data for tests and benchmarks
///
/// Deterministic stores, snapshots and a scripted motion probe, shared by the
/// unit tests of several modules and by the benchmarks.
use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::motion::MotionProbe;
use crate::storage::MemoryStorage;
use crate::store::{PreferenceStore, StoreOptions, DEFAULT_STORAGE_KEY};

/// A snapshot with every field set to a non-default value
pub const FULL_SNAPSHOT: &str = r##"{"theme":"neon","particleDensity":12,"animationIntensity":34,"accentColor":"#ff0066","fontFamily":"mono","backgroundPattern":"waves","enableParticles":false,"enableGlitch":false,"reducedMotion":"reduce"}"##;

/// A snapshot written by an older version: missing fields, wrong types, stale values
pub const LEGACY_SNAPSHOT: &str = r##"{"theme":"synthwave","particleDensity":"80","animationIntensity":250,"accentColor":"","fontFamily":"sans","enableParticles":1,"glowStrength":7}"##;

/// Default options with persistence switched on or off
pub fn test_options(persist: bool) -> StoreOptions {
    StoreOptions {
        persist,
        ..StoreOptions::default()
    }
}

/// Initialized store over empty in-memory storage
pub fn memory_store(persist: bool) -> PreferenceStore<MemoryStorage> {
    PreferenceStore::open(test_options(persist), MemoryStorage::new())
}

/// Initialized store whose storage already holds `snapshot` under the default key
pub fn seeded_store(snapshot: &str) -> PreferenceStore<MemoryStorage> {
    PreferenceStore::open(
        test_options(true),
        MemoryStorage::with_item(DEFAULT_STORAGE_KEY, snapshot),
    )
}

/// Motion probe that replays a fixed sequence of readings, then reports `None`
#[derive(Debug, Default)]
pub struct ScriptedProbe {
    readings: Mutex<VecDeque<Option<bool>>>,
}

impl ScriptedProbe {
    pub fn new(readings: Vec<Option<bool>>) -> Self {
        Self {
            readings: Mutex::new(readings.into()),
        }
    }
}

#[async_trait]
impl MotionProbe for ScriptedProbe {
    async fn prefers_reduced_motion(&self) -> Option<bool> {
        match self.readings.lock() {
            Ok(mut readings) => readings.pop_front().flatten(),
            Err(_) => None,
        }
    }
}
