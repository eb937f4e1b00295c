//! The preference store.
//!
//! Owns the settings record for one session. The record is seeded from the
//! construction-time overrides, merged with the persisted snapshot on
//! [`PreferenceStore::initialize`], and from then on changes only through
//! [`PreferenceStore::update`], [`PreferenceStore::reset_to_defaults`] and the
//! system reduced-motion signal. Every change is persisted (when enabled) and
//! pushed to subscribers before the mutating call returns.
//!
//! The store is single threaded. Subscribers run synchronously, in
//! registration order, and receive the new record by reference.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{debug, info, warn};

use crate::settings::{ReducedMotion, Setting, SettingError, SettingKey, Settings, Theme};
use crate::settings::DEFAULT_ACCENT_COLOR;
use crate::storage::PreferenceStorage;
use crate::validate;

/// Storage key used when none is configured
pub const DEFAULT_STORAGE_KEY: &str = "portfolio-theme-settings-v2";

/// Construction-time options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    pub initial_theme: Theme,
    pub initial_accent_color: String,
    pub persist: bool,
    pub storage_key: String,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            initial_theme: Theme::default(),
            initial_accent_color: DEFAULT_ACCENT_COLOR.to_string(),
            persist: true,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl StoreOptions {
    /// Defaults with the initial theme and accent color applied
    pub fn base_settings(&self) -> Settings {
        Settings::with_overrides(self.initial_theme, self.initial_accent_color.clone())
    }
}

type Listener = Box<dyn FnMut(&Settings)>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
    // Ids cancelled while their listener was out of the registry being notified
    cancelled: Vec<u64>,
}

/// Handle for a registered subscriber. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    /// Unsubscribe now
    pub fn cancel(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let mut registry = registry.borrow_mut();
        let before = registry.listeners.len();
        registry.listeners.retain(|(id, _)| *id != self.id);
        if registry.listeners.len() == before {
            registry.cancelled.push(self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

pub struct PreferenceStore<S: PreferenceStorage> {
    options: StoreOptions,
    storage: S,
    settings: Settings,
    initialized: bool,
    // Set once the user picks a reduced motion value explicitly
    motion_latched: bool,
    last_system_motion: Option<bool>,
    registry: Rc<RefCell<Registry>>,
}

impl<S: PreferenceStorage> PreferenceStore<S> {
    /// Create an uninitialized store holding the base record
    pub fn new(options: StoreOptions, storage: S) -> Self {
        let settings = options.base_settings();
        Self {
            options,
            storage,
            settings,
            initialized: false,
            motion_latched: false,
            last_system_motion: None,
            registry: Rc::new(RefCell::new(Registry::default())),
        }
    }

    /// Create a store and run the initial load
    pub fn open(options: StoreOptions, storage: S) -> Self {
        let mut store = Self::new(options, storage);
        store.initialize();
        store
    }

    /// Load the persisted snapshot, if persistence is enabled.
    ///
    /// Any failure to read or parse the snapshot is logged and the base
    /// record is kept. Marks the store initialized, persists the result and
    /// notifies subscribers. Calling it again is a no-op.
    pub fn initialize(&mut self) -> &Settings {
        if self.initialized {
            return &self.settings;
        }

        if self.options.persist {
            if let Some(loaded) = self.load_snapshot() {
                self.settings = loaded;
            }
        }

        self.initialized = true;
        debug!("STORE: initialized with {:?}", self.settings);
        self.commit();
        &self.settings
    }

    fn load_snapshot(&self) -> Option<Settings> {
        let key = &self.options.storage_key;
        let raw = match self.storage.get_item(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("STORE: no snapshot under '{}'", key);
                return None;
            }
            Err(e) => {
                warn!("Failed to read theme settings from storage: {}", e);
                return None;
            }
        };

        // Unusable fields fall back to the plain defaults, not the overrides
        match validate::parse_snapshot(&raw, &Settings::default()) {
            Ok(settings) => Some(settings),
            Err(e) => {
                warn!("Discarding malformed theme settings snapshot: {}", e);
                None
            }
        }
    }

    pub fn get(&self) -> &Settings {
        &self.settings
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Whether an explicit reduced motion choice is overriding the system signal
    pub fn is_motion_latched(&self) -> bool {
        self.motion_latched
    }

    /// Replace one field. Numeric fields are stored as given.
    pub fn update(&mut self, setting: Setting) -> &Settings {
        let key = setting.key();
        if key == SettingKey::ReducedMotion {
            self.motion_latched = true;
        }
        setting.apply_to(&mut self.settings);
        info!("Updated {} = {}", key, self.settings.value_of(key));
        self.commit();
        &self.settings
    }

    /// String-keyed form of [`update`](Self::update).
    ///
    /// `name` is the snapshot field name. A value that does not fit the field
    /// is replaced by the field's default; only an unknown field name fails.
    pub fn update_field(&mut self, name: &str, raw_value: &str) -> Result<&Settings, SettingError> {
        let key: SettingKey = name.parse()?;
        let setting = key.parse_value(raw_value);
        Ok(self.update(setting))
    }

    /// Restore defaults, keeping the construction-time theme and accent color.
    ///
    /// Re-arms reduced motion tracking and immediately follows the last
    /// system reading, if one has been seen.
    pub fn reset_to_defaults(&mut self) -> &Settings {
        self.settings = self.options.base_settings();
        self.motion_latched = false;
        if let Some(prefers_reduce) = self.last_system_motion {
            self.settings.reduced_motion = ReducedMotion::from_system(prefers_reduce);
        }
        info!("Reset theme settings to defaults");
        self.commit();
        &self.settings
    }

    /// Feed the system "prefers reduced motion" signal.
    ///
    /// The signal is only followed while the field is still `no-preference`
    /// and no explicit choice has been made. Returns true if the record changed.
    pub fn apply_system_motion(&mut self, prefers_reduce: bool) -> bool {
        self.last_system_motion = Some(prefers_reduce);

        if self.motion_latched {
            debug!("STORE: ignoring system reduced motion ({}), user choice latched", prefers_reduce);
            return false;
        }

        if self.settings.reduced_motion != ReducedMotion::NoPreference {
            debug!(
                "STORE: ignoring system reduced motion ({}), field is already {}",
                prefers_reduce, self.settings.reduced_motion
            );
            return false;
        }

        let target = ReducedMotion::from_system(prefers_reduce);
        if self.settings.reduced_motion == target {
            return false;
        }

        debug!("STORE: following system reduced motion -> {}", target);
        self.settings.reduced_motion = target;
        self.commit();
        true
    }

    /// Write the current record under the storage key.
    ///
    /// Does nothing unless persistence is enabled and the store is
    /// initialized. Failures are logged, never returned.
    pub fn persist(&mut self) {
        if !self.options.persist || !self.initialized {
            return;
        }

        let snapshot = match serde_json::to_string(&self.settings) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize theme settings: {}", e);
                return;
            }
        };

        match self.storage.set_item(&self.options.storage_key, &snapshot) {
            Ok(()) => debug!("STORE: saved snapshot under '{}'", self.options.storage_key),
            Err(e) => warn!("Failed to save theme settings to storage: {}", e),
        }
    }

    /// Register a callback invoked with the new record after every change
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: FnMut(&Settings) + 'static,
    {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, Box::new(listener)));
        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Number of live subscribers
    pub fn subscriber_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }

    fn commit(&mut self) {
        self.persist();
        self.notify();
    }

    fn notify(&self) {
        // Listeners run with the registry unborrowed so they may subscribe or
        // drop their own handles.
        let mut active = std::mem::take(&mut self.registry.borrow_mut().listeners);
        for (_, listener) in active.iter_mut() {
            listener(&self.settings);
        }

        let mut registry = self.registry.borrow_mut();
        let cancelled = std::mem::take(&mut registry.cancelled);
        active.retain(|(id, _)| !cancelled.contains(id));
        active.append(&mut registry.listeners);
        registry.listeners = active;
    }
}
