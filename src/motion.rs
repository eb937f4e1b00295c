//! System reduced-motion signal.
//!
//! Probes report whether the desktop asks applications to reduce motion.
//! [`watch_loop`] polls a probe in the background and forwards readings to
//! the UI loop only when they change; the UI loop applies them to the store.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::sync::mpsc;

/// Environment variable read by [`EnvProbe::default`]
pub const DEFAULT_MOTION_ENV: &str = "PREFERS_REDUCED_MOTION";

/// Buffer size for the reading channel
pub const MOTION_CHANNEL_BUFFER_SIZE: usize = 8;

/// Source of the "prefers reduced motion" signal
#[async_trait]
pub trait MotionProbe: Send + Sync {
    /// `Some(true)` when reduced motion is requested, `None` when unknown
    async fn prefers_reduced_motion(&self) -> Option<bool>;
}

/// Interpret a textual preference
pub fn parse_preference(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "reduce" => Some(true),
        "0" | "false" | "no" | "no-preference" => Some(false),
        _ => None,
    }
}

/// Reads the preference from an environment variable
#[derive(Debug, Clone)]
pub struct EnvProbe {
    var: String,
}

impl EnvProbe {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvProbe {
    fn default() -> Self {
        Self::new(DEFAULT_MOTION_ENV)
    }
}

#[async_trait]
impl MotionProbe for EnvProbe {
    async fn prefers_reduced_motion(&self) -> Option<bool> {
        std::env::var(&self.var).ok().and_then(|v| parse_preference(&v))
    }
}

/// Asks GNOME whether animations are enabled
#[derive(Debug, Clone, Default)]
pub struct GsettingsProbe;

impl GsettingsProbe {
    /// Animations disabled means reduced motion
    pub fn parse_output(stdout: &str) -> Option<bool> {
        match stdout.trim() {
            "false" => Some(true),
            "true" => Some(false),
            _ => None,
        }
    }
}

#[async_trait]
impl MotionProbe for GsettingsProbe {
    async fn prefers_reduced_motion(&self) -> Option<bool> {
        let output = Command::new("gsettings")
            .args(["get", "org.gnome.desktop.interface", "enable-animations"])
            .output()
            .await
            .ok()?;

        if !output.status.success() {
            tracing::debug!("MOTION: gsettings exited with {}", output.status);
            return None;
        }

        Self::parse_output(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Tries each probe in order; the first definite reading wins
pub struct ChainProbe {
    probes: Vec<Arc<dyn MotionProbe>>,
}

impl ChainProbe {
    pub fn new(probes: Vec<Arc<dyn MotionProbe>>) -> Self {
        Self { probes }
    }

    /// Environment override first, then the desktop setting
    pub fn system() -> Self {
        let probes: Vec<Arc<dyn MotionProbe>> =
            vec![Arc::new(EnvProbe::default()), Arc::new(GsettingsProbe)];
        Self::new(probes)
    }
}

#[async_trait]
impl MotionProbe for ChainProbe {
    async fn prefers_reduced_motion(&self) -> Option<bool> {
        for probe in &self.probes {
            if let Some(reading) = probe.prefers_reduced_motion().await {
                return Some(reading);
            }
        }
        None
    }
}

/// Background task that polls `probe` and sends changed readings on `tx`.
///
/// The first definite reading is always sent. Exits once the receiver is gone.
pub async fn watch_loop(probe: Arc<dyn MotionProbe>, interval: Duration, tx: mpsc::Sender<bool>) {
    let mut interval_timer = tokio::time::interval(interval);
    let mut last: Option<bool> = None;

    loop {
        interval_timer.tick().await;

        if tx.is_closed() {
            break;
        }

        let Some(reading) = probe.prefers_reduced_motion().await else {
            continue;
        };

        if last == Some(reading) {
            continue;
        }

        tracing::debug!("MOTION: system reduced motion -> {}", reading);
        last = Some(reading);
        if tx.send(reading).await.is_err() {
            break;
        }
    }

    tracing::debug!("MOTION: watcher stopped");
}
