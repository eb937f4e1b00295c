// Theme settings record
// Persisted as a single JSON object with camelCase keys and literal enum strings

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Default accent color (cyan)
pub const DEFAULT_ACCENT_COLOR: &str = "#00f0d3";

/// Default particle density (percent)
pub const DEFAULT_PARTICLE_DENSITY: i32 = 50;

/// Default animation intensity (percent)
pub const DEFAULT_ANIMATION_INTENSITY: i32 = 100;

/// Error returned when a string is not one of an enumeration's literal values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseChoiceError {
    pub kind: &'static str,
    pub value: String,
}

/// Errors from the string-keyed settings interface
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingError {
    #[error("unknown setting '{0}'")]
    UnknownField(String),
}

/// A closed set of literal string values
///
/// Implemented by every enumerated settings field so validation, parsing and
/// the interactive switcher can treat them uniformly.
pub trait Choice: Copy + PartialEq + Sized + 'static {
    /// Human readable name of the enumeration, used in error messages
    const KIND: &'static str;

    /// Every variant, in display order
    const ALL: &'static [Self];

    /// The literal wire value
    fn as_str(&self) -> &'static str;

    fn parse_choice(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == s)
    }

    fn next(self) -> Self {
        let i = Self::ALL.iter().position(|v| *v == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        let i = Self::ALL.iter().position(|v| *v == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Implements `Display` and `FromStr` in terms of `Choice`
macro_rules! choice_str_impls {
    ($ty:ty) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ParseChoiceError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty as Choice>::parse_choice(s).ok_or_else(|| ParseChoiceError {
                    kind: <$ty as Choice>::KIND,
                    value: s.to_string(),
                })
            }
        }
    };
}

/// Visual theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Cyberpunk,
    Glass,
    Minimal,
    Dark,
    Light,
    Neon,
}

impl Choice for Theme {
    const KIND: &'static str = "theme";
    const ALL: &'static [Self] = &[
        Theme::Cyberpunk,
        Theme::Glass,
        Theme::Minimal,
        Theme::Dark,
        Theme::Light,
        Theme::Neon,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Theme::Cyberpunk => "cyberpunk",
            Theme::Glass => "glass",
            Theme::Minimal => "minimal",
            Theme::Dark => "dark",
            Theme::Light => "light",
            Theme::Neon => "neon",
        }
    }
}

choice_str_impls!(Theme);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    #[default]
    Sans,
    Serif,
    Mono,
}

impl Choice for FontFamily {
    const KIND: &'static str = "font family";
    const ALL: &'static [Self] = &[FontFamily::Sans, FontFamily::Serif, FontFamily::Mono];

    fn as_str(&self) -> &'static str {
        match self {
            FontFamily::Sans => "sans",
            FontFamily::Serif => "serif",
            FontFamily::Mono => "mono",
        }
    }
}

choice_str_impls!(FontFamily);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundPattern {
    #[default]
    None,
    Grid,
    Dots,
    Waves,
}

impl Choice for BackgroundPattern {
    const KIND: &'static str = "background pattern";
    const ALL: &'static [Self] = &[
        BackgroundPattern::None,
        BackgroundPattern::Grid,
        BackgroundPattern::Dots,
        BackgroundPattern::Waves,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            BackgroundPattern::None => "none",
            BackgroundPattern::Grid => "grid",
            BackgroundPattern::Dots => "dots",
            BackgroundPattern::Waves => "waves",
        }
    }
}

choice_str_impls!(BackgroundPattern);

/// Reduced motion preference, mirroring the `prefers-reduced-motion` media feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReducedMotion {
    Reduce,
    #[default]
    NoPreference,
}

impl ReducedMotion {
    /// Map a "system prefers reduced motion" reading to a preference
    pub fn from_system(prefers_reduce: bool) -> Self {
        if prefers_reduce {
            ReducedMotion::Reduce
        } else {
            ReducedMotion::NoPreference
        }
    }
}

impl Choice for ReducedMotion {
    const KIND: &'static str = "reduced motion preference";
    const ALL: &'static [Self] = &[ReducedMotion::Reduce, ReducedMotion::NoPreference];

    fn as_str(&self) -> &'static str {
        match self {
            ReducedMotion::Reduce => "reduce",
            ReducedMotion::NoPreference => "no-preference",
        }
    }
}

choice_str_impls!(ReducedMotion);

/// The full settings record. Every field is always populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub theme: Theme,
    pub particle_density: i32,
    pub animation_intensity: i32,
    pub accent_color: String,
    pub font_family: FontFamily,
    pub background_pattern: BackgroundPattern,
    pub enable_particles: bool,
    pub enable_glitch: bool,
    pub reduced_motion: ReducedMotion,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            particle_density: DEFAULT_PARTICLE_DENSITY,
            animation_intensity: DEFAULT_ANIMATION_INTENSITY,
            accent_color: DEFAULT_ACCENT_COLOR.to_string(),
            font_family: FontFamily::default(),
            background_pattern: BackgroundPattern::default(),
            enable_particles: true,
            enable_glitch: true,
            reduced_motion: ReducedMotion::default(),
        }
    }
}

impl Settings {
    /// Defaults with the two construction-time overrides applied
    pub fn with_overrides(theme: Theme, accent_color: impl Into<String>) -> Self {
        Self {
            theme,
            accent_color: accent_color.into(),
            ..Self::default()
        }
    }

    /// Display value of a single field
    pub fn value_of(&self, key: SettingKey) -> String {
        match key {
            SettingKey::Theme => self.theme.to_string(),
            SettingKey::ParticleDensity => self.particle_density.to_string(),
            SettingKey::AnimationIntensity => self.animation_intensity.to_string(),
            SettingKey::AccentColor => self.accent_color.clone(),
            SettingKey::FontFamily => self.font_family.to_string(),
            SettingKey::BackgroundPattern => self.background_pattern.to_string(),
            SettingKey::EnableParticles => self.enable_particles.to_string(),
            SettingKey::EnableGlitch => self.enable_glitch.to_string(),
            SettingKey::ReducedMotion => self.reduced_motion.to_string(),
        }
    }
}

/// Identifies one field of the settings record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    Theme,
    ParticleDensity,
    AnimationIntensity,
    AccentColor,
    FontFamily,
    BackgroundPattern,
    EnableParticles,
    EnableGlitch,
    ReducedMotion,
}

impl SettingKey {
    pub const ALL: [SettingKey; 9] = [
        SettingKey::Theme,
        SettingKey::ParticleDensity,
        SettingKey::AnimationIntensity,
        SettingKey::AccentColor,
        SettingKey::FontFamily,
        SettingKey::BackgroundPattern,
        SettingKey::EnableParticles,
        SettingKey::EnableGlitch,
        SettingKey::ReducedMotion,
    ];

    /// Key used in the persisted snapshot
    pub fn name(&self) -> &'static str {
        match self {
            SettingKey::Theme => "theme",
            SettingKey::ParticleDensity => "particleDensity",
            SettingKey::AnimationIntensity => "animationIntensity",
            SettingKey::AccentColor => "accentColor",
            SettingKey::FontFamily => "fontFamily",
            SettingKey::BackgroundPattern => "backgroundPattern",
            SettingKey::EnableParticles => "enableParticles",
            SettingKey::EnableGlitch => "enableGlitch",
            SettingKey::ReducedMotion => "reducedMotion",
        }
    }

    /// Label shown in the switcher
    pub fn label(&self) -> &'static str {
        match self {
            SettingKey::Theme => "Theme",
            SettingKey::ParticleDensity => "Particle Density",
            SettingKey::AnimationIntensity => "Animation Intensity",
            SettingKey::AccentColor => "Accent Color",
            SettingKey::FontFamily => "Font Family",
            SettingKey::BackgroundPattern => "Background Pattern",
            SettingKey::EnableParticles => "Enable Particles",
            SettingKey::EnableGlitch => "Enable Glitch Effects",
            SettingKey::ReducedMotion => "Reduce Motion",
        }
    }

    /// Parse a raw string into a value for this field.
    ///
    /// Values that do not fit the field's type fall back to the field's
    /// default rather than failing.
    pub fn parse_value(&self, raw: &str) -> Setting {
        let raw = raw.trim();
        let defaults = Settings::default();
        match self {
            SettingKey::Theme => Setting::Theme(parse_or(raw, defaults.theme)),
            SettingKey::ParticleDensity => {
                Setting::ParticleDensity(parse_or(raw, defaults.particle_density))
            }
            SettingKey::AnimationIntensity => {
                Setting::AnimationIntensity(parse_or(raw, defaults.animation_intensity))
            }
            SettingKey::AccentColor => {
                if raw.is_empty() {
                    tracing::warn!("Empty accent color, using default {}", DEFAULT_ACCENT_COLOR);
                    Setting::AccentColor(defaults.accent_color)
                } else {
                    Setting::AccentColor(raw.to_string())
                }
            }
            SettingKey::FontFamily => Setting::FontFamily(parse_or(raw, defaults.font_family)),
            SettingKey::BackgroundPattern => {
                Setting::BackgroundPattern(parse_or(raw, defaults.background_pattern))
            }
            SettingKey::EnableParticles => {
                Setting::EnableParticles(parse_or(raw, defaults.enable_particles))
            }
            SettingKey::EnableGlitch => Setting::EnableGlitch(parse_or(raw, defaults.enable_glitch)),
            SettingKey::ReducedMotion => {
                Setting::ReducedMotion(parse_or(raw, defaults.reduced_motion))
            }
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SettingKey {
    type Err = SettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SettingKey::ALL
            .iter()
            .copied()
            .find(|k| k.name() == s)
            .ok_or_else(|| SettingError::UnknownField(s.to_string()))
    }
}

fn parse_or<T>(raw: &str, fallback: T) -> T
where
    T: FromStr + fmt::Display,
    T::Err: fmt::Display,
{
    match raw.parse::<T>() {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Invalid value '{}' ({}), using default {}", raw, e, fallback);
            fallback
        }
    }
}

/// A new value for exactly one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Setting {
    Theme(Theme),
    ParticleDensity(i32),
    AnimationIntensity(i32),
    AccentColor(String),
    FontFamily(FontFamily),
    BackgroundPattern(BackgroundPattern),
    EnableParticles(bool),
    EnableGlitch(bool),
    ReducedMotion(ReducedMotion),
}

impl Setting {
    pub fn key(&self) -> SettingKey {
        match self {
            Setting::Theme(_) => SettingKey::Theme,
            Setting::ParticleDensity(_) => SettingKey::ParticleDensity,
            Setting::AnimationIntensity(_) => SettingKey::AnimationIntensity,
            Setting::AccentColor(_) => SettingKey::AccentColor,
            Setting::FontFamily(_) => SettingKey::FontFamily,
            Setting::BackgroundPattern(_) => SettingKey::BackgroundPattern,
            Setting::EnableParticles(_) => SettingKey::EnableParticles,
            Setting::EnableGlitch(_) => SettingKey::EnableGlitch,
            Setting::ReducedMotion(_) => SettingKey::ReducedMotion,
        }
    }

    /// Write this value into `settings`, leaving every other field untouched
    pub fn apply_to(self, settings: &mut Settings) {
        match self {
            Setting::Theme(v) => settings.theme = v,
            Setting::ParticleDensity(v) => settings.particle_density = v,
            Setting::AnimationIntensity(v) => settings.animation_intensity = v,
            Setting::AccentColor(v) => settings.accent_color = v,
            Setting::FontFamily(v) => settings.font_family = v,
            Setting::BackgroundPattern(v) => settings.background_pattern = v,
            Setting::EnableParticles(v) => settings.enable_particles = v,
            Setting::EnableGlitch(v) => settings.enable_glitch = v,
            Setting::ReducedMotion(v) => settings.reduced_motion = v,
        }
    }
}
