//! Validation of untrusted snapshots.
//!
//! A snapshot read back from local storage may be missing fields, carry values
//! of the wrong type, numbers out of range, or enum strings from an older
//! version. Each field is checked on its own; anything unusable is replaced by
//! the corresponding default, so the result is always fully populated.

use serde_json::{Map, Value};
use tracing::debug;

use crate::settings::{Choice, SettingKey, Settings};

/// Lowest accepted value for percentage fields
pub const MIN_LEVEL: i32 = 0;

/// Highest accepted value for percentage fields
pub const MAX_LEVEL: i32 = 100;

/// Clamp a raw JSON number into the percentage range, rounding fractions
pub fn clamp_level(n: f64) -> i32 {
    n.clamp(MIN_LEVEL as f64, MAX_LEVEL as f64).round() as i32
}

/// Merge an untrusted snapshot over `defaults`, field by field.
pub fn validate_snapshot(raw: &Value, defaults: &Settings) -> Settings {
    let Some(obj) = raw.as_object() else {
        debug!("SNAPSHOT: root is not an object, using defaults");
        return defaults.clone();
    };

    Settings {
        theme: choice_field(obj, SettingKey::Theme, defaults.theme),
        particle_density: level_field(obj, SettingKey::ParticleDensity, defaults.particle_density),
        animation_intensity: level_field(
            obj,
            SettingKey::AnimationIntensity,
            defaults.animation_intensity,
        ),
        accent_color: accent_field(obj, &defaults.accent_color),
        font_family: choice_field(obj, SettingKey::FontFamily, defaults.font_family),
        background_pattern: choice_field(obj, SettingKey::BackgroundPattern, defaults.background_pattern),
        enable_particles: bool_field(obj, SettingKey::EnableParticles, defaults.enable_particles),
        enable_glitch: bool_field(obj, SettingKey::EnableGlitch, defaults.enable_glitch),
        reduced_motion: choice_field(obj, SettingKey::ReducedMotion, defaults.reduced_motion),
    }
}

/// Parse snapshot text and validate it. Only JSON syntax errors fail.
pub fn parse_snapshot(text: &str, defaults: &Settings) -> Result<Settings, serde_json::Error> {
    let raw: Value = serde_json::from_str(text)?;
    Ok(validate_snapshot(&raw, defaults))
}

fn choice_field<T: Choice>(obj: &Map<String, Value>, key: SettingKey, fallback: T) -> T {
    match obj.get(key.name()) {
        Some(Value::String(s)) => T::parse_choice(s).unwrap_or_else(|| {
            debug!("SNAPSHOT: unknown {} '{}', using {}", T::KIND, s, fallback.as_str());
            fallback
        }),
        Some(other) => {
            debug!("SNAPSHOT: {} has wrong type ({}), using {}", key, other, fallback.as_str());
            fallback
        }
        None => fallback,
    }
}

fn level_field(obj: &Map<String, Value>, key: SettingKey, fallback: i32) -> i32 {
    match obj.get(key.name()) {
        Some(Value::Number(n)) => match n.as_f64() {
            Some(f) => clamp_level(f),
            None => fallback,
        },
        Some(other) => {
            debug!("SNAPSHOT: {} is not a number ({}), using {}", key, other, fallback);
            fallback
        }
        None => fallback,
    }
}

fn accent_field(obj: &Map<String, Value>, fallback: &str) -> String {
    match obj.get(SettingKey::AccentColor.name()) {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(other) => {
            debug!("SNAPSHOT: unusable accent color ({}), using {}", other, fallback);
            fallback.to_string()
        }
        None => fallback.to_string(),
    }
}

fn bool_field(obj: &Map<String, Value>, key: SettingKey, fallback: bool) -> bool {
    match obj.get(key.name()) {
        Some(Value::Bool(b)) => *b,
        Some(other) => {
            debug!("SNAPSHOT: {} is not a boolean ({}), using {}", key, other, fallback);
            fallback
        }
        None => fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{BackgroundPattern, FontFamily, ReducedMotion, Theme};
    use serde_json::json;

    fn assert_valid(s: &Settings) {
        assert!((MIN_LEVEL..=MAX_LEVEL).contains(&s.particle_density));
        assert!((MIN_LEVEL..=MAX_LEVEL).contains(&s.animation_intensity));
        assert!(!s.accent_color.is_empty());
    }

    #[test]
    fn test_full_snapshot_is_taken_verbatim() {
        let raw = json!({
            "theme": "neon",
            "particleDensity": 10,
            "animationIntensity": 20,
            "accentColor": "hotpink",
            "fontFamily": "mono",
            "backgroundPattern": "waves",
            "enableParticles": false,
            "enableGlitch": false,
            "reducedMotion": "reduce"
        });
        let s = validate_snapshot(&raw, &Settings::default());
        assert_eq!(
            s,
            Settings {
                theme: Theme::Neon,
                particle_density: 10,
                animation_intensity: 20,
                accent_color: "hotpink".to_string(),
                font_family: FontFamily::Mono,
                background_pattern: BackgroundPattern::Waves,
                enable_particles: false,
                enable_glitch: false,
                reduced_motion: ReducedMotion::Reduce,
            }
        );
    }

    #[test]
    fn test_partial_snapshot_keeps_defaults() {
        let s = parse_snapshot(
            r#"{"theme":"glass","particleDensity":"oops","fontFamily":"sans"}"#,
            &Settings::default(),
        )
        .unwrap();
        assert_eq!(s.theme, Theme::Glass);
        assert_eq!(s.particle_density, 50);
        assert_eq!(s.font_family, FontFamily::Sans);
        assert_eq!(Settings { theme: Theme::Cyberpunk, ..s }, Settings::default());
    }

    #[test]
    fn test_levels_are_clamped() {
        let base = Settings::default();
        let s = validate_snapshot(&json!({"particleDensity": 150, "animationIntensity": -5}), &base);
        assert_eq!(s.particle_density, 100);
        assert_eq!(s.animation_intensity, 0);

        let s = validate_snapshot(&json!({"particleDensity": -5}), &base);
        assert_eq!(s.particle_density, 0);
    }

    #[test]
    fn test_fractional_levels_round() {
        let s = validate_snapshot(&json!({"particleDensity": 42.6}), &Settings::default());
        assert_eq!(s.particle_density, 43);
        let s = validate_snapshot(&json!({"particleDensity": 1e300}), &Settings::default());
        assert_eq!(s.particle_density, 100);
    }

    #[test]
    fn test_bad_fields_fall_back_individually() {
        let raw = json!({
            "theme": "vaporwave",
            "accentColor": "",
            "fontFamily": 3,
            "backgroundPattern": "dots",
            "enableParticles": "yes",
            "reducedMotion": null
        });
        let s = validate_snapshot(&raw, &Settings::default());
        assert_eq!(s.theme, Theme::Cyberpunk);
        assert_eq!(s.accent_color, "#00f0d3");
        assert_eq!(s.font_family, FontFamily::Sans);
        assert_eq!(s.background_pattern, BackgroundPattern::Dots);
        assert!(s.enable_particles);
        assert_eq!(s.reduced_motion, ReducedMotion::NoPreference);
    }

    #[test]
    fn test_fallback_is_the_given_defaults() {
        let defaults = Settings::default();
        let s = validate_snapshot(&json!({"theme": 7, "accentColor": false, "fontFamily": "mono"}), &defaults);
        assert_eq!(s.theme, Theme::Cyberpunk);
        assert_eq!(s.accent_color, "#00f0d3");
        assert_eq!(s.font_family, FontFamily::Mono);
    }

    #[test]
    fn test_non_object_roots_yield_defaults() {
        let base = Settings::default();
        for raw in [json!(null), json!([1, 2]), json!("cyberpunk"), json!(42), json!(true)] {
            let s = validate_snapshot(&raw, &base);
            assert_eq!(s, base, "root {}", raw);
        }
    }

    #[test]
    fn test_malformed_inputs_always_yield_valid_records() {
        let inputs = [
            json!({}),
            json!({"particleDensity": 9999, "animationIntensity": -9999}),
            json!({"accentColor": ["#fff"]}),
            json!({"theme": {"name": "neon"}}),
            json!({"unknownField": 1, "enableGlitch": 0}),
        ];
        for raw in inputs {
            assert_valid(&validate_snapshot(&raw, &Settings::default()));
        }
    }

    #[test]
    fn test_syntax_error_is_reported() {
        assert!(parse_snapshot("{not json", &Settings::default()).is_err());
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let s = validate_snapshot(&json!({"version": 2, "theme": "dark"}), &Settings::default());
        assert_eq!(s.theme, Theme::Dark);
    }
}
