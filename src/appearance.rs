use phf::phf_map;

use crate::settings::{Choice, Settings, Theme};

/// CSS font stacks by font family name
static FONT_STACKS: phf::Map<&'static str, &'static str> = phf_map! {
    "sans" => "Inter, ui-sans-serif, system-ui, -apple-system, \"Segoe UI\", Roboto, \"Helvetica Neue\", Arial, \"Noto Sans\", sans-serif",
    "serif" => "Georgia, ui-serif, serif",
    "mono" => "\"Fira Code\", ui-monospace, SFMono-Regular, \"SF Mono\", Consolas, \"Liberation Mono\", Menlo, monospace",
};

/// Background and text colors for a theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg_primary: &'static str,
    pub bg_secondary: &'static str,
    pub text_primary: &'static str,
    pub text_secondary: &'static str,
}

pub const PALETTE_CYBERPUNK: Palette = Palette {
    bg_primary: "#0a0a0a",
    bg_secondary: "#1a1a1a",
    text_primary: "#ffffff",
    text_secondary: "#b0b0b0",
};

pub const PALETTE_GLASS: Palette = Palette {
    bg_primary: "rgba(255, 255, 255, 0.1)",
    bg_secondary: "rgba(255, 255, 255, 0.05)",
    text_primary: "#ffffff",
    text_secondary: "#cccccc",
};

pub const PALETTE_MINIMAL: Palette = Palette {
    bg_primary: "#ffffff",
    bg_secondary: "#f8f9fa",
    text_primary: "#333333",
    text_secondary: "#666666",
};

pub const PALETTE_DARK: Palette = Palette {
    bg_primary: "#121212",
    bg_secondary: "#1e1e1e",
    text_primary: "#ffffff",
    text_secondary: "#bbbbbb",
};

pub const PALETTE_LIGHT: Palette = Palette {
    bg_primary: "#ffffff",
    bg_secondary: "#f5f5f5",
    text_primary: "#333333",
    text_secondary: "#666666",
};

pub const PALETTE_NEON: Palette = Palette {
    bg_primary: "#000000",
    bg_secondary: "#0f0f0f",
    text_primary: "#ffffff",
    text_secondary: "#00ff88",
};

impl Palette {
    pub fn for_theme(theme: Theme) -> Palette {
        match theme {
            Theme::Cyberpunk => PALETTE_CYBERPUNK,
            Theme::Glass => PALETTE_GLASS,
            Theme::Minimal => PALETTE_MINIMAL,
            Theme::Dark => PALETTE_DARK,
            Theme::Light => PALETTE_LIGHT,
            Theme::Neon => PALETTE_NEON,
        }
    }
}

fn enabled(flag: bool) -> &'static str {
    if flag {
        "enabled"
    } else {
        "disabled"
    }
}

/// Visual parameters derived from a settings record: CSS custom properties for
/// the document root and data attributes for the body element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appearance {
    pub variables: Vec<(&'static str, String)>,
    pub attributes: Vec<(&'static str, String)>,
}

impl Appearance {
    pub fn derive(settings: &Settings) -> Self {
        let palette = Palette::for_theme(settings.theme);
        let font_stack = FONT_STACKS
            .get(settings.font_family.as_str())
            .copied()
            .unwrap_or_default();

        let variables = vec![
            ("--neon-cyan", settings.accent_color.clone()),
            ("--animation-intensity", format!("{}%", settings.animation_intensity)),
            ("--particle-density", settings.particle_density.to_string()),
            ("--font-family", font_stack.to_string()),
            ("--bg-primary", palette.bg_primary.to_string()),
            ("--bg-secondary", palette.bg_secondary.to_string()),
            ("--text-primary", palette.text_primary.to_string()),
            ("--text-secondary", palette.text_secondary.to_string()),
        ];

        let attributes = vec![
            ("data-theme", settings.theme.to_string()),
            ("data-pattern", settings.background_pattern.to_string()),
            ("data-particles", enabled(settings.enable_particles).to_string()),
            ("data-glitch", enabled(settings.enable_glitch).to_string()),
            ("data-reduced-motion", settings.reduced_motion.to_string()),
        ];

        Self { variables, attributes }
    }

    pub fn variable(&self, name: &str) -> Option<&str> {
        self.variables
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// `:root { ... }` block setting every variable
    pub fn to_css(&self) -> String {
        let mut output = String::from(":root {\n");
        for (name, value) in &self.variables {
            output.push_str(&format!("  {}: {};\n", name, value));
        }
        output.push_str("}\n");
        output
    }

    /// Body attributes in HTML attribute syntax
    pub fn to_attributes(&self) -> String {
        self.attributes
            .iter()
            .map(|(name, value)| format!("{}=\"{}\"", name, value))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
