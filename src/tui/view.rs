use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::color::parse_color;
use super::State;
use crate::appearance::Appearance;
use crate::settings::{SettingKey, Settings};

/// Width of the slider bar in cells
const BAR_WIDTH: usize = 20;

/// Accent used for highlights when the accent color has no terminal equivalent
const FALLBACK_HIGHLIGHT: Color = Color::Cyan;

const HELP_TEXT: &str = "↑/↓ select  ←/→ change  Enter edit/toggle  r reset  q quit";

pub fn render(f: &mut Frame, area: Rect, state: &State, settings: &Settings, appearance: &Appearance) {
    let preview_height = (appearance.variables.len() + 3) as u16;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(SettingKey::ALL.len() as u16 + 2),
            Constraint::Length(preview_height),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    render_settings(f, chunks[0], state, settings);
    render_preview(f, chunks[1], appearance);
    render_status_line(f, chunks[3], state);
}

fn highlight(settings: &Settings) -> Color {
    parse_color(&settings.accent_color).unwrap_or(FALLBACK_HIGHLIGHT)
}

fn level_bar(value: i32) -> String {
    let filled = (value.clamp(0, 100) as usize * BAR_WIDTH) / 100;
    format!("{}{} {}%", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled), value)
}

fn checkbox(flag: bool) -> &'static str {
    if flag {
        "[x]"
    } else {
        "[ ]"
    }
}

fn value_spans(key: SettingKey, state: &State, settings: &Settings) -> Vec<Span<'static>> {
    let selected = state.selected_key() == key;
    match key {
        SettingKey::ParticleDensity => vec![Span::raw(level_bar(settings.particle_density))],
        SettingKey::AnimationIntensity => vec![Span::raw(level_bar(settings.animation_intensity))],
        SettingKey::EnableParticles => vec![Span::raw(checkbox(settings.enable_particles))],
        SettingKey::EnableGlitch => vec![Span::raw(checkbox(settings.enable_glitch))],
        SettingKey::AccentColor => {
            let mut spans = Vec::new();
            if let Some(color) = parse_color(&settings.accent_color) {
                spans.push(Span::styled("████", Style::default().fg(color).bg(color)));
                spans.push(Span::raw(" "));
            }
            match (&state.editing, selected) {
                (Some(buffer), true) => spans.push(Span::styled(
                    format!("{}_", buffer),
                    Style::default().add_modifier(Modifier::UNDERLINED),
                )),
                _ => spans.push(Span::raw(settings.accent_color.clone())),
            }
            spans
        }
        _ => vec![Span::raw(format!("‹ {} ›", settings.value_of(key)))],
    }
}

fn render_settings(f: &mut Frame, area: Rect, state: &State, settings: &Settings) {
    let label_width = SettingKey::ALL
        .iter()
        .map(|k| k.label().width())
        .max()
        .unwrap_or(0);
    let accent = highlight(settings);

    let lines: Vec<Line> = SettingKey::ALL
        .iter()
        .map(|&key| {
            let selected = state.selected_key() == key;
            let marker = if selected { " ► " } else { "   " };
            let label = key.label();
            let padding = " ".repeat(label_width - label.width() + 2);
            let label_style = if selected {
                Style::default().fg(accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            let mut spans = vec![
                Span::raw(marker),
                Span::styled(label, label_style),
                Span::raw(padding),
            ];
            spans.extend(value_spans(key, state, settings));
            Line::from(spans)
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Theme Settings ")
        .border_style(Style::default().fg(accent));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_preview(f: &mut Frame, area: Rect, appearance: &Appearance) {
    let mut lines: Vec<Line> = appearance
        .variables
        .iter()
        .map(|(name, value)| Line::from(vec![
            Span::styled(format!(" {}", name), Style::default().fg(Color::Gray)),
            Span::raw(format!(": {}", value)),
        ]))
        .collect();
    lines.push(Line::raw(format!(" {}", appearance.to_attributes())));

    let block = Block::default().borders(Borders::ALL).title(" Preview ");
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_status_line(f: &mut Frame, area: Rect, state: &State) {
    let line = match &state.status {
        Some(status) if status.is_error => Line::from(Span::styled(
            format!(" ERROR: {}", status.text),
            Style::default().fg(Color::Red),
        )),
        Some(status) => Line::raw(format!(" {}", status.text)),
        None => Line::styled(format!(" {}", HELP_TEXT), Style::default().fg(Color::DarkGray)),
    };
    f.render_widget(Paragraph::new(line), area);
}
