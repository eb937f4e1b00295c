use ratatui::style::Color;

/// Terminal color for an accent string, used for the swatch and highlights.
///
/// Understands CSS color names the site's presets use, `#rrggbb` and `#rgb`
/// hex, `rgb(r, g, b)` and bare `r,g,b` triples. Gradients, `hsl()` and
/// custom properties have no terminal equivalent.
pub fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim().to_lowercase();

    named_color(&s)
        .or_else(|| s.strip_prefix('#').and_then(hex_color))
        .or_else(|| rgb_color(&s))
}

fn named_color(name: &str) -> Option<Color> {
    let color = match name {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" | "fuchsia" => Color::Magenta,
        "cyan" | "aqua" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        "white" => Color::White,
        "orange" => Color::Rgb(255, 165, 0),
        "hotpink" => Color::Rgb(255, 105, 180),
        "rebeccapurple" => Color::Rgb(102, 51, 153),
        _ => return None,
    };
    Some(color)
}

fn hex_color(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let expanded: String = match hex.len() {
        6 => hex.to_string(),
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        _ => return None,
    };

    let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

fn rgb_color(s: &str) -> Option<Color> {
    let inner = s
        .strip_prefix("rgb(")
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(s);

    let channels = inner
        .split(',')
        .map(|part| part.trim().parse::<u8>().ok())
        .collect::<Option<Vec<u8>>>()?;

    match channels[..] {
        [r, g, b] => Some(Color::Rgb(r, g, b)),
        _ => None,
    }
}
