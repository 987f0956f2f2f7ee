use crate::config::LayoutConfig;
use crate::text_metrics;

use super::TextBlock;

/// Measures a tile label, one line per camel-case word of the name.
pub(super) fn measure_label(
    text: &str,
    font_size: f32,
    font_family: &str,
    config: &LayoutConfig,
) -> TextBlock {
    let lines = split_name_lines(text);
    let measured = lines
        .iter()
        .map(|line| text_width(line, font_size, font_family, config.fast_text_metrics))
        .fold(0.0, f32::max);
    // Guard against fonts reporting implausibly narrow advances.
    let max_chars = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);
    let width = measured.max(max_chars as f32 * average_char_width(font_family, font_size, config));
    let height = lines.len() as f32 * font_size * config.label_line_height;
    TextBlock {
        lines,
        width,
        height,
    }
}

fn average_char_width(font_family: &str, font_size: f32, config: &LayoutConfig) -> f32 {
    if config.fast_text_metrics {
        return font_size * 0.56;
    }
    text_metrics::average_char_width(font_family, font_size).unwrap_or(font_size * 0.56)
}

pub(super) fn measure_line(
    text: &str,
    font_size: f32,
    font_family: &str,
    config: &LayoutConfig,
) -> TextBlock {
    let width = text_width(text, font_size, font_family, config.fast_text_metrics);
    TextBlock {
        lines: vec![text.to_string()],
        width,
        height: font_size * config.label_line_height,
    }
}

/// Breaks a project name before each uppercase letter that starts a new
/// word ("VideoGames" -> ["Video", "Games"]), matching how tiles wrap
/// their labels.
pub(super) fn split_name_lines(name: &str) -> Vec<String> {
    let chars: Vec<char> = name.chars().collect();
    let mut lines = Vec::new();
    let mut current = String::new();
    for (i, &ch) in chars.iter().enumerate() {
        let starts_word = i > 0
            && ch.is_uppercase()
            && chars.get(i + 1).is_some_and(|next| !next.is_uppercase());
        if starts_word && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        current.push(ch);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

pub(super) fn text_width(text: &str, font_size: f32, font_family: &str, fast: bool) -> f32 {
    if fast {
        return estimated_text_width(text, font_size);
    }
    text_metrics::measure_text_width(text, font_size, font_family)
        .unwrap_or_else(|| estimated_text_width(text, font_size))
}

fn estimated_text_width(text: &str, font_size: f32) -> f32 {
    text.chars().map(char_width_factor).sum::<f32>() * font_size
}

// Coarse advance factors for a generic sans-serif face.
fn char_width_factor(ch: char) -> f32 {
    match ch {
        ' ' | '.' | ',' | ':' | ';' | '!' | '|' | '\'' => 0.32,
        'i' | 'j' | 'l' | 'I' => 0.25,
        'f' | 'r' | 't' => 0.35,
        'm' | 'w' | 'M' | 'W' | '@' | '%' => 0.90,
        'A'..='Z' | '0'..='9' => 0.66,
        _ => 0.56,
    }
}
