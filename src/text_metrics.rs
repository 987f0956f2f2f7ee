use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;
use ttf_parser::Face;

static MEASURER: Lazy<Mutex<FontMeasurer>> = Lazy::new(|| Mutex::new(FontMeasurer::new()));

/// Measures `text` against the first resolvable system font in `font_family`
/// (a CSS-style family list). Returns `None` when no font can be loaded;
/// callers fall back to estimated widths.
pub fn measure_text_width(text: &str, font_size: f32, font_family: &str) -> Option<f32> {
    if text.is_empty() || font_size <= 0.0 {
        return Some(0.0);
    }
    let mut guard = MEASURER.lock().ok()?;
    guard.measure(text, font_size, font_family)
}

pub fn average_char_width(font_family: &str, font_size: f32) -> Option<f32> {
    if font_size <= 0.0 {
        return None;
    }
    let sample = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
    let width = measure_text_width(sample, font_size, font_family)?;
    Some(width / sample.len() as f32)
}

struct FontMeasurer {
    db: Database,
    loaded_system_fonts: bool,
    metrics: HashMap<String, Option<FontMetrics>>,
}

/// ASCII advance table captured once per family; non-ASCII characters use a
/// proportional estimate.
struct FontMetrics {
    units_per_em: f32,
    ascii_advances: [u16; 128],
}

impl FontMeasurer {
    fn new() -> Self {
        Self {
            db: Database::new(),
            loaded_system_fonts: false,
            metrics: HashMap::new(),
        }
    }

    fn measure(&mut self, text: &str, font_size: f32, font_family: &str) -> Option<f32> {
        let key = family_key(font_family);
        if !self.metrics.contains_key(&key) {
            let loaded = self.load(font_family);
            self.metrics.insert(key.clone(), loaded);
        }
        let metrics = self.metrics.get(&key)?.as_ref()?;

        let scale = font_size / metrics.units_per_em;
        let fallback = font_size * 0.56;
        let mut width = 0.0f32;
        for ch in text.chars() {
            if ch == '\n' {
                continue;
            }
            if ch.is_ascii() {
                let units = metrics.ascii_advances[ch as usize];
                width += if units == 0 {
                    fallback
                } else {
                    units as f32 * scale
                };
            } else {
                width += fallback;
            }
        }
        Some(width.max(0.0))
    }

    fn load(&mut self, font_family: &str) -> Option<FontMetrics> {
        if !self.loaded_system_fonts {
            self.db.load_system_fonts();
            self.loaded_system_fonts = true;
        }

        let names: Vec<String> = font_family
            .split(',')
            .map(|part| part.trim().trim_matches('"').trim_matches('\'').to_string())
            .filter(|part| !part.is_empty())
            .collect();
        let mut families: Vec<Family<'_>> = Vec::with_capacity(names.len().max(1));
        for name in &names {
            match name.to_ascii_lowercase().as_str() {
                "serif" => families.push(Family::Serif),
                "sans-serif" | "system-ui" | "-apple-system" | "ui-sans-serif" => {
                    families.push(Family::SansSerif)
                }
                "monospace" | "ui-monospace" => families.push(Family::Monospace),
                "cursive" => families.push(Family::Cursive),
                "fantasy" => families.push(Family::Fantasy),
                _ => families.push(Family::Name(name.as_str())),
            }
        }
        if families.is_empty() {
            families.push(Family::SansSerif);
        }

        let query = Query {
            families: &families,
            weight: Weight::NORMAL,
            stretch: Stretch::Normal,
            style: Style::Normal,
        };
        let id = self.db.query(&query)?;
        let mut loaded = None;
        self.db.with_face_data(id, |data, index| {
            if let Ok(face) = Face::parse(data, index) {
                let mut advances = [0u16; 128];
                for byte in 32u8..127 {
                    if let Some(glyph) = face.glyph_index(byte as char) {
                        advances[byte as usize] = face.glyph_hor_advance(glyph).unwrap_or(0);
                    }
                }
                loaded = Some(FontMetrics {
                    units_per_em: face.units_per_em().max(1) as f32,
                    ascii_advances: advances,
                });
            }
        });
        loaded
    }
}

fn family_key(font_family: &str) -> String {
    let trimmed = font_family.trim();
    if trimmed.is_empty() {
        "sans-serif".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_measures_zero() {
        assert_eq!(measure_text_width("", 12.0, "sans-serif"), Some(0.0));
    }

    #[test]
    fn wider_text_measures_wider() {
        // Skip when the environment has no fonts at all.
        let Some(short) = measure_text_width("hi", 12.0, "sans-serif") else {
            return;
        };
        let Some(long) = measure_text_width("hello world", 12.0, "sans-serif") else {
            return;
        };
        assert!(long > short);
    }
}
