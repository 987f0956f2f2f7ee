use std::collections::HashMap;

use tracing::warn;

pub const FALLBACK_COLOR: &str = "#808080";

/// Ordered category-to-color pairs plus a lookup index. The pair order is
/// the legend order.
#[derive(Debug, Clone, Default)]
pub struct CategoryColors {
    pairs: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl CategoryColors {
    pub fn get(&self, category: &str) -> Option<&str> {
        self.index
            .get(category)
            .map(|&at| self.pairs[at].1.as_str())
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Maps the i-th distinct category to `palette[i % palette.len()]`.
///
/// Pure: no hidden counter, so tiles and legend built from the same category
/// order always agree. More categories than colors is non-fatal; the palette
/// wraps around and the repeat is logged.
pub fn assign(categories: &[String], palette: &[String]) -> CategoryColors {
    if palette.is_empty() {
        warn!("empty palette; all categories fall back to {FALLBACK_COLOR}");
    } else if categories.len() > palette.len() {
        warn!(
            "palette exhausted: {} categories for {} colors; colors will repeat",
            categories.len(),
            palette.len()
        );
    }

    let mut colors = CategoryColors::default();
    for (i, category) in categories.iter().enumerate() {
        let color = if palette.is_empty() {
            FALLBACK_COLOR.to_string()
        } else {
            palette[i % palette.len()].clone()
        };
        colors.index.insert(category.clone(), colors.pairs.len());
        colors.pairs.push((category.clone(), color));
    }
    colors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn assigns_in_palette_order() {
        let categories = strings(&["Games", "Design", "Food"]);
        let palette = strings(&["#111111", "#222222", "#333333", "#444444"]);
        let colors = assign(&categories, &palette);
        assert_eq!(colors.get("Games"), Some("#111111"));
        assert_eq!(colors.get("Design"), Some("#222222"));
        assert_eq!(colors.get("Food"), Some("#333333"));
        assert_eq!(colors.get("Missing"), None);
    }

    #[test]
    fn wraps_around_when_exhausted() {
        let categories: Vec<String> = (0..25).map(|i| format!("category-{i}")).collect();
        let palette: Vec<String> = (0..19).map(|i| format!("#{i:06x}")).collect();
        let colors = assign(&categories, &palette);
        assert_eq!(colors.len(), 25);
        assert_eq!(colors.get("category-19"), colors.get("category-0"));
        assert_eq!(colors.get("category-23"), colors.get("category-4"));
    }

    #[test]
    fn repeated_calls_are_identical() {
        let categories = strings(&["a", "b", "c", "d", "e"]);
        let palette = strings(&["#111111", "#222222"]);
        let first = assign(&categories, &palette);
        let second = assign(&categories, &palette);
        assert_eq!(first.pairs(), second.pairs());
    }

    #[test]
    fn empty_palette_falls_back() {
        let colors = assign(&strings(&["a"]), &[]);
        assert_eq!(colors.get("a"), Some(FALLBACK_COLOR));
    }
}
