use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub background: String,
    pub tile_text_size: f32,
    pub tile_text_color: String,
    pub tile_stroke_color: String,
    pub tile_stroke_width: f32,
    pub legend_text_size: f32,
    pub legend_text_color: String,
    pub category_colors: Vec<String>,
}

impl Theme {
    pub fn classic() -> Self {
        Self {
            font_family: "Verdana, Arial, sans-serif".to_string(),
            font_size: 16.0,
            background: "#FFFFFF".to_string(),
            tile_text_size: 10.0,
            tile_text_color: "#000000".to_string(),
            tile_stroke_color: "#FFFFFF".to_string(),
            tile_stroke_width: 1.0,
            legend_text_size: 12.0,
            legend_text_color: "#000000".to_string(),
            category_colors: CLASSIC_CATEGORY_COLORS
                .iter()
                .map(|value| value.to_string())
                .collect(),
        }
    }

    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 13.0,
            background: "#FFFFFF".to_string(),
            tile_text_size: 10.0,
            tile_text_color: "#1C2430".to_string(),
            tile_stroke_color: "#FFFFFF".to_string(),
            tile_stroke_width: 1.2,
            legend_text_size: 12.0,
            legend_text_color: "#1C2430".to_string(),
            category_colors: MODERN_CATEGORY_COLORS
                .iter()
                .map(|value| value.to_string())
                .collect(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}

const CLASSIC_CATEGORY_COLORS: [&str; 19] = [
    "#1f77b4", "#aec7e8", "#ff7f0e", "#ffbb78", "#2ca02c", "#98df8a", "#d62728", "#ff9896",
    "#9467bd", "#c5b0d5", "#8c564b", "#c49c94", "#e377c2", "#f7b6d2", "#7f7f7f", "#c7c7c7",
    "#bcbd22", "#dbdb8d", "#17becf",
];

const MODERN_CATEGORY_COLORS: [&str; 10] = [
    "#4E79A7", "#F28E2B", "#E15759", "#76B7B2", "#59A14F", "#EDC948", "#B07AA1", "#FF9DA7",
    "#9C755F", "#BAB0AC",
];
