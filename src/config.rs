use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub treemap: TreemapConfig,
    pub legend: LegendConfig,
    pub label_line_height: f32,
    /// Skip system-font lookups and estimate label widths instead. Useful
    /// in font-less environments (CI, wasm).
    pub fast_text_metrics: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            treemap: TreemapConfig::default(),
            legend: LegendConfig::default(),
            label_line_height: 1.2,
            fast_text_metrics: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreemapConfig {
    pub width: f32,
    pub height: f32,
    pub label_padding_x: f32,
    pub label_padding_y: f32,
    pub label_offset_y: f32,
    pub label_line_step: f32,
    pub min_label_area: f32,
}

impl Default for TreemapConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 600.0,
            label_padding_x: 4.0,
            label_padding_y: 2.0,
            label_offset_y: 13.0,
            label_line_step: 10.0,
            min_label_area: 120.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegendConfig {
    pub origin_x: f32,
    /// Vertical gap between the bottom of the treemap and the first legend
    /// row.
    pub offset_y: f32,
    pub padding_left: f32,
    pub swatch_size: f32,
    pub column_gap: f32,
    pub items_per_row: usize,
    /// Row pitch as a multiple of the swatch size.
    pub row_spacing: f32,
    pub text_offset_y: f32,
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            origin_x: 50.0,
            offset_y: 50.0,
            padding_left: 40.0,
            swatch_size: 23.0,
            column_gap: 75.0,
            items_per_row: 10,
            row_spacing: 2.5,
            text_offset_y: 15.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 760.0,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f32>,
    background: Option<String>,
    tile_text_size: Option<f32>,
    tile_text_color: Option<String>,
    tile_stroke_color: Option<String>,
    tile_stroke_width: Option<f32>,
    legend_text_size: Option<f32>,
    legend_text_color: Option<String>,
    category_colors: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TreemapConfigFile {
    width: Option<f32>,
    height: Option<f32>,
    label_padding_x: Option<f32>,
    label_padding_y: Option<f32>,
    label_offset_y: Option<f32>,
    label_line_step: Option<f32>,
    min_label_area: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegendConfigFile {
    origin_x: Option<f32>,
    offset_y: Option<f32>,
    padding_left: Option<f32>,
    swatch_size: Option<f32>,
    column_gap: Option<f32>,
    items_per_row: Option<usize>,
    row_spacing: Option<f32>,
    text_offset_y: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    treemap: Option<TreemapConfigFile>,
    legend: Option<LegendConfigFile>,
    fast_text_metrics: Option<bool>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };
    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = serde_json::from_str(&contents)?;
    apply_config_file(&mut config, parsed);
    Ok(config)
}

fn apply_config_file(config: &mut Config, file: ConfigFile) {
    if let Some(theme_name) = file.theme.as_deref() {
        if theme_name == "modern" {
            config.theme = Theme::modern();
        } else if theme_name == "classic" || theme_name == "default" {
            config.theme = Theme::classic();
        }
    }

    if let Some(vars) = file.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.font_size {
            config.theme.font_size = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v;
        }
        if let Some(v) = vars.tile_text_size {
            config.theme.tile_text_size = v;
        }
        if let Some(v) = vars.tile_text_color {
            config.theme.tile_text_color = v;
        }
        if let Some(v) = vars.tile_stroke_color {
            config.theme.tile_stroke_color = v;
        }
        if let Some(v) = vars.tile_stroke_width {
            config.theme.tile_stroke_width = v;
        }
        if let Some(v) = vars.legend_text_size {
            config.theme.legend_text_size = v;
        }
        if let Some(v) = vars.legend_text_color {
            config.theme.legend_text_color = v;
        }
        if let Some(v) = vars.category_colors {
            config.theme.category_colors = v;
        }
    }

    if let Some(treemap) = file.treemap {
        let target = &mut config.layout.treemap;
        if let Some(v) = treemap.width {
            target.width = v;
        }
        if let Some(v) = treemap.height {
            target.height = v;
        }
        if let Some(v) = treemap.label_padding_x {
            target.label_padding_x = v;
        }
        if let Some(v) = treemap.label_padding_y {
            target.label_padding_y = v;
        }
        if let Some(v) = treemap.label_offset_y {
            target.label_offset_y = v;
        }
        if let Some(v) = treemap.label_line_step {
            target.label_line_step = v;
        }
        if let Some(v) = treemap.min_label_area {
            target.min_label_area = v;
        }
    }

    if let Some(legend) = file.legend {
        let target = &mut config.layout.legend;
        if let Some(v) = legend.origin_x {
            target.origin_x = v;
        }
        if let Some(v) = legend.offset_y {
            target.offset_y = v;
        }
        if let Some(v) = legend.padding_left {
            target.padding_left = v;
        }
        if let Some(v) = legend.swatch_size {
            target.swatch_size = v;
        }
        if let Some(v) = legend.column_gap {
            target.column_gap = v;
        }
        if let Some(v) = legend.items_per_row {
            target.items_per_row = v;
        }
        if let Some(v) = legend.row_spacing {
            target.row_spacing = v;
        }
        if let Some(v) = legend.text_offset_y {
            target.text_offset_y = v;
        }
    }

    if let Some(fast) = file.fast_text_metrics {
        config.layout.fast_text_metrics = fast;
    }
}
