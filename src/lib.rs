pub mod color;
pub mod config;
pub mod dataset;
pub mod hierarchy;
pub mod layout;
pub mod layout_dump;
pub mod render;
pub mod text_metrics;
pub mod theme;
pub mod viz;

#[cfg(feature = "cli")]
pub mod cli;

pub use config::{Config, LayoutConfig, RenderConfig, load_config};
pub use dataset::{DatasetError, RawNode, parse_dataset};
pub use hierarchy::{Hierarchy, NodeId, TreeNode};
pub use layout::{Layout, Rect, TileLayout, apply_treemap, compute_layout};
pub use render::render_svg;
pub use theme::Theme;
pub use viz::Visualization;

#[cfg(feature = "cli")]
pub use cli::run;

/// Options for the one-call facade used by embedders (CLI, wasm).
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub theme: Theme,
    pub layout: LayoutConfig,
}

impl RenderOptions {
    pub fn classic() -> Self {
        Self {
            theme: Theme::classic(),
            layout: LayoutConfig::default(),
        }
    }

    pub fn modern() -> Self {
        Self {
            theme: Theme::modern(),
            layout: LayoutConfig::default(),
        }
    }
}

/// Renders a funding dataset document straight to an SVG string.
pub fn render_with_options(json: &str, options: RenderOptions) -> anyhow::Result<String> {
    let raw = parse_dataset(json)?;
    let viz = Visualization::create(&raw, &options.theme, &options.layout)?;
    Ok(render_svg(viz.layout(), &options.theme, &options.layout))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_with_options_end_to_end() {
        let json = r#"{"name": "root", "children": [
            {"name": "Alpha", "category": "Games", "value": 3},
            {"name": "Beta", "category": "Food", "value": 1}
        ]}"#;
        let svg = render_with_options(json, RenderOptions::classic()).expect("render failed");
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Alpha"));
    }
}
