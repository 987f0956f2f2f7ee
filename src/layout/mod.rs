mod legend;
mod text;
mod treemap;
pub(crate) mod types;

pub use types::*;

use crate::color::{self, CategoryColors};
use crate::config::LayoutConfig;
use crate::hierarchy::Hierarchy;
use crate::theme::Theme;

const CANVAS_MARGIN: f32 = 10.0;

/// Partitions the canvas among the tree's nodes, assigning `rect` to every
/// node (internal ones included). The root gets `{0, 0, width, height}`.
pub fn apply_treemap(tree: &mut Hierarchy, width: f32, height: f32) {
    treemap::apply(tree, width, height);
}

/// Runs the treemap partition over the tree (assigning `rect` to every
/// node), resolves category colors, and flattens the leaves plus the legend
/// into a drawable [`Layout`].
pub fn compute_layout(tree: &mut Hierarchy, theme: &Theme, config: &LayoutConfig) -> Layout {
    let width = config.treemap.width.max(1.0);
    let height = config.treemap.height.max(1.0);
    apply_treemap(tree, width, height);

    let colors = color::assign(tree.categories(), &theme.category_colors);
    let tiles = collect_tiles(tree, &colors, theme, config);
    let legend = legend::compute_legend(colors.pairs(), config);

    let mut canvas_width = width;
    let mut canvas_height = height;
    for item in &legend {
        let label = text::measure_line(
            &item.category,
            theme.legend_text_size,
            &theme.font_family,
            config,
        );
        canvas_width = canvas_width
            .max(item.x + item.swatch_size + CANVAS_MARGIN)
            .max(item.label_x + label.width / 2.0 + CANVAS_MARGIN);
        canvas_height = canvas_height.max(item.label_y + theme.legend_text_size + CANVAS_MARGIN);
    }

    Layout {
        width: canvas_width,
        height: canvas_height,
        tiles,
        legend,
    }
}

fn collect_tiles(
    tree: &Hierarchy,
    colors: &CategoryColors,
    theme: &Theme,
    config: &LayoutConfig,
) -> Vec<TileLayout> {
    tree.leaves()
        .iter()
        .map(|&id| {
            let node = tree.node(id);
            let category = node
                .category
                .clone()
                .unwrap_or_else(|| node.name.clone());
            let color = colors
                .get(&category)
                .unwrap_or(color::FALLBACK_COLOR)
                .to_string();
            let label = tile_label(&node.name, node.rect, theme, config);
            TileLayout {
                id: node.ext_id.clone(),
                name: node.name.clone(),
                category,
                value: node.aggregate,
                rect: node.rect,
                color,
                label,
            }
        })
        .collect()
}

/// Tiles too small for their label render without text.
fn tile_label(name: &str, rect: Rect, theme: &Theme, config: &LayoutConfig) -> TextBlock {
    let label = text::measure_label(name, theme.tile_text_size, &theme.font_family, config);
    let pad_x = config.treemap.label_padding_x;
    let pad_y = config.treemap.label_padding_y;
    let fits = label.width <= (rect.width() - pad_x * 2.0).max(0.0)
        && label.height <= (rect.height() - pad_y * 2.0).max(0.0);
    if fits && rect.area() >= config.treemap.min_label_area {
        label
    } else {
        TextBlock::empty()
    }
}
