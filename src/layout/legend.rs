use crate::config::LayoutConfig;

use super::LegendItemLayout;

/// Places one swatch per category in rows of `items_per_row`, below the
/// treemap canvas. Labels sit centered under their swatch.
pub(super) fn compute_legend(
    pairs: &[(String, String)],
    config: &LayoutConfig,
) -> Vec<LegendItemLayout> {
    let cfg = &config.legend;
    let per_row = cfg.items_per_row.max(1);
    let base_y = config.treemap.height + cfg.offset_y;

    pairs
        .iter()
        .enumerate()
        .map(|(idx, (category, color))| {
            let row = (idx / per_row) as f32;
            let col = (idx % per_row) as f32;
            let x = cfg.origin_x + cfg.padding_left + col * (cfg.swatch_size + cfg.column_gap);
            let y = base_y + row * cfg.swatch_size * cfg.row_spacing;
            LegendItemLayout {
                category: category.clone(),
                color: color.clone(),
                x,
                y,
                swatch_size: cfg.swatch_size,
                label_x: x + cfg.swatch_size / 2.0,
                label_y: y + cfg.swatch_size + cfg.text_offset_y,
            }
        })
        .collect()
}
