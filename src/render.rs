use crate::config::LayoutConfig;
#[cfg(feature = "png")]
use crate::config::RenderConfig;
use crate::layout::{Layout, TileLayout};
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

pub fn render_svg(layout: &Layout, theme: &Theme, config: &LayoutConfig) -> String {
    let mut svg = String::new();
    let width = layout.width.max(1.0);
    let height = layout.height.max(1.0);

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));

    for tile in &layout.tiles {
        svg.push_str(&tile_svg(tile, theme, config));
    }

    svg.push_str("<g class=\"legend\">");
    for item in &layout.legend {
        svg.push_str(&format!(
            "<rect class=\"legend-item\" x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\"/>",
            item.x, item.y, item.swatch_size, item.swatch_size, item.color
        ));
        svg.push_str(&format!(
            "<text class=\"legend-item-text\" x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
            item.label_x,
            item.label_y,
            theme.font_family,
            theme.legend_text_size,
            theme.legend_text_color,
            escape_xml(&item.category)
        ));
    }
    svg.push_str("</g>");

    svg.push_str("</svg>");
    svg
}

fn tile_svg(tile: &TileLayout, theme: &Theme, config: &LayoutConfig) -> String {
    let mut out = String::new();
    let width = tile.rect.width();
    let height = tile.rect.height();

    out.push_str(&format!(
        "<g class=\"tile-group\" transform=\"translate({:.2}, {:.2})\">",
        tile.rect.x0, tile.rect.y0
    ));

    let id_attr = tile
        .id
        .as_deref()
        .map(|id| format!(" id=\"{}\"", escape_xml(id)))
        .unwrap_or_default();
    out.push_str(&format!(
        "<rect{id_attr} class=\"tile\" width=\"{width:.2}\" height=\"{height:.2}\" data-name=\"{}\" data-category=\"{}\" data-value=\"{}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>",
        escape_xml(&tile.name),
        escape_xml(&tile.category),
        format_value(tile.value),
        tile.color,
        theme.tile_stroke_color,
        theme.tile_stroke_width
    ));
    // Native hover tooltip.
    out.push_str(&format!(
        "<title>{}</title>",
        escape_xml(&tooltip_text(tile))
    ));

    if !tile.label.is_empty() {
        out.push_str(&format!(
            "<text class=\"tile-text\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">",
            theme.font_family, theme.tile_text_size, theme.tile_text_color
        ));
        for (idx, line) in tile.label.lines.iter().enumerate() {
            let y = config.treemap.label_offset_y + idx as f32 * config.treemap.label_line_step;
            out.push_str(&format!(
                "<tspan x=\"{:.2}\" y=\"{y:.2}\">{}</tspan>",
                config.treemap.label_padding_x,
                escape_xml(line)
            ));
        }
        out.push_str("</text>");
    }

    out.push_str("</g>");
    out
}

/// The hover contract: name, category, and value are always present.
pub fn tooltip_text(tile: &TileLayout) -> String {
    format!(
        "Name: {}, Category: {}, Value: {}",
        tile.name,
        tile.category,
        format_value(tile.value)
    )
}

fn format_value(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if (rounded - rounded.round()).abs() < 0.001 {
        format!("{:.0}", rounded)
    } else {
        format!("{:.2}", rounded)
    }
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(
    svg: &str,
    output: &Path,
    render_cfg: &RenderConfig,
    theme: &Theme,
) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = theme
        .font_family
        .split(',')
        .next()
        .unwrap_or("sans-serif")
        .trim()
        .to_string();
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .unwrap_or(usvg::Size::from_wh(1000.0, 760.0).unwrap());

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
