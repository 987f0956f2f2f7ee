use crate::layout::Layout;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub width: f32,
    pub height: f32,
    pub tiles: Vec<TileDump>,
    pub legend: Vec<LegendDump>,
}

#[derive(Debug, Serialize)]
pub struct TileDump {
    pub id: Option<String>,
    pub name: String,
    pub category: String,
    pub value: f64,
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
    pub color: String,
}

#[derive(Debug, Serialize)]
pub struct LegendDump {
    pub category: String,
    pub color: String,
    pub x: f32,
    pub y: f32,
}

impl LayoutDump {
    pub fn from_layout(layout: &Layout) -> Self {
        let tiles = layout
            .tiles
            .iter()
            .map(|tile| TileDump {
                id: tile.id.clone(),
                name: tile.name.clone(),
                category: tile.category.clone(),
                value: tile.value,
                x0: tile.rect.x0,
                y0: tile.rect.y0,
                x1: tile.rect.x1,
                y1: tile.rect.y1,
                color: tile.color.clone(),
            })
            .collect();
        let legend = layout
            .legend
            .iter()
            .map(|item| LegendDump {
                category: item.category.clone(),
                color: item.color.clone(),
                x: item.x,
                y: item.y,
            })
            .collect();
        LayoutDump {
            width: layout.width,
            height: layout.height,
            tiles,
            legend,
        }
    }
}

pub fn write_layout_dump(path: &Path, layout: &Layout) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
