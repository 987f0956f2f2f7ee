use fundmap::{RenderOptions, render_with_options};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TreemapRenderOptions {
    theme: Option<String>,
    font_family: Option<String>,
    font_size: Option<f32>,
    canvas_width: Option<f32>,
    canvas_height: Option<f32>,
}

fn build_render_options(options: TreemapRenderOptions) -> RenderOptions {
    let mut render_options = if options.theme.as_deref() == Some("modern") {
        RenderOptions::modern()
    } else {
        RenderOptions::classic()
    };

    if let Some(font_family) = options.font_family {
        render_options.theme.font_family = font_family;
    }
    if let Some(font_size) = options.font_size {
        render_options.theme.font_size = font_size;
    }
    if let Some(width) = options.canvas_width {
        render_options.layout.treemap.width = width;
    }
    if let Some(height) = options.canvas_height {
        render_options.layout.treemap.height = height;
    }
    // Browsers have no system font database to query.
    render_options.layout.fast_text_metrics = true;

    render_options
}

#[wasm_bindgen]
pub fn render_funding_treemap(json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<TreemapRenderOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        TreemapRenderOptions::default()
    };

    let render_options = build_render_options(options);
    render_with_options(json, render_options).map_err(|error| JsValue::from_str(&error.to_string()))
}
