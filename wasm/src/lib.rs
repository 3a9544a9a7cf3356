use progress_svg_renderer::{Params, ProgressKind, RenderOptions, render_with_options};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProgressRenderOptions {
    theme: Option<String>,
    font_family: Option<String>,
    label_color: Option<String>,
}

fn build_render_options(options: ProgressRenderOptions) -> RenderOptions {
    let mut render_options = if options.theme.as_deref() == Some("modern") {
        RenderOptions::modern()
    } else {
        RenderOptions::classic()
    };

    if let Some(font_family) = options.font_family {
        render_options.config.theme.font_family = font_family;
    }
    if let Some(label_color) = options.label_color {
        render_options.config.theme.label_color = label_color;
    }

    render_options
}

/// Accepts `{"value": 40, "color": "#3B82F6,#8B5CF6"}`; numbers and strings
/// both become raw parameter text.
fn params_from_json(raw: &str) -> Result<Params, String> {
    let map: BTreeMap<String, Value> = serde_json::from_str(raw).map_err(|e| e.to_string())?;
    map.into_iter()
        .map(|(key, value)| match value {
            Value::String(text) => Ok((key, text)),
            Value::Number(number) => Ok((key, number.to_string())),
            other => Err(format!("parameter `{key}` must be a string or number, got {other}")),
        })
        .collect()
}

#[wasm_bindgen]
pub fn render_progress_svg(
    kind: &str,
    params_json: &str,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    let kind = ProgressKind::from_token(kind)
        .ok_or_else(|| JsValue::from_str(&format!("unknown progress kind `{kind}`")))?;
    let params = params_from_json(params_json).map_err(|error| JsValue::from_str(&error))?;
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<ProgressRenderOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        ProgressRenderOptions::default()
    };

    render_with_options(kind, &params, &build_render_options(options))
        .map_err(|error| JsValue::from_str(&error.to_string()))
}
