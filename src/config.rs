use crate::error::RenderError;
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Inclusive numeric bounds for one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Rejects `value` when it falls outside the bounds.
    pub fn check(&self, param: &'static str, value: f64) -> Result<f64, RenderError> {
        if value.is_finite() && self.contains(value) {
            Ok(value)
        } else {
            Err(RenderError::OutOfRangeDimension {
                param,
                value,
                min: self.min,
                max: self.max,
            })
        }
    }

    /// Never panics, even for inverted bounds; `min` then wins.
    pub fn clamp(&self, value: f64) -> f64 {
        value.min(self.max).max(self.min)
    }

    fn is_ordered(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Limits {
    pub bar_padding: Bounds,
    pub bar_radius: Bounds,
    pub aspect_ratio: Bounds,
    pub segments: Bounds,
    pub donut_size: Bounds,
    pub stroke_width: Bounds,
    pub donut_padding: Bounds,
}

impl Limits {
    fn named(&self) -> [(&'static str, Bounds); 7] {
        [
            ("barPadding", self.bar_padding),
            ("barRadius", self.bar_radius),
            ("aspectRatio", self.aspect_ratio),
            ("segments", self.segments),
            ("donutSize", self.donut_size),
            ("strokeWidth", self.stroke_width),
            ("donutPadding", self.donut_padding),
        ]
    }

    /// Every bound must be finite with `min <= max`.
    pub fn validate(&self) -> anyhow::Result<()> {
        for (name, bounds) in self.named() {
            if !bounds.is_ordered() {
                anyhow::bail!(
                    "invalid limits.{name}: min {} must not exceed max {}",
                    bounds.min,
                    bounds.max
                );
            }
        }
        Ok(())
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            bar_padding: Bounds::new(0.0, 100.0),
            bar_radius: Bounds::new(0.0, 100.0),
            aspect_ratio: Bounds::new(1.0, 10.0),
            segments: Bounds::new(1.0, 50.0),
            donut_size: Bounds::new(50.0, 500.0),
            stroke_width: Bounds::new(5.0, 50.0),
            donut_padding: Bounds::new(0.0, 100.0),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarConfig {
    pub canvas_width: f64,
    /// Track height as a fraction of the canvas height.
    pub track_height_ratio: f64,
    pub aspect_ratio: f64,
    pub padding: f64,
    /// Value at or above which the leading edge of a single bar is rounded.
    pub complete_threshold: f64,
    pub gradient_id: String,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            canvas_width: 500.0,
            track_height_ratio: 0.6,
            aspect_ratio: 4.0,
            padding: 20.0,
            complete_threshold: 95.0,
            gradient_id: "progressGradient".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonutConfig {
    pub size: f64,
    pub stroke_width: f64,
    pub padding: f64,
    /// Label font size as a fraction of the donut size.
    pub label_scale: f64,
    pub show_label: bool,
    pub gradient_id: String,
}

impl Default for DonutConfig {
    fn default() -> Self {
        Self {
            size: 200.0,
            stroke_width: 20.0,
            padding: 10.0,
            label_scale: 0.22,
            show_label: true,
            gradient_id: "donutGradient".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Multiplier applied to the SVG size when rasterizing.
    pub png_scale: f32,
    pub font_family: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            png_scale: 1.0,
            font_family: "Arial".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub theme: Theme,
    pub bar: BarConfig,
    pub donut: DonutConfig,
    pub limits: Limits,
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    label_color: Option<String>,
    progress_color: Option<String>,
    track_color: Option<String>,
    background: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    String(String),
}

impl NumberOrString {
    fn as_f64(&self) -> Option<f64> {
        match self {
            NumberOrString::Number(val) => Some(*val),
            NumberOrString::String(val) => val.trim().parse::<f64>().ok(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct BarConfigFile {
    canvas_width: Option<NumberOrString>,
    track_height_ratio: Option<NumberOrString>,
    aspect_ratio: Option<NumberOrString>,
    padding: Option<NumberOrString>,
    complete_threshold: Option<NumberOrString>,
    gradient_id: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct DonutConfigFile {
    size: Option<NumberOrString>,
    stroke_width: Option<NumberOrString>,
    padding: Option<NumberOrString>,
    label_scale: Option<NumberOrString>,
    show_label: Option<bool>,
    gradient_id: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    png_scale: Option<NumberOrString>,
    font_family: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    bar: Option<BarConfigFile>,
    donut: Option<DonutConfigFile>,
    limits: Option<Limits>,
    render: Option<RenderConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Applies a JSON config document on top of the defaults.
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = serde_json::from_str(contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        if theme_name == "modern" {
            config.theme = Theme::modern();
        } else if theme_name == "classic" || theme_name == "default" {
            config.theme = Theme::classic();
        } else {
            log::warn!("unknown theme `{theme_name}`, keeping classic");
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.label_color {
            config.theme.label_color = v;
        }
        if let Some(v) = vars.progress_color {
            config.theme.progress_color = v;
        }
        if let Some(v) = vars.track_color {
            config.theme.track_color = v;
        }
        if let Some(v) = vars.background {
            config.theme.canvas_background = Some(v);
        }
    }

    if let Some(bar) = parsed.bar {
        if let Some(v) = bar.canvas_width.as_ref().and_then(NumberOrString::as_f64) {
            config.bar.canvas_width = v;
        }
        if let Some(v) = bar.track_height_ratio.as_ref().and_then(NumberOrString::as_f64) {
            config.bar.track_height_ratio = v;
        }
        if let Some(v) = bar.aspect_ratio.as_ref().and_then(NumberOrString::as_f64) {
            config.bar.aspect_ratio = v;
        }
        if let Some(v) = bar.padding.as_ref().and_then(NumberOrString::as_f64) {
            config.bar.padding = v;
        }
        if let Some(v) = bar.complete_threshold.as_ref().and_then(NumberOrString::as_f64) {
            config.bar.complete_threshold = v;
        }
        if let Some(v) = bar.gradient_id {
            config.bar.gradient_id = v;
        }
    }

    if let Some(donut) = parsed.donut {
        if let Some(v) = donut.size.as_ref().and_then(NumberOrString::as_f64) {
            config.donut.size = v;
        }
        if let Some(v) = donut.stroke_width.as_ref().and_then(NumberOrString::as_f64) {
            config.donut.stroke_width = v;
        }
        if let Some(v) = donut.padding.as_ref().and_then(NumberOrString::as_f64) {
            config.donut.padding = v;
        }
        if let Some(v) = donut.label_scale.as_ref().and_then(NumberOrString::as_f64) {
            config.donut.label_scale = v;
        }
        if let Some(v) = donut.show_label {
            config.donut.show_label = v;
        }
        if let Some(v) = donut.gradient_id {
            config.donut.gradient_id = v;
        }
    }

    if let Some(limits) = parsed.limits {
        limits.validate()?;
        config.limits = limits;
    }

    if let Some(render) = parsed.render {
        if let Some(v) = render.png_scale.as_ref().and_then(NumberOrString::as_f64) {
            config.render.png_scale = v as f32;
        }
        if let Some(v) = render.font_family {
            config.render.font_family = v;
        }
    }

    Ok(config)
}
