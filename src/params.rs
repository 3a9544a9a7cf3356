use crate::color::{Color, Palette};
use crate::config::Config;
use crate::error::RenderError;
use crate::gradient::GradientSpan;
use crate::request::{
    BarRequest, DonutRequest, FillMode, ProgressKind, ProgressRequest, RadiusSpec, Section,
    Segmentation,
};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

/// Already-decoded `name -> value` query pairs.
pub type Params = BTreeMap<String, String>;

const DEFAULT_VALUE: f64 = 50.0;
const DEFAULT_GAP: f64 = 4.0;

static RATIO_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d+(?:\.\d+)?)\s*(?::\s*(\d+(?:\.\d+)?)\s*)?$").unwrap()
});

pub fn parse_request(
    kind: ProgressKind,
    params: &Params,
    config: &Config,
) -> Result<ProgressRequest, RenderError> {
    match kind {
        ProgressKind::Bar => parse_bar_request(params, config).map(ProgressRequest::Bar),
        ProgressKind::Donut => parse_donut_request(params, config).map(ProgressRequest::Donut),
    }
}

pub fn parse_bar_request(params: &Params, config: &Config) -> Result<BarRequest, RenderError> {
    let limits = &config.limits;
    let palette = parse_palette(params, config)?;
    let background = parse_background(params, config)?;

    let aspect_ratio = match param(params, &["aspectRatio"]) {
        Some(raw) => {
            let ratio = parse_aspect_ratio(raw)?;
            limits.aspect_ratio.check("aspectRatio", ratio)?
        }
        None => config.bar.aspect_ratio,
    };
    let padding = limits
        .bar_padding
        .check("padding", number_or(params, "padding", config.bar.padding))?;
    if padding * 2.0 >= config.bar.canvas_width {
        return Err(RenderError::OutOfRangeDimension {
            param: "padding",
            value: padding,
            min: 0.0,
            max: config.bar.canvas_width / 2.0,
        });
    }

    let radius = match param(params, &["radius"]).map(str::parse::<f64>) {
        None => RadiusSpec::Auto,
        Some(Ok(r)) => RadiusSpec::Explicit(limits.bar_radius.check("radius", r)?),
        Some(Err(_)) => {
            log::debug!("unparsable radius, using auto");
            RadiusSpec::Auto
        }
    };

    let segmentation = param(params, &["segments"])
        .and_then(|raw| raw.parse::<f64>().ok())
        .map(|count| {
            let clamped = limits.segments.clamp(count.floor());
            if clamped != count {
                log::debug!("segments {count} clamped to {clamped}");
            }
            Segmentation {
                count: clamped as u32,
                gap: number_or(params, "gap", DEFAULT_GAP).max(0.0),
            }
        });

    let multi_value = param(params, &["values"]).map(|raw| match parse_values(raw) {
        Ok(values) => sections_from_values(&values, &palette),
        Err(err) => {
            log::warn!("{err}; rendering empty progress");
            Vec::new()
        }
    });

    Ok(BarRequest {
        value: parse_value(params),
        palette,
        background,
        aspect_ratio,
        padding,
        radius,
        gradient_span: parse_span(params),
        fill_mode: parse_fill(params),
        segmentation,
        multi_value,
    })
}

pub fn parse_donut_request(params: &Params, config: &Config) -> Result<DonutRequest, RenderError> {
    let limits = &config.limits;
    let palette = parse_palette(params, config)?;
    let background = parse_background(params, config)?;

    let size = limits
        .donut_size
        .check("size", number_or(params, "size", config.donut.size))?;
    let stroke_width = limits.stroke_width.check(
        "strokeWidth",
        number_or(params, "strokeWidth", config.donut.stroke_width),
    )?;
    if stroke_width >= size {
        return Err(RenderError::OutOfRangeDimension {
            param: "strokeWidth",
            value: stroke_width,
            min: limits.stroke_width.min,
            max: size,
        });
    }
    let padding = limits
        .donut_padding
        .check("padding", number_or(params, "padding", config.donut.padding))?;

    Ok(DonutRequest {
        value: parse_value(params),
        palette,
        background,
        size,
        stroke_width,
        padding,
        gradient_span: parse_span(params),
        fill_mode: parse_fill(params),
    })
}

/// Accepts `W:H` or a bare ratio such as `4` (read as `4:1`).
pub fn parse_aspect_ratio(raw: &str) -> Result<f64, RenderError> {
    let malformed = || RenderError::MalformedAspectRatio(raw.to_string());
    let caps = RATIO_RE.captures(raw).ok_or_else(malformed)?;
    let width: f64 = caps[1].parse().map_err(|_| malformed())?;
    let height: f64 = match caps.get(2) {
        Some(h) => h.as_str().parse().map_err(|_| malformed())?,
        None => 1.0,
    };
    if width <= 0.0 || height <= 0.0 {
        return Err(malformed());
    }
    Ok(width / height)
}

/// Parses a `values` list such as `30,20,10`.
pub fn parse_values(raw: &str) -> Result<Vec<f64>, RenderError> {
    let malformed = || RenderError::MalformedMultiValue(raw.to_string());
    if raw.trim().is_empty() {
        return Err(malformed());
    }
    raw.split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(malformed)
        })
        .collect()
}

/// Pairs each positive value with its color. Colors are assigned by the
/// value's position in the list, so dropped entries do not shift the colors
/// of the ones after them.
pub fn sections_from_values(values: &[f64], palette: &Palette) -> Vec<Section> {
    values
        .iter()
        .enumerate()
        .filter(|(_, value)| **value > 0.0)
        .map(|(idx, value)| Section {
            value: *value,
            color: palette.cycle(idx),
        })
        .collect()
}

fn param<'a>(params: &'a Params, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|key| params.get(*key))
        .map(|value| value.trim())
        .find(|value| !value.is_empty())
}

fn number_or(params: &Params, key: &str, default: f64) -> f64 {
    match param(params, &[key]).map(str::parse::<f64>) {
        Some(Ok(v)) if v.is_finite() => v,
        Some(_) => {
            log::debug!("unparsable `{key}`, using default {default}");
            default
        }
        None => default,
    }
}

fn parse_value(params: &Params) -> f64 {
    number_or(params, "value", DEFAULT_VALUE).clamp(0.0, 100.0)
}

fn parse_palette(params: &Params, config: &Config) -> Result<Palette, RenderError> {
    if let Some(raw) = param(params, &["colors"]) {
        return Palette::parse_list("colors", raw);
    }
    if let Some(raw) = param(params, &["color"]) {
        return Palette::parse_list("color", raw);
    }
    Ok(Palette::single(Color::parse_param(
        "theme.progressColor",
        &config.theme.progress_color,
    )?))
}

fn parse_background(params: &Params, config: &Config) -> Result<Color, RenderError> {
    match param(params, &["bg", "bgColor"]) {
        Some(raw) => Color::parse_param("bg", raw),
        None => Color::parse_param("theme.trackColor", &config.theme.track_color),
    }
}

fn parse_span(params: &Params) -> GradientSpan {
    param(params, &["gradientSpan", "gradientScope"])
        .map(GradientSpan::from_token)
        .unwrap_or_default()
}

fn parse_fill(params: &Params) -> FillMode {
    param(params, &["fill"])
        .map(FillMode::from_token)
        .unwrap_or_default()
}
