use crate::color::{Color, Palette};
use crate::gradient::GradientSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressKind {
    Bar,
    Donut,
}

impl ProgressKind {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "bar" | "progress-bar" => Some(Self::Bar),
            "donut" | "progress-donut" => Some(Self::Donut),
            _ => None,
        }
    }
}

/// Corner radius as requested. `Auto` depends on runtime geometry, so it is
/// kept apart from an explicit zero that switches rounding off.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RadiusSpec {
    #[default]
    Auto,
    Explicit(f64),
}

impl RadiusSpec {
    /// Resolved radius, never above `limit`.
    pub fn resolve(self, auto: f64, limit: f64) -> f64 {
        let r = match self {
            Self::Auto => auto,
            Self::Explicit(r) => r,
        };
        r.min(limit).max(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillMode {
    /// Multi-color palettes paint a gradient; single colors paint solid.
    #[default]
    Gradient,
    /// One color resolved from the palette at the current value.
    Solid,
}

impl FillMode {
    pub fn from_token(token: &str) -> Self {
        match token.trim().to_ascii_lowercase().as_str() {
            "solid" => Self::Solid,
            _ => Self::Gradient,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segmentation {
    pub count: u32,
    pub gap: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Section {
    pub value: f64,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarRequest {
    pub value: f64,
    pub palette: Palette,
    pub background: Color,
    pub aspect_ratio: f64,
    pub padding: f64,
    pub radius: RadiusSpec,
    pub gradient_span: GradientSpan,
    pub fill_mode: FillMode,
    pub segmentation: Option<Segmentation>,
    /// `Some` whenever a `values` list was supplied, even if nothing in it
    /// survived parsing.
    pub multi_value: Option<Vec<Section>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DonutRequest {
    pub value: f64,
    pub palette: Palette,
    pub background: Color,
    pub size: f64,
    pub stroke_width: f64,
    pub padding: f64,
    pub gradient_span: GradientSpan,
    pub fill_mode: FillMode,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProgressRequest {
    Bar(BarRequest),
    Donut(DonutRequest),
}

impl ProgressRequest {
    pub fn kind(&self) -> ProgressKind {
        match self {
            Self::Bar(_) => ProgressKind::Bar,
            Self::Donut(_) => ProgressKind::Donut,
        }
    }
}

/// Layout mode of a bar, picked from the shape of the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarMode {
    Single,
    Segmented,
    MultiValue,
}

impl BarRequest {
    pub fn mode(&self) -> BarMode {
        if self.segmentation.is_some_and(|s| s.count > 1) {
            BarMode::Segmented
        } else if self.multi_value.is_some() {
            BarMode::MultiValue
        } else {
            BarMode::Single
        }
    }
}
