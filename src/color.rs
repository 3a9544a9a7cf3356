use crate::error::RenderError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

static HEX_COLOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#([0-9A-Fa-f]{3}|[0-9A-Fa-f]{4}|[0-9A-Fa-f]{6}|[0-9A-Fa-f]{8})$").unwrap()
});

/// An sRGB color with straight alpha in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self {
            r,
            g,
            b,
            a: quantize_alpha(a),
        }
    }

    /// Parses `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`.
    pub fn parse_hex(input: &str) -> Option<Self> {
        let caps = HEX_COLOR_RE.captures(input.trim())?;
        let digits = caps.get(1)?.as_str();
        let expanded: String = if digits.len() <= 4 {
            digits.chars().flat_map(|c| [c, c]).collect()
        } else {
            digits.to_string()
        };
        let channel = |idx: usize| u8::from_str_radix(&expanded[idx * 2..idx * 2 + 2], 16).ok();
        let r = channel(0)?;
        let g = channel(1)?;
        let b = channel(2)?;
        let a = if expanded.len() == 8 {
            channel(3)? as f32 / 255.0
        } else {
            1.0
        };
        Some(Self::rgba(r, g, b, a))
    }

    /// Like [`Color::parse_hex`], reporting the parameter name on failure.
    pub fn parse_param(param: &str, input: &str) -> Result<Self, RenderError> {
        Self::parse_hex(input).ok_or_else(|| RenderError::invalid_color(param, input))
    }

    /// `#rrggbb`, ignoring alpha. Alpha is written separately as an opacity attribute.
    pub fn hex_rgb(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }

    /// Per-channel linear interpolation, `t` clamped to `[0, 1]`.
    pub fn lerp(self, other: Color, t: f64) -> Color {
        let t = clamp_unit(t);
        let mix = |a: u8, b: u8| {
            let v = a as f64 + (b as f64 - a as f64) * t;
            v.round().clamp(0.0, 255.0) as u8
        };
        let alpha = self.a as f64 + (other.a as f64 - self.a as f64) * t;
        Color::rgba(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            alpha as f32,
        )
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "{}", self.hex_rgb())
        } else {
            let alpha = (self.a * 255.0).round().clamp(0.0, 255.0) as u8;
            write!(f, "{}{:02x}", self.hex_rgb(), alpha)
        }
    }
}

impl FromStr for Color {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_param("color", s)
    }
}

impl TryFrom<String> for Color {
    type Error = RenderError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

fn quantize_alpha(a: f32) -> f32 {
    if !a.is_finite() {
        return 1.0;
    }
    ((a * 1000.0).round() / 1000.0).clamp(0.0, 1.0)
}

fn clamp_unit(t: f64) -> f64 {
    if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 }
}

/// Ordered list of colors from the `color` or `colors` parameter. Never
/// empty, so every lookup on it is total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Color>", into = "Vec<Color>")]
pub struct Palette(Vec<Color>);

impl Palette {
    pub fn new(colors: Vec<Color>) -> Option<Self> {
        if colors.is_empty() {
            None
        } else {
            Some(Self(colors))
        }
    }

    pub fn single(color: Color) -> Self {
        Self(vec![color])
    }

    /// Parses a comma-separated list such as `#FF0000, #00FF00`.
    pub fn parse_list(param: &str, input: &str) -> Result<Self, RenderError> {
        let colors = input
            .split(',')
            .map(|part| Color::parse_param(param, part.trim()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(colors).ok_or_else(|| RenderError::invalid_color(param, input))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn colors(&self) -> &[Color] {
        &self.0
    }

    pub fn first(&self) -> Color {
        self.0[0]
    }

    pub fn last(&self) -> Color {
        self.0[self.0.len() - 1]
    }

    pub fn is_multi(&self) -> bool {
        self.0.len() > 1
    }

    /// Color at `fraction` of the way along the palette.
    ///
    /// The unit interval is split into `len - 1` equal segments and the two
    /// stops bounding `fraction` are blended. `fraction` is clamped first, so
    /// `resolve(1.0)` is exactly the last stop.
    pub fn resolve(&self, fraction: f64) -> Color {
        let f = clamp_unit(fraction);
        match self.0.len() {
            1 => self.0[0],
            n => {
                let scaled = f * (n - 1) as f64;
                let segment = (scaled.floor() as usize).min(n - 2);
                let local = scaled - segment as f64;
                self.0[segment].lerp(self.0[segment + 1], local)
            }
        }
    }

    /// Color assigned to the `index`-th item of a run; wraps around when
    /// there are more items than colors.
    pub fn cycle(&self, index: usize) -> Color {
        self.0[index % self.0.len()]
    }
}

impl TryFrom<Vec<Color>> for Palette {
    type Error = RenderError;

    fn try_from(colors: Vec<Color>) -> Result<Self, Self::Error> {
        Self::new(colors).ok_or_else(|| RenderError::invalid_color("palette", ""))
    }
}

impl From<Palette> for Vec<Color> {
    fn from(palette: Palette) -> Self {
        palette.0
    }
}
