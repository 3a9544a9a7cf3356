use crate::color::{Color, Palette};
use serde::{Deserialize, Serialize};

/// Which stretch of the track a multi-color gradient covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GradientSpan {
    /// Stops run across the whole track; colors stay put as progress moves.
    #[default]
    FullTrack,
    /// Stops run from the fill start to the leading edge of the fill.
    FilledRegionOnly,
}

impl GradientSpan {
    /// `bar` and `progress` are the query values; anything else is the full track.
    pub fn from_token(token: &str) -> Self {
        match token.trim().to_ascii_lowercase().as_str() {
            "progress" => Self::FilledRegionOnly,
            _ => Self::FullTrack,
        }
    }
}

/// Positions along the primary axis of a shape, in user-space units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub track_start: f64,
    pub track_end: f64,
    pub filled_end: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradientStop {
    /// Percentage in `[0, 100]`.
    pub offset: f64,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradientStops {
    pub coordinate_start: f64,
    pub coordinate_end: f64,
    pub stops: Vec<GradientStop>,
}

/// Derives gradient coordinates and evenly spaced stops for `palette`.
///
/// A single-color palette yields two identical stops; callers paint those
/// with a solid fill instead and only reach for the gradient when
/// [`Palette::is_multi`] holds.
pub fn map_stops(palette: &Palette, span: GradientSpan, extent: Extent) -> GradientStops {
    let (coordinate_start, coordinate_end) = match span {
        GradientSpan::FullTrack => (extent.track_start, extent.track_end),
        GradientSpan::FilledRegionOnly => {
            let end = extent.filled_end.clamp(extent.track_start, extent.track_end);
            (extent.track_start, end)
        }
    };

    let stops = if palette.is_multi() {
        let last = (palette.len() - 1) as f64;
        palette
            .colors()
            .iter()
            .enumerate()
            .map(|(idx, color)| GradientStop {
                offset: idx as f64 / last * 100.0,
                color: *color,
            })
            .collect()
    } else {
        let color = palette.first();
        vec![
            GradientStop { offset: 0.0, color },
            GradientStop {
                offset: 100.0,
                color,
            },
        ]
    };

    GradientStops {
        coordinate_start,
        coordinate_end,
        stops,
    }
}
