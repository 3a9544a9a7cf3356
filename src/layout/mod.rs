mod bar;
mod donut;
mod shape;
mod types;

pub use bar::{BarTrack, bar_track, plan_bar};
pub use donut::{DonutGeometry, donut_geometry, plan_donut};
pub use shape::{BarShape, choose_bar_shape, polar_to_cartesian};
pub use types::{
    LinearGradientDef, Paint, Primitive, RenderPlan, Role, Shape, Stroke, TextLabel,
};

use crate::color::Palette;
use crate::config::Config;
use crate::gradient::{Extent, GradientSpan, map_stops};
use crate::request::{FillMode, ProgressRequest};

/// Builds the plan for one request. Pure; the request is only read.
pub fn plan_request(request: &ProgressRequest, config: &Config) -> RenderPlan {
    let mut plan = match request {
        ProgressRequest::Bar(bar) => plan_bar(bar, config),
        ProgressRequest::Donut(donut) => plan_donut(donut, config),
    };
    plan.canvas_background = config.theme.canvas_background.clone();
    log::debug!(
        "planned {:?}: {} primitives, {} gradients",
        request.kind(),
        plan.primitives.len(),
        plan.gradients.len()
    );
    plan
}

/// How the progress portion of a shape is colored.
struct FillStyle<'a> {
    palette: &'a Palette,
    mode: FillMode,
    span: GradientSpan,
    value: f64,
    gradient_id: &'a str,
}

impl FillStyle<'_> {
    /// Paint for the filled region. Registers the gradient definition when one
    /// is needed, so callers must only ask once something is actually filled.
    fn paint(&self, extent: Extent, cross: f64, gradients: &mut Vec<LinearGradientDef>) -> Paint {
        match self.mode {
            FillMode::Solid => Paint::Solid {
                color: self.palette.resolve(self.value / 100.0),
            },
            FillMode::Gradient if self.palette.is_multi() => {
                if !gradients.iter().any(|g| g.id == self.gradient_id) {
                    let mapped = map_stops(self.palette, self.span, extent);
                    gradients.push(LinearGradientDef {
                        id: self.gradient_id.to_string(),
                        x1: mapped.coordinate_start,
                        y1: cross,
                        x2: mapped.coordinate_end,
                        y2: cross,
                        stops: mapped.stops,
                    });
                }
                Paint::Gradient {
                    id: self.gradient_id.to_string(),
                }
            }
            FillMode::Gradient => Paint::Solid {
                color: self.palette.first(),
            },
        }
    }
}
