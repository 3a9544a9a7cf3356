use crate::layout::{LinearGradientDef, Paint, RenderPlan, Role};
use crate::request::ProgressRequest;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct PlanDump {
    pub kind: String,
    pub mode: Option<String>,
    pub value: f64,
    pub width: f64,
    pub height: f64,
    pub primitives: Vec<PrimitiveDump>,
    pub gradients: Vec<LinearGradientDef>,
    pub label: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PrimitiveDump {
    pub role: Role,
    pub shape: String,
    pub x_span: [f64; 2],
    pub corner_radii: Option<[f64; 2]>,
    pub paint: String,
}

impl PlanDump {
    pub fn from_plan(plan: &RenderPlan, request: &ProgressRequest) -> Self {
        let (mode, value) = match request {
            ProgressRequest::Bar(bar) => (Some(format!("{:?}", bar.mode())), bar.value),
            ProgressRequest::Donut(donut) => (None, donut.value),
        };

        let primitives = plan
            .primitives
            .iter()
            .map(|primitive| {
                let (left, right) = primitive.shape.x_span();
                let paint = primitive
                    .fill
                    .as_ref()
                    .or(primitive.stroke.as_ref().map(|s| &s.paint));
                PrimitiveDump {
                    role: primitive.role,
                    shape: shape_name(&primitive.shape).to_string(),
                    x_span: [left, right],
                    corner_radii: primitive.shape.corner_radii().map(|(l, r)| [l, r]),
                    paint: paint.map(paint_name).unwrap_or_else(|| "none".to_string()),
                }
            })
            .collect();

        PlanDump {
            kind: format!("{:?}", request.kind()),
            mode,
            value,
            width: plan.width,
            height: plan.height,
            primitives,
            gradients: plan.gradients.clone(),
            label: plan.label.as_ref().map(|label| label.text.clone()),
        }
    }
}

fn shape_name(shape: &crate::layout::Shape) -> &'static str {
    use crate::layout::Shape;
    match shape {
        Shape::Rect { .. } => "rect",
        Shape::RoundedRect { .. } => "roundedRect",
        Shape::Ellipse { .. } => "ellipse",
        Shape::Circle { .. } => "circle",
        Shape::Arc { .. } => "arc",
    }
}

fn paint_name(paint: &Paint) -> String {
    match paint {
        Paint::Solid { color } => color.to_string(),
        Paint::Gradient { id } => format!("url(#{id})"),
    }
}

pub fn write_plan_dump(path: &Path, plan: &RenderPlan, request: &ProgressRequest) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = PlanDump::from_plan(plan, request);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::layout::plan_request;
    use crate::params::{Params, parse_request};
    use crate::request::ProgressKind;

    #[test]
    fn dump_summarizes_primitives() {
        let mut params = Params::new();
        params.insert("value".to_string(), "75".to_string());
        let config = Config::default();
        let request = parse_request(ProgressKind::Bar, &params, &config).unwrap();
        let plan = plan_request(&request, &config);
        let dump = PlanDump::from_plan(&plan, &request);
        assert_eq!(dump.kind, "Bar");
        assert_eq!(dump.mode.as_deref(), Some("Single"));
        assert_eq!(dump.primitives.len(), 2);
        assert_eq!(dump.primitives[1].shape, "roundedRect");
        assert_eq!(dump.primitives[1].x_span, [20.0, 365.0]);
        assert_eq!(dump.primitives[1].paint, "#3b82f6");

        let json = serde_json::to_value(&dump).unwrap();
        assert_eq!(json["primitives"][0]["role"], "track");
    }
}
