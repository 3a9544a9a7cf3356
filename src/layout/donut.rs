use crate::config::Config;
use crate::gradient::Extent;
use crate::render::fmt_num;
use crate::request::DonutRequest;

use super::FillStyle;
use super::shape::polar_to_cartesian;
use super::types::{Paint, Primitive, RenderPlan, Role, Shape, Stroke, TextLabel};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DonutGeometry {
    pub width: f64,
    pub height: f64,
    pub cx: f64,
    pub cy: f64,
    /// Radius of the stroke's center line.
    pub r: f64,
}

pub fn donut_geometry(request: &DonutRequest) -> DonutGeometry {
    let width = request.size + request.padding * 2.0;
    let height = width;
    DonutGeometry {
        width,
        height,
        cx: width / 2.0,
        cy: height / 2.0,
        r: ((request.size - request.stroke_width) / 2.0).max(0.0),
    }
}

pub fn plan_donut(request: &DonutRequest, config: &Config) -> RenderPlan {
    let geo = donut_geometry(request);
    let mut plan = RenderPlan::new(geo.width, geo.height);

    plan.primitives.push(Primitive::stroked(
        Role::Track,
        Shape::Circle {
            cx: geo.cx,
            cy: geo.cy,
            r: geo.r,
        },
        Stroke {
            paint: Paint::Solid {
                color: request.background,
            },
            width: request.stroke_width,
            round_cap: false,
        },
    ));

    let progress_angle = request.value / 100.0 * 360.0;
    // Extents run along the horizontal diameter rather than the arc.
    let extent = Extent {
        track_start: geo.cx - geo.r,
        track_end: geo.cx + geo.r,
        filled_end: geo.cx - geo.r + 2.0 * geo.r * request.value.clamp(0.0, 100.0) / 100.0,
    };
    let style = FillStyle {
        palette: &request.palette,
        mode: request.fill_mode,
        span: request.gradient_span,
        value: request.value,
        gradient_id: &config.donut.gradient_id,
    };

    let start = polar_to_cartesian(geo.cx, geo.cy, geo.r, 0.0);
    let end = polar_to_cartesian(geo.cx, geo.cy, geo.r, progress_angle);
    // Endpoints that print identically make SVG drop the arc entirely.
    let closes = request.value >= 100.0 || (progress_angle > 180.0 && prints_same(start, end));

    if closes {
        let paint = style.paint(extent, geo.cy, &mut plan.gradients);
        plan.primitives.push(Primitive::stroked(
            Role::Fill,
            Shape::Circle {
                cx: geo.cx,
                cy: geo.cy,
                r: geo.r,
            },
            Stroke {
                paint,
                width: request.stroke_width,
                round_cap: false,
            },
        ));
    } else if progress_angle > 0.0 {
        let paint = style.paint(extent, geo.cy, &mut plan.gradients);
        plan.primitives.push(Primitive::stroked(
            Role::Fill,
            Shape::Arc {
                r: geo.r,
                start,
                end,
                large_arc: progress_angle > 180.0,
            },
            Stroke {
                paint,
                width: request.stroke_width,
                round_cap: true,
            },
        ));
    }

    if config.donut.show_label {
        plan.label = Some(TextLabel {
            x: geo.cx,
            y: geo.cy,
            text: format!("{}%", request.value.floor() as i64),
            font_size: (request.size * config.donut.label_scale).round(),
        });
    }

    plan
}

fn prints_same(a: (f64, f64), b: (f64, f64)) -> bool {
    fmt_num(a.0) == fmt_num(b.0) && fmt_num(a.1) == fmt_num(b.1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Color, Palette};
    use crate::gradient::GradientSpan;
    use crate::request::FillMode;

    fn request(value: f64) -> DonutRequest {
        DonutRequest {
            value,
            palette: Palette::single(Color::rgb(0x10, 0xb9, 0x81)),
            background: Color::rgb(0xe5, 0xe7, 0xeb),
            size: 200.0,
            stroke_width: 20.0,
            padding: 10.0,
            gradient_span: GradientSpan::FullTrack,
            fill_mode: FillMode::Gradient,
        }
    }

    #[test]
    fn geometry_centers_ring() {
        let geo = donut_geometry(&request(50.0));
        assert_eq!((geo.width, geo.cx, geo.r), (220.0, 110.0, 90.0));
    }

    #[test]
    fn zero_has_only_track() {
        let plan = plan_donut(&request(0.0), &Config::default());
        assert_eq!(plan.fills().count(), 0);
        assert_eq!(plan.tracks().count(), 1);
        assert_eq!(plan.label.as_ref().unwrap().text, "0%");
    }

    #[test]
    fn complete_is_a_circle() {
        let plan = plan_donut(&request(100.0), &Config::default());
        let fill = plan.fills().next().unwrap();
        assert!(matches!(fill.shape, Shape::Circle { r, .. } if r == 90.0));
        assert!(!fill.stroke.as_ref().unwrap().round_cap);
    }

    #[test]
    fn nearly_complete_ring_is_a_circle() {
        let plan = plan_donut(&request(99.9999), &Config::default());
        let fill = plan.fills().next().unwrap();
        assert!(matches!(fill.shape, Shape::Circle { .. }));
        assert_eq!(plan.label.as_ref().unwrap().text, "99%");

        let plan = plan_donut(&request(99.99), &Config::default());
        assert!(matches!(
            plan.fills().next().unwrap().shape,
            Shape::Arc { large_arc: true, .. }
        ));
    }

    #[test]
    fn sliver_stays_an_arc() {
        let plan = plan_donut(&request(0.0001), &Config::default());
        assert!(matches!(plan.fills().next().unwrap().shape, Shape::Arc { .. }));
    }

    #[test]
    fn half_way_arc_is_small() {
        let mut req = request(50.0);
        req.palette = Palette::parse_list("color", "#3B82F6,#8B5CF6").unwrap();
        let plan = plan_donut(&req, &Config::default());
        let fill = plan.fills().next().unwrap();
        let Shape::Arc {
            start,
            end,
            large_arc,
            ..
        } = fill.shape
        else {
            panic!("expected arc, got {:?}", fill.shape);
        };
        assert!(!large_arc);
        assert!((start.0 - 110.0).abs() < 1e-9 && (start.1 - 20.0).abs() < 1e-9);
        assert!((end.0 - 110.0).abs() < 1e-9 && (end.1 - 200.0).abs() < 1e-9);
        assert!(fill.stroke.as_ref().unwrap().round_cap);

        let gradient = &plan.gradients[0];
        assert_eq!((gradient.x1, gradient.x2, gradient.y1), (20.0, 200.0, 110.0));
    }

    #[test]
    fn large_arc_past_half() {
        let plan = plan_donut(&request(75.0), &Config::default());
        let fill = plan.fills().next().unwrap();
        assert!(matches!(fill.shape, Shape::Arc { large_arc: true, .. }));
    }

    #[test]
    fn progress_span_follows_value() {
        let mut req = request(25.0);
        req.palette = Palette::parse_list("color", "#3B82F6,#8B5CF6").unwrap();
        req.gradient_span = GradientSpan::FilledRegionOnly;
        let plan = plan_donut(&req, &Config::default());
        assert_eq!((plan.gradients[0].x1, plan.gradients[0].x2), (20.0, 65.0));
    }

    #[test]
    fn label_floors_value() {
        let plan = plan_donut(&request(66.9), &Config::default());
        let label = plan.label.unwrap();
        assert_eq!(label.text, "66%");
        assert_eq!(label.font_size, 44.0);
    }
}
