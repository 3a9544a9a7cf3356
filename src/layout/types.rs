use serde::Serialize;

use crate::color::Color;
use crate::gradient::GradientStop;

/// Geometry of one drawable. Angles and coordinates are in SVG user space.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Shape {
    /// Rectangle with the same radius on every corner (`rx = 0` is square).
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        rx: f64,
    },
    /// Rectangle whose left and right corners round independently.
    RoundedRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        left_radius: f64,
        right_radius: f64,
    },
    Ellipse {
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
    },
    /// Clockwise circular arc from `start` to `end`.
    Arc {
        r: f64,
        start: (f64, f64),
        end: (f64, f64),
        large_arc: bool,
    },
}

impl Shape {
    /// Horizontal span `(left, right)` covered by the shape.
    pub fn x_span(&self) -> (f64, f64) {
        match *self {
            Shape::Rect { x, width, .. } | Shape::RoundedRect { x, width, .. } => (x, x + width),
            Shape::Ellipse { cx, rx, .. } => (cx - rx, cx + rx),
            Shape::Circle { cx, r, .. } => (cx - r, cx + r),
            Shape::Arc { start, end, .. } => (start.0.min(end.0), start.0.max(end.0)),
        }
    }

    /// `(left, right)` corner radii of rectangular shapes.
    pub fn corner_radii(&self) -> Option<(f64, f64)> {
        match *self {
            Shape::Rect { rx, .. } => Some((rx, rx)),
            Shape::RoundedRect {
                left_radius,
                right_radius,
                ..
            } => Some((left_radius, right_radius)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Paint {
    Solid { color: Color },
    Gradient { id: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stroke {
    pub paint: Paint,
    pub width: f64,
    pub round_cap: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Track,
    Fill,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Primitive {
    pub role: Role,
    pub shape: Shape,
    pub fill: Option<Paint>,
    pub stroke: Option<Stroke>,
}

impl Primitive {
    pub fn filled(role: Role, shape: Shape, paint: Paint) -> Self {
        Self {
            role,
            shape,
            fill: Some(paint),
            stroke: None,
        }
    }

    pub fn stroked(role: Role, shape: Shape, stroke: Stroke) -> Self {
        Self {
            role,
            shape,
            fill: None,
            stroke: Some(stroke),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinearGradientDef {
    pub id: String,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stops: Vec<GradientStop>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextLabel {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub font_size: f64,
}

/// Everything one render call draws, in paint order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderPlan {
    pub width: f64,
    pub height: f64,
    pub canvas_background: Option<String>,
    pub primitives: Vec<Primitive>,
    pub gradients: Vec<LinearGradientDef>,
    pub label: Option<TextLabel>,
}

impl RenderPlan {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            canvas_background: None,
            primitives: Vec::new(),
            gradients: Vec::new(),
            label: None,
        }
    }

    pub fn tracks(&self) -> impl Iterator<Item = &Primitive> {
        self.primitives.iter().filter(|p| p.role == Role::Track)
    }

    pub fn fills(&self) -> impl Iterator<Item = &Primitive> {
        self.primitives.iter().filter(|p| p.role == Role::Fill)
    }
}
