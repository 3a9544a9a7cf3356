use super::types::Shape;

const EPSILON: f64 = 1e-9;

/// Outline of one filled bar piece, before it is placed on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BarShape {
    Rect,
    RoundedRectUniform(f64),
    RoundedRectAsymmetric { left: f64, right: f64 },
    Ellipse,
}

/// Picks the outline for a piece `width` wide with the requested corner radii.
///
/// Radii are clamped to half the piece width and half the track height, so
/// opposite corners never overlap. A piece narrower than its left rounding
/// becomes an ellipse. Zero width draws nothing.
pub fn choose_bar_shape(width: f64, left: f64, right: f64, track_height: f64) -> Option<BarShape> {
    if width <= EPSILON {
        return None;
    }
    let left = left.max(0.0);
    let right = right.max(0.0);
    if left > EPSILON && width < 2.0 * left {
        return Some(BarShape::Ellipse);
    }
    let cap = (width / 2.0).min(track_height / 2.0);
    let left = left.min(cap);
    let right = right.min(cap);
    let shape = if left <= EPSILON && right <= EPSILON {
        BarShape::Rect
    } else if (left - right).abs() <= EPSILON {
        BarShape::RoundedRectUniform(left)
    } else {
        BarShape::RoundedRectAsymmetric { left, right }
    };
    Some(shape)
}

impl BarShape {
    pub fn place(self, x: f64, y: f64, width: f64, height: f64) -> Shape {
        match self {
            BarShape::Rect => Shape::Rect {
                x,
                y,
                width,
                height,
                rx: 0.0,
            },
            BarShape::RoundedRectUniform(r) => Shape::Rect {
                x,
                y,
                width,
                height,
                rx: r,
            },
            BarShape::RoundedRectAsymmetric { left, right } => Shape::RoundedRect {
                x,
                y,
                width,
                height,
                left_radius: left,
                right_radius: right,
            },
            BarShape::Ellipse => Shape::Ellipse {
                cx: x + width / 2.0,
                cy: y + height / 2.0,
                rx: width / 2.0,
                ry: height / 2.0,
            },
        }
    }
}

/// Point on a circle; 0 degrees is 12 o'clock and angles grow clockwise.
pub fn polar_to_cartesian(cx: f64, cy: f64, r: f64, angle_deg: f64) -> (f64, f64) {
    let rad = (angle_deg - 90.0).to_radians();
    (cx + r * rad.cos(), cy + r * rad.sin())
}
