use crate::color::Color;
use crate::config::Config;
use crate::gradient::Extent;
use crate::request::{BarMode, BarRequest, Section};

use super::FillStyle;
use super::shape::choose_bar_shape;
use super::types::{LinearGradientDef, Paint, Primitive, RenderPlan, Role, Shape};

const EPSILON: f64 = 1e-9;

/// Canvas and background-track rectangle of a bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarTrack {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BarTrack {
    fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    fn right(&self) -> f64 {
        self.x + self.width
    }
}

pub fn bar_track(request: &BarRequest, config: &Config) -> BarTrack {
    let canvas_width = config.bar.canvas_width;
    let canvas_height = (canvas_width / request.aspect_ratio).round().max(1.0);
    let height = (canvas_height * config.bar.track_height_ratio).round().max(1.0);
    BarTrack {
        canvas_width,
        canvas_height,
        x: request.padding,
        y: (canvas_height - height) / 2.0,
        width: (canvas_width - 2.0 * request.padding).max(0.0),
        height,
    }
}

/// One filled piece laid out along the track.
struct Piece {
    x: f64,
    width: f64,
    left_radius: f64,
    right_radius: f64,
}

pub fn plan_bar(request: &BarRequest, config: &Config) -> RenderPlan {
    let track = bar_track(request, config);
    let mut plan = RenderPlan::new(track.canvas_width, track.canvas_height);
    let style = FillStyle {
        palette: &request.palette,
        mode: request.fill_mode,
        span: request.gradient_span,
        value: request.value,
        gradient_id: &config.bar.gradient_id,
    };

    let mode = request.mode();
    log::debug!("bar mode {mode:?} at {}%", request.value);
    match mode {
        BarMode::Single => plan_single(request, config, &track, &style, &mut plan),
        BarMode::Segmented => plan_segmented(request, &track, &style, &mut plan),
        BarMode::MultiValue => plan_multi_value(request, &track, &mut plan),
    }
    plan
}

fn track_radius(request: &BarRequest, track: &BarTrack) -> f64 {
    let limit = (track.height / 2.0).min(track.width / 2.0);
    request.radius.resolve(track.height / 2.0, limit)
}

fn push_track(plan: &mut RenderPlan, track: &BarTrack, x: f64, width: f64, rx: f64, color: Color) {
    plan.primitives.push(Primitive::filled(
        Role::Track,
        Shape::Rect {
            x,
            y: track.y,
            width,
            height: track.height,
            rx,
        },
        Paint::Solid { color },
    ));
}

fn push_pieces(
    plan: &mut RenderPlan,
    track: &BarTrack,
    pieces: &[Piece],
    mut paint_for: impl FnMut(usize, &mut Vec<LinearGradientDef>) -> Paint,
) {
    for (idx, piece) in pieces.iter().enumerate() {
        let Some(outline) = choose_bar_shape(
            piece.width,
            piece.left_radius,
            piece.right_radius,
            track.height,
        ) else {
            continue;
        };
        let paint = paint_for(idx, &mut plan.gradients);
        let shape = outline.place(piece.x, track.y, piece.width, track.height);
        plan.primitives.push(Primitive::filled(Role::Fill, shape, paint));
    }
}

fn plan_single(
    request: &BarRequest,
    config: &Config,
    track: &BarTrack,
    style: &FillStyle<'_>,
    plan: &mut RenderPlan,
) {
    push_track(
        plan,
        track,
        track.x,
        track.width,
        track_radius(request, track),
        request.background,
    );

    let fill_width = request.value / 100.0 * track.width;
    if fill_width <= EPSILON {
        return;
    }
    let radius = request.radius.resolve(track.height / 2.0, track.height / 2.0);
    // Leading edge stays square until the bar is visually complete.
    let right_radius = if request.value >= config.bar.complete_threshold {
        radius
    } else {
        0.0
    };
    let piece = Piece {
        x: track.x,
        width: fill_width,
        left_radius: radius,
        right_radius,
    };
    let extent = Extent {
        track_start: track.x,
        track_end: track.right(),
        filled_end: track.x + fill_width,
    };
    push_pieces(plan, track, &[piece], |_, gradients| {
        style.paint(extent, track.center_y(), gradients)
    });
}

/// Cell layout of a segmented bar.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Cells {
    count: usize,
    width: f64,
    gap: f64,
}

impl Cells {
    fn new(count: u32, gap: f64, track_width: f64) -> Self {
        let count = count.max(1) as usize;
        let gaps = (count - 1) as f64;
        // Every cell keeps at least one unit of width.
        let max_gap = if gaps > 0.0 {
            ((track_width - count as f64) / gaps).max(0.0)
        } else {
            0.0
        };
        let gap = gap.clamp(0.0, max_gap);
        Self {
            count,
            width: (track_width - gap * gaps) / count as f64,
            gap,
        }
    }

    fn x(&self, track: &BarTrack, idx: usize) -> f64 {
        track.x + idx as f64 * (self.width + self.gap)
    }
}

fn plan_segmented(
    request: &BarRequest,
    track: &BarTrack,
    style: &FillStyle<'_>,
    plan: &mut RenderPlan,
) {
    let Some(segmentation) = request.segmentation else {
        return;
    };
    let cells = Cells::new(segmentation.count, segmentation.gap, track.width);
    let limit = (track.height / 2.0).min(cells.width / 2.0);
    let radius = request.radius.resolve(limit, limit);

    for idx in 0..cells.count {
        push_track(
            plan,
            track,
            cells.x(track, idx),
            cells.width,
            radius,
            request.background,
        );
    }

    let filled_cells = request.value / 100.0 * cells.count as f64;
    let full = ((filled_cells + EPSILON).floor() as usize).min(cells.count);
    let partial = if full < cells.count {
        (filled_cells - full as f64).max(0.0)
    } else {
        0.0
    };

    let mut widths: Vec<f64> = vec![cells.width; full];
    if partial > EPSILON {
        widths.push(partial * cells.width);
    }
    let Some(last) = widths.len().checked_sub(1) else {
        return;
    };
    let last_is_full = partial <= EPSILON;

    let pieces: Vec<Piece> = widths
        .iter()
        .enumerate()
        .map(|(idx, width)| Piece {
            x: cells.x(track, idx),
            width: *width,
            left_radius: if idx == 0 { radius } else { 0.0 },
            right_radius: if idx == last && last_is_full { radius } else { 0.0 },
        })
        .collect();

    let filled_end = pieces
        .last()
        .map(|piece| piece.x + piece.width)
        .unwrap_or(track.x);
    let extent = Extent {
        track_start: track.x,
        track_end: track.right(),
        filled_end,
    };
    push_pieces(plan, track, &pieces, |_, gradients| {
        style.paint(extent, track.center_y(), gradients)
    });
}

/// Lays sections end to end; whatever runs past 100 is cut off.
fn layout_sections(sections: &[Section]) -> Vec<(f64, f64, Color)> {
    let mut consumed = 0.0_f64;
    let mut laid_out = Vec::new();
    for section in sections.iter().filter(|s| s.value > 0.0) {
        let take = section.value.min(100.0 - consumed);
        if take <= EPSILON {
            break;
        }
        laid_out.push((consumed, take, section.color));
        consumed += take;
    }
    laid_out
}

fn plan_multi_value(request: &BarRequest, track: &BarTrack, plan: &mut RenderPlan) {
    push_track(
        plan,
        track,
        track.x,
        track.width,
        track_radius(request, track),
        request.background,
    );

    let sections = request.multi_value.as_deref().unwrap_or_default();
    let laid_out = layout_sections(sections);
    let Some(&(last_start, last_take, _)) = laid_out.last() else {
        log::debug!("no positive values, rendering empty track");
        return;
    };
    let reaches_end = last_start + last_take >= 100.0 - EPSILON;
    let radius = request.radius.resolve(track.height / 2.0, track.height / 2.0);
    let last = laid_out.len() - 1;

    let pieces: Vec<Piece> = laid_out
        .iter()
        .enumerate()
        .map(|(idx, (start, take, _))| Piece {
            x: track.x + start / 100.0 * track.width,
            width: take / 100.0 * track.width,
            left_radius: if idx == 0 { radius } else { 0.0 },
            right_radius: if idx == last && reaches_end { radius } else { 0.0 },
        })
        .collect();
    push_pieces(plan, track, &pieces, |idx, _| Paint::Solid {
        color: laid_out[idx].2,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Palette;
    use crate::gradient::GradientSpan;
    use crate::request::{FillMode, RadiusSpec, Segmentation};

    fn request(value: f64) -> BarRequest {
        BarRequest {
            value,
            palette: Palette::single(Color::rgb(0x10, 0xb9, 0x81)),
            background: Color::rgb(0xe5, 0xe7, 0xeb),
            aspect_ratio: 4.0,
            padding: 20.0,
            radius: RadiusSpec::Auto,
            gradient_span: GradientSpan::FullTrack,
            fill_mode: FillMode::Gradient,
            segmentation: None,
            multi_value: None,
        }
    }

    fn fills(plan: &RenderPlan) -> Vec<Shape> {
        plan.fills().map(|p| p.shape.clone()).collect()
    }

    #[test]
    fn track_geometry_follows_aspect_ratio() {
        let track = bar_track(&request(50.0), &Config::default());
        assert_eq!(track.canvas_height, 125.0);
        assert_eq!(track.height, 75.0);
        assert_eq!(track.y, 25.0);
        assert_eq!((track.x, track.width), (20.0, 460.0));
    }

    #[test]
    fn single_seventy_five_is_square_on_the_right() {
        let plan = plan_bar(&request(75.0), &Config::default());
        let shapes = fills(&plan);
        assert_eq!(shapes.len(), 1);
        assert_eq!(
            shapes[0],
            Shape::RoundedRect {
                x: 20.0,
                y: 25.0,
                width: 345.0,
                height: 75.0,
                left_radius: 37.5,
                right_radius: 0.0,
            }
        );
        assert!(plan.gradients.is_empty());
    }

    #[test]
    fn single_complete_rounds_both_ends() {
        for value in [95.0, 100.0] {
            let plan = plan_bar(&request(value), &Config::default());
            let shapes = fills(&plan);
            assert_eq!(shapes[0].corner_radii(), Some((37.5, 37.5)), "{value}");
        }
        let plan = plan_bar(&request(100.0), &Config::default());
        assert_eq!(fills(&plan)[0].x_span(), (20.0, 480.0));
    }

    #[test]
    fn single_zero_has_no_fill() {
        let plan = plan_bar(&request(0.0), &Config::default());
        assert_eq!(plan.fills().count(), 0);
        assert_eq!(plan.tracks().count(), 1);
    }

    #[test]
    fn tiny_value_degrades_to_ellipse() {
        let plan = plan_bar(&request(5.0), &Config::default());
        assert!(matches!(fills(&plan)[0], Shape::Ellipse { rx, ry, .. } if rx == 11.5 && ry == 37.5));
    }

    #[test]
    fn explicit_zero_radius_stays_square() {
        let mut req = request(100.0);
        req.radius = RadiusSpec::Explicit(0.0);
        let plan = plan_bar(&req, &Config::default());
        assert_eq!(plan.tracks().next().unwrap().shape.corner_radii(), Some((0.0, 0.0)));
        assert_eq!(fills(&plan)[0].corner_radii(), Some((0.0, 0.0)));
    }

    #[test]
    fn gradient_registered_once_for_multi_palette() {
        let mut req = request(40.0);
        req.palette = Palette::parse_list("color", "#3B82F6,#8B5CF6").unwrap();
        req.gradient_span = GradientSpan::FilledRegionOnly;
        let plan = plan_bar(&req, &Config::default());
        assert_eq!(plan.gradients.len(), 1);
        let gradient = &plan.gradients[0];
        assert_eq!((gradient.x1, gradient.x2), (20.0, 204.0));
        assert_eq!(gradient.y1, 62.5);
        assert_eq!(
            plan.fills().next().unwrap().fill,
            Some(Paint::Gradient {
                id: "progressGradient".to_string()
            })
        );
    }

    #[test]
    fn solid_fill_resolves_current_color() {
        let mut req = request(50.0);
        req.palette = Palette::parse_list("color", "#000000,#FFFFFF").unwrap();
        req.fill_mode = FillMode::Solid;
        let plan = plan_bar(&req, &Config::default());
        assert!(plan.gradients.is_empty());
        assert_eq!(
            plan.fills().next().unwrap().fill,
            Some(Paint::Solid {
                color: Color::rgb(128, 128, 128)
            })
        );
    }

    #[test]
    fn cells_clamp_oversized_gap() {
        let cells = Cells::new(5, 1000.0, 460.0);
        assert!(cells.width >= 1.0 - 1e-9);
        let cells = Cells::new(4, 4.0, 460.0);
        assert_eq!(cells.width, 112.0);
    }

    #[test]
    fn segmented_fills_whole_cells_then_partial() {
        let mut req = request(60.0);
        req.segmentation = Some(Segmentation { count: 4, gap: 4.0 });
        let plan = plan_bar(&req, &Config::default());
        assert_eq!(plan.tracks().count(), 4);
        let shapes = fills(&plan);
        assert_eq!(shapes.len(), 3);
        assert_eq!(shapes[0].x_span(), (20.0, 132.0));
        assert_eq!(shapes[1].x_span(), (136.0, 248.0));
        let (start, end) = shapes[2].x_span();
        assert_eq!(start, 252.0);
        assert!((end - start - 44.8).abs() < 1e-9);
        assert_eq!(shapes[0].corner_radii(), Some((37.5, 0.0)));
        assert_eq!(shapes[1].corner_radii(), Some((0.0, 0.0)));
        assert_eq!(shapes[2].corner_radii(), Some((0.0, 0.0)));
    }

    #[test]
    fn segmented_last_full_cell_rounds_right_edge() {
        let mut req = request(50.0);
        req.segmentation = Some(Segmentation { count: 4, gap: 4.0 });
        let plan = plan_bar(&req, &Config::default());
        let shapes = fills(&plan);
        assert_eq!(shapes.len(), 2);
        assert_eq!(shapes[1].corner_radii(), Some((0.0, 37.5)));
    }

    #[test]
    fn multi_value_rounds_only_run_ends() {
        let palette = Palette::parse_list("colors", "#FF0000,#00FF00,#0000FF").unwrap();
        let mut req = request(0.0);
        req.multi_value = Some(crate::params::sections_from_values(&[50.0, 30.0, 20.0], &palette));
        let plan = plan_bar(&req, &Config::default());
        let shapes = fills(&plan);
        assert_eq!(shapes.len(), 3);
        assert_eq!(shapes[0].corner_radii(), Some((37.5, 0.0)));
        assert_eq!(shapes[1].corner_radii(), Some((0.0, 0.0)));
        assert_eq!(shapes[2].corner_radii(), Some((0.0, 37.5)));
    }

    #[test]
    fn multi_value_truncates_excess() {
        let sections = vec![
            Section {
                value: 70.0,
                color: Color::rgb(255, 0, 0),
            },
            Section {
                value: 50.0,
                color: Color::rgb(0, 255, 0),
            },
            Section {
                value: 10.0,
                color: Color::rgb(0, 0, 255),
            },
        ];
        let laid_out = layout_sections(&sections);
        assert_eq!(laid_out.len(), 2);
        assert_eq!((laid_out[1].0, laid_out[1].1), (70.0, 30.0));
    }
}
