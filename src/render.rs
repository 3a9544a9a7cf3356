use crate::color::Color;
#[cfg(feature = "png")]
use crate::config::RenderConfig;
use crate::layout::{LinearGradientDef, Paint, Primitive, RenderPlan, Shape, TextLabel};
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

/// Serializes a plan. Paint order is fixed: tracks, fills, gradient
/// definitions, then the label.
pub fn render_svg(plan: &RenderPlan, theme: &Theme) -> String {
    let mut svg = String::new();
    let width = fmt_num(plan.width);
    let height = fmt_num(plan.height);

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));

    if let Some(background) = &plan.canvas_background {
        svg.push_str(&format!(
            "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
            escape_xml(background)
        ));
    }

    for primitive in &plan.primitives {
        svg.push_str(&primitive_svg(primitive));
    }

    if !plan.gradients.is_empty() {
        svg.push_str("<defs>");
        for gradient in &plan.gradients {
            svg.push_str(&gradient_svg(gradient));
        }
        svg.push_str("</defs>");
    }

    if let Some(label) = &plan.label {
        svg.push_str(&label_svg(label, theme));
    }

    svg.push_str("</svg>");
    svg
}

/// Two decimals at most, trailing zeros dropped.
pub fn fmt_num(value: f64) -> String {
    let mut text = format!("{value:.2}");
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    if text == "-0" {
        text = "0".to_string();
    }
    text
}

fn primitive_svg(primitive: &Primitive) -> String {
    let mut attrs = match &primitive.fill {
        Some(paint) => paint_attrs("fill", paint),
        None => "fill=\"none\"".to_string(),
    };
    if let Some(stroke) = &primitive.stroke {
        attrs.push(' ');
        attrs.push_str(&paint_attrs("stroke", &stroke.paint));
        attrs.push_str(&format!(" stroke-width=\"{}\"", fmt_num(stroke.width)));
        if stroke.round_cap {
            attrs.push_str(" stroke-linecap=\"round\"");
        }
    }

    match primitive.shape {
        Shape::Rect {
            x,
            y,
            width,
            height,
            rx,
        } => {
            let corners = if rx > 0.0 {
                format!(" rx=\"{0}\" ry=\"{0}\"", fmt_num(rx))
            } else {
                String::new()
            };
            format!(
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"{corners} {attrs}/>",
                fmt_num(x),
                fmt_num(y),
                fmt_num(width),
                fmt_num(height),
            )
        }
        Shape::RoundedRect {
            x,
            y,
            width,
            height,
            left_radius,
            right_radius,
        } => format!(
            "<path d=\"{}\" {attrs}/>",
            rounded_rect_path(x, y, width, height, left_radius, right_radius)
        ),
        Shape::Ellipse { cx, cy, rx, ry } => format!(
            "<ellipse cx=\"{}\" cy=\"{}\" rx=\"{}\" ry=\"{}\" {attrs}/>",
            fmt_num(cx),
            fmt_num(cy),
            fmt_num(rx),
            fmt_num(ry),
        ),
        Shape::Circle { cx, cy, r } => format!(
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" {attrs}/>",
            fmt_num(cx),
            fmt_num(cy),
            fmt_num(r),
        ),
        Shape::Arc {
            r,
            start,
            end,
            large_arc,
        } => format!(
            "<path d=\"M {} {} A {r} {r} 0 {} 1 {} {}\" {attrs}/>",
            fmt_num(start.0),
            fmt_num(start.1),
            u8::from(large_arc),
            fmt_num(end.0),
            fmt_num(end.1),
            r = fmt_num(r),
        ),
    }
}

/// Rectangle with independently rounded left and right corners. Corners
/// with a zero radius are drawn square.
pub fn rounded_rect_path(x: f64, y: f64, w: f64, h: f64, left: f64, right: f64) -> String {
    let mut d = format!("M {} {}", fmt_num(x + left), fmt_num(y));
    d.push_str(&format!(" H {}", fmt_num(x + w - right)));
    if right > 0.0 {
        d.push_str(&corner_arc(right, x + w, y + right));
    }
    d.push_str(&format!(" V {}", fmt_num(y + h - right)));
    if right > 0.0 {
        d.push_str(&corner_arc(right, x + w - right, y + h));
    }
    d.push_str(&format!(" H {}", fmt_num(x + left)));
    if left > 0.0 {
        d.push_str(&corner_arc(left, x, y + h - left));
    }
    d.push_str(&format!(" V {}", fmt_num(y + left)));
    if left > 0.0 {
        d.push_str(&corner_arc(left, x + left, y));
    }
    d.push_str(" Z");
    d
}

fn corner_arc(r: f64, x: f64, y: f64) -> String {
    let r = fmt_num(r);
    format!(" A {r} {r} 0 0 1 {} {}", fmt_num(x), fmt_num(y))
}

fn paint_attrs(name: &str, paint: &Paint) -> String {
    match paint {
        Paint::Solid { color } => color_attrs(name, &format!("{name}-opacity"), color),
        Paint::Gradient { id } => format!("{name}=\"url(#{})\"", escape_xml(id)),
    }
}

fn color_attrs(color_attr: &str, opacity_attr: &str, color: &Color) -> String {
    let mut attrs = format!("{color_attr}=\"{}\"", color.hex_rgb());
    if !color.is_opaque() {
        attrs.push_str(&format!(" {opacity_attr}=\"{}\"", color.a));
    }
    attrs
}

fn gradient_svg(gradient: &LinearGradientDef) -> String {
    let mut out = format!(
        "<linearGradient id=\"{}\" gradientUnits=\"userSpaceOnUse\" x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\">",
        escape_xml(&gradient.id),
        fmt_num(gradient.x1),
        fmt_num(gradient.y1),
        fmt_num(gradient.x2),
        fmt_num(gradient.y2),
    );
    for stop in &gradient.stops {
        out.push_str(&format!(
            "<stop offset=\"{}%\" {}/>",
            fmt_num(stop.offset),
            color_attrs("stop-color", "stop-opacity", &stop.color)
        ));
    }
    out.push_str("</linearGradient>");
    out
}

fn label_svg(label: &TextLabel, theme: &Theme) -> String {
    format!(
        "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\" dominant-baseline=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
        fmt_num(label.x),
        fmt_num(label.y),
        escape_xml(&theme.font_family),
        fmt_num(label.font_size),
        escape_xml(&theme.label_color),
        escape_xml(&label.text),
    )
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

/// Rasterizes an SVG produced by [`render_svg`].
#[cfg(feature = "png")]
pub fn render_png(svg: &str, render_cfg: &RenderConfig) -> Result<Vec<u8>> {
    let mut opt = usvg::Options::default();
    opt.font_family = render_cfg.font_family.clone();
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let scale = render_cfg.png_scale.max(0.01);
    let size = tree
        .size()
        .to_int_size()
        .scale_by(scale)
        .ok_or_else(|| anyhow::anyhow!("Invalid raster size at scale {scale}"))?;
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap_mut,
    );
    Ok(pixmap.encode_png()?)
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let png = render_png(svg, render_cfg)?;
    std::fs::write(output, png)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::layout::plan_request;
    use crate::params::{Params, parse_request};
    use crate::request::ProgressKind;

    fn render(kind: ProgressKind, pairs: &[(&str, &str)]) -> String {
        let params: Params = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let config = Config::default();
        let request = parse_request(kind, &params, &config).unwrap();
        render_svg(&plan_request(&request, &config), &config.theme)
    }

    #[test]
    fn formats_numbers_compactly() {
        assert_eq!(fmt_num(345.0), "345");
        assert_eq!(fmt_num(37.5), "37.5");
        assert_eq!(fmt_num(44.80000001), "44.8");
        assert_eq!(fmt_num(-0.001), "0");
        assert_eq!(fmt_num(0.126), "0.13");
    }

    #[test]
    fn rounded_rect_skips_zero_corners() {
        let d = rounded_rect_path(20.0, 25.0, 345.0, 75.0, 37.5, 0.0);
        assert_eq!(
            d,
            "M 57.5 25 H 365 V 100 H 57.5 A 37.5 37.5 0 0 1 20 62.5 V 62.5 A 37.5 37.5 0 0 1 57.5 25 Z"
        );
        assert_eq!(d.matches(" A ").count(), 2);
    }

    #[test]
    fn bar_svg_orders_track_fill_defs() {
        let svg = render(
            ProgressKind::Bar,
            &[("value", "60"), ("color", "#3B82F6,#8B5CF6,#EC4899")],
        );
        let track = svg.find("fill=\"#e5e7eb\"").unwrap();
        let fill = svg.find("url(#progressGradient)").unwrap();
        let defs = svg.find("<defs>").unwrap();
        assert!(track < fill && fill < defs);
        assert!(svg.contains("<stop offset=\"50%\" stop-color=\"#8b5cf6\"/>"));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn donut_svg_has_label_last() {
        let svg = render(ProgressKind::Donut, &[("value", "42.7")]);
        assert!(svg.contains("stroke-linecap=\"round\""));
        let label = svg.find(">42%</text>").unwrap();
        assert!(svg.find("<path").unwrap() < label);
        assert!(!svg.contains("<defs>"));
    }

    #[test]
    fn translucent_colors_emit_opacity() {
        let svg = render(ProgressKind::Bar, &[("color", "#10B98180"), ("bg", "#0000")]);
        assert!(svg.contains("fill=\"#10b981\" fill-opacity=\"0.502\""));
        assert!(svg.contains("fill=\"#000000\" fill-opacity=\"0\""));
    }

    #[test]
    fn canvas_background_comes_first() {
        let mut config = Config::default();
        config.theme.canvas_background = Some("#FFFFFF".to_string());
        let params = Params::new();
        let request = parse_request(ProgressKind::Donut, &params, &config).unwrap();
        let svg = render_svg(&plan_request(&request, &config), &config.theme);
        let bg = svg.find("<rect width=\"100%\"").unwrap();
        assert!(bg < svg.find("<circle").unwrap());
    }
}
