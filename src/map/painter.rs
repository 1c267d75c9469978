use web_sys::CanvasRenderingContext2d;

use super::canvas::{Canvas, Element, Scene, Shape};

const BACKGROUND_COLOR: &str = "#fff";
const LABEL_FONT_FAMILY: &str = "Johnston, sans-serif";

/// Repaint the whole scene, bottom element first
pub fn paint(ctx: &CanvasRenderingContext2d, scene: &Scene, (width, height): (f64, f64)) {
    ctx.set_fill_style_str(BACKGROUND_COLOR);
    ctx.fill_rect(0.0, 0.0, width, height);

    let (pan_x, pan_y) = scene.offset();
    ctx.save();
    let _ = ctx.translate(pan_x, pan_y);

    ctx.set_line_cap("round");
    ctx.set_line_join("round");
    ctx.set_text_baseline("top");

    for (_, element) in scene.iter() {
        paint_element(ctx, element);
    }

    ctx.restore();
}

fn paint_element(ctx: &CanvasRenderingContext2d, element: &Element) {
    let style = &element.style;
    match &element.shape {
        Shape::Circle { center, radius } => {
            ctx.begin_path();
            let _ = ctx.arc(center.0, center.1, radius.max(0.0), 0.0, std::f64::consts::TAU);
            if let Some(fill) = &style.fill {
                ctx.set_fill_style_str(fill);
                ctx.fill();
            }
            if let Some(stroke) = &style.stroke {
                ctx.set_stroke_style_str(stroke);
                ctx.set_line_width(style.line_width);
                ctx.stroke();
            }
        }
        Shape::Line { from, to } => {
            let Some(stroke) = &style.stroke else { return };
            ctx.begin_path();
            ctx.move_to(from.0, from.1);
            ctx.line_to(to.0, to.1);
            ctx.set_stroke_style_str(stroke);
            ctx.set_line_width(style.line_width);
            ctx.stroke();
        }
        Shape::Polyline { points } => {
            let (Some(stroke), Some((first, rest))) = (&style.stroke, points.split_first()) else {
                return;
            };
            ctx.begin_path();
            ctx.move_to(first.0, first.1);
            for point in rest {
                ctx.line_to(point.0, point.1);
            }
            ctx.set_stroke_style_str(stroke);
            ctx.set_line_width(style.line_width);
            ctx.stroke();
        }
        Shape::Text { anchor, text, font_size } => {
            ctx.set_font(&format!("bold {font_size}px {LABEL_FONT_FAMILY}"));
            ctx.set_fill_style_str(style.fill.as_deref().unwrap_or("#000"));
            let _ = ctx.fill_text(text, anchor.0, anchor.1);
        }
    }
}
