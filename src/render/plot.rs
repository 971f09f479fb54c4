use kurbo::Shape as _;

use crate::{
    config::PlotStyle,
    foundation::{
        core::{BezPath, Canvas, Domain, Point, Rect, Rgba8},
        error::{FourierError, FourierResult},
        math::remap,
    },
    frame::generator::Frame,
};

// Subplot margins as fractions of the canvas (left, right, bottom, top).
const MARGIN_LEFT: f64 = 0.125;
const MARGIN_RIGHT: f64 = 0.9;
const MARGIN_BOTTOM: f64 = 0.11;
const MARGIN_TOP: f64 = 0.88;

const MAX_TICKS: usize = 9;
const TICK_LEN: f64 = 3.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    Start,
    Middle,
    End,
}

/// Backend-agnostic draw operation in pixel space.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    FillRect {
        rect: Rect,
        color: Rgba8,
    },
    StrokePath {
        path: BezPath,
        color: Rgba8,
        width: f64,
        /// Restricts the stroke to the data area.
        clip: Option<Rect>,
    },
    /// Text is composited above every vector op of the same plan.
    Text {
        text: String,
        anchor: Point,
        size: f64,
        color: Rgba8,
        align: TextAlign,
    },
}

/// Everything a backend needs to rasterize one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct PlotPlan {
    pub canvas: Canvas,
    pub background: Rgba8,
    pub font_family: String,
    pub ops: Vec<DrawOp>,
}

impl PlotPlan {
    pub fn text_ops(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Text { .. }))
    }
}

/// Maps data coordinates into the pixel rectangle of the axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub area: Rect,
    pub x: [f64; 2],
    pub y: [f64; 2],
}

impl Viewport {
    pub fn new(canvas: Canvas, domain: Domain, y_limits: [f64; 2]) -> Self {
        let w = f64::from(canvas.width);
        let h = f64::from(canvas.height);
        let area = Rect::new(
            (w * MARGIN_LEFT).round(),
            (h * (1.0 - MARGIN_TOP)).round(),
            (w * MARGIN_RIGHT).round(),
            (h * (1.0 - MARGIN_BOTTOM)).round(),
        );
        Self {
            area,
            x: [domain.start, domain.end],
            y: y_limits,
        }
    }

    pub fn to_px(&self, x: f64, y: f64) -> Point {
        Point::new(
            remap(x, self.x[0], self.x[1], self.area.x0, self.area.x1),
            remap(y, self.y[0], self.y[1], self.area.y1, self.area.y0),
        )
    }

    /// Polyline through `(xs[i], ys[i])`. Non-finite samples break the line.
    pub fn polyline(&self, xs: &[f64], ys: &[f64]) -> BezPath {
        let mut path = BezPath::new();
        let mut pen_down = false;
        for (&x, &y) in xs.iter().zip(ys) {
            if !x.is_finite() || !y.is_finite() {
                pen_down = false;
                continue;
            }
            let p = self.to_px(x, y);
            if pen_down {
                path.line_to(p);
            } else {
                path.move_to(p);
                pen_down = true;
            }
        }
        path
    }
}

/// Tick positions on `[lo, hi]` with a 1/2/2.5/5 x 10^k step.
pub fn nice_ticks(lo: f64, hi: f64, max_ticks: usize) -> Vec<f64> {
    if !(lo.is_finite() && hi.is_finite()) || lo >= hi || max_ticks < 2 {
        return Vec::new();
    }

    let raw = (hi - lo) / (max_ticks - 1) as f64;
    let mag = 10f64.powf(raw.log10().floor());
    let step = [1.0, 2.0, 2.5, 5.0, 10.0]
        .into_iter()
        .map(|m| m * mag)
        .find(|s| *s >= raw * (1.0 - 1e-9))
        .unwrap_or(10.0 * mag);

    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    (first..=last)
        .map(|i| {
            let v = i as f64 * step;
            // Avoid printing "-0".
            if v.abs() < step * 1e-9 { 0.0 } else { v }
        })
        .collect()
}

pub fn format_tick(v: f64) -> String {
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    let s = if s == "-0" { "0" } else { s };
    // Typeset negatives with a real minus sign.
    match s.strip_prefix('-') {
        Some(rest) => format!("\u{2212}{rest}"),
        None => s.to_string(),
    }
}

pub fn frame_title(style: &PlotStyle, frame: &Frame) -> String {
    format!("{} (N = {})", style.title, frame.terms)
}

/// Turn one animation frame into draw ops.
#[tracing::instrument(skip(style, frame), fields(terms = frame.terms.0))]
pub fn compile_frame(style: &PlotStyle, frame: &Frame) -> FourierResult<PlotPlan> {
    let xs = frame.grid.xs();
    if xs.len() != frame.curve.len() || xs.len() != frame.reference.len() {
        return Err(FourierError::render(format!(
            "frame arrays disagree: {} samples, {} reference values, {} curve values",
            xs.len(),
            frame.reference.len(),
            frame.curve.len()
        )));
    }

    let vp = Viewport::new(style.canvas, frame.grid.domain(), style.y_limits);
    let mut ops = Vec::new();

    let x_ticks = nice_ticks(vp.x[0], vp.x[1], MAX_TICKS);
    let y_ticks = nice_ticks(vp.y[0], vp.y[1], MAX_TICKS);

    if style.grid {
        for &t in &x_ticks {
            let mut p = BezPath::new();
            p.move_to(Point::new(vp.to_px(t, 0.0).x, vp.area.y0));
            p.line_to(Point::new(vp.to_px(t, 0.0).x, vp.area.y1));
            ops.push(grid_line(style, p));
        }
        for &t in &y_ticks {
            let mut p = BezPath::new();
            p.move_to(Point::new(vp.area.x0, vp.to_px(0.0, t).y));
            p.line_to(Point::new(vp.area.x1, vp.to_px(0.0, t).y));
            ops.push(grid_line(style, p));
        }
    }

    ops.push(DrawOp::StrokePath {
        path: vp.polyline(xs, &frame.reference),
        color: style.reference_color,
        width: style.line_width,
        clip: Some(vp.area),
    });
    ops.push(DrawOp::StrokePath {
        path: vp.polyline(xs, &frame.curve),
        color: style.approx_color,
        width: style.line_width,
        clip: Some(vp.area),
    });

    ops.push(DrawOp::StrokePath {
        path: vp.area.to_path(0.1),
        color: style.axis_color,
        width: 1.0,
        clip: None,
    });

    let label_size = style.font_size * 0.8;
    for &t in &x_ticks {
        let p = vp.to_px(t, vp.y[0]);
        ops.push(tick_mark(style, p, Point::new(p.x, p.y + TICK_LEN)));
        ops.push(DrawOp::Text {
            text: format_tick(t),
            anchor: Point::new(p.x, p.y + TICK_LEN + label_size + 2.0),
            size: label_size,
            color: style.axis_color,
            align: TextAlign::Middle,
        });
    }
    for &t in &y_ticks {
        let p = vp.to_px(vp.x[0], t);
        ops.push(tick_mark(style, p, Point::new(p.x - TICK_LEN, p.y)));
        ops.push(DrawOp::Text {
            text: format_tick(t),
            anchor: Point::new(p.x - TICK_LEN - 3.0, p.y + label_size * 0.35),
            size: label_size,
            color: style.axis_color,
            align: TextAlign::End,
        });
    }

    ops.push(DrawOp::Text {
        text: frame_title(style, frame),
        anchor: Point::new(vp.area.center().x, vp.area.y0 - style.font_size * 0.6),
        size: style.font_size * 1.2,
        color: style.axis_color,
        align: TextAlign::Middle,
    });

    if style.legend {
        push_legend(&mut ops, style, &vp);
    }

    Ok(PlotPlan {
        canvas: style.canvas,
        background: style.background,
        font_family: style.font_family.clone(),
        ops,
    })
}

fn grid_line(style: &PlotStyle, path: BezPath) -> DrawOp {
    DrawOp::StrokePath {
        path,
        color: style.grid_color,
        width: 0.8,
        clip: None,
    }
}

fn tick_mark(style: &PlotStyle, from: Point, to: Point) -> DrawOp {
    let mut path = BezPath::new();
    path.move_to(from);
    path.line_to(to);
    DrawOp::StrokePath {
        path,
        color: style.axis_color,
        width: 0.8,
        clip: None,
    }
}

// Upper-right legend: framed box, one sample line plus label per curve.
fn push_legend(ops: &mut Vec<DrawOp>, style: &PlotStyle, vp: &Viewport) {
    let fs = style.font_size;
    let pad = fs * 0.5;
    let swatch = fs * 2.0;
    let row = fs * 1.4;
    let longest = style
        .reference_label
        .chars()
        .count()
        .max(style.approx_label.chars().count()) as f64;
    // Rough advance for a sans-serif face.
    let text_w = longest * fs * 0.6;

    let w = pad * 3.0 + swatch + text_w;
    let h = pad * 2.0 + row * 2.0;
    let x1 = vp.area.x1 - pad;
    let y0 = vp.area.y0 + pad;
    let bbox = Rect::new(x1 - w, y0, x1, y0 + h);

    ops.push(DrawOp::FillRect {
        rect: bbox,
        color: Rgba8 {
            a: 204,
            ..style.background
        },
    });
    ops.push(DrawOp::StrokePath {
        path: bbox.to_path(0.1),
        color: Rgba8::opaque(204, 204, 204),
        width: 1.0,
        clip: None,
    });

    let entries = [
        (&style.reference_label, style.reference_color),
        (&style.approx_label, style.approx_color),
    ];
    for (i, (label, color)) in entries.into_iter().enumerate() {
        let cy = bbox.y0 + pad + row * (i as f64 + 0.5);
        let mut path = BezPath::new();
        path.move_to(Point::new(bbox.x0 + pad, cy));
        path.line_to(Point::new(bbox.x0 + pad + swatch, cy));
        ops.push(DrawOp::StrokePath {
            path,
            color,
            width: style.line_width,
            clip: None,
        });
        ops.push(DrawOp::Text {
            text: label.clone(),
            anchor: Point::new(bbox.x0 + pad * 2.0 + swatch, cy + fs * 0.35),
            size: fs,
            color: style.axis_color,
            align: TextAlign::Start,
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/plot.rs"]
mod tests;
