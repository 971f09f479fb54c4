use std::sync::Arc;

use vello_cpu::kurbo::Shape as _;

use crate::{
    foundation::{
        core::{BezPath, Point, Rect, Rgba8},
        error::{FourierError, FourierResult},
    },
    render::{
        backend::{FrameRGBA, RenderBackend, RenderSettings},
        composite::over_in_place,
        plot::{DrawOp, PlotPlan},
        text::{build_fontdb, rasterize_text_layer},
    },
};

/// Software rasterizer on top of `vello_cpu`.
///
/// The font database is loaded on first use and reused for every later frame.
pub struct CpuBackend {
    settings: RenderSettings,
    fontdb: Option<Arc<usvg::fontdb::Database>>,
}

impl CpuBackend {
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            fontdb: None,
        }
    }

    fn fontdb(&mut self) -> Arc<usvg::fontdb::Database> {
        let settings = &self.settings;
        self.fontdb
            .get_or_insert_with(|| build_fontdb(&settings.font_dirs))
            .clone()
    }
}

impl RenderBackend for CpuBackend {
    fn render_plan(&mut self, plan: &PlotPlan) -> FourierResult<FrameRGBA> {
        let width: u16 = plan
            .canvas
            .width
            .try_into()
            .map_err(|_| FourierError::render("canvas width exceeds u16"))?;
        let height: u16 = plan
            .canvas
            .height
            .try_into()
            .map_err(|_| FourierError::render("canvas height exceeds u16"))?;
        if width == 0 || height == 0 {
            return Err(FourierError::render("canvas width/height must be non-zero"));
        }

        let mut ctx = vello_cpu::RenderContext::new(width, height);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(color_to_cpu(plan.background));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(width),
            f64::from(height),
        ));

        for op in &plan.ops {
            draw_op(&mut ctx, op);
        }

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        ctx.render_to_pixmap(&mut pixmap);

        if self.settings.text && plan.text_ops().next().is_some() {
            let layer = rasterize_text_layer(plan, self.fontdb())?;
            over_in_place(pixmap.data_as_u8_slice_mut(), &layer, 1.0)?;
        }

        Ok(FrameRGBA {
            width: plan.canvas.width,
            height: plan.canvas.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

fn draw_op(ctx: &mut vello_cpu::RenderContext, op: &DrawOp) {
    match op {
        DrawOp::FillRect { rect, color } => {
            ctx.set_paint(color_to_cpu(*color));
            ctx.fill_rect(&rect_to_cpu(*rect));
        }
        DrawOp::StrokePath {
            path,
            color,
            width,
            clip,
        } => {
            if path.elements().is_empty() {
                return;
            }
            ctx.set_paint(color_to_cpu(*color));
            ctx.set_stroke(vello_cpu::kurbo::Stroke::new(*width));
            if let Some(clip) = clip {
                ctx.push_clip_layer(&rect_to_cpu(*clip).to_path(0.1));
            }
            ctx.stroke_path(&bezpath_to_cpu(path));
            if clip.is_some() {
                ctx.pop_layer();
            }
        }
        // Rasterized separately and composited on top.
        DrawOp::Text { .. } => {}
    }
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
