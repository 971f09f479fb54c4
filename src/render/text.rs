use std::{fmt::Write as _, path::Path, sync::Arc};

use anyhow::Context as _;

use crate::{
    foundation::error::{FourierError, FourierResult},
    render::plot::{DrawOp, PlotPlan, TextAlign},
};

/// System fonts plus any font files found directly inside `extra_dirs`.
pub fn build_fontdb<P: AsRef<Path>>(extra_dirs: &[P]) -> Arc<usvg::fontdb::Database> {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    for dir in extra_dirs {
        load_fonts_from_dir(&mut db, dir.as_ref());
    }
    tracing::debug!(faces = db.len(), "font database ready");
    Arc::new(db)
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        let _ = db.load_font_file(&path);
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

/// SVG document holding only the text ops of `plan`, sized to the canvas.
pub fn text_layer_svg(plan: &PlotPlan) -> String {
    let (w, h) = (plan.canvas.width, plan.canvas.height);
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    );
    let family = escape_xml(&plan.font_family);

    for op in plan.text_ops() {
        let DrawOp::Text {
            text,
            anchor,
            size,
            color,
            align,
        } = op
        else {
            continue;
        };
        let anchor_attr = match align {
            TextAlign::Start => "start",
            TextAlign::Middle => "middle",
            TextAlign::End => "end",
        };
        // Writing into a String cannot fail.
        let _ = write!(
            svg,
            r#"<text x="{:.2}" y="{:.2}" font-family="{}" font-size="{:.2}" fill="{}" fill-opacity="{:.3}" text-anchor="{}">{}</text>"#,
            anchor.x,
            anchor.y,
            family,
            size,
            color.to_hex_rgb(),
            f64::from(color.a) / 255.0,
            anchor_attr,
            escape_xml(text),
        );
    }

    svg.push_str("</svg>");
    svg
}

/// Rasterize the text ops of `plan` into a transparent, premultiplied RGBA8 layer.
///
/// Glyphs that no loaded face can provide are dropped by the SVG text layout; the layer is
/// then simply (partially) empty.
pub fn rasterize_text_layer(
    plan: &PlotPlan,
    fontdb: Arc<usvg::fontdb::Database>,
) -> FourierResult<Vec<u8>> {
    let svg = text_layer_svg(plan);
    let opts = usvg::Options {
        fontdb,
        ..Default::default()
    };
    let tree = usvg::Tree::from_str(&svg, &opts).context("parse text layer svg")?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(plan.canvas.width, plan.canvas.height)
        .ok_or_else(|| FourierError::render("failed to allocate text layer pixmap"))?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::identity(),
        &mut pixmap.as_mut(),
    );
    Ok(pixmap.take())
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
