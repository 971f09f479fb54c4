use super::*;
use crate::foundation::core::{Canvas, Point, Rgba8};

fn plan_with(text: &str) -> PlotPlan {
    PlotPlan {
        canvas: Canvas {
            width: 64,
            height: 32,
        },
        background: Rgba8::opaque(255, 255, 255),
        font_family: "DejaVu Sans".to_string(),
        ops: vec![
            DrawOp::FillRect {
                rect: crate::foundation::core::Rect::new(0.0, 0.0, 4.0, 4.0),
                color: Rgba8::opaque(0, 0, 0),
            },
            DrawOp::Text {
                text: text.to_string(),
                anchor: Point::new(32.0, 20.0),
                size: 12.0,
                color: Rgba8::opaque(0, 0, 0),
                align: TextAlign::Middle,
            },
        ],
    }
}

#[test]
fn svg_contains_only_text_and_escapes_markup() {
    let svg = text_layer_svg(&plan_with("a < b & \"c\""));
    assert!(svg.starts_with("<svg"));
    assert!(svg.ends_with("</svg>"));
    assert_eq!(svg.matches("<text").count(), 1);
    assert!(svg.contains("a &lt; b &amp; &quot;c&quot;"));
    assert!(svg.contains(r#"text-anchor="middle""#));
    assert!(svg.contains(r##"fill="#000000""##));
}

#[test]
fn text_layer_matches_canvas_size() {
    let fontdb = Arc::new(usvg::fontdb::Database::new());
    let layer = rasterize_text_layer(&plan_with("N = 3"), fontdb).unwrap();
    assert_eq!(layer.len(), 64 * 32 * 4);
}

#[test]
fn missing_fonts_leave_an_empty_layer() {
    // No faces loaded: the text node is dropped rather than failing.
    let fontdb = Arc::new(usvg::fontdb::Database::new());
    let layer = rasterize_text_layer(&plan_with("Square Wave"), fontdb).unwrap();
    assert!(layer.iter().all(|&b| b == 0));
}

#[test]
fn font_dirs_that_do_not_exist_are_ignored() {
    let db = build_fontdb(&[std::path::PathBuf::from("target/no-such-font-dir")]);
    // Only system faces (possibly none) are present.
    let system_only = build_fontdb::<&str>(&[]);
    assert_eq!(db.len(), system_only.len());
}
