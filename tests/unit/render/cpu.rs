use super::*;
use crate::{
    config::PlotStyle,
    foundation::core::{Canvas, TermCount},
    frame::generator::FrameGenerator,
    model::waveform::SampleGrid,
    render::plot::compile_frame,
};

fn small_style() -> PlotStyle {
    PlotStyle {
        canvas: Canvas {
            width: 160,
            height: 80,
        },
        ..PlotStyle::default()
    }
}

fn no_text() -> RenderSettings {
    RenderSettings {
        text: false,
        ..RenderSettings::default()
    }
}

fn pixel(frame: &FrameRGBA, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * frame.width + x) * 4) as usize;
    [
        frame.data[i],
        frame.data[i + 1],
        frame.data[i + 2],
        frame.data[i + 3],
    ]
}

#[test]
fn background_fills_the_canvas() {
    let plan = PlotPlan {
        canvas: Canvas {
            width: 8,
            height: 4,
        },
        background: Rgba8::opaque(10, 20, 30),
        font_family: String::new(),
        ops: vec![],
    };
    let mut backend = CpuBackend::new(no_text());
    let frame = backend.render_plan(&plan).unwrap();
    assert_eq!(frame.data.len(), FrameRGBA::expected_len(8, 4));
    assert!(frame.premultiplied);
    assert!(
        frame
            .data
            .chunks_exact(4)
            .all(|px| px == [10, 20, 30, 255])
    );
}

#[test]
fn fill_rect_paints_inside_only() {
    let plan = PlotPlan {
        canvas: Canvas {
            width: 16,
            height: 16,
        },
        background: Rgba8::opaque(255, 255, 255),
        font_family: String::new(),
        ops: vec![DrawOp::FillRect {
            rect: Rect::new(0.0, 0.0, 8.0, 8.0),
            color: Rgba8::opaque(0, 0, 255),
        }],
    };
    let frame = CpuBackend::new(no_text()).render_plan(&plan).unwrap();
    assert_eq!(pixel(&frame, 2, 2), [0, 0, 255, 255]);
    assert_eq!(pixel(&frame, 12, 12), [255, 255, 255, 255]);
}

#[test]
fn rendered_plot_is_deterministic_and_shows_both_curves() {
    let style = small_style();
    let generator = FrameGenerator::new(SampleGrid::default()).unwrap();
    let plan = compile_frame(&style, &generator.frame(TermCount(9)).unwrap()).unwrap();

    let mut backend = CpuBackend::new(no_text());
    let a = backend.render_plan(&plan).unwrap();
    let b = backend.render_plan(&plan).unwrap();

    assert_eq!(a.width, 160);
    assert_eq!(a.height, 80);
    assert_eq!(a.data, b.data);

    let reddish = a
        .data
        .chunks_exact(4)
        .any(|px| px[0] > 200 && px[1] < 80 && px[2] < 80);
    let bluish = a
        .data
        .chunks_exact(4)
        .any(|px| px[2] > 200 && px[0] < 80 && px[1] < 80);
    assert!(reddish);
    assert!(bluish);
}

#[test]
fn oversized_canvas_is_a_render_error() {
    let plan = PlotPlan {
        canvas: Canvas {
            width: 70_000,
            height: 4,
        },
        background: Rgba8::opaque(0, 0, 0),
        font_family: String::new(),
        ops: vec![],
    };
    let err = CpuBackend::new(no_text()).render_plan(&plan).unwrap_err();
    assert!(matches!(err, FourierError::Render(_)));
}

#[test]
fn text_layer_never_fails_the_frame() {
    let style = small_style();
    let generator = FrameGenerator::new(SampleGrid::default()).unwrap();
    let plan = compile_frame(&style, &generator.frame(TermCount(2)).unwrap()).unwrap();
    let frame = CpuBackend::new(RenderSettings::default())
        .render_plan(&plan)
        .unwrap();
    assert_eq!(frame.data.len(), FrameRGBA::expected_len(160, 80));
}
