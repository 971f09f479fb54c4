//! Animated Fourier approximation of a square wave.
//!
//! Each frame of the animation shows the unit square wave next to its N-term odd-harmonic
//! Fourier partial sum; N grows by one per frame and the frames are written to an animated GIF
//! (or an MP4 through the system `ffmpeg` binary).
//!
//! # Pipeline overview
//!
//! 1. **Model**: [`SampleGrid`] + [`square_wave`] / [`partial_sum`] (pure numeric code)
//! 2. **Generate**: [`FrameGenerator`]: `N -> Frame` over a shared, immutable grid
//! 3. **Compile**: [`compile_frame`]: `Frame -> PlotPlan` (backend-agnostic draw ops)
//! 4. **Render**: [`RenderBackend`]: `PlotPlan -> FrameRGBA` (CPU backend)
//! 5. **Encode**: [`FrameSink`]: GIF in-process, MP4 via `ffmpeg`
//!
//! [`render_animation`] runs all of it for an [`AnimationConfig`]; the defaults reproduce the
//! reference animation (1000 samples over `[-π, π]`, N = 1..=99, 10 fps,
//! `fourier_animation.gif`).
#![forbid(unsafe_code)]

mod config;
mod encode;
mod foundation;
mod frame;
mod model;
mod render;

pub use config::{
    AnimationConfig, DEFAULT_FPS, DEFAULT_INTERVAL_MS, DEFAULT_OUT_PATH, OutputFormat, PlotStyle,
};
pub use encode::ffmpeg::{FfmpegEncoder, is_ffmpeg_on_path, validate_mp4_dims};
pub use encode::gif::GifSink;
pub use encode::{EncodeConfig, FrameSink, create_sink, ensure_parent_dir};
pub use foundation::core::{BezPath, Canvas, Domain, Point, Rect, Rgba8, TermCount, TermRange};
pub use foundation::error::{FourierError, FourierResult};
pub use frame::generator::{Frame, FrameGenerator};
pub use model::series::{partial_sum, partial_sum_at};
pub use model::waveform::{DEFAULT_SAMPLES, SampleGrid, reference, square_wave};
pub use render::backend::{BackendKind, FrameRGBA, RenderBackend, RenderSettings, create_backend};
pub use render::composite::flatten_to_opaque_rgba8;
pub use render::cpu::CpuBackend;
pub use render::pipeline::{
    RenderStats, render_animation, render_frame, render_frames, render_frames_to_sink,
};
pub use render::plot::{
    DrawOp, PlotPlan, TextAlign, Viewport, compile_frame, format_tick, frame_title, nice_ticks,
};
pub use render::text::{build_fontdb, rasterize_text_layer, text_layer_svg};
