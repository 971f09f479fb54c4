use std::path::PathBuf;

use crate::{
    config::AnimationConfig,
    encode::{EncodeConfig, FrameSink, create_sink},
    foundation::{
        core::{TermCount, TermRange},
        error::FourierResult,
    },
    frame::generator::FrameGenerator,
    render::{
        backend::{FrameRGBA, RenderBackend},
        plot::compile_frame,
    },
};

/// Counters reported after an animation run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub frames_total: u64,
    pub out_path: PathBuf,
}

/// Generate + compile + rasterize one frame.
///
/// This is the one-shot API: `N -> FrameRGBA` with **premultiplied** pixels.
pub fn render_frame(
    cfg: &AnimationConfig,
    generator: &FrameGenerator,
    terms: TermCount,
    backend: &mut dyn RenderBackend,
) -> FourierResult<FrameRGBA> {
    let frame = generator.frame(terms)?;
    let plan = compile_frame(&cfg.style, &frame)?;
    backend.render_plan(&plan)
}

/// Render every frame of `range` into memory, in increasing N.
pub fn render_frames(
    cfg: &AnimationConfig,
    generator: &FrameGenerator,
    range: TermRange,
    backend: &mut dyn RenderBackend,
) -> FourierResult<Vec<FrameRGBA>> {
    let mut out = Vec::with_capacity(range.len_frames().min(4096) as usize);
    drive(cfg, generator, range, backend, |pixels| {
        out.push(pixels);
        Ok(())
    })?;
    Ok(out)
}

/// Stream every frame of `range` into `sink`. The sink is not finalized here.
#[tracing::instrument(skip_all, fields(start = range.start.0, end = range.end.0))]
pub fn render_frames_to_sink(
    cfg: &AnimationConfig,
    generator: &FrameGenerator,
    range: TermRange,
    backend: &mut dyn RenderBackend,
    sink: &mut dyn FrameSink,
) -> FourierResult<u64> {
    drive(cfg, generator, range, backend, |pixels| sink.encode_frame(&pixels))
}

// One linear pass over N; each frame depends only on (grid, N).
fn drive(
    cfg: &AnimationConfig,
    generator: &FrameGenerator,
    range: TermRange,
    backend: &mut dyn RenderBackend,
    mut emit: impl FnMut(FrameRGBA) -> FourierResult<()>,
) -> FourierResult<u64> {
    let mut count = 0u64;
    for frame in generator.frames(range)? {
        let frame = frame?;
        let plan = compile_frame(&cfg.style, &frame)?;
        let pixels = backend.render_plan(&plan)?;
        tracing::debug!(
            terms = frame.terms.0,
            highest_harmonic = frame.terms.highest_harmonic(),
            peak = frame.peak(),
            max_abs_error = frame.max_abs_error(),
            "frame rendered"
        );
        emit(pixels)?;
        count += 1;
    }
    Ok(count)
}

/// Render the configured animation and write it to `cfg.out_path`.
///
/// Validates the configuration up front; any render or export failure aborts the run and no
/// retry is attempted.
#[tracing::instrument(skip_all, fields(out = %cfg.out_path.display(), format = ?cfg.format))]
pub fn render_animation(
    cfg: &AnimationConfig,
    backend: &mut dyn RenderBackend,
) -> FourierResult<RenderStats> {
    cfg.validate()?;

    let generator = FrameGenerator::new(cfg.sample_grid()?)?;
    let mut sink = create_sink(cfg.format, EncodeConfig::from_animation(cfg))?;

    let frames_total = render_frames_to_sink(cfg, &generator, cfg.terms, backend, sink.as_mut())?;
    sink.finish()?;

    tracing::info!(
        frames = frames_total,
        path = %cfg.out_path.display(),
        "animation written"
    );
    Ok(RenderStats {
        frames_total,
        out_path: cfg.out_path.clone(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
