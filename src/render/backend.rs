use std::path::PathBuf;

use crate::{
    foundation::error::FourierResult,
    render::plot::PlotPlan,
};

/// Rendered frame pixels.
///
/// `data` is tightly packed RGBA8, `width * height * 4` bytes.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    pub fn expected_len(width: u32, height: u32) -> usize {
        width as usize * height as usize * 4
    }
}

/// Rasterizes [`PlotPlan`]s. The backend owns all mutable drawing state.
pub trait RenderBackend {
    fn render_plan(&mut self, plan: &PlotPlan) -> FourierResult<FrameRGBA>;
}

#[derive(Clone, Copy, Debug)]
pub enum BackendKind {
    Cpu,
}

#[derive(Clone, Debug)]
pub struct RenderSettings {
    /// Rasterize title, labels and legend text.
    pub text: bool,
    /// Extra directories scanned for `.ttf`/`.otf`/`.ttc` files on top of system fonts.
    pub font_dirs: Vec<PathBuf>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            text: true,
            font_dirs: Vec::new(),
        }
    }
}

pub fn create_backend(
    kind: BackendKind,
    settings: &RenderSettings,
) -> FourierResult<Box<dyn RenderBackend>> {
    match kind {
        BackendKind::Cpu => Ok(Box::new(crate::render::cpu::CpuBackend::new(
            settings.clone(),
        ))),
    }
}
