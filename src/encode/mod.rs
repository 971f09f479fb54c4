pub(crate) mod ffmpeg;
pub(crate) mod gif;

use std::path::{Path, PathBuf};

use crate::{
    config::{AnimationConfig, OutputFormat},
    foundation::error::{FourierError, FourierResult},
    render::backend::FrameRGBA,
};

/// Consumes rendered frames in order and finalizes one output file.
pub trait FrameSink {
    fn encode_frame(&mut self, frame: &FrameRGBA) -> FourierResult<()>;

    /// Flush and close the output. The file is complete only once this returns `Ok`.
    fn finish(self: Box<Self>) -> FourierResult<()>;
}

#[derive(Clone, Debug)]
pub struct EncodeConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    /// Per-frame delay stored in formats that carry one (GIF).
    pub delay_ms: u32,
    pub out_path: PathBuf,
    pub overwrite: bool,
    /// Opaque color that partially transparent pixels are flattened over.
    pub bg_rgba: [u8; 4],
}

impl EncodeConfig {
    pub fn from_animation(cfg: &AnimationConfig) -> Self {
        Self {
            width: cfg.style.canvas.width,
            height: cfg.style.canvas.height,
            fps: cfg.export_fps(),
            delay_ms: cfg.frame_delay_ms(),
            out_path: cfg.out_path.clone(),
            overwrite: cfg.overwrite,
            bg_rgba: cfg.style.background.to_array(),
        }
    }

    pub fn validate(&self) -> FourierResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(FourierError::configuration(
                "encode width/height must be non-zero",
            ));
        }
        if self.fps == 0 {
            return Err(FourierError::configuration("encode fps must be non-zero"));
        }
        if self.delay_ms == 0 {
            return Err(FourierError::configuration(
                "encode frame delay must be non-zero",
            ));
        }
        Ok(())
    }

    pub fn with_out_path(mut self, out_path: impl Into<PathBuf>) -> Self {
        self.out_path = out_path.into();
        self
    }

    fn check_frame(&self, frame: &FrameRGBA) -> FourierResult<()> {
        if frame.width != self.width || frame.height != self.height {
            return Err(FourierError::export(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, self.width, self.height
            )));
        }
        if frame.data.len() != FrameRGBA::expected_len(self.width, self.height) {
            return Err(FourierError::export(
                "frame.data size mismatch with width*height*4",
            ));
        }
        Ok(())
    }

    fn check_overwrite(&self) -> FourierResult<()> {
        if !self.overwrite && self.out_path.exists() {
            return Err(FourierError::export(format!(
                "output file '{}' already exists",
                self.out_path.display()
            )));
        }
        Ok(())
    }
}

pub fn ensure_parent_dir(path: &Path) -> FourierResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            FourierError::export(format!(
                "failed to create output directory '{}': {e}",
                parent.display()
            ))
        })?;
    }
    Ok(())
}

/// Open the encoder for `format`.
pub fn create_sink(format: OutputFormat, cfg: EncodeConfig) -> FourierResult<Box<dyn FrameSink>> {
    match format {
        OutputFormat::Gif => Ok(Box::new(gif::GifSink::new(cfg)?)),
        OutputFormat::Mp4 => Ok(Box::new(ffmpeg::FfmpegEncoder::new(cfg)?)),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/mod.rs"]
mod tests;
