use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    foundation::{
        core::{Canvas, Domain, Rgba8, TermRange},
        error::{FourierError, FourierResult},
    },
    model::waveform::{DEFAULT_SAMPLES, SampleGrid},
};

pub const DEFAULT_OUT_PATH: &str = "fourier_animation.gif";
pub const DEFAULT_INTERVAL_MS: u32 = 100;
pub const DEFAULT_FPS: u32 = 10;

/// Container written by the encoder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Animated GIF written in-process.
    #[default]
    Gif,
    /// H.264 MP4 through the system `ffmpeg` binary.
    Mp4,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Gif => "gif",
            Self::Mp4 => "mp4",
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "gif" => Some(Self::Gif),
            "mp4" => Some(Self::Mp4),
            _ => None,
        }
    }
}

/// Look of a rendered frame. Defaults reproduce a 10x5 inch figure at 100 dpi.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlotStyle {
    pub canvas: Canvas,
    pub y_limits: [f64; 2],
    pub background: Rgba8,
    pub reference_color: Rgba8,
    pub approx_color: Rgba8,
    pub line_width: f64,
    pub grid: bool,
    pub grid_color: Rgba8,
    pub axis_color: Rgba8,
    pub title: String,
    pub reference_label: String,
    pub approx_label: String,
    pub legend: bool,
    pub font_family: String,
    pub font_size: f64,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            y_limits: [-1.5, 1.5],
            background: Rgba8::opaque(255, 255, 255),
            reference_color: Rgba8::opaque(255, 0, 0),
            approx_color: Rgba8::opaque(0, 0, 255),
            line_width: 2.0,
            grid: true,
            grid_color: Rgba8::opaque(176, 176, 176),
            axis_color: Rgba8::opaque(0, 0, 0),
            title: "Fourier Approximation".to_string(),
            reference_label: "Square Wave".to_string(),
            approx_label: "Fourier Sum".to_string(),
            legend: true,
            font_family: "DejaVu Sans, Arial, sans-serif".to_string(),
            font_size: 14.0,
        }
    }
}

impl PlotStyle {
    pub fn validate(&self) -> FourierResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(FourierError::configuration(
                "canvas width/height must be non-zero",
            ));
        }
        if self.canvas.width > u32::from(u16::MAX) || self.canvas.height > u32::from(u16::MAX) {
            return Err(FourierError::configuration(format!(
                "canvas {}x{} exceeds the rasterizer limit of {}x{}",
                self.canvas.width,
                self.canvas.height,
                u16::MAX,
                u16::MAX
            )));
        }
        let [lo, hi] = self.y_limits;
        if !lo.is_finite() || !hi.is_finite() || lo >= hi {
            return Err(FourierError::configuration(format!(
                "y limits [{lo}, {hi}] must be finite and increasing"
            )));
        }
        if !self.line_width.is_finite() || self.line_width <= 0.0 {
            return Err(FourierError::configuration("line width must be > 0"));
        }
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(FourierError::configuration("font size must be > 0"));
        }
        Ok(())
    }
}

/// Everything needed to produce the animation file.
///
/// Every field defaults to the reference animation: 1000 samples over `[-π, π]`, N = 1..=99,
/// 100 ms frame interval, 10 fps, `fourier_animation.gif`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub domain: Domain,
    pub samples: usize,
    pub terms: TermRange,
    /// Delay between frames when no export frame rate is set.
    pub interval_ms: u32,
    /// Export frame rate; takes precedence over `interval_ms` in the output file.
    pub fps: Option<u32>,
    pub out_path: PathBuf,
    pub format: OutputFormat,
    pub overwrite: bool,
    pub style: PlotStyle,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            domain: Domain::default(),
            samples: DEFAULT_SAMPLES,
            terms: TermRange::default(),
            interval_ms: DEFAULT_INTERVAL_MS,
            fps: Some(DEFAULT_FPS),
            out_path: PathBuf::from(DEFAULT_OUT_PATH),
            format: OutputFormat::Gif,
            overwrite: true,
            style: PlotStyle::default(),
        }
    }
}

impl AnimationConfig {
    pub fn from_json_str(s: &str) -> FourierResult<Self> {
        serde_json::from_str(s).map_err(|e| FourierError::serde(format!("parse config: {e}")))
    }

    pub fn from_path(path: &Path) -> FourierResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    pub fn validate(&self) -> FourierResult<()> {
        self.domain.validate()?;
        if self.samples < 2 {
            return Err(FourierError::configuration(format!(
                "samples must be >= 2, got {}",
                self.samples
            )));
        }
        self.terms.validate()?;
        if self.fps == Some(0) {
            return Err(FourierError::configuration("fps must be non-zero"));
        }
        if self.fps.is_none() && self.interval_ms == 0 {
            return Err(FourierError::configuration(
                "interval_ms must be non-zero when fps is unset",
            ));
        }
        if self.out_path.as_os_str().is_empty() {
            return Err(FourierError::configuration("output path is empty"));
        }
        self.style.validate()
    }

    pub fn sample_grid(&self) -> FourierResult<SampleGrid> {
        SampleGrid::linspace(self.domain, self.samples)
    }

    /// Per-frame delay in the output file, in milliseconds.
    pub fn frame_delay_ms(&self) -> u32 {
        match self.fps {
            Some(fps) if fps > 0 => (1000 / fps).max(1),
            _ => self.interval_ms.max(1),
        }
    }

    /// Integer frame rate for containers that need one (MP4).
    pub fn export_fps(&self) -> u32 {
        match self.fps {
            Some(fps) if fps > 0 => fps,
            _ => (1000 / self.interval_ms.max(1)).max(1),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
