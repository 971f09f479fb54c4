use crate::foundation::error::{FourierError, FourierResult};

pub use kurbo::{BezPath, Point, Rect};

/// Number of odd harmonics summed for one frame of the animation.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct TermCount(pub u32);

impl TermCount {
    /// Reject the empty sum; every frame draws at least the fundamental.
    pub fn new(n: u32) -> FourierResult<Self> {
        if n == 0 {
            return Err(FourierError::configuration("term count must be >= 1"));
        }
        Ok(Self(n))
    }

    /// Highest harmonic included in the sum (`2N - 1`).
    pub fn highest_harmonic(self) -> u64 {
        2 * u64::from(self.0) - 1
    }
}

impl std::fmt::Display for TermCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TermRange {
    pub start: TermCount,
    pub end: TermCount, // exclusive
}

impl TermRange {
    pub fn new(start: TermCount, end: TermCount) -> FourierResult<Self> {
        let range = Self { start, end };
        range.validate()?;
        Ok(range)
    }

    /// Builds the inclusive range `1..=max_terms`.
    pub fn up_to(max_terms: u32) -> FourierResult<Self> {
        Self::new(TermCount(1), TermCount(max_terms.saturating_add(1)))
    }

    pub fn validate(self) -> FourierResult<()> {
        if self.start.0 == 0 {
            return Err(FourierError::configuration(
                "term range must start at N >= 1",
            ));
        }
        if self.start.0 >= self.end.0 {
            return Err(FourierError::configuration(format!(
                "term range {}..{} is empty",
                self.start.0, self.end.0
            )));
        }
        Ok(())
    }

    pub fn len_frames(self) -> u64 {
        u64::from(self.end.0.saturating_sub(self.start.0))
    }

    pub fn is_empty(self) -> bool {
        self.start.0 >= self.end.0
    }

    pub fn contains(self, n: TermCount) -> bool {
        self.start.0 <= n.0 && n.0 < self.end.0
    }

    pub fn iter(self) -> impl Iterator<Item = TermCount> {
        (self.start.0..self.end.0).map(TermCount)
    }
}

impl Default for TermRange {
    fn default() -> Self {
        Self {
            start: TermCount(1),
            end: TermCount(100),
        }
    }
}

/// Closed interval of the x axis covered by the sample grid.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Domain {
    pub start: f64,
    pub end: f64,
}

impl Domain {
    pub fn new(start: f64, end: f64) -> FourierResult<Self> {
        let d = Self { start, end };
        d.validate()?;
        Ok(d)
    }

    pub fn validate(self) -> FourierResult<()> {
        if !self.start.is_finite() || !self.end.is_finite() {
            return Err(FourierError::configuration("domain bounds must be finite"));
        }
        if self.start >= self.end {
            return Err(FourierError::configuration(format!(
                "domain [{}, {}] is empty",
                self.start, self.end
            )));
        }
        Ok(())
    }

    pub fn width(self) -> f64 {
        self.end - self.start
    }
}

impl Default for Domain {
    fn default() -> Self {
        Self {
            start: -std::f64::consts::PI,
            end: std::f64::consts::PI,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Default for Canvas {
    // 10x5 inches at 100 dpi.
    fn default() -> Self {
        Self {
            width: 1000,
            height: 500,
        }
    }
}

/// Straight-alpha RGBA8 color as written in configuration files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// `#rrggbb` form, alpha goes into a separate `*-opacity` attribute in SVG.
    pub fn to_hex_rgb(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
