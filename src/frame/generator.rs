use std::sync::Arc;

use crate::{
    foundation::{
        core::{TermCount, TermRange},
        error::{FourierError, FourierResult},
    },
    model::{series::partial_sum, waveform::SampleGrid},
};

/// One step of the animation: the N-term curve next to the fixed reference.
#[derive(Clone, Debug)]
pub struct Frame {
    pub terms: TermCount,
    pub grid: Arc<SampleGrid>,
    pub reference: Arc<[f64]>,
    pub curve: Vec<f64>,
}

impl Frame {
    /// Largest absolute deviation of the partial sum from the square wave.
    pub fn max_abs_error(&self) -> f64 {
        self.curve
            .iter()
            .zip(self.reference.iter())
            .map(|(a, r)| (a - r).abs())
            .fold(0.0, f64::max)
    }

    /// Highest value the partial sum reaches (Gibbs peak for large N).
    pub fn peak(&self) -> f64 {
        self.curve.iter().copied().fold(f64::MIN, f64::max)
    }
}

/// Turns a term count into a curve over a shared, immutable grid.
///
/// The reference waveform is computed once at construction. Each call to
/// [`FrameGenerator::frame`] only depends on `(grid, N)`, never on earlier frames.
#[derive(Clone, Debug)]
pub struct FrameGenerator {
    grid: Arc<SampleGrid>,
    reference: Arc<[f64]>,
}

impl FrameGenerator {
    pub fn new(grid: SampleGrid) -> FourierResult<Self> {
        Self::from_shared(Arc::new(grid))
    }

    pub fn from_shared(grid: Arc<SampleGrid>) -> FourierResult<Self> {
        if grid.is_empty() {
            return Err(FourierError::configuration("sample grid is empty"));
        }
        let reference: Arc<[f64]> = crate::model::waveform::reference(grid.xs()).into();
        Ok(Self { grid, reference })
    }

    pub fn grid(&self) -> &Arc<SampleGrid> {
        &self.grid
    }

    pub fn reference(&self) -> &Arc<[f64]> {
        &self.reference
    }

    /// Just the y-values for `N` terms; the plain `N -> curve` function.
    pub fn curve(&self, terms: TermCount) -> FourierResult<Vec<f64>> {
        if terms.0 == 0 {
            return Err(FourierError::configuration("term count must be >= 1"));
        }
        Ok(partial_sum(self.grid.xs(), terms.0))
    }

    pub fn frame(&self, terms: TermCount) -> FourierResult<Frame> {
        let curve = self.curve(terms)?;
        Ok(Frame {
            terms,
            grid: Arc::clone(&self.grid),
            reference: Arc::clone(&self.reference),
            curve,
        })
    }

    /// Frames for every N in `range`, in increasing N.
    pub fn frames(
        &self,
        range: TermRange,
    ) -> FourierResult<impl Iterator<Item = FourierResult<Frame>> + '_> {
        range.validate()?;
        Ok(range.iter().map(move |n| self.frame(n)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frame/generator.rs"]
mod tests;
