use std::f64::consts::{PI, TAU};

use crate::foundation::{
    core::Domain,
    error::{FourierError, FourierResult},
};

/// Number of samples the reference animation evaluates per curve.
pub const DEFAULT_SAMPLES: usize = 1000;

/// Evenly spaced sample points over a closed [`Domain`].
///
/// The first point is exactly `domain.start` and the last exactly `domain.end`. A grid is never
/// mutated after construction; frames share it behind an `Arc`.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleGrid {
    domain: Domain,
    xs: Vec<f64>,
}

impl SampleGrid {
    pub fn linspace(domain: Domain, count: usize) -> FourierResult<Self> {
        domain.validate()?;
        if count < 2 {
            return Err(FourierError::configuration(format!(
                "sample grid needs at least 2 points, got {count}"
            )));
        }

        Ok(Self::build(domain, count))
    }

    // Callers guarantee a valid domain and `count >= 2`.
    fn build(domain: Domain, count: usize) -> Self {
        let step = domain.width() / (count - 1) as f64;
        let mut xs: Vec<f64> = (0..count)
            .map(|i| domain.start + (i as f64) * step)
            .collect();
        // Pin the closed end against accumulated rounding.
        xs[count - 1] = domain.end;
        Self { domain, xs }
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }
}

impl Default for SampleGrid {
    fn default() -> Self {
        Self::build(Domain::default(), DEFAULT_SAMPLES)
    }
}

/// Unit square wave with period 2π: `+1` on `[0, π)`, `-1` on `[-π, 0)`.
///
/// Input outside `[-π, π)` is first reduced into it, so `square_wave(π) == -1`. Non-finite
/// input yields `-1`.
pub fn square_wave(x: f64) -> f64 {
    // Reducing in-range input would round tiny negatives up to 0.0.
    let r = if (-PI..PI).contains(&x) {
        x
    } else {
        (x + PI).rem_euclid(TAU) - PI
    };
    if (0.0..PI).contains(&r) { 1.0 } else { -1.0 }
}

/// [`square_wave`] over a whole sequence of sample points.
pub fn reference(xs: &[f64]) -> Vec<f64> {
    xs.iter().copied().map(square_wave).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/model/waveform.rs"]
mod tests;
