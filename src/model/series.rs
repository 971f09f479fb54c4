use std::f64::consts::PI;

/// `4/π`, the amplitude of the fundamental for a unit square wave.
const SQUARE_WAVE_GAIN: f64 = 4.0 / PI;

/// N-term odd-harmonic Fourier partial sum of the unit square wave at one point:
///
/// `(4/π) · Σ_{n=1}^{N} sin((2n−1)·x) / (2n−1)`
///
/// `terms == 0` is the empty sum and returns `0.0`. Overshoot near the jumps (Gibbs) is part
/// of the result and is not damped.
pub fn partial_sum_at(x: f64, terms: u32) -> f64 {
    let mut s = 0.0;
    for n in 1..=u64::from(terms) {
        let k = (2 * n - 1) as f64;
        s += (k * x).sin() / k;
    }
    SQUARE_WAVE_GAIN * s
}

/// [`partial_sum_at`] over a whole sequence of sample points.
pub fn partial_sum(xs: &[f64], terms: u32) -> Vec<f64> {
    xs.iter().map(|&x| partial_sum_at(x, terms)).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/model/series.rs"]
mod tests;
