pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn add_sat_u8(a: u16, b: u16) -> u8 {
    (a + b).min(255) as u8
}

/// Affine map from the closed interval `[a0, a1]` onto `[b0, b1]`.
///
/// Works for reversed targets (`b0 > b1`), which is how data y maps onto pixel rows.
pub(crate) fn remap(v: f64, a0: f64, a1: f64, b0: f64, b1: f64) -> f64 {
    b0 + (v - a0) * (b1 - b0) / (a1 - a0)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
