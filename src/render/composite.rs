use crate::foundation::{
    error::{FourierError, FourierResult},
    math::{add_sat_u8, mul_div255_u16},
};

pub type PremulRgba8 = [u8; 4];

pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255_u16(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - sa;

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(sa, mul_div255_u16(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255_u16(u16::from(src[i]), op);
        let dc = mul_div255_u16(u16::from(dst[i]), inv);
        out[i] = add_sat_u8(sc, dc);
    }
    out
}

pub fn over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> FourierResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(FourierError::render(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Flatten premultiplied (or straight) RGBA8 over an opaque background.
///
/// Encoders that cannot carry partial alpha (GIF palettes, yuv420p) consume the result.
pub fn flatten_to_opaque_rgba8(
    dst: &mut [u8],
    src: &[u8],
    src_is_premul: bool,
    bg_rgba: [u8; 4],
) -> FourierResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(FourierError::render(
            "flatten_to_opaque_rgba8 expects equal-length rgba8 buffers",
        ));
    }

    let bg_r = u16::from(bg_rgba[0]);
    let bg_g = u16::from(bg_rgba[1]);
    let bg_b = u16::from(bg_rgba[2]);

    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let a = u16::from(s[3]);
        if a == 255 {
            d.copy_from_slice(s);
            continue;
        }

        let inv = 255u16 - a;
        let (r, g, b) = if src_is_premul {
            (
                u16::from(s[0]) + mul_div255_u16(bg_r, inv),
                u16::from(s[1]) + mul_div255_u16(bg_g, inv),
                u16::from(s[2]) + mul_div255_u16(bg_b, inv),
            )
        } else {
            (
                mul_div255_u16(u16::from(s[0]), a) + mul_div255_u16(bg_r, inv),
                mul_div255_u16(u16::from(s[1]), a) + mul_div255_u16(bg_g, inv),
                mul_div255_u16(u16::from(s[2]), a) + mul_div255_u16(bg_b, inv),
            )
        };

        d[0] = r.min(255) as u8;
        d[1] = g.min(255) as u8;
        d[2] = b.min(255) as u8;
        d[3] = 255;
    }

    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
