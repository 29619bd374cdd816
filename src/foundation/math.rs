pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Composite a premultiplied source pixel over a straight-alpha destination pixel in place.
///
/// The destination stays straight-alpha so the raster keeps the colors samples carry verbatim.
pub(crate) fn over_premul_onto_straight(dst: &mut [u8], src_premul: [u8; 4]) {
    let sa = u16::from(src_premul[3]);
    if sa == 0 {
        return;
    }
    let inv = 255 - sa;
    let da = u16::from(dst[3]);

    let out_a = sa + u16::from(mul_div255_u8(da, inv));
    if out_a == 0 {
        dst.copy_from_slice(&[0, 0, 0, 0]);
        return;
    }

    for c in 0..3 {
        let dst_premul = mul_div255_u16(u16::from(dst[c]), da);
        let premul = u16::from(src_premul[c]) + mul_div255_u16(dst_premul, inv);
        let straight = ((u32::from(premul) * 255 + u32::from(out_a) / 2) / u32::from(out_a))
            .min(255);
        dst[c] = straight as u8;
    }
    dst[3] = out_a.min(255) as u8;
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
