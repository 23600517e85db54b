//! Lane-wise limb primitives over `u32x4` vectors.
//!
//! Each pass leaves raw lane results behind (sums up to `2·BASE − 2`,
//! wrapped differences, or products up to `4·BASE − 4`) for a single scalar
//! normalization sweep by the caller. A scalar tail covers the limbs past
//! the last full vector.

use std::simd::u32x4;

/// Limbs per vector.
pub(crate) const LANES: usize = 4;

/// `dst[i] += src[i]` lane-wise without carrying. Two valid limbs sum below
/// 2³², so the lanes never wrap here.
pub(crate) fn lanewise_add_assign(dst: &mut [u32], src: &[u32]) {
    debug_assert!(dst.len() >= src.len());
    let n = src.len();
    let vectored = n / LANES * LANES;
    let mut i = 0;
    while i < vectored {
        let a = u32x4::from_slice(&dst[i..i + LANES]);
        let b = u32x4::from_slice(&src[i..i + LANES]);
        (a + b).copy_to_slice(&mut dst[i..i + LANES]);
        i += LANES;
    }
    while i < n {
        dst[i] += src[i];
        i += 1;
    }
}

/// `dst[i] -= src[i]` lane-wise. Underflowing lanes wrap modulo 2³² on
/// purpose; the wrapped residue is exactly what the borrow sweep expects.
pub(crate) fn lanewise_sub_assign(dst: &mut [u32], src: &[u32]) {
    debug_assert!(dst.len() >= src.len());
    let n = src.len();
    let vectored = n / LANES * LANES;
    let mut i = 0;
    while i < vectored {
        let a = u32x4::from_slice(&dst[i..i + LANES]);
        let b = u32x4::from_slice(&src[i..i + LANES]);
        (a - b).copy_to_slice(&mut dst[i..i + LANES]);
        i += LANES;
    }
    while i < n {
        dst[i] = dst[i].wrapping_sub(src[i]);
        i += 1;
    }
}

/// `limbs[i] *= factor` lane-wise for a factor of at most four: ×2 and ×4 go
/// through lane shifts, ×3 through a lane multiply. Results stay below
/// `4·BASE` and are resolved by the wide carry sweep.
pub(crate) fn lanewise_scale_small(limbs: &mut [u32], factor: u32) {
    debug_assert!((2..=4).contains(&factor));
    let n = limbs.len();
    let vectored = n / LANES * LANES;
    let mut i = 0;
    while i < vectored {
        let a = u32x4::from_slice(&limbs[i..i + LANES]);
        let scaled = match factor {
            2 => a << u32x4::splat(1),
            4 => a << u32x4::splat(2),
            _ => a * u32x4::splat(3),
        };
        scaled.copy_to_slice(&mut limbs[i..i + LANES]);
        i += LANES;
    }
    while i < n {
        limbs[i] *= factor;
        i += 1;
    }
}
