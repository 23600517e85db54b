//! Multiplication.
//!
//! `mul` dispatches by operand size: trivial operands short-circuit, tiny
//! factors scale lane-wise, general one-limb factors scale with a widening
//! walk, and multi-limb operands run schoolbook up to [`KARATSUBA_CUTOFF`]
//! limbs and Karatsuba above it. Both multi-limb routines recurse over limb
//! slices of the original operands instead of copied sub-numbers.

use std::ops::{Mul, MulAssign};

use log::trace;

use crate::biguint::{
    BASE, BigUint, DIGITS_PER_LIMB, POW10, carry_normalize_wide, significant_len,
};
use crate::error::{ArithmeticError, Result};
use crate::simd::lanewise_scale_small;

/// Widest operand, in limbs, still multiplied by the schoolbook routine
/// before Karatsuba splitting takes over.
pub(crate) const KARATSUBA_CUTOFF: usize = 64;

impl BigUint {
    fn mul_ref(&self, rhs: &BigUint) -> BigUint {
        if self.is_zero() || rhs.is_zero() {
            return BigUint::zero();
        }
        if self.is_one() {
            return rhs.clone();
        }
        if rhs.is_one() {
            return self.clone();
        }

        let (lx, ly) = (self.limb_count(), rhs.limb_count());
        if ly == 1 {
            let mut out = self.clone();
            out.mul_by_limb(rhs.limbs[0]);
            return out;
        }
        if lx == 1 {
            let mut out = rhs.clone();
            out.mul_by_limb(self.limbs[0]);
            return out;
        }
        if lx.max(ly) <= KARATSUBA_CUTOFF {
            trace!("mul: schoolbook on {lx}x{ly} limbs");
            mul_school(&self.limbs, &rhs.limbs)
        } else {
            trace!("mul: karatsuba on {lx}x{ly} limbs");
            mul_karatsuba(&self.limbs, &rhs.limbs, KARATSUBA_CUTOFF)
        }
    }

    /// Scales by a single valid limb, routing tiny factors to the lane path.
    fn mul_by_limb(&mut self, factor: u32) {
        debug_assert!(factor < BASE);
        if factor <= 4 {
            self.mul_by_tiny_assign(factor);
        } else {
            self.mul_by_u32_assign(factor);
        }
    }

    /// Scales in place by a factor of at most four using lane shifts or a
    /// lane multiply, then resolves carries in one wide sweep.
    fn mul_by_tiny_assign(&mut self, factor: u32) {
        match factor {
            0 => *self = BigUint::zero(),
            1 => {}
            _ => {
                lanewise_scale_small(&mut self.limbs, factor);
                carry_normalize_wide(&mut self.limbs);
            }
        }
    }

    /// Scales in place by an arbitrary scalar with a widening walk.
    pub fn mul_by_u32_assign(&mut self, factor: u32) {
        if factor == 0 {
            *self = BigUint::zero();
            return;
        }
        if factor == 1 || self.is_zero() {
            return;
        }
        if factor >= BASE {
            // a u32 factor can span two limbs
            let wide = BigUint::from(factor);
            let prod = self.mul_ref(&wide);
            *self = prod;
            return;
        }
        let mut carry = 0u64;
        for w in self.limbs.iter_mut() {
            let p = *w as u64 * factor as u64 + carry;
            *w = (p % BASE as u64) as u32;
            carry = p / BASE as u64;
        }
        if carry > 0 {
            self.limbs.push(carry as u32);
        }
    }

    /// Multiplies by `BASE^n` in place: grow, move the existing limbs up,
    /// and zero-fill the vacated low positions.
    pub fn mul_by_base_pow_assign(&mut self, n: usize) {
        if n == 0 || self.is_zero() {
            return;
        }
        let old = self.limbs.len();
        self.limbs.resize(old + n, 0);
        self.limbs.copy_within(0..old, n);
        self.limbs[..n].fill(0);
    }

    /// x · 10ⁿ into a fresh value: whole limbs shift, the residual digits
    /// scale.
    pub fn mul_by_pow10(&self, n: usize) -> BigUint {
        let mut out = self.clone();
        if out.is_zero() || n == 0 {
            return out;
        }
        out.mul_by_base_pow_assign(n / DIGITS_PER_LIMB);
        let rest = n % DIGITS_PER_LIMB;
        if rest != 0 {
            out.mul_by_u32_assign(POW10[rest]);
        }
        out
    }

    /// xⁿ by binary exponentiation; exponents at or above [`BASE`] are
    /// rejected.
    pub fn pow(&self, exp: u32) -> Result<BigUint> {
        if exp >= BASE {
            return Err(ArithmeticError::ExponentOutOfRange(exp));
        }
        if exp == 0 {
            return Ok(BigUint::one());
        }
        if exp == 1 || self.is_zero() || self.is_one() {
            return Ok(self.clone());
        }
        let mut acc = BigUint::one();
        let mut base = self.clone();
        let mut e = exp;
        while e > 1 {
            if e & 1 == 1 {
                acc = acc.mul_ref(&base);
            }
            base = base.mul_ref(&base);
            e >>= 1;
        }
        Ok(acc.mul_ref(&base))
    }
}

/// Schoolbook product of two limb slices.
///
/// Rows with a zero limb are skipped; every column product widens to u64 and
/// writes back a valid limb, so no normalization sweep is needed afterwards.
pub(crate) fn mul_school(x: &[u32], y: &[u32]) -> BigUint {
    let x = &x[..significant_len(x)];
    let y = &y[..significant_len(y)];
    if x.is_empty() || y.is_empty() {
        return BigUint::zero();
    }
    let mut r = vec![0u32; x.len() + y.len()];
    for (i, &xi) in x.iter().enumerate() {
        if xi == 0 {
            continue;
        }
        let mut carry = 0u64;
        for (j, &yj) in y.iter().enumerate() {
            let p = xi as u64 * yj as u64 + carry + r[i + j] as u64;
            r[i + j] = (p % BASE as u64) as u32;
            carry = p / BASE as u64;
        }
        // the slot above this row is still untouched and the carry is below
        // BASE, so this cannot overflow the limb
        r[i + y.len()] += carry as u32;
    }
    BigUint::from_limbs(r)
}

/// Karatsuba product of two limb slices, splitting at half the wider
/// operand and falling back to the schoolbook routine at `cutoff` limbs.
pub(crate) fn mul_karatsuba(x: &[u32], y: &[u32], cutoff: usize) -> BigUint {
    let x = &x[..significant_len(x)];
    let y = &y[..significant_len(y)];
    if x.is_empty() || y.is_empty() {
        return BigUint::zero();
    }
    let (lx, ly) = (x.len(), y.len());
    if lx.max(ly) <= cutoff {
        return mul_school(x, y);
    }

    let m = lx.max(ly) / 2;
    if lx.min(ly) <= m {
        // lopsided operands: split only the wider one
        let (long, short) = if lx >= ly { (x, y) } else { (y, x) };
        let z0 = mul_karatsuba(&long[..m], short, cutoff);
        let mut z1 = mul_karatsuba(&long[m..], short, cutoff);
        z1.mul_by_base_pow_assign(m);
        z1 += &z0;
        return z1;
    }

    let (x0, x1) = x.split_at(m);
    let (y0, y1) = y.split_at(m);
    let z0 = mul_karatsuba(x0, y0, cutoff);
    let z2 = mul_karatsuba(x1, y1, cutoff);
    let xs = BigUint::add_slices(x0, x1);
    let ys = BigUint::add_slices(y0, y1);
    let mut z1 = mul_karatsuba(xs.limbs(), ys.limbs(), cutoff);
    // (x0+x1)·(y0+y1) dominates z2 + z0, so the unchecked subtractions hold
    z1.sub_assign_nocheck(&z2);
    z1.sub_assign_nocheck(&z0);

    let mut out = z2;
    out.mul_by_base_pow_assign(m);
    out += &z1;
    out.mul_by_base_pow_assign(m);
    out += &z0;
    out
}

// ============================================================================
// Operator impls
// ============================================================================

impl Mul<&BigUint> for &BigUint {
    type Output = BigUint;

    fn mul(self, rhs: &BigUint) -> BigUint {
        self.mul_ref(rhs)
    }
}

impl Mul for BigUint {
    type Output = BigUint;

    fn mul(self, rhs: BigUint) -> BigUint {
        self.mul_ref(&rhs)
    }
}

impl MulAssign<&BigUint> for BigUint {
    fn mul_assign(&mut self, rhs: &BigUint) {
        let prod = self.mul_ref(rhs);
        *self = prod;
    }
}

impl MulAssign for BigUint {
    fn mul_assign(&mut self, rhs: BigUint) {
        *self *= &rhs;
    }
}
