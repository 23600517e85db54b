//! Division.
//!
//! `divmod` walks a dispatch ladder from trivial cases through single-,
//! double-, and quad-limb divisors, a power-of-ten fast path, schoolbook
//! long division with a three-limb quotient estimate, and finally
//! Burnikel–Ziegler block division. The multi-limb routines require a
//! divisor whose top limb is large enough for the quotient estimate to be
//! off by at most two; both public paths establish that by scaling the
//! operands with a decimal shift and discard the scale from the remainder
//! afterwards.

use std::cmp::Ordering;
use std::ops::{Div, Rem};

use ethnum::U256;
use log::trace;

use crate::biguint::{
    BASE, BASE_MAX, BigUint, DIGITS_PER_LIMB, HALF_BASE, POW10, cmp_slices, significant_len,
};
use crate::error::{ArithmeticError, Result};

/// Widest divisor, in limbs, still divided by the schoolbook routine before
/// Burnikel–Ziegler blocking takes over. Also the recursion floor of the
/// block division itself.
pub(crate) const BURNIKEL_ZIEGLER_CUTOFF: usize = 32;

impl BigUint {
    /// (⌊x/y⌋, x mod y) in one pass.
    pub fn divmod(&self, rhs: &BigUint) -> Result<(BigUint, BigUint)> {
        if rhs.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        Ok(divmod_unchecked(self, rhs))
    }

    /// ⌊x/y⌋.
    pub fn floor_div(&self, rhs: &BigUint) -> Result<BigUint> {
        self.divmod(rhs).map(|(q, _)| q)
    }

    /// x − y·⌊x/y⌋.
    pub fn floor_mod(&self, rhs: &BigUint) -> Result<BigUint> {
        self.divmod(rhs).map(|(_, r)| r)
    }

    /// ⌈x/y⌉.
    pub fn ceil_div(&self, rhs: &BigUint) -> Result<BigUint> {
        let (mut q, r) = self.divmod(rhs)?;
        if !r.is_zero() {
            q.add_u32_assign(1);
        }
        Ok(q)
    }

    /// Divides in place by a scalar, returning the remainder.
    pub fn floor_div_by_u32_assign(&mut self, d: u32) -> Result<u32> {
        if d == 0 {
            return Err(ArithmeticError::DivisionByZero);
        }
        Ok(self.div_small_assign(d))
    }

    /// ⌊x / 10ⁿ⌋ into a fresh value: whole limbs drop, the residual digits
    /// divide out with a carry walk.
    pub fn div_by_pow10(&self, n: usize) -> BigUint {
        let whole = n / DIGITS_PER_LIMB;
        if whole >= self.limb_count() {
            return BigUint::zero();
        }
        let mut out = BigUint::from_slice(&self.limbs[whole..]);
        let rest = n % DIGITS_PER_LIMB;
        if rest != 0 {
            out.div_small_assign(POW10[rest]);
        }
        out
    }

    /// Remainder walk for a non-zero scalar divisor.
    pub(crate) fn div_small_assign(&mut self, d: u32) -> u32 {
        debug_assert!(d != 0);
        let mut rem = 0u64;
        for w in self.limbs.iter_mut().rev() {
            let cur = rem * BASE as u64 + *w as u64;
            *w = (cur / d as u64) as u32;
            rem = cur % d as u64;
        }
        self.trim();
        rem as u32
    }
}

/// Dispatch ladder behind the public division surface. The divisor is
/// non-zero; the caller already surfaced that error.
pub(crate) fn divmod_unchecked(x: &BigUint, y: &BigUint) -> (BigUint, BigUint) {
    debug_assert!(!y.is_zero());
    if x.is_zero() {
        return (BigUint::zero(), BigUint::zero());
    }
    match x.cmp(y) {
        Ordering::Less => return (BigUint::zero(), x.clone()),
        Ordering::Equal => return (BigUint::one(), BigUint::zero()),
        Ordering::Greater => {}
    }
    if y.is_one() {
        return (x.clone(), BigUint::zero());
    }
    match y.limb_count() {
        1 => {
            let mut q = x.clone();
            let r = q.div_small_assign(y.limbs()[0]);
            return (q, BigUint::from(r));
        }
        2 => return div_by_u64(x, y),
        3 | 4 => return div_by_u128(x, y),
        _ => {}
    }
    if let Some(n) = pow10_exponent(y) {
        trace!("divmod: power-of-ten divisor 10^{n}");
        return divmod_by_pow10(x, n);
    }
    if x.limb_count() <= 2 * BURNIKEL_ZIEGLER_CUTOFF && y.limb_count() <= BURNIKEL_ZIEGLER_CUTOFF {
        trace!(
            "divmod: schoolbook on {}x{} limbs",
            x.limb_count(),
            y.limb_count()
        );
        div_school(x, y)
    } else {
        trace!(
            "divmod: burnikel-ziegler on {}x{} limbs",
            x.limb_count(),
            y.limb_count()
        );
        div_burnikel_ziegler(x, y)
    }
}

/// 10ⁿ detection: a lone power-of-ten top limb over all-zero lower limbs.
fn pow10_exponent(y: &BigUint) -> Option<usize> {
    let l = y.limb_count();
    if y.limbs()[..l - 1].iter().any(|&w| w != 0) {
        return None;
    }
    let top = y.limbs()[l - 1];
    POW10[..DIGITS_PER_LIMB]
        .iter()
        .position(|&p| p == top)
        .map(|k| (l - 1) * DIGITS_PER_LIMB + k)
}

/// Power-of-ten divisor: the quotient drops digits, the remainder keeps
/// them. Both sides come straight out of the limb vector.
fn divmod_by_pow10(x: &BigUint, n: usize) -> (BigUint, BigUint) {
    let q = x.div_by_pow10(n);
    let whole = n / DIGITS_PER_LIMB;
    let rest = n % DIGITS_PER_LIMB;
    let l = x.limb_count();
    let mut r_limbs = x.limbs()[..whole.min(l)].to_vec();
    if rest != 0 && whole < l {
        r_limbs.push(x.limbs()[whole] % POW10[rest]);
    }
    (q, BigUint::from_limbs(r_limbs))
}

/// Divisor of exactly two limbs: remainder walk with u128 widening.
fn div_by_u64(x: &BigUint, y: &BigUint) -> (BigUint, BigUint) {
    debug_assert_eq!(y.limb_count(), 2);
    let d = y.small_u64() as u128;
    let l = x.limb_count();
    let mut q = vec![0u32; l];
    let mut rem: u128 = 0;
    for i in (0..l).rev() {
        let cur = rem * BASE as u128 + x.limbs()[i] as u128;
        q[i] = (cur / d) as u32;
        rem = cur % d;
    }
    (BigUint::from_limbs(q), BigUint::from(rem as u64))
}

/// Divisor of three or four limbs: remainder walk widened through `U256`.
fn div_by_u128(x: &BigUint, y: &BigUint) -> (BigUint, BigUint) {
    debug_assert!(matches!(y.limb_count(), 3 | 4));
    let mut d: u128 = 0;
    for &w in y.limbs().iter().rev() {
        d = d * BASE as u128 + w as u128;
    }
    let d256 = U256::from(d);
    let base = U256::from(BASE as u128);
    let l = x.limb_count();
    let mut q = vec![0u32; l];
    let mut rem: u128 = 0;
    for i in (0..l).rev() {
        let cur = U256::from(rem) * base + U256::from(x.limbs()[i] as u128);
        q[i] = (cur / d256).as_u32();
        rem = (cur % d256).as_u128();
    }
    (BigUint::from_limbs(q), BigUint::from(rem))
}

/// Decimal shift that lifts a top limb into `[BASE/10, BASE)`.
pub(crate) fn normalization_digit_shift(top: u32) -> usize {
    debug_assert!(top >= 1 && top < BASE);
    DIGITS_PER_LIMB - 1 - top.ilog10() as usize
}

/// Schoolbook division: scale both operands so the divisor's top limb is
/// large, run the quotient-estimate walk, then de-scale the remainder.
pub(crate) fn div_school(x: &BigUint, y: &BigUint) -> (BigUint, BigUint) {
    let shift = normalization_digit_shift(y.top_limb());
    if shift == 0 {
        return div_school_normalized(x.limbs(), y.limbs());
    }
    let xs = x.mul_by_pow10(shift);
    let ys = y.mul_by_pow10(shift);
    let (q, r_scaled) = div_school_normalized(xs.limbs(), ys.limbs());
    (q, r_scaled.div_by_pow10(shift))
}

/// Core schoolbook walk.
///
/// The divisor has at least two limbs and a top limb at or above `BASE/10`;
/// under that precondition the three-limb-over-two-limb quotient estimate
/// needs at most two downward corrections.
pub(crate) fn div_school_normalized(x: &[u32], y: &[u32]) -> (BigUint, BigUint) {
    let y = &y[..significant_len(y)];
    let ly = y.len();
    debug_assert!(ly >= 2);
    debug_assert!(y[ly - 1] >= BASE / 10);

    let mut rem = BigUint::from_slice(x);
    if cmp_slices(rem.limbs(), y) == Ordering::Less {
        return (BigUint::zero(), rem);
    }
    let k = rem.limb_count() - ly;
    let d = y[ly - 1] as u64 * BASE as u64 + y[ly - 2] as u64;
    let mut q = vec![0u32; k + 1];

    for i in (0..=k).rev() {
        let r2 = rem.limb_at(i + ly) as u128;
        let r1 = rem.limb_at(i + ly - 1) as u128;
        let r0 = rem.limb_at(i + ly - 2) as u128;
        let r = (r2 * BASE as u128 + r1) * BASE as u128 + r0;
        let mut qd = ((r / d as u128) as u64).min(BASE_MAX as u64) as u32;
        if qd == 0 {
            continue;
        }

        let mut trial = BigUint::from_slice(y);
        trial.mul_by_u32_assign(qd);
        trial.mul_by_base_pow_assign(i);

        let mut step = BigUint::zero();
        let mut corrections = 0;
        while trial > rem {
            if corrections == 0 {
                step = BigUint::from_slice(y);
                step.mul_by_base_pow_assign(i);
            }
            qd -= 1;
            trial.sub_assign_nocheck(&step);
            corrections += 1;
        }
        debug_assert!(corrections <= 2);

        rem.sub_assign_nocheck(&trial);
        q[i] = qd;
    }
    (BigUint::from_limbs(q), rem)
}

/// Burnikel–Ziegler block division for large divisors.
///
/// The divisor is scaled to exactly `n` limbs (the smallest power-of-two
/// multiple of the cutoff covering it) with a top limb at or above `BASE/2`;
/// the dividend then walks in `n`-limb blocks, each step dividing the
/// running remainder joined with the next block.
pub(crate) fn div_burnikel_ziegler(x: &BigUint, y: &BigUint) -> (BigUint, BigUint) {
    let lb = y.limb_count();
    let mut n = BURNIKEL_ZIEGLER_CUTOFF;
    while n < lb {
        n *= 2;
    }

    let digit_shift = normalization_digit_shift(y.top_limb());
    let pad = n - lb;
    let mut ys = y.mul_by_pow10(digit_shift);
    let mut xs = x.mul_by_pow10(digit_shift);
    ys.mul_by_base_pow_assign(pad);
    xs.mul_by_base_pow_assign(pad);

    let mut gap = 1u32;
    let top = ys.top_limb();
    if top < HALF_BASE {
        // top+1 in the denominator keeps top·gap + (gap−1) below BASE, so
        // the boost can never spill the divisor into an extra limb
        gap = BASE_MAX / (top + 1);
        if (top as u64) * (gap as u64) < HALF_BASE as u64 {
            gap += 1;
        }
        debug_assert!((top as u64) * (gap as u64) <= BASE as u64 - gap as u64);
        ys.mul_by_u32_assign(gap);
        xs.mul_by_u32_assign(gap);
    }
    debug_assert_eq!(ys.limb_count(), n);
    debug_assert!(ys.top_limb() >= HALF_BASE);

    // walk the dividend in n-limb blocks, most significant first
    let la = xs.limb_count();
    let t = la.div_ceil(n);
    let top_block = BigUint::from_slice(&xs.limbs()[(t - 1) * n..]);
    let (mut z, blocks) = if top_block < ys {
        // the top block seeds the running remainder
        (top_block, t - 1)
    } else {
        // the top block must itself be divided first
        (BigUint::zero(), t)
    };
    let mut q = BigUint::zero();
    for i in (0..blocks).rev() {
        let hi = ((i + 1) * n).min(la);
        let mut a = xs.limbs()[i * n..hi].to_vec();
        if !z.is_zero() {
            a.resize(n, 0);
            a.extend_from_slice(z.limbs());
        }
        let (qi, z_next) = div_two_by_one(&a, ys.limbs());
        z = z_next;
        q.mul_by_base_pow_assign(n);
        q += &qi;
    }

    // undo the scaling on the remainder; both divisions are exact
    if gap > 1 {
        let boost_rem = z.div_small_assign(gap);
        debug_assert_eq!(boost_rem, 0);
    }
    let r = z.div_by_pow10(digit_shift + pad * DIGITS_PER_LIMB);
    (q, r)
}

/// Divides a value below `b·BASEⁿ` (at most 2n limbs) by an n-limb divisor
/// with a top limb at or above `BASE/2`.
pub(crate) fn div_two_by_one(a: &[u32], b: &[u32]) -> (BigUint, BigUint) {
    let n = b.len();
    debug_assert!(b[n - 1] >= HALF_BASE);
    if n % 2 == 1 || n <= BURNIKEL_ZIEGLER_CUTOFF {
        return div_school_normalized(a, b);
    }
    let h = n / 2;

    // top three quarters first, then their remainder over the low quarter
    let (q1, r) = div_three_by_two(&a[h.min(a.len())..], b, h);
    let mut lower = r;
    lower.mul_by_base_pow_assign(h);
    lower.add_assign_slice(&a[..h.min(a.len())]);
    let (q0, s) = div_three_by_two(lower.limbs(), b, h);

    let mut q = q1;
    q.mul_by_base_pow_assign(h);
    q += &q0;
    (q, s)
}

/// Divides a value below `b·BASE^h` (at most 3h limbs) by a 2h-limb divisor
/// whose top limb is at or above `BASE/2`.
///
/// The quotient block comes from dividing the top 2h limbs by the divisor's
/// top half, then gets corrected downward at most twice against the full
/// divisor.
fn div_three_by_two(a: &[u32], b: &[u32], h: usize) -> (BigUint, BigUint) {
    debug_assert_eq!(b.len(), 2 * h);
    let (b0, b1) = b.split_at(h);
    let a12 = &a[h.min(a.len())..];
    let a0 = &a[..h.min(a.len())];
    let a2: &[u32] = if a.len() > 2 * h { &a[2 * h..] } else { &[] };

    let (mut q, c) = if cmp_slices(a2, b1) == Ordering::Less {
        div_two_by_one(a12, b1)
    } else {
        // saturated quotient block: q = BASE^h − 1, c = a12 − q·b1
        let q = BigUint::from_limbs(vec![BASE_MAX; h]);
        let mut c = BigUint::from_slice(a12);
        let mut shifted = BigUint::from_slice(b1);
        shifted.mul_by_base_pow_assign(h);
        c.sub_assign_nocheck(&shifted);
        c.add_assign_slice(b1);
        (q, c)
    };

    let d = &q * &BigUint::from_slice(b0);
    let mut r = c;
    r.mul_by_base_pow_assign(h);
    r.add_assign_slice(a0);

    let mut corrections = 0;
    while r < d {
        q.sub_assign_slice_nocheck(&[1]);
        r.add_assign_slice(b);
        corrections += 1;
    }
    debug_assert!(corrections <= 2);
    r.sub_assign_nocheck(&d);
    (q, r)
}

// ============================================================================
// Operator impls
// ============================================================================

impl Div<&BigUint> for &BigUint {
    type Output = BigUint;

    /// Panics on a zero divisor; use [`BigUint::floor_div`] to handle it as
    /// a value.
    fn div(self, rhs: &BigUint) -> BigUint {
        match self.floor_div(rhs) {
            Ok(q) => q,
            Err(e) => panic!("{e}"),
        }
    }
}

impl Div for BigUint {
    type Output = BigUint;

    fn div(self, rhs: BigUint) -> BigUint {
        &self / &rhs
    }
}

impl Rem<&BigUint> for &BigUint {
    type Output = BigUint;

    /// Panics on a zero divisor; use [`BigUint::floor_mod`] to handle it as
    /// a value.
    fn rem(self, rhs: &BigUint) -> BigUint {
        match self.floor_mod(rhs) {
            Ok(r) => r,
            Err(e) => panic!("{e}"),
        }
    }
}

impl Rem for BigUint {
    type Output = BigUint;

    fn rem(self, rhs: BigUint) -> BigUint {
        &self % &rhs
    }
}
