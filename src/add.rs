//! Addition and subtraction.
//!
//! Both entry points dispatch on operand size: zero and one-or-two-limb
//! operands resolve in scalar registers, everything larger takes the
//! lane-wise path followed by one deferred carry or borrow sweep.

use std::cmp::Ordering;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use crate::biguint::{
    BASE, BigUint, borrow_normalize, carry_normalize, cmp_slices, significant_len,
};
use crate::error::{ArithmeticError, Result};
use crate::simd::{lanewise_add_assign, lanewise_sub_assign};

impl BigUint {
    fn add_ref(&self, rhs: &BigUint) -> BigUint {
        if self.is_zero() {
            return rhs.clone();
        }
        if rhs.is_zero() {
            return self.clone();
        }

        let (lx, ly) = (self.limb_count(), rhs.limb_count());
        if lx == 1 && ly == 1 {
            // the limb sum fits u32 and the constructor re-splits it
            return BigUint::from(self.limbs[0] + rhs.limbs[0]);
        }
        if ly == 1 {
            let mut out = self.clone();
            out.add_u32_assign(rhs.limbs[0]);
            return out;
        }
        if lx == 1 {
            let mut out = rhs.clone();
            out.add_u32_assign(self.limbs[0]);
            return out;
        }
        if lx <= 2 && ly <= 2 {
            return BigUint::from(self.small_u64() + rhs.small_u64());
        }

        let (long, short) = if lx >= ly { (self, rhs) } else { (rhs, self) };
        let mut limbs = long.limbs.clone();
        lanewise_add_assign(&mut limbs[..short.limb_count()], &short.limbs);
        carry_normalize(&mut limbs);
        BigUint::from_limbs(limbs)
    }

    /// Adds a limb-sized scalar in place, cascading the carry only as far as
    /// it reaches.
    pub fn add_u32_assign(&mut self, v: u32) {
        if v == 0 {
            return;
        }
        if v >= BASE {
            // a u32 scalar can span two limbs
            let wide = BigUint::from(v);
            self.add_assign_slice(&wide.limbs);
            return;
        }
        let mut carry = v;
        for w in self.limbs.iter_mut() {
            let t = *w + carry;
            if t < BASE {
                *w = t;
                carry = 0;
                break;
            }
            *w = t - BASE;
            carry = 1;
        }
        if carry != 0 {
            self.limbs.push(carry);
        }
    }

    /// Adds the value of a limb slice in place.
    pub(crate) fn add_assign_slice(&mut self, src: &[u32]) {
        let src = &src[..significant_len(src)];
        if src.is_empty() {
            return;
        }
        if self.limbs.len() < src.len() {
            self.limbs.resize(src.len(), 0);
        }
        lanewise_add_assign(&mut self.limbs[..src.len()], src);
        carry_normalize(&mut self.limbs);
        self.debug_assert_normal();
    }

    /// Sum of two limb slices as a fresh value.
    pub(crate) fn add_slices(a: &[u32], b: &[u32]) -> BigUint {
        let mut out = BigUint::from_slice(a);
        out.add_assign_slice(b);
        out
    }

    /// x − y, failing on underflow.
    pub fn try_sub(&self, rhs: &BigUint) -> Result<BigUint> {
        match self.cmp(rhs) {
            Ordering::Less => Err(ArithmeticError::Underflow),
            Ordering::Equal => Ok(BigUint::zero()),
            Ordering::Greater => {
                if rhs.is_zero() {
                    return Ok(self.clone());
                }
                let mut limbs = self.limbs.clone();
                lanewise_sub_assign(&mut limbs[..rhs.limb_count()], &rhs.limbs);
                borrow_normalize(&mut limbs);
                Ok(BigUint::from_limbs(limbs))
            }
        }
    }

    /// In-place x −= y for callers that established x ≥ y; skips the
    /// comparison and the underflow check.
    pub(crate) fn sub_assign_nocheck(&mut self, rhs: &BigUint) {
        self.sub_assign_slice_nocheck(&rhs.limbs);
    }

    /// Slice form of [`BigUint::sub_assign_nocheck`].
    pub(crate) fn sub_assign_slice_nocheck(&mut self, rhs: &[u32]) {
        let rhs = &rhs[..significant_len(rhs)];
        debug_assert!(cmp_slices(&self.limbs, rhs) != Ordering::Less);
        if rhs.is_empty() {
            return;
        }
        lanewise_sub_assign(&mut self.limbs[..rhs.len()], rhs);
        borrow_normalize(&mut self.limbs);
        self.trim();
    }
}

// ============================================================================
// Operator impls
// ============================================================================

impl Add<&BigUint> for &BigUint {
    type Output = BigUint;

    fn add(self, rhs: &BigUint) -> BigUint {
        self.add_ref(rhs)
    }
}

impl Add for BigUint {
    type Output = BigUint;

    fn add(self, rhs: BigUint) -> BigUint {
        self.add_ref(&rhs)
    }
}

impl AddAssign<&BigUint> for BigUint {
    fn add_assign(&mut self, rhs: &BigUint) {
        self.add_assign_slice(&rhs.limbs);
    }
}

impl AddAssign for BigUint {
    fn add_assign(&mut self, rhs: BigUint) {
        self.add_assign_slice(&rhs.limbs);
    }
}

impl Sub<&BigUint> for &BigUint {
    type Output = BigUint;

    /// Panics when `rhs` exceeds `self`; use [`BigUint::try_sub`] to handle
    /// underflow as a value.
    fn sub(self, rhs: &BigUint) -> BigUint {
        match self.try_sub(rhs) {
            Ok(d) => d,
            Err(e) => panic!("{e}"),
        }
    }
}

impl Sub for BigUint {
    type Output = BigUint;

    fn sub(self, rhs: BigUint) -> BigUint {
        &self - &rhs
    }
}

impl SubAssign<&BigUint> for BigUint {
    fn sub_assign(&mut self, rhs: &BigUint) {
        let diff = &*self - rhs;
        *self = diff;
    }
}

impl SubAssign for BigUint {
    fn sub_assign(&mut self, rhs: BigUint) {
        *self -= &rhs;
    }
}
