//! Limb storage and normalization.
//!
//! A `BigUint` owns a little-endian vector of base-10⁹ limbs. Arithmetic
//! routines may leave limbs transiently outside `[0, BASE)`, either as sums
//! up to `4·BASE` after lane-wise scaling or as wrapped two's-complement
//! residues after lane-wise subtraction, as long as one of the
//! normalization sweeps below restores the invariant before the value
//! escapes the producing routine.

use std::cmp::Ordering;

/// Radix of the limb representation.
pub const BASE: u32 = 1_000_000_000;

/// Largest valid limb value.
pub const BASE_MAX: u32 = BASE - 1;

/// Divisor-normalization threshold: the multi-limb division routines want a
/// divisor whose top limb is at or above this.
pub const HALF_BASE: u32 = BASE / 2;

/// Decimal digits packed into one limb.
pub(crate) const DIGITS_PER_LIMB: usize = 9;

/// Powers of ten up to one limb's worth of digits.
pub(crate) const POW10: [u32; 10] = [
    1,
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
    1_000_000_000,
];

/// Arbitrary-precision unsigned integer stored as base-10⁹ limbs, least
/// significant first.
///
/// Normal form: at least one limb, every limb below [`BASE`], and no high
/// zero limb except for the single-limb zero. Every public operation
/// returns values in normal form and may assume its inputs are.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BigUint {
    pub(crate) limbs: Vec<u32>,
}

impl BigUint {
    pub fn zero() -> Self {
        Self { limbs: vec![0] }
    }

    pub fn one() -> Self {
        Self { limbs: vec![1] }
    }

    pub fn is_zero(&self) -> bool {
        self.limbs.len() == 1 && self.limbs[0] == 0
    }

    pub fn is_one(&self) -> bool {
        self.limbs.len() == 1 && self.limbs[0] == 1
    }

    /// Number of base-10⁹ limbs.
    pub fn limb_count(&self) -> usize {
        self.limbs.len()
    }

    /// Count of significant decimal digits (one for zero).
    pub fn num_digits(&self) -> usize {
        if self.is_zero() {
            return 1;
        }
        (self.limbs.len() - 1) * DIGITS_PER_LIMB + self.top_limb().ilog10() as usize + 1
    }

    pub(crate) fn limbs(&self) -> &[u32] {
        &self.limbs
    }

    pub(crate) fn top_limb(&self) -> u32 {
        self.limbs[self.limbs.len() - 1]
    }

    /// Limb at `idx`, reading positions past the top as zero.
    pub(crate) fn limb_at(&self, idx: usize) -> u32 {
        self.limbs.get(idx).copied().unwrap_or(0)
    }

    /// Value of a one-or-two-limb number as a `u64`.
    pub(crate) fn small_u64(&self) -> u64 {
        debug_assert!(self.limbs.len() <= 2);
        self.limb_at(1) as u64 * BASE as u64 + self.limbs[0] as u64
    }

    /// Wraps a raw limb vector, trimming high zeros into normal form.
    pub(crate) fn from_limbs(mut limbs: Vec<u32>) -> Self {
        trim_limbs(&mut limbs);
        let n = Self { limbs };
        n.debug_assert_normal();
        n
    }

    /// Copies a limb slice; high zeros are allowed and an empty slice is
    /// zero.
    pub(crate) fn from_slice(limbs: &[u32]) -> Self {
        Self::from_limbs(limbs.to_vec())
    }

    pub(crate) fn trim(&mut self) {
        trim_limbs(&mut self.limbs);
    }

    pub(crate) fn debug_assert_normal(&self) {
        debug_assert!(!self.limbs.is_empty());
        debug_assert!(self.limbs.iter().all(|&w| w < BASE));
        debug_assert!(self.limbs.len() == 1 || self.limbs[self.limbs.len() - 1] != 0);
    }

    /// Halves the value in place (floor).
    pub fn shr_assign_1(&mut self) {
        let mut carry = 0u32;
        for w in self.limbs.iter_mut().rev() {
            // carry·BASE + w peaks below 2·BASE, well inside u32
            let cur = carry * BASE + *w;
            *w = cur >> 1;
            carry = cur & 1;
        }
        self.trim();
    }

    /// Value as a `u64` when it fits.
    pub fn to_u64(&self) -> Option<u64> {
        let mut acc: u64 = 0;
        for &w in self.limbs.iter().rev() {
            acc = acc.checked_mul(BASE as u64)?.checked_add(w as u64)?;
        }
        Some(acc)
    }

    /// Value as a `u128` when it fits.
    pub fn to_u128(&self) -> Option<u128> {
        let mut acc: u128 = 0;
        for &w in self.limbs.iter().rev() {
            acc = acc.checked_mul(BASE as u128)?.checked_add(w as u128)?;
        }
        Some(acc)
    }
}

impl Default for BigUint {
    fn default() -> Self {
        Self::zero()
    }
}

impl Ord for BigUint {
    /// Total order on magnitudes: limb count first, then limbs from most to
    /// least significant.
    fn cmp(&self, other: &Self) -> Ordering {
        match self.limbs.len().cmp(&other.limbs.len()) {
            Ordering::Equal => self.limbs.iter().rev().cmp(other.limbs.iter().rev()),
            other => other,
        }
    }
}

impl PartialOrd for BigUint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================================
// Scalar conversions
// ============================================================================

impl From<u8> for BigUint {
    fn from(v: u8) -> Self {
        Self { limbs: vec![v as u32] }
    }
}

impl From<u16> for BigUint {
    fn from(v: u16) -> Self {
        Self { limbs: vec![v as u32] }
    }
}

impl From<u32> for BigUint {
    fn from(v: u32) -> Self {
        if v < BASE {
            Self { limbs: vec![v] }
        } else {
            Self { limbs: vec![v % BASE, v / BASE] }
        }
    }
}

impl From<u64> for BigUint {
    fn from(mut v: u64) -> Self {
        if v == 0 {
            return Self::zero();
        }
        let mut limbs = Vec::with_capacity(3);
        while v > 0 {
            limbs.push((v % BASE as u64) as u32);
            v /= BASE as u64;
        }
        Self { limbs }
    }
}

impl From<u128> for BigUint {
    fn from(mut v: u128) -> Self {
        if v == 0 {
            return Self::zero();
        }
        let mut limbs = Vec::with_capacity(5);
        while v > 0 {
            limbs.push((v % BASE as u128) as u32);
            v /= BASE as u128;
        }
        Self { limbs }
    }
}

impl From<usize> for BigUint {
    fn from(v: usize) -> Self {
        Self::from(v as u128)
    }
}

// ============================================================================
// Limb-vector helpers shared by the arithmetic modules
// ============================================================================

/// Shrinks a limb vector until the top limb is non-zero or one limb is left.
pub(crate) fn trim_limbs(limbs: &mut Vec<u32>) {
    while limbs.len() > 1 && limbs[limbs.len() - 1] == 0 {
        limbs.pop();
    }
    if limbs.is_empty() {
        limbs.push(0);
    }
}

/// Length of a limb slice with high zeros stripped.
pub(crate) fn significant_len(limbs: &[u32]) -> usize {
    limbs.iter().rposition(|&w| w != 0).map_or(0, |i| i + 1)
}

/// Compares two limb slices by value; high zeros and empty slices are fine.
pub(crate) fn cmp_slices(a: &[u32], b: &[u32]) -> Ordering {
    let la = significant_len(a);
    let lb = significant_len(b);
    match la.cmp(&lb) {
        Ordering::Equal => a[..la].iter().rev().cmp(b[..lb].iter().rev()),
        other => other,
    }
}

/// Carry sweep for limbs in `[0, 2·BASE)`.
///
/// Walks least to most significant with a 0/1 carry, appending one new limb
/// when the top position overflows.
pub(crate) fn carry_normalize(limbs: &mut Vec<u32>) {
    let mut carry = 0u32;
    for w in limbs.iter_mut() {
        let t = *w + carry;
        if t < BASE {
            *w = t;
            carry = 0;
        } else {
            *w = t - BASE;
            carry = 1;
        }
    }
    if carry != 0 {
        limbs.push(carry);
    }
}

/// Carry sweep for limbs in `[0, 4·BASE)`, as left behind by lane-wise
/// scaling with a factor of at most four. One branch per possible carry.
pub(crate) fn carry_normalize_wide(limbs: &mut Vec<u32>) {
    let mut carry = 0u32;
    for w in limbs.iter_mut() {
        let t = *w + carry;
        if t < BASE {
            *w = t;
            carry = 0;
        } else if t < 2 * BASE {
            *w = t - BASE;
            carry = 1;
        } else if t < 3 * BASE {
            *w = t - 2 * BASE;
            carry = 2;
        } else {
            *w = t - 3 * BASE;
            carry = 3;
        }
    }
    if carry != 0 {
        limbs.push(carry);
    }
}

/// Borrow sweep after lane-wise subtraction.
///
/// A lane either holds a valid difference below `BASE` or a wrapped
/// two's-complement residue above it (every wrapped value lands above
/// `u32::MAX − BASE`, so `>= BASE` identifies them). The caller guarantees
/// the minuend was not smaller, i.e. no borrow survives the top limb.
pub(crate) fn borrow_normalize(limbs: &mut [u32]) {
    let mut borrow = 0u32;
    for w in limbs.iter_mut() {
        if borrow == 0 {
            if *w >= BASE {
                *w = w.wrapping_add(BASE);
                borrow = 1;
            }
        } else if *w >= 1 && *w < BASE {
            *w -= 1;
            borrow = 0;
        } else {
            // zero or wrapped: absorb BASE − 1 and keep borrowing
            *w = w.wrapping_add(BASE - 1);
        }
    }
    debug_assert_eq!(borrow, 0);
}
