#![feature(portable_simd)]

//! Arbitrary-precision unsigned integers in base 10⁹.
//!
//! Each limb is a 32-bit word holding one base-1_000_000_000 digit, so
//! decimal rendering unpacks limbs directly while arithmetic carries and
//! borrows modulo 10⁹. Bulk addition and subtraction run lane-wise over
//! `u32x4` vectors and defer carry resolution to a single scalar sweep;
//! multiplication switches from schoolbook to Karatsuba and division from
//! schoolbook to Burnikel–Ziegler above per-algorithm limb cutoffs, with
//! both recursive algorithms working on limb slices of their operands
//! rather than copied sub-numbers.

mod add;
mod biguint;
mod convert;
mod div;
mod error;
mod mul;
mod root;
mod simd;

#[cfg(test)]
mod tests;

pub use biguint::{BASE, BASE_MAX, BigUint, HALF_BASE};
pub use error::{ArithmeticError, Result};
