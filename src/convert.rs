//! Decimal construction and rendering.
//!
//! The limb base is a power of ten, so both directions are digit packing:
//! nine decimal digits per limb, no division anywhere.

use std::fmt;
use std::str::FromStr;

use crate::biguint::{BigUint, DIGITS_PER_LIMB};
use crate::error::{ArithmeticError, Result};

impl BigUint {
    /// Packs a most-significant-first stream of decimal digits (each 0–9)
    /// into limbs, nine digits at a time from the least significant end.
    pub fn from_decimal_digits(digits: &[u8]) -> Result<Self> {
        if digits.is_empty() {
            return Err(ArithmeticError::EmptyDigits);
        }
        if let Some(pos) = digits.iter().position(|&d| d > 9) {
            return Err(ArithmeticError::InvalidDigit(pos));
        }
        let mut limbs = Vec::with_capacity(digits.len().div_ceil(DIGITS_PER_LIMB));
        for block in digits.rchunks(DIGITS_PER_LIMB) {
            let mut limb = 0u32;
            for &d in block {
                limb = limb * 10 + d as u32;
            }
            limbs.push(limb);
        }
        Ok(Self::from_limbs(limbs))
    }

    /// Renders with `sep` between every group of three digits, counted from
    /// the right.
    pub fn to_string_grouped(&self, sep: char) -> String {
        let plain = self.to_string();
        let mut out = String::with_capacity(plain.len() + plain.len() / 3);
        for (i, ch) in plain.char_indices() {
            if i != 0 && (plain.len() - i) % 3 == 0 {
                out.push(sep);
            }
            out.push(ch);
        }
        out
    }
}

impl fmt::Display for BigUint {
    /// Top limb unpadded, every lower limb left-padded to nine digits.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.top_limb())?;
        for &w in self.limbs().iter().rev().skip(1) {
            write!(f, "{w:09}")?;
        }
        Ok(())
    }
}

impl FromStr for BigUint {
    type Err = ArithmeticError;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = s.as_bytes();
        if bytes.is_empty() {
            return Err(ArithmeticError::EmptyDigits);
        }
        if let Some(pos) = bytes.iter().position(|b| !b.is_ascii_digit()) {
            return Err(ArithmeticError::InvalidDigit(pos));
        }
        let digits: Vec<u8> = bytes.iter().map(|b| b - b'0').collect();
        Self::from_decimal_digits(&digits)
    }
}
