//! Integer square root.
//!
//! One- and two-limb values resolve through the hardware-width `isqrt`;
//! everything larger runs a Newton iteration seeded from the top one or two
//! limbs, so the iteration starts within a couple of steps of the root
//! instead of converging down from the value itself.

use crate::biguint::{BASE, BASE_MAX, BigUint};
use crate::div::divmod_unchecked;

impl BigUint {
    /// Largest y with y² ≤ x.
    pub fn isqrt(&self) -> BigUint {
        match self.limb_count() {
            1 => BigUint::from(self.limbs()[0].isqrt()),
            2 => BigUint::from(self.small_u64().isqrt()),
            _ => self.isqrt_newton(),
        }
    }

    fn isqrt_newton(&self) -> BigUint {
        let seed = self.sqrt_seed();
        // one step lifts any positive guess to at least the true root;
        // from there the sequence decreases strictly until it lands on it
        let mut x = newton_step(self, &seed);
        let mut iters = 0usize;
        loop {
            let next = newton_step(self, &x);
            if next >= x {
                return x;
            }
            x = next;
            iters += 1;
            // quadratic convergence from a two-limb seed
            debug_assert!(iters <= 9 * self.limb_count());
        }
    }

    /// Guess at or below the true root: the top one or two limbs give the
    /// leading digits through a hardware `isqrt`, a clamped second limb
    /// refines them, and half the remaining width arrives as trailing zero
    /// limbs.
    fn sqrt_seed(&self) -> BigUint {
        let l = self.limb_count();
        let n_trail = (l - 1) / 2;
        let t = l - 2 * n_trail;
        let v_top = if t == 1 {
            self.limbs()[l - 1] as u64
        } else {
            self.limbs()[l - 1] as u64 * BASE as u64 + self.limbs()[l - 2] as u64
        };
        let msq = v_top.isqrt();
        let mut limbs = vec![0u32; n_trail + 1];
        limbs[n_trail] = msq as u32;
        if n_trail > 0 {
            let resid = v_top - msq * msq;
            let next = self.limbs()[l - 1 - t] as u128;
            let second = (resid as u128 * BASE as u128 + next) / (2 * msq as u128);
            limbs[n_trail - 1] = second.min(BASE_MAX as u128) as u32;
        }
        BigUint::from_limbs(limbs)
    }
}

/// (x + n/x) / 2 with the in-place halver.
fn newton_step(n: &BigUint, x: &BigUint) -> BigUint {
    let (mut q, _) = divmod_unchecked(n, x);
    q += x;
    q.shr_assign_1();
    q
}
