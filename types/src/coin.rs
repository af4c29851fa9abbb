//! Coin amount type used throughout the harness.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};

/// An amount of the ledger's base currency, in its smallest unit.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Coin(u64);

impl Coin {
    pub const ZERO: Self = Self(0);

    pub fn new(amount: u64) -> Self {
        Self(amount)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// Subtract, clamping at zero.
    pub fn saturating_sub(&self, other: Coin) -> Coin {
        Coin(self.0.saturating_sub(other.0))
    }

    /// Multiply by a count (e.g. a per-item deposit across a batch).
    pub fn scale(&self, count: u64) -> Coin {
        Coin(self.0.saturating_mul(count))
    }
}

impl Add for Coin {
    type Output = Coin;

    fn add(self, rhs: Coin) -> Coin {
        Coin(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Coin {
    fn add_assign(&mut self, rhs: Coin) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sub for Coin {
    type Output = Coin;

    fn sub(self, rhs: Coin) -> Coin {
        Coin(self.0.saturating_sub(rhs.0))
    }
}

impl Sum for Coin {
    fn sum<I: Iterator<Item = Coin>>(iter: I) -> Coin {
        iter.fold(Coin::ZERO, |acc, c| acc + c)
    }
}

impl From<u64> for Coin {
    fn from(amount: u64) -> Self {
        Self(amount)
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
