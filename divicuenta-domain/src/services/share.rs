//! Exact share arithmetic and ceiling rounding.
//!
//! A shared item contributes `price / count` to each diner. Those quotients are
//! kept as reduced fractions so that a diner's subtotal is rounded exactly once,
//! after every contribution has been summed.

use std::{
    iter::Sum,
    ops::{Add, AddAssign},
};

use rust_decimal::{Decimal, prelude::ToPrimitive};

use crate::model::Money;

/// Non-rounded monetary amount expressed as `numer / denom`.
///
/// # Invariant
/// `denom > 0` and `gcd(numer, denom) == 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Share {
    numer: i128,
    denom: i128,
}

impl Share {
    pub const fn zero() -> Self {
        Self { numer: 0, denom: 1 }
    }

    pub fn whole(amount: Money) -> Self {
        Self {
            numer: i128::from(amount.amount()),
            denom: 1,
        }
    }

    /// `price` divided evenly between `parts` people. `parts == 0` is treated as
    /// a single part.
    pub fn of(price: Money, parts: usize) -> Self {
        let parts = i128::try_from(parts.max(1)).unwrap_or(i128::MAX);
        Self::reduced(i128::from(price.amount()), parts)
    }

    fn reduced(numer: i128, denom: i128) -> Self {
        let divisor = gcd(numer, denom).max(1);
        Self {
            numer: numer / divisor,
            denom: denom / divisor,
        }
    }

    pub const fn is_integral(self) -> bool {
        self.denom == 1
    }

    /// Smallest whole amount not below this share.
    pub fn ceil(self) -> Money {
        let floor = self.numer.div_euclid(self.denom);
        let units = if self.numer.rem_euclid(self.denom) == 0 {
            floor
        } else {
            floor.saturating_add(1)
        };
        Money::from_i64(saturate(units))
    }
}

impl Default for Share {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<Money> for Share {
    fn from(amount: Money) -> Self {
        Self::whole(amount)
    }
}

impl Add for Share {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        let common = gcd(self.denom, rhs.denom).max(1);
        let lhs_factor = rhs.denom / common;
        let rhs_factor = self.denom / common;
        let exact = self
            .numer
            .checked_mul(lhs_factor)
            .zip(rhs.numer.checked_mul(rhs_factor))
            .and_then(|(lhs, rhs)| lhs.checked_add(rhs))
            .zip(self.denom.checked_mul(lhs_factor));
        match exact {
            Some((numer, denom)) => Self::reduced(numer, denom),
            None => {
                // Common denominator out of range; ceiling both sides keeps an
                // upper bound.
                tracing::warn!(
                    lhs_denom = %self.denom,
                    rhs_denom = %rhs.denom,
                    "share denominator overflowed; rounding operands up"
                );
                Self {
                    numer: i128::from(self.ceil().amount())
                        .saturating_add(i128::from(rhs.ceil().amount())),
                    denom: 1,
                }
            }
        }
    }
}

impl AddAssign for Share {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for Share {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Share::zero(), Add::add)
    }
}

fn gcd(a: i128, b: i128) -> i128 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

fn saturate(units: i128) -> i64 {
    i64::try_from(units).unwrap_or(if units.is_negative() {
        i64::MIN
    } else {
        i64::MAX
    })
}

/// Fixed-rate tip, always rounded up to the next whole unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TipPolicy {
    rate: Decimal,
}

impl TipPolicy {
    const fn new(rate: Decimal) -> Self {
        Self { rate }
    }

    /// 10%, the rate printed on every bill.
    pub const fn ten_percent() -> Self {
        Self::new(Decimal::from_parts(10, 0, 0, false, 2))
    }

    pub fn tip_for(self, subtotal: Money) -> Money {
        let tip = Decimal::from(subtotal.amount())
            .checked_mul(self.rate)
            .map(|value| value.ceil())
            .and_then(|value| value.to_i64());
        match tip {
            Some(tip) => Money::from_i64(tip),
            None => {
                tracing::warn!(
                    subtotal = subtotal.amount(),
                    rate = %self.rate,
                    "tip computation overflowed; saturating"
                );
                Money::from_i64(i64::MAX)
            }
        }
    }
}

impl Default for TipPolicy {
    fn default() -> Self {
        Self::ten_percent()
    }
}
