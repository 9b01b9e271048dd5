//! Fixed-point decimal accumulator for potential arithmetic.
//!
//! A value is stored as `mantissa * 10^-exponent`. Operands are read from
//! their shortest decimal representation, so `0.1 + 0.2` stays exactly
//! `0.3` across a chain of operations. Only the final [`Decimal::result`]
//! converts back to binary floating point.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Decimal {
    mantissa: i128,
    exponent: u32,
}

impl Decimal {
    pub const ZERO: Decimal = Decimal {
        mantissa: 0,
        exponent: 0,
    };

    pub fn new(mantissa: i128, exponent: u32) -> Self {
        Self { mantissa, exponent }.normalized()
    }

    /// Reads a float through its shortest round-trip decimal form.
    /// Non-finite input maps to zero.
    pub fn from_f64(value: f64) -> Self {
        if !value.is_finite() {
            debug_assert!(false, "non-finite value in decimal arithmetic: {value}");
            return Self::ZERO;
        }
        let text = format!("{}", value);
        let (digits, exponent) = match text.split_once('.') {
            Some((int_part, frac_part)) => (format!("{int_part}{frac_part}"), frac_part.len()),
            None => (text.clone(), 0),
        };
        match (digits.parse::<i128>(), u32::try_from(exponent)) {
            (Ok(mantissa), Ok(exponent)) => Self::new(mantissa, exponent),
            _ => Self::new(value.trunc() as i128, 0),
        }
    }

    pub fn mantissa(&self) -> i128 {
        self.mantissa
    }

    pub fn exponent(&self) -> u32 {
        self.exponent
    }

    /// Converts back to an ordinary float.
    pub fn result(&self) -> f64 {
        self.mantissa as f64 / 10f64.powi(self.exponent as i32)
    }

    fn normalized(mut self) -> Self {
        while self.exponent > 0 && self.mantissa % 10 == 0 {
            self.mantissa /= 10;
            self.exponent -= 1;
        }
        if self.mantissa == 0 {
            self.exponent = 0;
        }
        self
    }

    /// Same value expressed with `exponent` fractional digits.
    fn rescaled(&self, exponent: u32) -> Option<i128> {
        let shift = exponent.checked_sub(self.exponent)?;
        10i128
            .checked_pow(shift)
            .and_then(|factor| self.mantissa.checked_mul(factor))
    }

    /// Mantissas of both operands at the larger exponent.
    fn aligned(&self, other: &Decimal) -> Option<(i128, i128, u32)> {
        let exponent = self.exponent.max(other.exponent);
        Some((self.rescaled(exponent)?, other.rescaled(exponent)?, exponent))
    }
}

impl From<f64> for Decimal {
    fn from(value: f64) -> Self {
        Decimal::from_f64(value)
    }
}

impl From<i32> for Decimal {
    fn from(value: i32) -> Self {
        Decimal::new(value as i128, 0)
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Decimal::new(value as i128, 0)
    }
}

// Overflowing i128 falls back to float arithmetic rather than panicking.
impl<T: Into<Decimal>> Add<T> for Decimal {
    type Output = Decimal;

    fn add(self, rhs: T) -> Decimal {
        let rhs = rhs.into();
        match self.aligned(&rhs) {
            Some((a, b, exponent)) => match a.checked_add(b) {
                Some(sum) => Decimal::new(sum, exponent),
                None => Decimal::from_f64(self.result() + rhs.result()),
            },
            None => Decimal::from_f64(self.result() + rhs.result()),
        }
    }
}

impl<T: Into<Decimal>> Sub<T> for Decimal {
    type Output = Decimal;

    fn sub(self, rhs: T) -> Decimal {
        let rhs: Decimal = rhs.into();
        self + (-rhs)
    }
}

impl<T: Into<Decimal>> Mul<T> for Decimal {
    type Output = Decimal;

    fn mul(self, rhs: T) -> Decimal {
        let rhs = rhs.into();
        let product = self.mantissa.checked_mul(rhs.mantissa);
        let exponent = self.exponent.checked_add(rhs.exponent);
        match (product, exponent) {
            (Some(mantissa), Some(exponent)) => Decimal::new(mantissa, exponent),
            _ => Decimal::from_f64(self.result() * rhs.result()),
        }
    }
}

impl<T: Into<Decimal>> Div<T> for Decimal {
    type Output = Decimal;

    /// Both operands are brought to a common exponent, so the quotient of
    /// the mantissas is the quotient of the values.
    fn div(self, rhs: T) -> Decimal {
        let rhs = rhs.into();
        if rhs.mantissa == 0 {
            debug_assert!(false, "decimal division by zero");
            return Decimal::ZERO;
        }
        match self.aligned(&rhs) {
            Some((a, b, _)) if a % b == 0 => Decimal::new(a / b, 0),
            Some((a, b, _)) => Decimal::from_f64(a as f64 / b as f64),
            None => Decimal::from_f64(self.result() / rhs.result()),
        }
    }
}

impl Neg for Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        Decimal {
            mantissa: -self.mantissa,
            exponent: self.exponent,
        }
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.result())
    }
}
