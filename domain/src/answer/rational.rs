//! Exact rational numbers for answer comparison.
//!
//! Every operation is checked: an overflow yields `None` and the caller
//! falls back to textual comparison instead of risking a wrong equality.

use std::cmp::Ordering;

/// A reduced fraction `num / den` with `den > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rational {
    num: i128,
    den: i128,
}

fn gcd(mut a: i128, mut b: i128) -> i128 {
    a = a.abs();
    b = b.abs();
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

impl Rational {
    pub const ZERO: Rational = Rational { num: 0, den: 1 };
    pub const ONE: Rational = Rational { num: 1, den: 1 };

    /// Build a reduced fraction. Returns `None` for a zero denominator.
    pub fn new(num: i128, den: i128) -> Option<Self> {
        if den == 0 || num == i128::MIN || den == i128::MIN {
            return None;
        }
        let g = gcd(num, den).max(1);
        let (mut num, mut den) = (num / g, den / g);
        if den < 0 {
            num = -num;
            den = -den;
        }
        Some(Self { num, den })
    }

    pub fn from_integer(n: i128) -> Option<Self> {
        Rational::new(n, 1)
    }

    /// Parse a plain decimal literal such as `42`, `3.0` or `.25`.
    ///
    /// No sign, exponent or separators; those are handled by the
    /// expression parser or rejected.
    pub fn parse_decimal(text: &str) -> Option<Self> {
        let (int_part, frac_part) = match text.split_once('.') {
            Some((i, f)) => (i, f),
            None => (text, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return None;
        }
        if !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }

        let mut num: i128 = 0;
        for b in int_part.bytes().chain(frac_part.bytes()) {
            num = num.checked_mul(10)?.checked_add(i128::from(b - b'0'))?;
        }
        let den = 10i128.checked_pow(u32::try_from(frac_part.len()).ok()?)?;
        Rational::new(num, den)
    }

    pub fn numer(&self) -> i128 {
        self.num
    }

    pub fn denom(&self) -> i128 {
        self.den
    }

    pub fn is_zero(&self) -> bool {
        self.num == 0
    }

    pub fn is_integer(&self) -> bool {
        self.den == 1
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        let num = self
            .num
            .checked_mul(other.den)?
            .checked_add(other.num.checked_mul(self.den)?)?;
        Rational::new(num, self.den.checked_mul(other.den)?)
    }

    pub fn checked_neg(self) -> Option<Self> {
        Some(Self {
            num: self.num.checked_neg()?,
            den: self.den,
        })
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.checked_add(other.checked_neg()?)
    }

    pub fn checked_mul(self, other: Self) -> Option<Self> {
        Rational::new(
            self.num.checked_mul(other.num)?,
            self.den.checked_mul(other.den)?,
        )
    }

    /// Division; `None` when dividing by zero or on overflow.
    pub fn checked_div(self, other: Self) -> Option<Self> {
        if other.is_zero() {
            return None;
        }
        Rational::new(
            self.num.checked_mul(other.den)?,
            self.den.checked_mul(other.num)?,
        )
    }

    pub fn checked_pow(self, exp: u32) -> Option<Self> {
        Rational::new(self.num.checked_pow(exp)?, self.den.checked_pow(exp)?)
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        // Widen through i128 cross-multiplication; saturate on overflow,
        // ordering is only used for canonical display.
        let lhs = self.num.saturating_mul(other.den);
        let rhs = other.num.saturating_mul(self.den);
        lhs.cmp(&rhs)
    }
}

impl std::fmt::Display for Rational {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.den == 1 {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.den)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(n: i128, d: i128) -> Rational {
        Rational::new(n, d).unwrap()
    }

    #[test]
    fn test_new_reduces_and_normalizes_sign() {
        assert_eq!(r(6, 4), r(3, 2));
        assert_eq!(r(3, -6), r(-1, 2));
        assert_eq!(r(0, 5), Rational::ZERO);
        assert!(Rational::new(1, 0).is_none());
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(Rational::parse_decimal("3"), Some(r(3, 1)));
        assert_eq!(Rational::parse_decimal("3.0"), Some(r(3, 1)));
        assert_eq!(Rational::parse_decimal("0.5"), Some(r(1, 2)));
        assert_eq!(Rational::parse_decimal(".25"), Some(r(1, 4)));
        assert_eq!(Rational::parse_decimal("2."), Some(r(2, 1)));
        assert_eq!(Rational::parse_decimal("."), None);
        assert_eq!(Rational::parse_decimal("1.2.3"), None);
        assert_eq!(Rational::parse_decimal("-1"), None);
    }

    #[test]
    fn test_parse_decimal_overflow_is_none() {
        let huge = "9".repeat(60);
        assert_eq!(Rational::parse_decimal(&huge), None);
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(r(1, 2).checked_add(r(1, 3)), Some(r(5, 6)));
        assert_eq!(r(1, 2).checked_sub(r(1, 2)), Some(Rational::ZERO));
        assert_eq!(r(2, 3).checked_mul(r(3, 4)), Some(r(1, 2)));
        assert_eq!(r(1, 2).checked_div(r(1, 4)), Some(r(2, 1)));
        assert_eq!(r(1, 2).checked_div(Rational::ZERO), None);
        assert_eq!(r(-2, 3).checked_pow(3), Some(r(-8, 27)));
    }

    #[test]
    fn test_display() {
        assert_eq!(r(4, 2).to_string(), "2");
        assert_eq!(r(-1, 3).to_string(), "-1/3");
    }
}
