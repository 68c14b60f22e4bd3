//! Minimal computer-algebra support for answer comparison.
//!
//! Parses normalized answer text into a multivariate polynomial with exact
//! rational coefficients. Two answers are symbolically equal when their
//! canonical polynomials are equal, which covers reordering (`x+1` vs
//! `1+x`), expansion (`(x+1)^2` vs `x^2+2x+1`) and numeric formatting
//! (`3` vs `3.0` vs `6/2`).
//!
//! Anything outside that fragment (functions, roots, division by a
//! non-constant, multi-letter names) is rejected so the caller can fall
//! back to text comparison.

use super::rational::Rational;
use std::collections::BTreeMap;

/// Largest exponent accepted in `a^n`.
const MAX_EXPONENT: u32 = 32;

/// Upper bound on the number of terms kept during expansion.
const MAX_TERMS: usize = 256;

/// A product of variables raised to positive powers, keyed by variable name.
pub type Monomial = BTreeMap<char, u32>;

/// A polynomial in canonical form: zero coefficients are never stored.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Polynomial {
    terms: BTreeMap<Monomial, Rational>,
}

impl Polynomial {
    pub fn constant(value: Rational) -> Self {
        let mut terms = BTreeMap::new();
        if !value.is_zero() {
            terms.insert(Monomial::new(), value);
        }
        Self { terms }
    }

    pub fn variable(name: char) -> Self {
        let mut monomial = Monomial::new();
        monomial.insert(name, 1);
        let mut terms = BTreeMap::new();
        terms.insert(monomial, Rational::ONE);
        Self { terms }
    }

    /// The constant value, if the polynomial has no variables.
    pub fn as_constant(&self) -> Option<Rational> {
        match self.terms.len() {
            0 => Some(Rational::ZERO),
            1 => self.terms.get(&Monomial::new()).copied(),
            _ => None,
        }
    }

    pub fn is_constant(&self) -> bool {
        self.as_constant().is_some()
    }

    fn add_term(&mut self, monomial: Monomial, coefficient: Rational) -> Option<()> {
        let sum = match self.terms.get(&monomial) {
            Some(existing) => existing.checked_add(coefficient)?,
            None => coefficient,
        };
        if sum.is_zero() {
            self.terms.remove(&monomial);
        } else {
            self.terms.insert(monomial, sum);
        }
        (self.terms.len() <= MAX_TERMS).then_some(())
    }

    pub fn checked_add(&self, other: &Self) -> Option<Self> {
        let mut result = self.clone();
        for (monomial, coefficient) in &other.terms {
            result.add_term(monomial.clone(), *coefficient)?;
        }
        Some(result)
    }

    pub fn checked_neg(&self) -> Option<Self> {
        let mut terms = BTreeMap::new();
        for (monomial, coefficient) in &self.terms {
            terms.insert(monomial.clone(), coefficient.checked_neg()?);
        }
        Some(Self { terms })
    }

    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        self.checked_add(&other.checked_neg()?)
    }

    pub fn checked_mul(&self, other: &Self) -> Option<Self> {
        let mut result = Polynomial::default();
        for (lhs_mono, lhs_coef) in &self.terms {
            for (rhs_mono, rhs_coef) in &other.terms {
                let mut monomial = lhs_mono.clone();
                for (var, exp) in rhs_mono {
                    let entry = monomial.entry(*var).or_insert(0);
                    *entry = entry.checked_add(*exp)?;
                }
                result.add_term(monomial, lhs_coef.checked_mul(*rhs_coef)?)?;
            }
        }
        Some(result)
    }

    /// Division is only defined by a non-zero constant.
    pub fn checked_div(&self, other: &Self) -> Option<Self> {
        let divisor = other.as_constant()?;
        if divisor.is_zero() {
            return None;
        }
        let mut terms = BTreeMap::new();
        for (monomial, coefficient) in &self.terms {
            terms.insert(monomial.clone(), coefficient.checked_div(divisor)?);
        }
        Some(Self { terms })
    }

    pub fn checked_pow(&self, exp: u32) -> Option<Self> {
        if exp > MAX_EXPONENT {
            return None;
        }
        if let Some(constant) = self.as_constant() {
            return Some(Polynomial::constant(constant.checked_pow(exp)?));
        }
        let mut result = Polynomial::constant(Rational::ONE);
        for _ in 0..exp {
            result = result.checked_mul(self)?;
        }
        Some(result)
    }
}

impl std::fmt::Display for Polynomial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }
        // Highest total degree first, ties in monomial order
        let mut terms: Vec<_> = self.terms.iter().collect();
        terms.sort_by_key(|(monomial, _)| std::cmp::Reverse(monomial.values().sum::<u32>()));

        for (i, (monomial, coefficient)) in terms.into_iter().enumerate() {
            let negative = *coefficient < Rational::ZERO;
            let magnitude = if negative {
                coefficient.checked_neg().unwrap_or(*coefficient)
            } else {
                *coefficient
            };
            match (i, negative) {
                (0, true) => write!(f, "-")?,
                (0, false) => {}
                (_, true) => write!(f, " - ")?,
                (_, false) => write!(f, " + ")?,
            }

            let factors: Vec<String> = monomial
                .iter()
                .map(|(var, exp)| {
                    if *exp == 1 {
                        var.to_string()
                    } else {
                        format!("{}^{}", var, exp)
                    }
                })
                .collect();

            if factors.is_empty() {
                write!(f, "{}", magnitude)?;
            } else if magnitude == Rational::ONE {
                write!(f, "{}", factors.join("*"))?;
            } else {
                write!(f, "{}*{}", magnitude, factors.join("*"))?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(Rational),
    Variable(char),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    Open,
    Close,
}

fn tokenize(text: &str) -> Option<Vec<Token>> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            ' ' => {}
            '+' => tokens.push(Token::Plus),
            '-' => tokens.push(Token::Minus),
            '*' => tokens.push(Token::Star),
            '/' => tokens.push(Token::Slash),
            '^' => tokens.push(Token::Caret),
            '(' | '{' => tokens.push(Token::Open),
            ')' | '}' => tokens.push(Token::Close),
            c if c.is_ascii_digit() || c == '.' => {
                let start = i;
                while i + 1 < chars.len() && (chars[i + 1].is_ascii_digit() || chars[i + 1] == '.') {
                    i += 1;
                }
                let literal: String = chars[start..=i].iter().collect();
                tokens.push(Token::Number(Rational::parse_decimal(&literal)?));
            }
            c if c.is_ascii_alphabetic() => {
                // Multi-letter names are words or functions, not variables
                if i + 1 < chars.len() && chars[i + 1].is_ascii_alphabetic() {
                    return None;
                }
                tokens.push(Token::Variable(c));
            }
            _ => return None,
        }
        i += 1;
    }

    Some(tokens)
}

/// Maximum nesting of parentheses, signs and exponents.
const MAX_DEPTH: usize = 64;

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    /// Run a nested rule, giving up once nesting exceeds `MAX_DEPTH`.
    fn descend(&mut self, rule: fn(&mut Self) -> Option<Polynomial>) -> Option<Polynomial> {
        if self.depth >= MAX_DEPTH {
            return None;
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    fn expr(&mut self) -> Option<Polynomial> {
        let mut acc = self.term()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.pos += 1;
                    acc = acc.checked_add(&self.term()?)?;
                }
                Some(Token::Minus) => {
                    self.pos += 1;
                    acc = acc.checked_sub(&self.term()?)?;
                }
                _ => return Some(acc),
            }
        }
    }

    fn term(&mut self) -> Option<Polynomial> {
        let mut acc = self.unary()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.pos += 1;
                    acc = acc.checked_mul(&self.unary()?)?;
                }
                Some(Token::Slash) => {
                    self.pos += 1;
                    acc = acc.checked_div(&self.unary()?)?;
                }
                // Implicit multiplication: `2x`, `3(x+1)`, `x y`.
                // Two adjacent numbers are never multiplied.
                Some(Token::Variable(_)) | Some(Token::Open) => {
                    acc = acc.checked_mul(&self.power()?)?;
                }
                _ => return Some(acc),
            }
        }
    }

    fn unary(&mut self) -> Option<Polynomial> {
        match self.peek() {
            Some(Token::Minus) => {
                self.pos += 1;
                self.descend(Self::unary)?.checked_neg()
            }
            Some(Token::Plus) => {
                self.pos += 1;
                self.descend(Self::unary)
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Option<Polynomial> {
        let base = self.primary()?;
        if self.peek() != Some(&Token::Caret) {
            return Some(base);
        }
        self.pos += 1;
        let exponent = self.descend(Self::unary)?.as_constant()?;
        if !exponent.is_integer() || exponent < Rational::ZERO {
            return None;
        }
        let exp = u32::try_from(exponent.numer()).ok()?;
        base.checked_pow(exp)
    }

    fn primary(&mut self) -> Option<Polynomial> {
        match self.next()? {
            Token::Number(value) => Some(Polynomial::constant(value)),
            Token::Variable(name) => Some(Polynomial::variable(name)),
            Token::Open => {
                let inner = self.descend(Self::expr)?;
                match self.next()? {
                    Token::Close => Some(inner),
                    _ => None,
                }
            }
            _ => None,
        }
    }
}

/// Parse normalized answer text into a canonical polynomial.
///
/// Returns `None` for anything outside the supported fragment.
///
/// # Examples
///
/// ```
/// use math_quorum_domain::answer::expression::parse_polynomial;
///
/// assert_eq!(parse_polynomial("x+1"), parse_polynomial("1 + x"));
/// assert_eq!(parse_polynomial("(x+1)^2"), parse_polynomial("x^2 + 2x + 1"));
/// assert!(parse_polynomial("sqrt(2)").is_none());
/// ```
pub fn parse_polynomial(text: &str) -> Option<Polynomial> {
    let tokens = tokenize(text)?;
    if tokens.is_empty() {
        return None;
    }
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let result = parser.expr()?;
    (parser.pos == parser.tokens.len()).then_some(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(text: &str) -> Polynomial {
        parse_polynomial(text).unwrap_or_else(|| panic!("failed to parse {text:?}"))
    }

    #[test]
    fn test_numbers_and_fractions() {
        assert_eq!(p("3"), p("3.0"));
        assert_eq!(p("6/2"), p("3"));
        assert_eq!(p("1/2"), p("0.5"));
        assert_eq!(p("-(2-5)"), p("3"));
        assert_ne!(p("0.333"), p("1/3"));
    }

    #[test]
    fn test_commutativity_and_expansion() {
        assert_eq!(p("x+1"), p("1+x"));
        assert_eq!(p("2x"), p("x*2"));
        assert_eq!(p("(x+1)^2"), p("x^2+2x+1"));
        assert_eq!(p("x^{2}"), p("x*x"));
        assert_eq!(p("(a+b)(a-b)"), p("a^2-b^2"));
        assert_ne!(p("x+1"), p("x+2"));
    }

    #[test]
    fn test_precedence() {
        assert_eq!(p("2+3*4"), p("14"));
        assert_eq!(p("-2^2"), p("-4"));
        assert_eq!(p("2^3^2"), p("512"));
        assert_eq!(p("x/2"), p("0.5x"));
    }

    #[test]
    fn test_rejects_unsupported() {
        assert!(parse_polynomial("").is_none());
        assert!(parse_polynomial("sin(x)").is_none());
        assert!(parse_polynomial("1/x").is_none());
        assert!(parse_polynomial("1/0").is_none());
        assert!(parse_polynomial("2^x").is_none());
        assert!(parse_polynomial("2^(1/2)").is_none());
        assert!(parse_polynomial("x^100").is_none());
        assert!(parse_polynomial("(x+1").is_none());
        assert!(parse_polynomial("2 3").is_none());
        assert!(parse_polynomial("√2").is_none());
    }

    #[test]
    fn test_deep_nesting_is_rejected_without_overflow() {
        assert!(parse_polynomial(&"(".repeat(10_000)).is_none());
        let nested = format!("{}x{}", "(".repeat(10_000), ")".repeat(10_000));
        assert!(parse_polynomial(&nested).is_none());
        assert!(parse_polynomial(&format!("{}1", "-".repeat(10_000))).is_none());
        assert!(parse_polynomial(&format!("2{}", "^1".repeat(10_000))).is_none());
    }

    #[test]
    fn test_moderate_nesting_still_parses() {
        let nested = format!("{}x+1{}", "(".repeat(20), ")".repeat(20));
        assert_eq!(p(&nested), p("x+1"));
        assert_eq!(p("--3"), p("3"));
    }

    #[test]
    fn test_constant_detection() {
        assert_eq!(p("4-4").as_constant(), Some(Rational::ZERO));
        assert!(p("x-x+2").is_constant());
        assert!(!p("x").is_constant());
    }

    #[test]
    fn test_display_is_canonical() {
        assert_eq!(p("1+2x+x^2").to_string(), "x^2 + 2*x + 1");
        assert_eq!(p("-x/3").to_string(), "-1/3*x");
        assert_eq!(p("0").to_string(), "0");
    }
}
