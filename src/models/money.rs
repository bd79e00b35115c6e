//! Money type for representing currency amounts
//!
//! Internally stores amounts in minor units (i64 cents) to avoid
//! floating-point drift when summing. Provides safe arithmetic, parsing of
//! user input and formatting with a currency symbol.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

/// Currency symbols recognised in user input
pub const KNOWN_SYMBOLS: [&str; 5] = ["₹", "$", "€", "£", "¥"];

impl Money {
    /// Largest amount accepted from input (one trillion units). Sums of many
    /// such amounts still fit comfortably in an i64 of cents.
    pub const MAX: Money = Money(100_000_000_000_000);

    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use expense_ledger::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// assert_eq!(amount.to_string(), "10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from major and minor units
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        Self(major * 100 + minor)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub const fn abs(&self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Divide by a count, rounding half away from zero to the nearest cent
    ///
    /// Returns zero when `count` is zero.
    pub fn div_round(&self, count: usize) -> Self {
        if count == 0 {
            return Self::zero();
        }
        let n = i64::try_from(count).unwrap_or(i64::MAX);
        let half = n / 2;
        let rounded = if self.0 >= 0 {
            self.0.saturating_add(half) / n
        } else {
            self.0.saturating_sub(half) / n
        };
        Self(rounded)
    }

    /// Percentage this amount represents of `total` (0.0 when total is zero)
    pub fn percent_of(&self, total: Money) -> f64 {
        if total.is_zero() {
            0.0
        } else {
            self.0 as f64 / total.0 as f64 * 100.0
        }
    }

    /// Amount as a floating point number of major units, for chart series
    /// and decimal exports
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Parse a user-entered amount
    ///
    /// Accepts "10.50", "-10.50", "1,250", ".75" and a single leading
    /// currency symbol from `KNOWN_SYMBOLS` ("₹10.50", "-$10.50", "$-10.50").
    /// More than two fractional digits is rejected rather than truncated.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        Self::parse_with_symbol(s, "")
    }

    /// Like `parse`, also accepting `symbol` (the configured currency symbol)
    pub fn parse_with_symbol(s: &str, symbol: &str) -> Result<Self, MoneyParseError> {
        let mut rest = s.trim();
        let mut negative = false;
        if let Some(stripped) = rest.strip_prefix('-') {
            negative = true;
            rest = stripped;
        }

        if let Some(stripped) = strip_symbol(rest, symbol) {
            rest = stripped;
            if !negative {
                if let Some(stripped) = rest.strip_prefix('-') {
                    negative = true;
                    rest = stripped;
                }
            }
        }

        let cents = parse_unsigned(rest, true).map_err(|kind| kind.into_error(s))?;
        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Parse a plain decimal literal ("1250.00", "-3.5"), the stored form
    ///
    /// No currency symbols, grouping separators or surrounding text.
    pub fn parse_decimal(s: &str) -> Result<Self, MoneyParseError> {
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let cents = parse_unsigned(digits, false).map_err(|kind| kind.into_error(s))?;
        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Format with a currency symbol and thousands separators ("₹1,250.00")
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let grouped = group_thousands(self.major().abs());
        if self.is_negative() {
            format!("-{}{}.{:02}", symbol, grouped, self.cents_part())
        } else {
            format!("{}{}.{:02}", symbol, grouped, self.cents_part())
        }
    }
}

fn strip_symbol<'a>(input: &'a str, configured: &str) -> Option<&'a str> {
    if !configured.is_empty() {
        if let Some(rest) = input.strip_prefix(configured) {
            return Some(rest);
        }
    }
    KNOWN_SYMBOLS
        .iter()
        .find_map(|symbol| input.strip_prefix(symbol))
}

enum ParseFailure {
    Invalid,
    TooPrecise,
    TooLarge,
}

impl ParseFailure {
    fn into_error(self, input: &str) -> MoneyParseError {
        let input = input.to_string();
        match self {
            ParseFailure::Invalid => MoneyParseError::InvalidFormat(input),
            ParseFailure::TooPrecise => MoneyParseError::TooPrecise(input),
            ParseFailure::TooLarge => MoneyParseError::TooLarge(input),
        }
    }
}

/// Digits with an optional fraction of at most two places, as cents
fn parse_unsigned(input: &str, allow_grouping: bool) -> Result<i64, ParseFailure> {
    let (whole, fraction) = match input.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (input, None),
    };

    if whole.is_empty() && fraction.map_or(true, str::is_empty) {
        return Err(ParseFailure::Invalid);
    }

    let whole: String = if allow_grouping && whole.contains(',') {
        if whole.starts_with(',') || whole.ends_with(',') || whole.contains(",,") {
            return Err(ParseFailure::Invalid);
        }
        whole.chars().filter(|c| *c != ',').collect()
    } else {
        whole.to_string()
    };

    if !whole.chars().all(|c| c.is_ascii_digit()) {
        return Err(ParseFailure::Invalid);
    }

    let minor = match fraction {
        None => 0,
        Some(f) if !f.chars().all(|c| c.is_ascii_digit()) => return Err(ParseFailure::Invalid),
        Some(f) if f.len() > 2 => return Err(ParseFailure::TooPrecise),
        Some("") => 0,
        Some(f) if f.len() == 1 => f.parse::<i64>().map_err(|_| ParseFailure::Invalid)? * 10,
        Some(f) => f.parse::<i64>().map_err(|_| ParseFailure::Invalid)?,
    };

    let major: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| ParseFailure::TooLarge)?
    };

    let cents = major
        .checked_mul(100)
        .and_then(|c| c.checked_add(minor))
        .ok_or(ParseFailure::TooLarge)?;
    if cents > Money::MAX.0 {
        return Err(ParseFailure::TooLarge);
    }
    Ok(cents)
}

fn group_thousands(value: i64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

/// Plain decimal literal ("1250.00"), the form used in the stored table
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-{}.{:02}", self.major().abs(), self.cents_part())
        } else {
            write!(f, "{}.{:02}", self.major(), self.cents_part())
        }
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

// Serialized as a decimal number of major units so that config.json and
// exports read naturally ("monthly_budget": 20000.0).
impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

struct MoneyVisitor;

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a decimal amount")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        if !v.is_finite() {
            return Err(E::custom("amount must be finite"));
        }
        let cents = (v * 100.0).round();
        if cents.abs() > Money::MAX.0 as f64 {
            return Err(E::custom("amount out of range"));
        }
        Ok(Money(cents as i64))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        v.checked_mul(100)
            .filter(|c| c.abs() <= Money::MAX.0)
            .map(Money)
            .ok_or_else(|| E::custom("amount out of range"))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        i64::try_from(v)
            .ok()
            .and_then(|v| v.checked_mul(100))
            .filter(|c| *c <= Money::MAX.0)
            .map(Money)
            .ok_or_else(|| E::custom("amount out of range"))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
        Money::parse(v).map_err(E::custom)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    TooPrecise(String),
    TooLarge(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: '{}'", s),
            MoneyParseError::TooPrecise(s) => {
                write!(f, "Amount '{}' has more than two decimal places", s)
            }
            MoneyParseError::TooLarge(s) => {
                write!(f, "Amount '{}' is too large (limit {})", s, Money::MAX)
            }
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(1050);
        assert_eq!(m.cents(), 1050);
        assert_eq!(m.major(), 10);
        assert_eq!(m.cents_part(), 50);
        assert_eq!(Money::from_major_minor(10, 50), m);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1050).to_string(), "10.50");
        assert_eq!(Money::from_cents(0).to_string(), "0.00");
        assert_eq!(Money::from_cents(-1050).to_string(), "-10.50");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(-5).to_string(), "-0.05");
    }

    #[test]
    fn test_format_with_symbol() {
        assert_eq!(Money::from_cents(125000).format_with_symbol("₹"), "₹1,250.00");
        assert_eq!(Money::from_cents(100000000).format_with_symbol("$"), "$1,000,000.00");
        assert_eq!(Money::from_cents(-145000).format_with_symbol("₹"), "-₹1,450.00");
        assert_eq!(Money::from_cents(99).format_with_symbol(""), "0.99");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("$10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("₹1,250").unwrap().cents(), 125000);
        assert_eq!(Money::parse("-10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse("10").unwrap().cents(), 1000);
        assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse("0.05").unwrap().cents(), 5);
        assert_eq!(Money::parse(".75").unwrap().cents(), 75);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Money::parse("").is_err());
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("1.2.3").is_err());
        assert!(Money::parse("12x").is_err());
        assert_eq!(
            Money::parse("1.005"),
            Err(MoneyParseError::TooPrecise("1.005".into()))
        );
    }

    #[test]
    fn test_parse_sign_after_symbol() {
        assert_eq!(Money::parse("₹-250").unwrap().cents(), -25000);
        assert_eq!(Money::parse("-₹250").unwrap().cents(), -25000);
        assert_eq!(Money::parse("$-10.00").unwrap().cents(), -1000);
        assert!(Money::parse("--5").is_err());
        assert!(Money::parse("-$-5").is_err());
    }

    #[test]
    fn test_parse_rejects_unknown_prefix() {
        assert!(Money::parse("abc10").is_err());
        assert!(Money::parse("abc10.00").is_err());
        assert!(Money::parse("Rs10").is_err());
        assert!(Money::parse("₹$10").is_err());
        assert!(Money::parse(",100").is_err());
        assert!(Money::parse("1,,000").is_err());
        assert_eq!(Money::parse_with_symbol("Rs 10", "Rs ").unwrap().cents(), 1000);
    }

    #[test]
    fn test_parse_decimal_is_strict() {
        assert_eq!(Money::parse_decimal("250.00").unwrap().cents(), 25000);
        assert_eq!(Money::parse_decimal("-3.5").unwrap().cents(), -350);
        assert!(Money::parse_decimal("$-10.00").is_err());
        assert!(Money::parse_decimal("₹10.00").is_err());
        assert!(Money::parse_decimal("1,250.00").is_err());
        assert!(Money::parse_decimal(" 10.00").is_err());
    }

    #[test]
    fn test_parse_caps_amounts() {
        assert!(matches!(
            Money::parse("90000000000000000"),
            Err(MoneyParseError::TooLarge(_))
        ));
        assert!(matches!(
            Money::parse("99999999999999999999"),
            Err(MoneyParseError::TooLarge(_))
        ));
        assert_eq!(Money::parse("1000000000000").unwrap(), Money::MAX);
        assert!(Money::parse("1000000000000.01").is_err());
        assert!(serde_json::from_str::<Money>("1e18").is_err());
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge = Money::from_cents(i64::MAX - 10);
        let total: Money = [huge, huge].iter().sum();
        assert_eq!(total.cents(), i64::MAX);
        assert_eq!((-Money::from_cents(i64::MIN)).cents(), i64::MAX);
        assert_eq!(Money::from_cents(i64::MAX).div_round(2).cents(), i64::MAX / 2);
    }

    #[test]
    fn test_div_round() {
        assert_eq!(Money::from_cents(43000).div_round(2).cents(), 21500);
        assert_eq!(Money::from_cents(100).div_round(3).cents(), 33);
        assert_eq!(Money::from_cents(200).div_round(3).cents(), 67);
        assert_eq!(Money::from_cents(500).div_round(0), Money::zero());
    }

    #[test]
    fn test_percent_of() {
        let part = Money::from_cents(25000);
        let total = Money::from_cents(43000);
        assert!((part.percent_of(total) - 58.139).abs() < 0.001);
        assert_eq!(part.percent_of(Money::zero()), 0.0);
    }

    #[test]
    fn test_sum() {
        let amounts = vec![
            Money::from_cents(100),
            Money::from_cents(200),
            Money::from_cents(300),
        ];
        let total: Money = amounts.iter().sum();
        assert_eq!(total.cents(), 600);
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_cents(1050);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "10.5");

        let deserialized: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, deserialized);

        let whole: Money = serde_json::from_str("20000").unwrap();
        assert_eq!(whole.cents(), 2_000_000);
    }
}
