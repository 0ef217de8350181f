//! # Price Module
//!
//! Provides the `Price` type for handling monetary values exactly.
//!
//! ## Why Decimal Prices?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  The quarter-multiple rule asks "is total × 100 divisible by 25?"       │
//! │  A float total of 10.25 may become 1024.9999999 cents → 0 points.       │
//! │                                                                         │
//! │  OUR SOLUTION: base-10 Decimal                                          │
//! │    "10.25" is stored as 1025 × 10⁻² exactly                             │
//! │    1025 % 25 == 0 → 25 points, every time                               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Contract
//! ```text
//!   JSON in                 Price                     JSON out
//!   ───────                 ─────                     ────────
//!   "3"          ──►  Decimal(3)           ──►  "3.00"
//!   "2.25"       ──►  Decimal(2.25)        ──►  "2.25"
//!   "2.255"      ──►  Decimal(2.255)       ──►  "2.26"
//!   2.25         ──►  InvalidFormat (must be a JSON string)
//!   "$2.25"      ──►  InvalidFormat
//!   "1e3"        ──►  InvalidFormat
//!   28+ integer digits ──►  InvalidFormat (no room for two decimals)
//! ```
//!
//! Parsing keeps every digit the caller sent; only the textual output is
//! canonicalised to two places. Negative and zero prices parse fine; the
//! validation layer decides whether they are acceptable.

use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::PriceError;

/// Number of fractional digits in the canonical text form.
const CANONICAL_SCALE: u32 = 2;

// =============================================================================
// Price Type
// =============================================================================

/// An exact decimal monetary value.
///
/// Equality and ordering are exact decimal comparisons: `"2.5"` and
/// `"2.50"` are the same price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// Parses a quoted price literal such as `"\"2.25\""`.
    ///
    /// The outer quotes follow JSON string rules. Unquoted input is rejected
    /// even when the inner text would be a valid numeral.
    ///
    /// ## Example
    /// ```rust
    /// use receipt_core::Price;
    ///
    /// let price = Price::parse("\"6.49\"").unwrap();
    /// assert_eq!(price.to_string(), "6.49");
    ///
    /// assert!(Price::parse("6.49").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self, PriceError> {
        let unquoted: String =
            serde_json::from_str(text).map_err(|_| PriceError::InvalidFormat)?;
        unquoted.parse()
    }

    /// Returns the zero price.
    #[inline]
    pub const fn zero() -> Self {
        Price(Decimal::ZERO)
    }

    /// Returns the underlying decimal with its full parsed precision.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is strictly greater than zero.
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Renders the canonical two-decimal text form.
    ///
    /// Extra precision is rounded half away from zero.
    pub fn format(&self) -> String {
        self.to_string()
    }

    fn canonical(&self) -> Decimal {
        // Every Price is built through `canonical_form`, so this never falls back.
        canonical_form(self.0).unwrap_or(self.0)
    }
}

/// Rounds `amount` to two places and widens it to exactly two.
///
/// Returns `None` when the 96-bit mantissa cannot hold the value at scale 2,
/// i.e. more than 27 integer digits, or 27 digits above
/// `792281625142643375935439503.35`.
fn canonical_form(amount: Decimal) -> Option<Decimal> {
    let mut rounded =
        amount.round_dp_with_strategy(CANONICAL_SCALE, RoundingStrategy::MidpointAwayFromZero);
    // rescale clamps the scale instead of failing.
    rounded.rescale(CANONICAL_SCALE);
    if rounded.scale() != CANONICAL_SCALE {
        return None;
    }
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    Some(rounded)
}

/// Accepts `-?[0-9]+(\.[0-9]+)?` and nothing else.
fn is_decimal_numeral(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

    match digits.split_once('.') {
        Some((whole, fraction)) => all_digits(whole) && all_digits(fraction),
        None => all_digits(digits),
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Parses a bare (unquoted) decimal numeral.
impl FromStr for Price {
    type Err = PriceError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        if !is_decimal_numeral(text) {
            return Err(PriceError::InvalidFormat);
        }

        let amount = Decimal::from_str_exact(text).map_err(|_| PriceError::InvalidFormat)?;
        Price::try_from(amount)
    }
}

/// Fails for magnitudes that cannot be rendered with two fractional digits.
impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        canonical_form(amount)
            .map(|_| Price(amount))
            .ok_or(PriceError::InvalidFormat)
    }
}

/// Always exactly two fractional digits.
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical())
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PriceVisitor)
    }
}

struct PriceVisitor;

impl<'de> Visitor<'de> for PriceVisitor {
    type Value = Price;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a quoted decimal string such as \"2.25\"")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Price, E> {
        value.parse().map_err(E::custom)
    }

    // Bare JSON numbers are a format error, not a type error.
    fn visit_i64<E: de::Error>(self, _: i64) -> Result<Price, E> {
        Err(E::custom(PriceError::InvalidFormat))
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<Price, E> {
        Err(E::custom(PriceError::InvalidFormat))
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<Price, E> {
        Err(E::custom(PriceError::InvalidFormat))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
