//! # Points Module
//!
//! The deterministic points engine.
//!
//! ## Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Rule                     Award                                         │
//! │  ────────────────────     ───────────────────────────────────────────   │
//! │  retailer name            1 per ASCII letter or digit                   │
//! │  round dollar             50 if total has no cents                      │
//! │  quarter multiple         25 if total cents % 25 == 0                   │
//! │  item pairs               5 per two items                               │
//! │  item description         ceil(price × 0.2) per item whose trimmed      │
//! │                           description length is a multiple of 3         │
//! │  odd purchase day         6 if the day of month is odd                  │
//! │  afternoon purchase       10 if 14:00 <= time < 16:00                   │
//! │                                                                         │
//! │  points = sum of all seven (rules never short-circuit)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Round dollar and quarter multiple both fire on `"9.00"`.
//!
//! The date and time rules fail open: an empty or unparsable value scores
//! 0. The validator rejects those receipts before they reach the store, but
//! the engine does not depend on that.

use chrono::{Datelike, Timelike};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::price::Price;
use crate::types::{parse_purchase_date, parse_purchase_time, Item, Receipt};

const ROUND_DOLLAR_POINTS: i64 = 50;
const QUARTER_MULTIPLE_POINTS: i64 = 25;
const ITEM_PAIR_POINTS: i64 = 5;
const DESCRIPTION_LENGTH_MULTIPLE: usize = 3;
const ODD_DAY_POINTS: i64 = 6;
const AFTERNOON_POINTS: i64 = 10;
const AFTERNOON_START_HOUR: u32 = 14;
const AFTERNOON_END_HOUR: u32 = 16;

// =============================================================================
// Accumulator
// =============================================================================

/// Running total of rule contributions.
#[derive(Debug, Default, Clone, Copy)]
pub struct PointsCalculator {
    points: i64,
}

impl PointsCalculator {
    pub fn new() -> Self {
        PointsCalculator::default()
    }

    pub fn add(&mut self, points: i64) {
        self.points = self.points.saturating_add(points);
    }

    pub fn total(&self) -> i64 {
        self.points
    }
}

// =============================================================================
// Breakdown
// =============================================================================

/// Per-rule contributions for one receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsBreakdown {
    pub retailer_name: i64,
    pub round_dollar: i64,
    pub quarter_multiple: i64,
    pub item_pairs: i64,
    pub item_descriptions: i64,
    pub odd_day: i64,
    pub afternoon: i64,
}

impl PointsBreakdown {
    /// Evaluates every rule against `receipt`.
    pub fn for_receipt(receipt: &Receipt) -> Self {
        PointsBreakdown {
            retailer_name: retailer_name_points(&receipt.retailer),
            round_dollar: round_dollar_points(&receipt.total),
            quarter_multiple: quarter_multiple_points(&receipt.total),
            item_pairs: item_pair_points(&receipt.items),
            item_descriptions: item_description_points(&receipt.items),
            odd_day: odd_day_points(&receipt.purchase_date),
            afternoon: afternoon_points(&receipt.purchase_time),
        }
    }

    pub fn total(&self) -> i64 {
        let mut calc = PointsCalculator::new();
        for points in [
            self.retailer_name,
            self.round_dollar,
            self.quarter_multiple,
            self.item_pairs,
            self.item_descriptions,
            self.odd_day,
            self.afternoon,
        ] {
            calc.add(points);
        }
        calc.total()
    }
}

/// Scores a receipt. Pure: the same receipt always yields the same total.
pub fn calculate_points(receipt: &Receipt) -> i64 {
    PointsBreakdown::for_receipt(receipt).total()
}

// =============================================================================
// Rules
// =============================================================================

/// One point for every ASCII letter or digit in the retailer name.
pub fn retailer_name_points(retailer: &str) -> i64 {
    retailer.chars().filter(char::is_ascii_alphanumeric).count() as i64
}

/// 50 points if the total is a whole number of dollars.
pub fn round_dollar_points(total: &Price) -> i64 {
    if total.amount().fract().is_zero() {
        ROUND_DOLLAR_POINTS
    } else {
        0
    }
}

/// 25 points if the total is a whole number of quarters.
pub fn quarter_multiple_points(total: &Price) -> i64 {
    // Remainder against 0.25 directly; scaling to cents can overflow.
    if (total.amount() % Decimal::new(25, 2)).is_zero() {
        QUARTER_MULTIPLE_POINTS
    } else {
        0
    }
}

/// 5 points for every two items.
pub fn item_pair_points(items: &[Item]) -> i64 {
    (items.len() / 2) as i64 * ITEM_PAIR_POINTS
}

/// `ceil(price × 0.2)` for each item whose trimmed description length is a
/// multiple of three.
pub fn item_description_points(items: &[Item]) -> i64 {
    let multiplier = Decimal::new(2, 1);
    let mut calc = PointsCalculator::new();

    for item in items {
        if item.short_description.trim().len() % DESCRIPTION_LENGTH_MULTIPLE == 0 {
            let award = (item.price.amount() * multiplier).ceil();
            calc.add(award.to_i64().unwrap_or(i64::MAX));
        }
    }

    calc.total()
}

/// 6 points if the day of the purchase date is odd; 0 when unparsable.
pub fn odd_day_points(purchase_date: &str) -> i64 {
    match parse_purchase_date(purchase_date) {
        Some(date) if date.day() % 2 == 1 => ODD_DAY_POINTS,
        _ => 0,
    }
}

/// 10 points for a purchase in `[14:00, 16:00)`; 0 when unparsable.
pub fn afternoon_points(purchase_time: &str) -> i64 {
    match parse_purchase_time(purchase_time) {
        Some(time) if (AFTERNOON_START_HOUR..AFTERNOON_END_HOUR).contains(&time.hour()) => {
            AFTERNOON_POINTS
        }
        _ => 0,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
