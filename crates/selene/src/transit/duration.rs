//! Human-scale labels for transit lengths.
//!
//! Rules are evaluated in a fixed order, first match wins:
//!
//! 1. `round(days / 365) >= 1` → `"{n}-year"`
//! 2. `round(days / 30) >= 2` → `"{n}-month"`
//! 3. `days >= 14` → `"{round(days / 7)}-week"`
//! 4. otherwise → `"{days}-day"`
//!
//! The `>= 2` guard on rule 2 is what keeps `"0-month"` and `"1-month"` out
//! of the output: the 14..=44 day band falls through to weeks instead.
//! Swapping rules 2 and 3 reintroduces both labels.

use crate::error::{Result, SeleneError};
use serde::{Deserialize, Serialize};
use std::fmt;

const DAYS_PER_YEAR: f64 = 365.0;
const DAYS_PER_MONTH: f64 = 30.0;
const DAYS_PER_WEEK: f64 = 7.0;
const MIN_MONTHS: u32 = 2;
const MIN_WEEK_DAYS: u32 = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationUnit {
    Year,
    Month,
    Week,
    Day,
}

impl DurationUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            DurationUnit::Year => "year",
            DurationUnit::Month => "month",
            DurationUnit::Week => "week",
            DurationUnit::Day => "day",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DurationLabel {
    pub count: u32,
    pub unit: DurationUnit,
}

impl fmt::Display for DurationLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.count, self.unit.as_str())
    }
}

fn rounded_ratio(days: u32, per: f64) -> u32 {
    // Half-way cases round away from zero, e.g. 45 / 30 = 1.5 -> 2.
    (days as f64 / per).round() as u32
}

pub fn label_duration(total_days: u32) -> DurationLabel {
    let years = rounded_ratio(total_days, DAYS_PER_YEAR);
    if years >= 1 {
        return DurationLabel {
            count: years,
            unit: DurationUnit::Year,
        };
    }

    let months = rounded_ratio(total_days, DAYS_PER_MONTH);
    if months >= MIN_MONTHS {
        return DurationLabel {
            count: months,
            unit: DurationUnit::Month,
        };
    }

    if total_days >= MIN_WEEK_DAYS {
        return DurationLabel {
            count: rounded_ratio(total_days, DAYS_PER_WEEK),
            unit: DurationUnit::Week,
        };
    }

    // A zero-length span still renders with a positive count.
    DurationLabel {
        count: total_days.max(1),
        unit: DurationUnit::Day,
    }
}

/// Validating form for signed inputs (e.g. a date difference).
pub fn checked_label_duration(total_days: i64) -> Result<DurationLabel> {
    if total_days < 0 {
        return Err(SeleneError::NegativeDuration { days: total_days });
    }
    Ok(label_duration(u32::try_from(total_days).unwrap_or(u32::MAX)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(days: u32) -> String {
        label_duration(days).to_string()
    }

    #[test]
    fn test_boundary_values() {
        assert_eq!(label(13), "13-day");
        assert_eq!(label(14), "2-week");
        assert_eq!(label(30), "4-week");
        assert_eq!(label(44), "6-week");
        assert_eq!(label(45), "2-month");
        assert_eq!(label(60), "2-month");
        assert_eq!(label(182), "6-month");
        assert_eq!(label(183), "1-year");
        assert_eq!(label(365), "1-year");
        assert_eq!(label(730), "2-year");
    }

    #[test]
    fn test_short_spans_are_days() {
        assert_eq!(label(1), "1-day");
        assert_eq!(label(7), "7-day");
        assert_eq!(label(0), "1-day");
    }

    #[test]
    fn test_no_zero_or_one_month_in_short_band() {
        for d in 1..=44 {
            let l = label_duration(d);
            assert_ne!(l.unit, DurationUnit::Month, "{d} days labeled {l}");
        }
    }

    #[test]
    fn test_month_labels_start_at_two() {
        for d in 0..=400 {
            let l = label_duration(d);
            if l.unit == DurationUnit::Month {
                assert!(l.count >= 2, "{d} days labeled {l}");
            }
        }
    }

    #[test]
    fn test_checked_rejects_negative() {
        assert_eq!(
            checked_label_duration(-1),
            Err(SeleneError::NegativeDuration { days: -1 })
        );
        assert_eq!(checked_label_duration(14).unwrap().to_string(), "2-week");
    }
}
