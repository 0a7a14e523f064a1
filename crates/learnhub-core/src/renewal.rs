// ── Subscription extension math ──
//
// Two deliberately different arithmetics live here:
//
// - the extension itself uses true calendar months (Jan 10 + 3 months =
//   Apr 10, with end-of-month clamping), because that is what the new
//   endDate becomes;
// - the remaining-time breakdown shown beside it divides whole days by
//   30. That is a display approximation the product has always shown,
//   and the numbers users see must not change. Do not "fix" one to
//   match the other.

use std::fmt;

use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::model::Expiry;

/// How many months one renewal purchase adds.
pub const EXTENSION_MONTHS: u32 = 3;

/// Add true calendar months, clamping to the end of shorter months
/// (Jan 31 + 3 months = Apr 30).
///
/// `None` only on date overflow, far outside any plausible subscription.
pub fn add_calendar_months(instant: DateTime<Utc>, months: u32) -> Option<DateTime<Utc>> {
    instant.checked_add_months(Months::new(months))
}

/// Remaining subscription time, decomposed for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemainingTime {
    pub months: i64,
    pub days: i64,
}

impl RemainingTime {
    /// Split a whole-day count into `{months, days}` using 30-day
    /// months. Negative inputs (already expired) clamp to zero.
    pub fn from_days(days: i64) -> Self {
        let days = days.max(0);
        Self {
            months: days / 30,
            days: days % 30,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.months == 0 && self.days == 0
    }
}

impl fmt::Display for RemainingTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.months, self.days) {
            (0, days) => write!(f, "{days} days"),
            (months, 0) => write!(f, "{months} months"),
            (months, days) => write!(f, "{months} months {days} days"),
        }
    }
}

/// What a renewal purchase would do, shown to the user before they pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionPreview {
    pub current_end: DateTime<Utc>,
    pub new_end: DateTime<Utc>,
    pub remaining: RemainingTime,
}

/// Compute the preview for extending a subscription that ends at
/// `expiry` by `months` calendar months.
///
/// The new end extends the *existing* end date, even when that date has
/// already passed -- matching how the backend applies renewals. Lifetime
/// subscriptions have nothing to extend, and an invalid expiry fails
/// closed instead of inventing a date.
pub fn extension_preview(
    expiry: Expiry,
    now: DateTime<Utc>,
    months: u32,
) -> Result<ExtensionPreview, CoreError> {
    let current_end = match expiry {
        Expiry::At(end) => end,
        Expiry::Lifetime => {
            return Err(CoreError::ValidationFailed {
                message: "a lifetime subscription has no expiry to extend".into(),
            });
        }
        Expiry::Invalid => {
            return Err(CoreError::ValidationFailed {
                message: "subscription expiry is unreadable; refusing to compute a renewal".into(),
            });
        }
    };

    let new_end = add_calendar_months(current_end, months).ok_or_else(|| {
        CoreError::ValidationFailed {
            message: format!("extending past {current_end} overflows the calendar"),
        }
    })?;

    let remaining = RemainingTime::from_days((current_end - now).num_days());

    Ok(ExtensionPreview {
        current_end,
        new_end,
        remaining,
    })
}
