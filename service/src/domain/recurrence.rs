//! Weekly recurring bookings and their pricing.

use std::collections::BTreeSet;

use common::{Date, Money, Percent, Weekday};
use rust_decimal::Decimal;

/// Weekly repetition of a booking on the selected [`Weekday`]s within a
/// date range.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Plan {
    /// First [`Date`] of the range.
    pub range_start: Date,

    /// Last [`Date`] of the range.
    pub range_end: Date,

    /// [`Weekday`]s the booking repeats on.
    pub repeat_days: BTreeSet<Weekday>,

    /// Price of a single session.
    pub unit_price: Money,
}

impl Plan {
    /// Returns the number of weeks the range of this [`Plan`] spans, rounded
    /// up.
    ///
    /// Zero is returned for an empty or inverted range.
    #[must_use]
    pub fn weeks(&self) -> u32 {
        weeks_between(self.range_start, self.range_end)
    }

    /// Returns the total number of sessions in this [`Plan`].
    #[must_use]
    pub fn total_sessions(&self) -> u32 {
        let days = u32::try_from(self.repeat_days.len()).unwrap_or(u32::MAX);
        days.saturating_mul(self.weeks())
    }

    /// Calculates the [`Quote`] of this [`Plan`].
    ///
    /// The minimum weeks requirement is not applied here, see
    /// [`Plan::meets_minimum()`].
    #[must_use]
    pub fn quote(&self) -> Quote {
        let total_sessions = self.total_sessions();
        let discount = discount_for(total_sessions);

        let subtotal = self.unit_price.times(total_sessions);
        let discount_amount = subtotal.share(discount);
        let total = Money {
            amount: subtotal.amount - discount_amount.amount,
            currency: subtotal.currency,
        };

        Quote {
            weeks: self.weeks(),
            total_sessions,
            subtotal,
            discount,
            discount_amount,
            total,
        }
    }

    /// Indicates whether this [`Plan`] spans at least `min_weeks` weeks.
    #[must_use]
    pub fn meets_minimum(&self, min_weeks: u32) -> bool {
        self.weeks() >= min_weeks
    }
}

/// Price summary of a [`Plan`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Quote {
    /// Number of weeks the [`Plan`] spans.
    pub weeks: u32,

    /// Total number of sessions.
    pub total_sessions: u32,

    /// Price of all the sessions before discount.
    pub subtotal: Money,

    /// Discount applied to the [`Quote::subtotal`].
    pub discount: Percent,

    /// Discounted amount, rounded half-up to whole units.
    pub discount_amount: Money,

    /// Price to pay: [`Quote::subtotal`] minus [`Quote::discount_amount`].
    pub total: Money,
}

/// Discount tiers by the minimum number of sessions, highest first.
const DISCOUNT_TIERS: [(u32, u8); 3] = [(16, 15), (8, 10), (4, 5)];

/// Returns the discount [`Percent`] for the provided number of sessions.
#[must_use]
pub fn discount_for(total_sessions: u32) -> Percent {
    DISCOUNT_TIERS
        .iter()
        .find(|(min, _)| total_sessions >= *min)
        .and_then(|(_, pct)| Percent::new(Decimal::from(*pct)))
        .unwrap_or(Percent::ZERO)
}

/// Returns the number of weeks between the provided [`Date`]s, rounded up.
///
/// Zero is returned if `end` doesn't follow `start`.
#[must_use]
pub fn weeks_between(start: Date, end: Date) -> u32 {
    u64::try_from(start.days_until(end))
        .map_or(0, |days| {
            u32::try_from(days.div_ceil(7)).unwrap_or(u32::MAX)
        })
}
