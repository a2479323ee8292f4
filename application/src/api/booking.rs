//! Booking-related definitions.

use common::{Date, Money, Percent};
use derive_more::From;
use juniper::{graphql_object, GraphQLInputObject, GraphQLObject};
use service::{
    domain::{
        self,
        booking::{Mode, Recurrence},
    },
    query,
};

use crate::{
    api::{self, complex::saturating_i32, scalar},
    Context,
};

/// Booking request as picked on a `Complex` page.
#[derive(Clone, Debug, GraphQLInputObject)]
#[graphql(name = "BookingInput")]
pub struct Input {
    /// ID of the `Complex` to book in.
    pub complex_id: api::complex::Id,

    /// ID of the `SubField` to book.
    ///
    /// A bundle of the whole `Complex` is booked if omitted.
    pub field_id: Option<api::complex::FieldId>,

    /// Date to book.
    pub date: Option<Date>,

    /// `TimeSlot` to book.
    pub slot_id: Option<api::slot::Id>,

    /// Weekly recurrence of the booking.
    ///
    /// A single session is booked if omitted.
    pub recurrence: Option<RecurrenceInput>,
}

/// Weekly recurrence of a booking.
#[derive(Clone, Debug, GraphQLInputObject)]
pub struct RecurrenceInput {
    /// First date of the range.
    pub range_start: Option<Date>,

    /// Last date of the range.
    pub range_end: Option<Date>,

    /// Days of the week to repeat on.
    pub repeat_days: Vec<scalar::Weekday>,
}

impl From<RecurrenceInput> for Mode {
    fn from(input: RecurrenceInput) -> Self {
        Self::Recurring(Recurrence {
            range_start: input.range_start,
            range_end: input.range_end,
            repeat_days: input
                .repeat_days
                .into_iter()
                .map(Into::into)
                .collect(),
        })
    }
}

/// Booking handed to the booking site.
#[derive(Clone, Debug, From)]
pub struct Intent(domain::Intent);

/// Booking handed to the booking site.
#[graphql_object(name = "BookingIntent", context = Context)]
impl Intent {
    /// Booked `SubField` ID, or `complex-{id}` for a bundle of a whole
    /// `Complex`.
    #[must_use]
    pub fn target(&self) -> String {
        self.0.target.to_string()
    }

    /// Booked date.
    #[must_use]
    pub fn date(&self) -> Date {
        self.0.date
    }

    /// ID of the booked `TimeSlot`.
    #[must_use]
    pub fn slot_id(&self) -> api::slot::Id {
        self.0.slot_id.into()
    }

    /// Name of the booked `TimeSlot`.
    #[must_use]
    pub fn slot_name(&self) -> &str {
        self.0.slot_name.as_ref()
    }

    /// Price of a single session.
    #[must_use]
    pub fn price(&self) -> Money {
        self.0.price
    }

    /// Price of the whole booking.
    #[must_use]
    pub fn total_price(&self) -> Money {
        self.0.total_price
    }

    /// Indicator whether the booking repeats weekly.
    #[must_use]
    pub fn is_recurring(&self) -> bool {
        self.0.is_recurring_preset
    }

    /// Number of weeks the booking repeats for.
    #[must_use]
    pub fn recurring_weeks(&self) -> i32 {
        saturating_i32(self.0.recurring_weeks_preset)
    }

    /// Days of the week the booking repeats on.
    #[must_use]
    pub fn repeat_days(&self) -> Vec<scalar::Weekday> {
        self.0
            .selected_days_preset
            .iter()
            .copied()
            .map(Into::into)
            .collect()
    }

    /// First date of a recurring booking.
    #[must_use]
    pub fn range_start(&self) -> Option<Date> {
        self.0.range_start
    }

    /// Last date of a recurring booking.
    #[must_use]
    pub fn range_end(&self) -> Option<Date> {
        self.0.range_end
    }
}

/// Price of a weekly recurring booking.
#[derive(Clone, Debug, From)]
pub struct RecurringQuote(query::recurring_quote::Output);

/// Price of a weekly recurring booking, before it's submitted.
#[graphql_object(context = Context)]
impl RecurringQuote {
    /// Price of a single session.
    #[must_use]
    pub fn unit_price(&self) -> Money {
        self.0.plan.unit_price
    }

    /// Number of weeks the range spans.
    #[must_use]
    pub fn weeks(&self) -> i32 {
        saturating_i32(self.0.quote.weeks)
    }

    /// Total number of sessions.
    #[must_use]
    pub fn total_sessions(&self) -> i32 {
        saturating_i32(self.0.quote.total_sessions)
    }

    /// Price of all the sessions before discount.
    #[must_use]
    pub fn subtotal(&self) -> Money {
        self.0.quote.subtotal
    }

    /// Discount applied to the `subtotal`.
    #[must_use]
    pub fn discount(&self) -> Percent {
        self.0.quote.discount
    }

    /// Discounted amount.
    #[must_use]
    pub fn discount_amount(&self) -> Money {
        self.0.quote.discount_amount
    }

    /// Price to pay.
    #[must_use]
    pub fn total(&self) -> Money {
        self.0.quote.total
    }

    /// Minimum number of weeks a recurring booking must span.
    #[must_use]
    pub fn min_weeks(&self) -> i32 {
        saturating_i32(self.0.min_weeks)
    }

    /// Indicator whether the range is long enough to be booked.
    #[must_use]
    pub fn meets_minimum(&self) -> bool {
        self.0.meets_minimum
    }
}

/// Cheapest and priciest `TimeSlot`s of a `Complex` on a date.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(context = Context)]
pub struct SlotExtremes {
    /// `TimeSlot` with the lowest positive price, if any.
    pub cheapest: Option<SlotPrice>,

    /// `TimeSlot` with the highest price, if any.
    pub priciest: Option<SlotPrice>,
}

impl From<domain::availability::Extremes> for SlotExtremes {
    fn from(e: domain::availability::Extremes) -> Self {
        Self {
            cheapest: e.cheapest.map(Into::into),
            priciest: e.priciest.map(Into::into),
        }
    }
}

/// Minimum `SubField` price of a `TimeSlot`.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(context = Context)]
pub struct SlotPrice {
    /// The `TimeSlot`.
    pub slot: api::TimeSlot,

    /// Minimum positive `SubField` price, or zero if there is none.
    pub price: Money,
}

impl From<domain::availability::SlotPrice> for SlotPrice {
    fn from(sp: domain::availability::SlotPrice) -> Self {
        Self {
            slot: sp.slot.into(),
            price: sp.price,
        }
    }
}
