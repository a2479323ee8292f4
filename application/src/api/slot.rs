//! [`TimeSlot`]-related definitions.

use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLScalar};
use service::domain;

use crate::{api::scalar, Context};

/// Time-of-day interval offered for booking.
#[derive(Clone, Debug, From)]
pub struct TimeSlot(domain::TimeSlot);

/// Time-of-day interval offered for booking.
#[graphql_object(context = Context)]
impl TimeSlot {
    /// Unique identifier of this `TimeSlot`.
    #[must_use]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Human-readable name of this `TimeSlot`.
    #[must_use]
    pub fn name(&self) -> &str {
        self.0.name.as_ref()
    }

    /// Time of day this `TimeSlot` starts at, in `HH:MM` format.
    #[must_use]
    pub fn start_time(&self) -> String {
        hh_mm(self.0.start)
    }

    /// Time of day this `TimeSlot` ends at, in `HH:MM` format.
    #[must_use]
    pub fn end_time(&self) -> String {
        hh_mm(self.0.end)
    }
}

/// Unique identifier of a `TimeSlot`.
#[derive(AsRef, Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "TimeSlotId", with = scalar::Via::<domain::slot::Id>)]
pub struct Id(domain::slot::Id);

/// Formats the provided time of day as `HH:MM`.
fn hh_mm(t: time::Time) -> String {
    format!("{:02}:{:02}", t.hour(), t.minute())
}
