//! Domain definitions.

pub mod availability;
pub mod booking;
pub mod complex;
pub mod field;
pub mod preferences;
pub mod recurrence;
pub mod slot;
pub mod user;

pub use self::{
    availability::Availability, booking::Intent, complex::Complex,
    field::SubField, preferences::Preferences, slot::TimeSlot,
};
