//! [`TimeSlot`] definitions.

use derive_more::{AsRef, Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};

/// Time-of-day interval offered for booking.
///
/// Reference data loaded from the slot catalog, never mutated locally.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TimeSlot {
    /// ID of this [`TimeSlot`].
    pub id: Id,

    /// Human-readable [`Name`] of this [`TimeSlot`].
    pub name: Name,

    /// Time of day this [`TimeSlot`] starts at.
    pub start: time::Time,

    /// Time of day this [`TimeSlot`] ends at.
    pub end: time::Time,
}

/// ID of a [`TimeSlot`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
pub struct Id(u32);

/// Name of a [`TimeSlot`], like `Ca tối 18:00`.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(forward)]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 128
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `TimeSlot` name")
    }
}
