//! [`Complex`] definitions.

use common::Date;
use derive_more::{AsRef, Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};

use crate::domain::{slot, SubField};

/// Physical venue composed of several bookable [`SubField`]s.
#[derive(Clone, Debug, PartialEq)]
pub struct Complex {
    /// ID of this [`Complex`].
    pub id: Id,

    /// [`Name`] of this [`Complex`].
    pub name: Name,

    /// [`Address`] of this [`Complex`].
    pub address: Address,

    /// URL of the cover image of this [`Complex`], if any.
    pub image: Option<String>,

    /// Average [`Rating`] of this [`Complex`].
    pub rating: Rating,

    /// Free-form description of this [`Complex`].
    pub description: String,

    /// [`Review`]s of this [`Complex`], newest first.
    pub reviews: Vec<Review>,
}

/// [`Complex`] together with its [`SubField`]s, as seen for a single
/// [`Selection`].
#[derive(Clone, Debug, PartialEq)]
pub struct Detail {
    /// The [`Complex`] itself.
    pub complex: Complex,

    /// [`SubField`]s of the [`Complex`] with prices and availability flags
    /// derived for the [`Selection`].
    pub fields: Vec<SubField>,
}

/// Selector of a [`Detail`]: availability and prices depend on the date and
/// the time slot, so they're never reused across different selections.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Selection {
    /// ID of the [`Complex`].
    pub complex_id: Id,

    /// [`Date`] to check.
    pub date: Date,

    /// [`slot::Id`] to check, if any.
    pub slot_id: Option<slot::Id>,
}

/// ID of a [`Complex`].
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

/// Name of a [`Complex`] or one of its [`SubField`]s.
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
        name.trim() == name && !name.is_empty() && name.len() <= 256
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

/// Postal address of a [`Complex`] or one of its [`SubField`]s.
#[derive(AsRef, Clone, Debug, Default, Display, Eq, Hash, PartialEq)]
#[as_ref(forward)]
pub struct Address(String);

impl Address {
    /// Creates a new [`Address`], trimming surrounding whitespace.
    #[must_use]
    pub fn new(address: impl AsRef<str>) -> Self {
        Self(address.as_ref().trim().to_owned())
    }
}

/// Average review score in `[0, 5]` range.
#[derive(Clone, Copy, Debug, Default, Display, PartialEq, PartialOrd)]
pub struct Rating(f64);

impl Rating {
    /// Highest possible [`Rating`].
    pub const MAX: f64 = 5.0;

    /// Creates a new [`Rating`] if the given `score` is within `[0, 5]`.
    #[must_use]
    pub fn new(score: f64) -> Option<Self> {
        (0.0..=Self::MAX).contains(&score).then_some(Self(score))
    }

    /// Returns the numeric score of this [`Rating`].
    #[must_use]
    pub fn get(self) -> f64 {
        self.0
    }
}

/// Review left by a visitor of a [`Complex`].
#[derive(Clone, Debug, PartialEq)]
pub struct Review {
    /// Display name of the review author.
    pub author: String,

    /// [`Rating`] given by the author.
    pub rating: Rating,

    /// Review text.
    pub comment: String,
}
