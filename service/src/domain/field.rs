//! [`SubField`] definitions.

use common::Money;
use derive_more::{Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};

use crate::domain::complex;
#[cfg(doc)]
use crate::domain::{slot::TimeSlot, Complex};

/// Single bookable pitch within a [`Complex`].
///
/// Price and availability are derived for one date and one [`TimeSlot`], so
/// a [`SubField`] is always fetched fresh for each such pair.
#[derive(Clone, Debug, PartialEq)]
pub struct SubField {
    /// ID of this [`SubField`].
    pub id: Id,

    /// ID of the [`Complex`] owning this [`SubField`].
    pub complex_id: complex::Id,

    /// Name of this [`SubField`].
    pub name: complex::Name,

    /// Address of this [`SubField`].
    pub address: complex::Address,

    /// URL of the image of this [`SubField`], if any.
    pub image: Option<String>,

    /// Name of the pitch type, like `Sân 5 người`.
    pub type_name: String,

    /// Price of this [`SubField`] for the selected slot, never negative.
    pub price: Money,

    /// Indicator whether this [`SubField`] is free for the selected slot.
    pub is_available: bool,

    /// Amenities offered, in display order.
    pub amenities: Vec<String>,

    /// Average [`complex::Rating`] of this [`SubField`].
    pub rating: complex::Rating,

    /// Number of reviews the [`rating`] is based on.
    ///
    /// [`rating`]: SubField::rating
    pub review_count: u32,

    /// Indicator whether the viewer marked this [`SubField`] as a favorite.
    pub is_favorite: bool,
}

/// ID of a [`SubField`].
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
