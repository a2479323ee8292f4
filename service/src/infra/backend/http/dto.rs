//! Records of the booking site's REST API and their normalization.
//!
//! The upstream API isn't consistent in naming, so every record accepts all
//! the known spellings of its keys and is normalized into a domain type
//! right here.

use common::{Currency, Money};
use rust_decimal::Decimal;
use serde::Deserialize;
use time::{format_description::FormatItem, macros::format_description};

use crate::{
    domain::{complex, field, slot, SubField, TimeSlot},
    infra::backend::Error,
};

/// Short `HH:MM` time-of-day format.
const SHORT_TIME: &[FormatItem<'static>] =
    format_description!("[hour]:[minute]");

/// Full `HH:MM:SS` time-of-day format.
const FULL_TIME: &[FormatItem<'static>] =
    format_description!("[hour]:[minute]:[second]");

/// Highest accepted price of a [`SubField`], in whole currency units.
///
/// Bundle and recurring totals multiply a price by a few million at most,
/// and have to stay within the [`Decimal`] range.
const MAX_PRICE: i64 = 1_000_000_000_000_000;

/// [`TimeSlot`] record.
#[derive(Debug, Deserialize)]
pub(super) struct Slot {
    #[serde(rename = "slotId", alias = "SlotID", alias = "slotID")]
    slot_id: Option<u32>,

    id: Option<u32>,

    #[serde(alias = "Name", alias = "slotName", alias = "SlotName")]
    name: String,

    #[serde(rename = "startTime", alias = "StartTime")]
    start_time: String,

    #[serde(rename = "endTime", alias = "EndTime")]
    end_time: String,
}

impl TryFrom<Slot> for TimeSlot {
    type Error = Error;

    fn try_from(rec: Slot) -> Result<Self, Self::Error> {
        let id = rec
            .slot_id
            .or(rec.id)
            .ok_or_else(|| malformed("time slot without ID"))?;
        Ok(Self {
            id: slot::Id::from(id),
            name: slot::Name::new(rec.name.trim())
                .ok_or_else(|| malformed("blank time slot name"))?,
            start: parse_time(&rec.start_time)?,
            end: parse_time(&rec.end_time)?,
        })
    }
}

/// [`complex::Detail`] record.
#[derive(Debug, Deserialize)]
pub(super) struct Detail {
    #[serde(alias = "Complex")]
    complex: Complex,

    #[serde(
        default,
        alias = "Fields",
        alias = "subFields",
        alias = "SubFields"
    )]
    fields: Vec<Field>,
}

impl Detail {
    /// Normalizes this [`Detail`] record, assigning the provided
    /// [`Currency`] to all the prices.
    pub(super) fn normalize(
        self,
        currency: Currency,
    ) -> Result<complex::Detail, Error> {
        let Self { complex, fields } = self;

        let complex = complex.normalize()?;
        let fields = fields
            .into_iter()
            .map(|f| f.normalize(&complex, currency))
            .collect::<Result<_, _>>()?;

        Ok(complex::Detail { complex, fields })
    }
}

/// [`complex::Complex`] record.
#[derive(Debug, Deserialize)]
struct Complex {
    #[serde(rename = "complexId", alias = "ComplexID", alias = "complexID")]
    complex_id: Option<u32>,

    id: Option<u32>,

    #[serde(alias = "Name", alias = "complexName", alias = "ComplexName")]
    name: String,

    #[serde(default, alias = "Address")]
    address: String,

    #[serde(alias = "Image", alias = "imageUrl", alias = "ImageURL")]
    image: Option<String>,

    #[serde(default, alias = "Rating")]
    rating: Option<f64>,

    #[serde(default, alias = "Description")]
    description: Option<String>,

    #[serde(default, alias = "Reviews")]
    reviews: Vec<Review>,
}

impl Complex {
    /// Normalizes this [`Complex`] record.
    fn normalize(self) -> Result<complex::Complex, Error> {
        let id = self
            .complex_id
            .or(self.id)
            .ok_or_else(|| malformed("complex without ID"))?;
        Ok(complex::Complex {
            id: complex::Id::from(id),
            name: complex::Name::new(self.name.trim())
                .ok_or_else(|| malformed("blank complex name"))?,
            address: complex::Address::new(self.address),
            image: non_blank(self.image),
            rating: rating(self.rating),
            description: self.description.unwrap_or_default(),
            reviews: self.reviews.into_iter().map(Review::normalize).collect(),
        })
    }
}

/// [`complex::Review`] record.
#[derive(Debug, Deserialize)]
struct Review {
    #[serde(
        default,
        alias = "Author",
        alias = "userName",
        alias = "UserName"
    )]
    author: String,

    #[serde(default, alias = "Rating")]
    rating: Option<f64>,

    #[serde(default, alias = "Comment")]
    comment: String,
}

impl Review {
    /// Normalizes this [`Review`] record.
    fn normalize(self) -> complex::Review {
        complex::Review {
            author: self.author,
            rating: rating(self.rating),
            comment: self.comment,
        }
    }
}

/// [`SubField`] record.
#[derive(Debug, Deserialize)]
struct Field {
    #[serde(rename = "fieldId", alias = "FieldID", alias = "fieldID")]
    field_id: Option<u32>,

    id: Option<u32>,

    #[serde(rename = "complexId", alias = "ComplexID", alias = "complexID")]
    complex_id: Option<u32>,

    #[serde(alias = "Name", alias = "fieldName", alias = "FieldName")]
    name: String,

    #[serde(alias = "Address")]
    address: Option<String>,

    #[serde(alias = "Image", alias = "imageUrl", alias = "ImageURL")]
    image: Option<String>,

    #[serde(
        default,
        rename = "typeName",
        alias = "TypeName",
        alias = "fieldTypeName",
        alias = "FieldTypeName"
    )]
    type_name: String,

    #[serde(
        rename = "priceForSelectedSlot",
        alias = "PriceForSelectedSlot"
    )]
    price_for_selected_slot: Option<Decimal>,

    #[serde(alias = "Price")]
    price: Option<Decimal>,

    #[serde(
        rename = "isAvailableForSelectedSlot",
        alias = "IsAvailableForSelectedSlot"
    )]
    is_available_for_selected_slot: Option<bool>,

    #[serde(rename = "isAvailable", alias = "IsAvailable")]
    is_available: Option<bool>,

    #[serde(default, alias = "Amenities")]
    amenities: Vec<String>,

    #[serde(default, alias = "Rating")]
    rating: Option<f64>,

    #[serde(default, rename = "reviewCount", alias = "ReviewCount")]
    review_count: u32,

    #[serde(default, rename = "isFavorite", alias = "IsFavorite")]
    is_favorite: bool,
}

impl Field {
    /// Normalizes this [`Field`] record of the provided [`complex::Complex`].
    ///
    /// Missing address and image are inherited from the
    /// [`complex::Complex`].
    fn normalize(
        self,
        complex: &complex::Complex,
        currency: Currency,
    ) -> Result<SubField, Error> {
        let id = self
            .field_id
            .or(self.id)
            .ok_or_else(|| malformed("field without ID"))?;

        let amount = self
            .price_for_selected_slot
            .or(self.price)
            .unwrap_or_default();
        if amount < Decimal::ZERO {
            return Err(malformed(format!("field {id} has negative price")));
        }
        if amount > Decimal::from(MAX_PRICE) {
            return Err(malformed(format!(
                "field {id} has price {amount} above {MAX_PRICE}",
            )));
        }

        Ok(SubField {
            id: field::Id::from(id),
            complex_id: self.complex_id.map_or(complex.id, complex::Id::from),
            name: complex::Name::new(self.name.trim())
                .ok_or_else(|| malformed(format!("field {id} has no name")))?,
            address: self.address.map_or_else(
                || complex.address.clone(),
                complex::Address::new,
            ),
            image: non_blank(self.image).or_else(|| complex.image.clone()),
            type_name: self.type_name,
            price: Money { amount, currency }.round(),
            is_available: self
                .is_available_for_selected_slot
                .or(self.is_available)
                .unwrap_or(false),
            amenities: self.amenities,
            rating: rating(self.rating),
            review_count: self.review_count,
            is_favorite: self.is_favorite,
        })
    }
}

/// Parses a time of day in `HH:MM` or `HH:MM:SS` format.
fn parse_time(s: &str) -> Result<time::Time, Error> {
    let s = s.trim();
    time::Time::parse(s, SHORT_TIME)
        .or_else(|_| time::Time::parse(s, FULL_TIME))
        .map_err(|e| malformed(format!("invalid time `{s}`: {e}")))
}

/// Clamps an upstream score into a valid [`complex::Rating`].
fn rating(score: Option<f64>) -> complex::Rating {
    score
        .and_then(|s| complex::Rating::new(s.clamp(0.0, complex::Rating::MAX)))
        .unwrap_or_default()
}

/// Drops blank strings.
fn non_blank(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.trim().is_empty())
}

/// Creates an [`Error::Malformed`] with the provided description.
fn malformed(msg: impl Into<String>) -> Error {
    Error::Malformed(msg.into())
}
