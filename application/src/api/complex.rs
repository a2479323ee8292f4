//! [`Complex`]-related definitions.

use common::Money;
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLObject, GraphQLScalar};
use service::{domain, query};

use crate::{
    api::{self, scalar},
    Context,
};

/// Everything shown on a [`Complex`] page for one date and time slot.
#[derive(Debug, From)]
pub struct Page(query::availability::Output);

/// Everything shown on a `Complex` page for one date and time slot.
#[graphql_object(name = "ComplexPage", context = Context)]
impl Page {
    /// Whole catalog of `TimeSlot`s to pick from.
    #[must_use]
    pub fn time_slots(&self) -> Vec<api::TimeSlot> {
        self.0.slots.iter().cloned().map(Into::into).collect()
    }

    /// The `Complex` itself.
    #[must_use]
    pub fn complex(&self) -> Complex {
        self.0.detail.complex.clone().into()
    }

    /// `SubField`s of the `Complex` with prices and availability of the
    /// selected date and time slot.
    #[must_use]
    pub fn fields(&self) -> Vec<SubField> {
        self.0.detail.fields.iter().cloned().map(Into::into).collect()
    }

    /// `Availability` summary over the `SubField`s.
    #[must_use]
    pub fn availability(&self) -> Availability {
        self.0.availability.into()
    }
}

/// Physical venue composed of several bookable `SubField`s.
#[derive(Clone, Debug, From)]
pub struct Complex(domain::Complex);

/// Physical venue composed of several bookable `SubField`s.
#[graphql_object(context = Context)]
impl Complex {
    /// Unique identifier of this `Complex`.
    #[must_use]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Name of this `Complex`.
    #[must_use]
    pub fn name(&self) -> &str {
        self.0.name.as_ref()
    }

    /// Postal address of this `Complex`.
    #[must_use]
    pub fn address(&self) -> &str {
        self.0.address.as_ref()
    }

    /// URL of the cover image of this `Complex`, if any.
    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.0.image.as_deref()
    }

    /// Average rating of this `Complex` in `[0, 5]` range.
    #[must_use]
    pub fn rating(&self) -> f64 {
        self.0.rating.get()
    }

    /// Free-form description of this `Complex`.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.0.description
    }

    /// `Review`s of this `Complex`, newest first.
    #[must_use]
    pub fn reviews(&self) -> Vec<Review> {
        self.0.reviews.iter().map(Review::from).collect()
    }
}

/// Single bookable pitch within a `Complex`.
#[derive(Clone, Debug, From)]
pub struct SubField(domain::SubField);

/// Single bookable pitch within a `Complex`.
#[graphql_object(context = Context)]
impl SubField {
    /// Unique identifier of this `SubField`.
    #[must_use]
    pub fn id(&self) -> FieldId {
        self.0.id.into()
    }

    /// Name of this `SubField`.
    #[must_use]
    pub fn name(&self) -> &str {
        self.0.name.as_ref()
    }

    /// Postal address of this `SubField`.
    #[must_use]
    pub fn address(&self) -> &str {
        self.0.address.as_ref()
    }

    /// URL of the image of this `SubField`, if any.
    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.0.image.as_deref()
    }

    /// Name of the pitch type.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.0.type_name
    }

    /// Price of this `SubField` for the selected time slot.
    #[must_use]
    pub fn price(&self) -> Money {
        self.0.price
    }

    /// Indicator whether this `SubField` is free for the selected time slot.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.0.is_available
    }

    /// Amenities offered, in display order.
    #[must_use]
    pub fn amenities(&self) -> &[String] {
        &self.0.amenities
    }

    /// Average rating of this `SubField` in `[0, 5]` range.
    #[must_use]
    pub fn rating(&self) -> f64 {
        self.0.rating.get()
    }

    /// Number of reviews the rating is based on.
    #[must_use]
    pub fn review_count(&self) -> i32 {
        saturating_i32(self.0.review_count)
    }

    /// Indicator whether the viewer marked this `SubField` as a favorite.
    #[must_use]
    pub fn is_favorite(&self) -> bool {
        self.0.is_favorite
    }
}

/// Review of a `Complex`.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(name = "ComplexReview", context = Context)]
pub struct Review {
    /// Display name of the author.
    pub author: String,

    /// Rating given by the author in `[0, 5]` range.
    pub rating: f64,

    /// Review text.
    pub comment: String,
}

impl From<&domain::complex::Review> for Review {
    fn from(review: &domain::complex::Review) -> Self {
        Self {
            author: review.author.clone(),
            rating: review.rating.get(),
            comment: review.comment.clone(),
        }
    }
}

/// Availability summary of a [`Complex`].
#[derive(Clone, Copy, Debug, From)]
pub struct Availability(domain::Availability);

/// Availability and price summary of a `Complex` for one date and
/// (optionally) one time slot.
#[graphql_object(context = Context)]
impl Availability {
    /// Total number of `SubField`s.
    #[must_use]
    pub fn total_count(&self) -> i32 {
        saturating_i32(self.0.total_count)
    }

    /// Number of `SubField`s free for the selected time slot.
    #[must_use]
    pub fn available_count(&self) -> i32 {
        saturating_i32(self.0.available_count)
    }

    /// Minimum positive `SubField` price, or zero if there is none.
    #[must_use]
    pub fn min_price(&self) -> Money {
        self.0.min_price
    }

    /// Number of `SubField`s forming one bundle of the whole `Complex`.
    #[must_use]
    pub fn compose_count(&self) -> i32 {
        saturating_i32(self.0.compose_count.get())
    }

    /// Price of a whole bundle at `minPrice`.
    #[must_use]
    pub fn min_price_big(&self) -> Money {
        self.0.min_price_big
    }

    /// Minimum price among the available `SubField`s of the selected time
    /// slot.
    #[must_use]
    pub fn selected_slot_price(&self) -> Option<Money> {
        self.0.selected_slot_price
    }

    /// Price of a whole bundle at `selectedSlotPrice`.
    #[must_use]
    pub fn selected_slot_price_big(&self) -> Option<Money> {
        self.0.selected_slot_price_big
    }

    /// Number of bundles which may still be booked.
    #[must_use]
    pub fn available_bundles(&self) -> i32 {
        saturating_i32(self.0.available_bundles)
    }

    /// Number of bundles the `Complex` is able to form.
    #[must_use]
    pub fn total_bundles(&self) -> i32 {
        saturating_i32(self.0.total_bundles)
    }
}

/// Unique identifier of a `Complex`.
#[derive(AsRef, Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "ComplexId", with = scalar::Via::<domain::complex::Id>)]
pub struct Id(domain::complex::Id);

/// Unique identifier of a `SubField`.
#[derive(AsRef, Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "SubFieldId", with = scalar::Via::<domain::field::Id>)]
pub struct FieldId(domain::field::Id);

/// Converts a counter into a GraphQL `Int`.
pub(crate) fn saturating_i32(n: u32) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}
