//! GraphQL [`Query`]s definitions.

use common::Date;
use juniper::graphql_object;
use service::{domain::complex, query, Query as _};

use crate::{api, define_error, AsError, Context, Error};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    const SPAN_NAME: &'static str = "GraphQL query";
}

#[graphql_object(context = Context)]
impl Query {
    /// Returns the whole catalog of `TimeSlot`s.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "timeSlots",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn time_slots(
        ctx: &Context,
    ) -> Result<Vec<api::TimeSlot>, Error> {
        ctx.service()
            .execute(query::slot::All::by(()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|slots| slots.into_iter().map(Into::into).collect())
    }

    /// Returns the `Complex` page for the specified date and (optionally)
    /// `TimeSlot`.
    ///
    /// `SubField`s marked as favorites locally are reported so, if the
    /// request is authenticated.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NOT_FOUND` - the `Complex` with the specified ID does not exist;
    /// - `BACKEND_UNAVAILABLE` - the booking site cannot be reached.
    #[tracing::instrument(
        skip_all,
        fields(
            date = %date,
            gql.name = "complex",
            id = %id,
            otel.name = Self::SPAN_NAME,
            slot_id = ?slot_id.map(|id| id.to_string()),
        ),
    )]
    pub async fn complex(
        id: api::complex::Id,
        date: Date,
        slot_id: Option<api::slot::Id>,
        ctx: &Context,
    ) -> Result<api::complex::Page, Error> {
        let viewer = ctx.try_current_session().await?.map(|s| s.user_id);
        ctx.service()
            .execute(query::ComplexAvailability {
                selection: complex::Selection {
                    complex_id: id.into(),
                    date,
                    slot_id: slot_id.map(Into::into),
                },
                viewer,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the `SubField`s of the specified `Complex` with their prices
    /// and availability for the specified date and (optionally) `TimeSlot`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NOT_FOUND` - the `Complex` with the specified ID does not exist;
    /// - `BACKEND_UNAVAILABLE` - the booking site cannot be reached.
    #[tracing::instrument(
        skip_all,
        fields(
            complex_id = %complex_id,
            date = %date,
            gql.name = "subFields",
            otel.name = Self::SPAN_NAME,
            slot_id = ?slot_id.map(|id| id.to_string()),
        ),
    )]
    pub async fn sub_fields(
        complex_id: api::complex::Id,
        date: Date,
        slot_id: Option<api::slot::Id>,
        ctx: &Context,
    ) -> Result<Vec<api::complex::SubField>, Error> {
        ctx.service()
            .execute(query::complex::Detail::by(complex::Selection {
                complex_id: complex_id.into(),
                date,
                slot_id: slot_id.map(Into::into),
            }))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|d| d.fields.into_iter().map(Into::into).collect())
    }

    /// Returns the cheapest and the priciest `TimeSlot`s of the specified
    /// `Complex` on the specified date.
    ///
    /// `TimeSlot`s whose prices cannot be fetched are skipped.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `BACKEND_UNAVAILABLE` - the `TimeSlot` catalog cannot be fetched.
    #[tracing::instrument(
        skip_all,
        fields(
            complex_id = %complex_id,
            date = %date,
            gql.name = "slotExtremes",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn slot_extremes(
        complex_id: api::complex::Id,
        date: Date,
        ctx: &Context,
    ) -> Result<api::booking::SlotExtremes, Error> {
        ctx.service()
            .execute(query::SlotExtremes {
                complex_id: complex_id.into(),
                date,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Prices a weekly recurring booking before it's submitted.
    ///
    /// The whole `Complex` bundle is priced if `fieldId` is omitted.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `FIELD_NOT_EXISTS` - the `SubField` with the specified ID is not
    ///                        in the `Complex`;
    /// - `NOT_FOUND` - the `Complex` with the specified ID does not exist;
    /// - `BACKEND_UNAVAILABLE` - the booking site cannot be reached.
    #[tracing::instrument(
        skip_all,
        fields(
            complex_id = %complex_id,
            date = %date,
            field_id = ?field_id.map(|id| id.to_string()),
            gql.name = "recurringQuote",
            otel.name = Self::SPAN_NAME,
            range_end = %range_end,
            range_start = %range_start,
            slot_id = ?slot_id.map(|id| id.to_string()),
        ),
    )]
    pub async fn recurring_quote(
        complex_id: api::complex::Id,
        date: Date,
        slot_id: Option<api::slot::Id>,
        field_id: Option<api::complex::FieldId>,
        range_start: Date,
        range_end: Date,
        repeat_days: Vec<api::scalar::Weekday>,
        ctx: &Context,
    ) -> Result<api::booking::RecurringQuote, Error> {
        ctx.service()
            .execute(query::RecurringQuote {
                selection: complex::Selection {
                    complex_id: complex_id.into(),
                    date,
                    slot_id: slot_id.map(Into::into),
                },
                field_id: field_id.map(Into::into),
                range_start,
                range_end,
                repeat_days: repeat_days.into_iter().map(Into::into).collect(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the `Preferences` of the authenticated user.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authenticated.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "myPreferences",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn my_preferences(
        ctx: &Context,
    ) -> Result<api::Preferences, Error> {
        let my_id = ctx.current_session().await?.user_id;
        ctx.service()
            .execute(query::preferences::ByUserId::by(my_id))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }
}

impl AsError for query::availability::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Backend(e) => e.try_as_error(),
            Self::Store(e) => e.try_as_error(),
        }
    }
}

impl AsError for query::recurring_quote::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Backend(e) => e.try_as_error(),
            Self::FieldNotFound(_) => Some(FieldError::NotExists.into()),
        }
    }
}

define_error! {
    enum FieldError {
        #[code = "FIELD_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`SubField` with the provided ID does not exist in the \
                     `Complex`"]
        NotExists,
    }
}
