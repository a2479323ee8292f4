//! GraphQL [`Mutation`]s definitions.

use juniper::graphql_object;
use service::{command, domain::booking, Command as _};

use crate::{api, define_error, AsError, Context, Error};

/// Root of all GraphQL mutations.
#[derive(Clone, Copy, Debug)]
pub struct Mutation;

impl Mutation {
    /// Name of the [`tracing::Span`] for the mutations.
    const SPAN_NAME: &'static str = "GraphQL mutation";
}

#[graphql_object(context = Context)]
impl Mutation {
    /// Submits a booking of a `SubField`, or of a bundle of a whole `Complex`
    /// if no `fieldId` is provided.
    ///
    /// Availability is checked against fresh data of the booking site, and
    /// the booking is handed there once.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authenticated;
    /// - `BOOKING_REJECTED` - the booking doesn't satisfy a precondition,
    ///                        the error message explains which one;
    /// - `SLOT_NOT_EXISTS` - the `TimeSlot` with the provided ID does not
    ///                       exist;
    /// - `BACKEND_UNAVAILABLE` - the booking site cannot be reached.
    #[tracing::instrument(
        skip_all,
        fields(
            complex_id = %input.complex_id,
            date = ?input.date.map(|d| d.to_string()),
            field_id = ?input.field_id.map(|id| id.to_string()),
            gql.name = "submitBooking",
            is_recurring = input.recurrence.is_some(),
            otel.name = Self::SPAN_NAME,
            slot_id = ?input.slot_id.map(|id| id.to_string()),
        ),
    )]
    pub async fn submit_booking(
        input: api::booking::Input,
        ctx: &Context,
    ) -> Result<api::Intent, Error> {
        let user_id = ctx.try_current_session().await?.map(|s| s.user_id);
        let api::booking::Input {
            complex_id,
            field_id,
            date,
            slot_id,
            recurrence,
        } = input;
        ctx.service()
            .execute(command::SubmitBooking {
                user_id,
                complex_id: complex_id.into(),
                field_id: field_id.map(Into::into),
                date,
                slot_id: slot_id.map(Into::into),
                mode: recurrence.map_or(booking::Mode::Single, Into::into),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Marks the specified `SubField` as a favorite of the authenticated
    /// user, or unmarks it if it's a favorite already.
    ///
    /// Returns whether the `SubField` is a favorite now. If the booking site
    /// fails to store the mark, it's restored locally and the error is
    /// returned.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authenticated;
    /// - `BACKEND_UNAVAILABLE` - the booking site cannot be reached.
    #[tracing::instrument(
        skip_all,
        fields(
            field_id = %field_id,
            gql.name = "toggleFavorite",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn toggle_favorite(
        field_id: api::complex::FieldId,
        ctx: &Context,
    ) -> Result<bool, Error> {
        let my_id = ctx.current_session().await?.user_id;
        ctx.service()
            .execute(command::ToggleFavorite {
                user_id: my_id,
                field_id: field_id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
    }

    /// Updates view `Preferences` of the authenticated user.
    ///
    /// Omitted settings are left as is.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authenticated.
    #[tracing::instrument(
        skip_all,
        fields(
            active_tab = ?active_tab,
            gql.name = "updatePreferences",
            otel.name = Self::SPAN_NAME,
            view_mode = ?view_mode,
        ),
    )]
    pub async fn update_preferences(
        view_mode: Option<api::preferences::ViewMode>,
        active_tab: Option<api::preferences::Tab>,
        ctx: &Context,
    ) -> Result<api::Preferences, Error> {
        let my_id = ctx.current_session().await?.user_id;
        ctx.service()
            .execute(command::UpdatePreferences {
                user_id: my_id,
                view_mode: view_mode.map(Into::into),
                active_tab: active_tab.map(Into::into),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }
}

impl AsError for command::submit_booking::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "SLOT_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "`TimeSlot` with the provided ID does not exist"]
                SlotNotExists,
            }
        }

        match self {
            Self::Backend(e) => e.try_as_error(),
            Self::Rejected(booking::ValidationError::Unauthenticated) => {
                Some(crate::context::AuthError::AuthorizationRequired.into())
            }
            Self::Rejected(e) => Some(crate::Error {
                code: "BOOKING_REJECTED",
                status_code: http::StatusCode::BAD_REQUEST,
                message: e.to_string(),
                backtrace: None,
            }),
            Self::SlotNotFound(_) => Some(Error::SlotNotExists.into()),
        }
    }
}

impl AsError for command::toggle_favorite::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Backend(e) => e.try_as_error(),
            Self::Store(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::update_preferences::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Store(e) => e.try_as_error(),
        }
    }
}
