//! [`Command`] definition.

pub mod authorize_user_session;
pub mod submit_booking;
pub mod toggle_favorite;
pub mod update_preferences;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    authorize_user_session::AuthorizeUserSession,
    submit_booking::SubmitBooking, toggle_favorite::ToggleFavorite,
    update_preferences::UpdatePreferences,
};
