//! [`Command`] for toggling a favorite [`SubField`].

use common::operations::{By, Delete, Insert, Select, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::SubField;
use crate::{
    domain::{field, preferences::Favorite, user, Preferences},
    infra::{backend, store, Backend, Store},
    Service,
};

use super::Command;

/// [`Command`] for adding a [`SubField`] to the favorites of a user, or
/// removing it from there if it's a favorite already.
///
/// The local [`Preferences`] are updated first. If the remote update fails
/// afterwards, they're restored and the failure is returned.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ToggleFavorite {
    /// ID of the user toggling.
    pub user_id: user::Id,

    /// ID of the [`SubField`] to toggle.
    pub field_id: field::Id,
}

impl<B, S> Command<ToggleFavorite> for Service<B, S>
where
    B: Backend<Insert<Favorite>, Ok = (), Err = Traced<backend::Error>>
        + Backend<Delete<Favorite>, Ok = (), Err = Traced<backend::Error>>,
    S: Store<
            Select<By<Preferences, user::Id>>,
            Ok = Preferences,
            Err = Traced<store::Error>,
        > + Store<Update<Preferences>, Ok = (), Err = Traced<store::Error>>,
{
    /// Indicator whether the [`SubField`] is a favorite now.
    type Ok = bool;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        ToggleFavorite { user_id, field_id }: ToggleFavorite,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let mut prefs = self
            .store()
            .execute(Select(By::new(user_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        let is_favorite = prefs.toggle_favorite(field_id);
        self.store()
            .execute(Update(prefs))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let favorite = Favorite { user_id, field_id };
        let res = if is_favorite {
            self.backend().execute(Insert(favorite)).await
        } else {
            self.backend().execute(Delete(favorite)).await
        };
        let Err(e) = res else {
            return Ok(is_favorite);
        };

        log::warn!(
            %user_id,
            %field_id,
            "restoring favorite failed to be synced: {e}",
        );
        // Re-read, since other preferences may have changed meanwhile.
        let mut prefs = self
            .store()
            .execute(Select(By::new(user_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if prefs.is_favorite(field_id) == is_favorite {
            _ = prefs.toggle_favorite(field_id);
            self.store()
                .execute(Update(prefs))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
        }

        Err(e).map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`ToggleFavorite`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("`Backend` operation failed: {_0}")]
    Backend(backend::Error),

    /// [`Store`] error.
    #[display("`Store` operation failed: {_0}")]
    Store(store::Error),
}
