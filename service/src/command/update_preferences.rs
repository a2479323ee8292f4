//! [`Command`] for updating view [`Preferences`].

use common::operations::{By, Select, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        preferences::{Tab, ViewMode},
        user, Preferences,
    },
    infra::{store, Store},
    Service,
};

use super::Command;

/// [`Command`] for updating view [`Preferences`] of a user.
///
/// Omitted settings are left as is.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct UpdatePreferences {
    /// ID of the user.
    pub user_id: user::Id,

    /// New [`ViewMode`], if any.
    pub view_mode: Option<ViewMode>,

    /// New active [`Tab`], if any.
    pub active_tab: Option<Tab>,
}

impl<B, S> Command<UpdatePreferences> for Service<B, S>
where
    S: Store<
            Select<By<Preferences, user::Id>>,
            Ok = Preferences,
            Err = Traced<store::Error>,
        > + Store<Update<Preferences>, Ok = (), Err = Traced<store::Error>>,
{
    type Ok = Preferences;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdatePreferences,
    ) -> Result<Self::Ok, Self::Err> {
        let mut prefs = self
            .store()
            .execute(Select(By::new(cmd.user_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> ExecutionError))?;

        if let Some(mode) = cmd.view_mode {
            prefs.view_mode = mode;
        }
        if let Some(tab) = cmd.active_tab {
            prefs.active_tab = tab;
        }

        self.store()
            .execute(Update(prefs.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> ExecutionError))?;

        Ok(prefs)
    }
}

/// Error of [`UpdatePreferences`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Store`] error.
    #[display("`Store` operation failed: {_0}")]
    Store(store::Error),
}

#[cfg(test)]
mod spec {
    use crate::{
        domain::{
            field,
            preferences::{Tab, ViewMode},
            user,
        },
        mock, Command as _,
    };

    use super::UpdatePreferences;

    #[tokio::test]
    async fn updates_provided_settings_only() {
        let service = mock::service();
        let user_id = user::Id::from(8);
        _ = service
            .execute(crate::command::ToggleFavorite {
                user_id,
                field_id: field::Id::from(1),
            })
            .await
            .unwrap();

        let prefs = service
            .execute(UpdatePreferences {
                user_id,
                view_mode: Some(ViewMode::List),
                active_tab: None,
            })
            .await
            .unwrap();
        assert_eq!(prefs.view_mode, ViewMode::List);
        assert_eq!(prefs.active_tab, Tab::Overview);
        assert!(prefs.is_favorite(field::Id::from(1)));

        let prefs = service
            .execute(UpdatePreferences {
                user_id,
                view_mode: None,
                active_tab: Some(Tab::Reviews),
            })
            .await
            .unwrap();
        assert_eq!(prefs.view_mode, ViewMode::List);
        assert_eq!(prefs.active_tab, Tab::Reviews);
    }

    #[tokio::test]
    async fn fails_on_store_failure() {
        let service = mock::service();
        service.store().fail();

        let res = service
            .execute(UpdatePreferences {
                user_id: user::Id::from(8),
                view_mode: Some(ViewMode::Grid),
                active_tab: None,
            })
            .await;

        assert!(res.is_err());
    }
}
