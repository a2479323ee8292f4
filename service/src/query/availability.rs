//! [`ComplexAvailability`] definition.

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::{Complex, SubField};
use crate::{
    domain::{complex, user, Availability, Preferences, TimeSlot},
    infra::{backend, store, Backend, Store},
    Query, Service,
};

/// [`Query`] collecting everything shown on a [`Complex`] page for one
/// [`complex::Selection`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ComplexAvailability {
    /// [`complex::Selection`] to look at.
    pub selection: complex::Selection,

    /// ID of the user looking, if authenticated.
    ///
    /// Their local favorites are marked on the [`SubField`]s.
    pub viewer: Option<user::Id>,
}

/// Output of the [`ComplexAvailability`] [`Query`].
#[derive(Clone, Debug, PartialEq)]
pub struct Output {
    /// Whole catalog of [`TimeSlot`]s.
    pub slots: Vec<TimeSlot>,

    /// [`Complex`] with its [`SubField`]s.
    pub detail: complex::Detail,

    /// [`Availability`] aggregated over the [`SubField`]s.
    pub availability: Availability,
}

impl<B, S> Query<ComplexAvailability> for Service<B, S>
where
    B: Backend<
            Select<By<Vec<TimeSlot>, ()>>,
            Ok = Vec<TimeSlot>,
            Err = Traced<backend::Error>,
        > + Backend<
            Select<By<complex::Detail, complex::Selection>>,
            Ok = complex::Detail,
            Err = Traced<backend::Error>,
        >,
    S: Store<
        Select<By<Preferences, user::Id>>,
        Ok = Preferences,
        Err = Traced<store::Error>,
    >,
{
    type Ok = Output;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        ComplexAvailability { selection, viewer }: ComplexAvailability,
    ) -> Result<Self::Ok, Self::Err> {
        let (slots, mut detail) = futures::try_join!(
            self.backend().execute(Select(By::<Vec<TimeSlot>, _>::new(()))),
            self.backend()
                .execute(Select(By::<complex::Detail, _>::new(selection))),
        )
        .map_err(tracerr::map_from_and_wrap!(=> ExecutionError))?;

        if let Some(user_id) = viewer {
            let prefs = self
                .store()
                .execute(Select(By::new(user_id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> ExecutionError))?;
            for field in &mut detail.fields {
                field.is_favorite |= prefs.is_favorite(field.id);
            }
        }

        let availability =
            Availability::aggregate(&detail.fields, selection.slot_id);

        Ok(Output {
            slots,
            detail,
            availability,
        })
    }
}

/// Error of [`ComplexAvailability`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("`Backend` operation failed: {_0}")]
    Backend(backend::Error),

    /// [`Store`] error.
    #[display("`Store` operation failed: {_0}")]
    Store(store::Error),
}
