//! [`Query`] definition.

pub mod availability;
pub mod complex;
pub mod preferences;
pub mod recurring_quote;
pub mod slot;
pub mod slot_extremes;

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    infra::{backend, store, Backend, Store},
    Service,
};

/// [`Query`] of the [`Service`].
pub use common::Handler as Query;

pub use self::{
    availability::ComplexAvailability, recurring_quote::RecurringQuote,
    slot_extremes::SlotExtremes,
};

/// [`Query`] [`Select`]ing a `T`ype from a [`Backend`].
#[derive(Clone, Copy, Debug)]
#[expect(clippy::module_name_repetitions, reason = "more readable")]
pub struct BackendQuery<T>(T);

impl<W, Of> BackendQuery<By<W, Of>> {
    /// Creates a new [`BackendQuery`] selecting a `W` by the provided `Of`.
    #[must_use]
    pub fn by(by: Of) -> Self {
        Self(By::new(by))
    }
}

impl<B, S, W, Of> Query<BackendQuery<By<W, Of>>> for Service<B, S>
where
    B: Backend<Select<By<W, Of>>, Ok = W, Err = Traced<backend::Error>>,
{
    type Ok = W;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        BackendQuery(by): BackendQuery<By<W, Of>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.backend()
            .execute(Select(by))
            .await
            .map_err(tracerr::wrap!())
    }
}

/// [`Query`] [`Select`]ing a `T`ype from a [`Store`].
#[derive(Clone, Copy, Debug)]
#[expect(clippy::module_name_repetitions, reason = "more readable")]
pub struct StoreQuery<T>(T);

impl<W, Of> StoreQuery<By<W, Of>> {
    /// Creates a new [`StoreQuery`] selecting a `W` by the provided `Of`.
    #[must_use]
    pub fn by(by: Of) -> Self {
        Self(By::new(by))
    }
}

impl<B, S, W, Of> Query<StoreQuery<By<W, Of>>> for Service<B, S>
where
    S: Store<Select<By<W, Of>>, Ok = W, Err = Traced<store::Error>>,
{
    type Ok = W;
    type Err = Traced<store::Error>;

    async fn execute(
        &self,
        StoreQuery(by): StoreQuery<By<W, Of>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.store()
            .execute(Select(by))
            .await
            .map_err(tracerr::wrap!())
    }
}
