//! In-memory [`Backend`] and [`Store`] for [`Service`] tests.

use std::{
    collections::{BTreeMap, BTreeSet},
    io,
    sync::{Arc, Mutex, PoisonError},
};

use common::operations::{By, Delete, Insert, Select, Update};
use tracerr::Traced;

use crate::{
    domain::{
        availability::spec::{sub_field, time_slot},
        booking::{Intent, Policy},
        complex, field,
        preferences::Favorite,
        slot, user, Complex, Preferences, TimeSlot,
    },
    infra::{backend, store},
    Config, Service,
};
#[cfg(doc)]
use crate::domain::SubField;

/// Secret the [`service()`] decodes session tokens with.
pub(crate) const JWT_SECRET: &[u8] = b"secret";

/// Creates a [`Service`] over empty mocks.
pub(crate) fn service() -> Service<Backend, Store> {
    Service::new(
        Config {
            jwt_decoding_key: jsonwebtoken::DecodingKey::from_secret(
                JWT_SECRET,
            ),
            booking: Policy::default(),
        },
        Backend::default(),
        Store::default(),
    )
}

/// Booking site serving a single [`Complex`] of 5 [`SubField`]s.
///
/// [`SubField`] `2` is taken whenever a [`TimeSlot`] is selected.
#[derive(Clone, Debug, Default)]
pub(crate) struct Backend(Arc<Mutex<BackendState>>);

#[derive(Debug, Default)]
struct BackendState {
    fail_details: bool,
    failed_slots: BTreeSet<slot::Id>,
    fail_bookings: bool,
    fail_favorites: bool,
    bookings: Vec<Intent>,
    favorites: Vec<(field::Id, bool)>,
}

impl Backend {
    /// Makes every [`complex::Detail`] request fail.
    pub(crate) fn fail_details(&self) {
        self.state().fail_details = true;
    }

    /// Makes [`complex::Detail`] requests of the given [`TimeSlot`] fail.
    pub(crate) fn fail_slot(&self, id: slot::Id) {
        _ = self.state().failed_slots.insert(id);
    }

    /// Makes booking submissions fail.
    pub(crate) fn fail_bookings(&self) {
        self.state().fail_bookings = true;
    }

    /// Makes favorite updates fail.
    pub(crate) fn fail_favorites(&self) {
        self.state().fail_favorites = true;
    }

    /// Returns all the submitted [`Intent`]s.
    pub(crate) fn bookings(&self) -> Vec<Intent> {
        self.state().bookings.clone()
    }

    /// Returns all the favorite updates, as `(field, is_favorite)` pairs.
    pub(crate) fn favorites(&self) -> Vec<(field::Id, bool)> {
        self.state().favorites.clone()
    }

    fn state(&self) -> std::sync::MutexGuard<'_, BackendState> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn unavailable() -> Traced<backend::Error> {
        tracerr::new!(backend::Error::Status(503))
    }

    fn record_favorite(
        &self,
        fav: Favorite,
        is_favorite: bool,
    ) -> Result<(), Traced<backend::Error>> {
        let mut state = self.state();
        if state.fail_favorites {
            return Err(Self::unavailable());
        }
        state.favorites.push((fav.field_id, is_favorite));
        Ok(())
    }
}

impl crate::infra::Backend<Select<By<Vec<TimeSlot>, ()>>> for Backend {
    type Ok = Vec<TimeSlot>;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<TimeSlot>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok((1..=3).map(time_slot).collect())
    }
}

impl crate::infra::Backend<Select<By<complex::Detail, complex::Selection>>>
    for Backend
{
    type Ok = complex::Detail;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<complex::Detail, complex::Selection>>,
    ) -> Result<Self::Ok, Self::Err> {
        let selection = by.into_inner();
        {
            let state = self.state();
            let slot_failed = selection
                .slot_id
                .is_some_and(|id| state.failed_slots.contains(&id));
            if state.fail_details || slot_failed {
                return Err(Self::unavailable());
            }
        }
        if selection.complex_id != complex::Id::from(1) {
            return Err(tracerr::new!(backend::Error::Status(404)));
        }

        let prices = match selection.slot_id.map(u32::from) {
            None | Some(2) => [200_000, 150_000, 180_000, 180_000, 220_000],
            Some(3) => [160_000, 120_000, 140_000, 140_000, 180_000],
            Some(_) => [0; 5],
        };
        let with_slot = selection.slot_id.is_some();
        let fields = prices
            .into_iter()
            .zip(1..)
            .map(|(price, id)| sub_field(id, price, !with_slot || id != 2))
            .collect();

        Ok(complex::Detail {
            complex: Complex {
                id: selection.complex_id,
                name: complex::Name::new("Sân bóng Thống Nhất").unwrap(),
                address: complex::Address::new("1 Nguyễn Huệ"),
                image: None,
                rating: complex::Rating::default(),
                description: String::new(),
                reviews: vec![],
            },
            fields,
        })
    }
}

impl crate::infra::Backend<Insert<Intent>> for Backend {
    type Ok = ();
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Insert(intent): Insert<Intent>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut state = self.state();
        if state.fail_bookings {
            return Err(Self::unavailable());
        }
        state.bookings.push(intent);
        Ok(())
    }
}

impl crate::infra::Backend<Insert<Favorite>> for Backend {
    type Ok = ();
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Insert(fav): Insert<Favorite>,
    ) -> Result<Self::Ok, Self::Err> {
        self.record_favorite(fav, true)
    }
}

impl crate::infra::Backend<Delete<Favorite>> for Backend {
    type Ok = ();
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Delete(fav): Delete<Favorite>,
    ) -> Result<Self::Ok, Self::Err> {
        self.record_favorite(fav, false)
    }
}

/// [`Preferences`] kept in memory.
#[derive(Clone, Debug, Default)]
pub(crate) struct Store(Arc<Mutex<StoreState>>);

#[derive(Debug, Default)]
struct StoreState {
    fail: bool,
    prefs: BTreeMap<user::Id, Preferences>,
}

impl Store {
    /// Makes every operation fail.
    pub(crate) fn fail(&self) {
        self.state().fail = true;
    }

    fn state(&self) -> std::sync::MutexGuard<'_, StoreState> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check(state: &StoreState) -> Result<(), Traced<store::Error>> {
        if state.fail {
            return Err(tracerr::new!(store::Error::Io(io::Error::other(
                "disk is full",
            ))));
        }
        Ok(())
    }
}

impl crate::infra::Store<Select<By<Preferences, user::Id>>> for Store {
    type Ok = Preferences;
    type Err = Traced<store::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Preferences, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        let state = self.state();
        Self::check(&state)?;
        Ok(state
            .prefs
            .get(&id)
            .cloned()
            .unwrap_or_else(|| Preferences::new(id)))
    }
}

impl crate::infra::Store<Update<Preferences>> for Store {
    type Ok = ();
    type Err = Traced<store::Error>;

    async fn execute(
        &self,
        Update(prefs): Update<Preferences>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut state = self.state();
        Self::check(&state)?;
        _ = state.prefs.insert(prefs.user_id, prefs);
        Ok(())
    }
}
