//! [`Query`] collection related to [`Preferences`].

use common::operations::By;

use crate::domain::{user, Preferences};
#[cfg(doc)]
use crate::Query;

use super::StoreQuery;

/// Queries [`Preferences`] of a user by its [`user::Id`].
pub type ByUserId = StoreQuery<By<Preferences, user::Id>>;
