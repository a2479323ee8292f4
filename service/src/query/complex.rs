//! [`Query`] collection related to a single [`Complex`].

use common::operations::By;

use crate::domain::complex;
#[cfg(doc)]
use crate::{domain::Complex, Query};

use super::BackendQuery;

/// Queries a [`complex::Detail`] by its [`complex::Selection`].
pub type Detail = BackendQuery<By<complex::Detail, complex::Selection>>;
