//! [`Query`] collection related to [`TimeSlot`]s.

use common::operations::By;

use crate::domain::TimeSlot;
#[cfg(doc)]
use crate::Query;

use super::BackendQuery;

/// Queries the whole catalog of [`TimeSlot`]s.
pub type All = BackendQuery<By<Vec<TimeSlot>, ()>>;
