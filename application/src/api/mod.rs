//! GraphQL API definitions.

pub mod booking;
pub mod complex;
mod mutation;
pub mod preferences;
mod query;
pub mod scalar;
pub mod slot;

use crate::Context;

pub use self::{
    booking::Intent, complex::Complex, mutation::Mutation,
    preferences::Preferences, query::Query, slot::TimeSlot,
};

/// GraphQL subscriptions root.
///
/// Nothing is pushed to clients, so it's empty.
pub type Subscription = juniper::EmptySubscription<Context>;

/// GraphQL schema.
pub type Schema = juniper::RootNode<'static, Query, Mutation, Subscription>;
