//! Service contains the booking logic of the application: availability
//! aggregation, recurring pricing and booking intent assembly.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod command;
pub mod domain;
pub mod infra;
#[cfg(test)]
mod mock;
pub mod query;

use derive_more::Debug;

#[cfg(doc)]
use infra::{Backend, Store};

pub use self::{command::Command, query::Query};

/// [`Service`] configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// [JWT] decoding key of the sessions issued by the booking site.
    ///
    /// [JWT]: https://datatracker.ietf.org/doc/html/rfc7519
    #[debug(skip)]
    pub jwt_decoding_key: jsonwebtoken::DecodingKey,

    /// [`domain::booking::Policy`] applied to submitted bookings.
    pub booking: domain::booking::Policy,
}

/// Domain service.
#[derive(Clone, Debug)]
pub struct Service<B, S> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`Backend`] of this [`Service`].
    backend: B,

    /// [`Store`] of this [`Service`].
    store: S,
}

impl<B, S> Service<B, S> {
    /// Creates a new [`Service`] with the provided parameters.
    #[must_use]
    pub fn new(config: Config, backend: B, store: S) -> Self {
        Self {
            config,
            backend,
            store,
        }
    }

    /// Returns [`Config`] of this [`Service`].
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`Backend`] of this [`Service`].
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns [`Store`] of this [`Service`].
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }
}
