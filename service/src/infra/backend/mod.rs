//! [`Backend`]-related implementations.
//!
//! The booking site's REST API owns the slot catalog, the complexes with
//! their fields, the bookings and the remote favorites.

#[cfg(feature = "http")]
pub mod http;

use derive_more::{Display, Error as StdError, From};

#[cfg(feature = "http")]
pub use self::http::Http;

/// Operation of the booking site's REST API.
pub use common::Handler as Backend;

/// [`Backend`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// [`Backend`] responded with a non-successful HTTP status.
    #[display("`Backend` responded with `{_0}` status")]
    #[from(ignore)]
    Status(#[error(not(source))] u16),

    /// [`Backend`] responded with a record that cannot be normalized.
    #[display("`Backend` record is malformed: {_0}")]
    #[from(ignore)]
    Malformed(#[error(not(source))] String),

    #[cfg(feature = "http")]
    /// Request to the [`Backend`] failed to be sent or its response failed
    /// to be read.
    #[display("`Backend` transport failed: {_0}")]
    Transport(reqwest::Error),
}
