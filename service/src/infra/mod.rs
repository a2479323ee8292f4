//! Infrastructure layer.

pub mod backend;
pub mod store;

#[cfg(feature = "http")]
pub use self::backend::Http;
pub use self::{
    backend::Backend,
    store::{File, Store},
};
