//! Backend selection and in-memory backends
//!
//! - [`BackendSelector`]: primary/secondary preference owned by each service
//! - [`MockStore`] / [`MockApi`]: in-memory database and REST backends for tests

pub mod mock;
pub mod selector;

pub use mock::{MockApi, MockStore};
pub use selector::{BackendPreference, BackendSelector};
