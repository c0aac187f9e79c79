//! Registration storage for the badminton night sign-up service.
//!
//! A single collection of registrations with soft-delete cancellation.
//! Records are never removed; listings and phone lookups only see
//! registrations that have not been cancelled.

mod backend;
mod collection;
mod error;
mod store;
mod types;

pub use backend::{Backend, FileBackend, MemoryBackend};
pub use collection::Collection;
pub use error::StoreError;
pub use store::Store;
pub use types::*;
