//! Account persistence.
//!
//! An [`AccountStore`] reads and rewrites the whole account document at once.
//! [`QueuedStore`] wraps any store so that each load-modify-save cycle runs
//! inside one critical section.

mod error;
mod in_memory;
mod json_file;
mod queued;
mod store;

pub use error::StoreError;
pub use in_memory::InMemoryStore;
pub use json_file::JsonFileStore;
pub use queued::QueuedStore;
pub use store::AccountStore;
