//! Traits implemented by pluggable backends.

pub mod store;

pub use store::{Mutator, RecordStore};
