//! File-backed record store backend.

pub mod store;

pub use store::FileStore;
