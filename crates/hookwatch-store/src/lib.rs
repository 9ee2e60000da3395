//! # hookwatch-store
//!
//! Record store backends for HookWatch. Supports two modes:
//!
//! - **memory**: In-process store backed by [dashmap](https://crates.io/crates/dashmap)
//! - **file**: In-memory map mirrored to a JSON snapshot on disk
//!
//! The backend is selected at runtime based on configuration. Both backends
//! implement [`hookwatch_core::traits::RecordStore`], so everything above this
//! crate works against the trait object and never names a backend.

#[cfg(feature = "file")]
pub mod file;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;

#[cfg(feature = "file")]
pub use file::FileStore;
#[cfg(feature = "memory")]
pub use memory::MemoryStore;
pub use provider::open_store;
