//! Core value types shared across the workspace.

pub mod repo;
pub mod revisions;

pub use repo::RepoRef;
pub use revisions::BranchRevisions;
