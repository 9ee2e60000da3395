//! Branch-tip revision maps.

use std::collections::BTreeMap;

/// Mapping from branch name to the revision hash at its tip.
///
/// Ordered so that diagnostics and serialized snapshots are deterministic.
/// An empty map is a valid observation (a repository with no branches) and is
/// distinct from "no baseline known", which is modeled as
/// `Option<BranchRevisions>` on the hook record.
pub type BranchRevisions = BTreeMap<String, String>;
