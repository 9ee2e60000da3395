//! Verdict types produced by a consistency check.

use serde::{Deserialize, Serialize};

/// The first branch found disagreeing with a hook's stored baseline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchMismatch {
    /// The branch whose tip disagreed.
    pub branch: String,
    /// The revision just observed for the branch.
    pub expected: String,
    /// The revision the baseline holds for the branch, or `None` when the
    /// baseline has no entry for it at all.
    pub found: Option<String>,
}

/// Result of checking one repository's observed branch state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsistencyVerdict {
    /// No hook is tracked for the repository; nothing was checked.
    Untracked,
    /// The observed state agrees with the baseline, or became the baseline
    /// because none was stored yet.
    Consistent,
    /// At least one branch disagreed and the record was flagged.
    Inconsistent(BranchMismatch),
}

impl ConsistencyVerdict {
    /// The mismatch behind an inconsistent verdict, if any.
    pub fn mismatch(&self) -> Option<&BranchMismatch> {
        match self {
            Self::Inconsistent(mismatch) => Some(mismatch),
            _ => None,
        }
    }
}
