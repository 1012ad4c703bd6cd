//! Terminal states of a reconciliation pass
//!
//! Every pass starts in an implicit start state and transitions exactly
//! once to one of these. `Indeterminate` is kept separate from
//! `UpdateFailed` so operators can tell "we don't know" from "we tried
//! and failed".

use std::net::IpAddr;

/// Terminal state of one reconciliation pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The published record already matches the observed address
    NoChange {
        /// The address both sides agree on
        address: IpAddr,
    },

    /// The provider accepted the upsert
    Updated {
        /// The previously published address
        previous: IpAddr,
        /// The address the record now carries
        address: IpAddr,
    },

    /// The provider rejected or failed the write
    UpdateFailed {
        /// Why the write did not land
        reason: String,
    },

    /// An input was unusable; nothing was written and nothing is known
    Indeterminate {
        /// Which input was unusable
        reason: String,
    },
}

impl Outcome {
    /// Whether this outcome maps to exit code 0
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::NoChange { .. } | Outcome::Updated { .. })
    }

    /// Short label for logging
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::NoChange { .. } => "no-change",
            Outcome::Updated { .. } => "updated",
            Outcome::UpdateFailed { .. } => "update-failed",
            Outcome::Indeterminate { .. } => "indeterminate",
        }
    }
}
