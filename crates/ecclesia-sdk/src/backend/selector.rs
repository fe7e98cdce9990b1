//! Which backend the data service tries first

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};

/// Backend tried first by the data service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendPreference {
    /// Database first, REST API on failure
    #[default]
    PreferPrimary,
    /// REST API only
    PreferSecondary,
}

/// One-way latch from [`BackendPreference::PreferPrimary`] to
/// [`BackendPreference::PreferSecondary`].
///
/// A failed write on the database demotes it for the lifetime of the
/// selector. Read failures never transition.
#[derive(Debug, Default)]
pub struct BackendSelector {
    demoted: AtomicBool,
}

impl BackendSelector {
    pub fn new(initial: BackendPreference) -> Self {
        Self {
            demoted: AtomicBool::new(initial == BackendPreference::PreferSecondary),
        }
    }

    pub fn preference(&self) -> BackendPreference {
        if self.demoted.load(Ordering::SeqCst) {
            BackendPreference::PreferSecondary
        } else {
            BackendPreference::PreferPrimary
        }
    }

    /// Switch to the secondary backend.
    ///
    /// Returns `true` only for the call that performed the transition.
    pub fn demote(&self) -> bool {
        self.demoted
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }
}
