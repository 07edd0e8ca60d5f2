//! Refresh machinery
//!
//! Fetch operations against the cluster plus the per-family polling loops
//! that keep the store synchronized.

mod fetch;
mod poller;

pub use fetch::{
    FetchError, decode_catalog, deployed_ui_url, fetch_environments, fetch_solutions,
    fetch_ui_services,
};
pub use poller::{RefreshLoop, run_fetch_sequence};

use std::fmt;

/// The two independently refreshed resource families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefreshFamily {
    Solutions,
    Environments,
}

impl RefreshFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefreshFamily::Solutions => "solutions",
            RefreshFamily::Environments => "environments",
        }
    }
}

impl fmt::Display for RefreshFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
