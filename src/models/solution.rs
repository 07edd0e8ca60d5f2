//! Solution catalog types
//!
//! A Solution is a packaged application with one or more versions. The
//! cluster stores the catalog as a ConfigMap whose data values are JSON
//! lists of version descriptors; these types are the decoded form handed
//! to view-layer consumers.

use serde::{Deserialize, Serialize};

/// A packaged application known to the cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    /// Solution name, the ConfigMap data key.
    pub name: String,
    /// All versions listed in the catalog for this Solution.
    pub versions: Vec<SolutionVersion>,
}

/// One version entry of a Solution.
///
/// `ui_url` is derived client-side from the Service matching this version's
/// labels; it is never stored on the cluster. An undeployed version, or a
/// deployed version with no matching Service, carries an empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionVersion {
    pub version: String,
    #[serde(default)]
    pub deployed: bool,
    #[serde(default)]
    pub ui_url: String,
}
