//! Constants shared across the crate
//!
//! This module centralizes magic values so the API conventions live in one
//! place and are easier to keep in sync with the cluster side.

use std::time::Duration;

/// Delay between two iterations of a refresh loop.
///
/// Matches the polling cadence the MetalK8s UI uses against the cluster.
pub const REFRESH_TIMEOUT: Duration = Duration::from_secs(15);

/// Label carrying the Solution a Service belongs to.
pub const PART_OF_SOLUTION_LABEL: &str = "app.kubernetes.io/part-of";

/// Label carrying the Solution version a Service serves.
pub const SOLUTION_VERSION_LABEL: &str = "app.kubernetes.io/version";

/// Name of the ConfigMap aggregating the Solution version catalogs.
pub const SOLUTIONS_CONFIG_MAP_NAME: &str = "metalk8s-solutions";

/// Route consumers are pointed at after a successful environment creation.
pub const SOLUTIONS_ROUTE: &str = "/solutions";
