//! Environment custom resource definition
//!
//! An Environment is a cluster-scoped grouping under which Solutions are
//! deployed. The CRD itself is installed by the cluster tooling; this crate
//! only reads and creates instances, so schema generation is disabled.

use kube::CustomResource;
use serde::{Deserialize, Serialize};

/// Specification of a MetalK8s Environment.
#[derive(CustomResource, Clone, Debug, Deserialize, Serialize, PartialEq)]
#[kube(
    group = "solutions.metalk8s.scality.com",
    version = "v1alpha1",
    kind = "Environment",
    plural = "environments",
    schema = "disabled"
)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentSpec {
    /// Operator-facing description of the environment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Solutions deployed under this environment, managed by the cluster
    /// tooling after creation.
    #[serde(default)]
    pub solutions: Vec<EnvironmentSolution>,
}

/// A Solution deployed under an Environment.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentSolution {
    pub name: String,
    pub version: String,
}

/// Build the creation request for a new environment.
///
/// The submitted body always carries an empty solutions list; solutions are
/// attached to the environment by later deployments, never at creation time.
pub fn creation_request(name: &str, description: &str) -> Environment {
    Environment::new(
        name,
        EnvironmentSpec {
            description: Some(description.to_string()),
            solutions: Vec::new(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use kube::ResourceExt;

    #[test]
    fn test_creation_request_shape() {
        let env = creation_request("dev", "Development environment");
        assert_eq!(env.name_any(), "dev");
        assert_eq!(env.spec.description.as_deref(), Some("Development environment"));
        assert!(env.spec.solutions.is_empty());
    }

    #[test]
    fn test_environment_decodes_without_description() {
        let env: Environment = serde_json::from_value(serde_json::json!({
            "apiVersion": "solutions.metalk8s.scality.com/v1alpha1",
            "kind": "Environment",
            "metadata": { "name": "bare" },
            "spec": { "solutions": [] }
        }))
        .unwrap();
        assert_eq!(env.spec.description, None);
    }
}
