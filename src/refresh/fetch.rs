//! Fetch operations
//!
//! Request/response mappers between the cluster API and the store. Each
//! operation replaces the corresponding store list on success and leaves the
//! store untouched on failure, returning the error for the polling loop to
//! inspect.

use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::Service;
use thiserror::Error;

use crate::api::SolutionsApi;
use crate::constants::{PART_OF_SOLUTION_LABEL, SOLUTION_VERSION_LABEL};
use crate::models::{Solution, SolutionVersion};
use crate::store::SolutionsStore;

/// Errors a fetch operation can surface.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Kubernetes API error: {0}")]
    Api(#[from] kube::Error),

    /// A catalog entry held something other than a JSON version list.
    #[error("malformed version list for solution '{solution}': {source}")]
    Parse {
        solution: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Fetch candidate Solution UI services and replace the store's service list.
pub async fn fetch_ui_services(
    api: &dyn SolutionsApi,
    store: &SolutionsStore,
) -> Result<(), FetchError> {
    let services = api.get_ui_services().await?;
    store.set_services(services);
    Ok(())
}

/// Fetch the Solution catalog and replace the store's solution list.
///
/// Must run after [`fetch_ui_services`] within an iteration: deployed
/// versions are cross-referenced against the service list currently in the
/// store to derive their `ui_url`.
///
/// An absent catalog ConfigMap (or one without data) leaves the store as-is
/// and succeeds.
pub async fn fetch_solutions(
    api: &dyn SolutionsApi,
    store: &SolutionsStore,
) -> Result<(), FetchError> {
    let config_maps = api.get_solutions_config_maps().await?;
    let Some(catalog) = config_maps.into_iter().next() else {
        return Ok(());
    };
    let Some(data) = catalog.data else {
        return Ok(());
    };

    let services = store.services();
    let solutions = decode_catalog(&data, &services)?;
    store.set_solutions(solutions);
    Ok(())
}

/// Fetch Environment custom resources and replace the store's environment
/// list.
pub async fn fetch_environments(
    api: &dyn SolutionsApi,
    store: &SolutionsStore,
) -> Result<(), FetchError> {
    let environments = api.get_environments().await?;
    store.set_environments(environments);
    Ok(())
}

/// Decode the catalog ConfigMap data into Solutions.
///
/// One Solution per data key, in key order. Each value must be a JSON list
/// of version descriptors; deployed versions get their `ui_url` resolved
/// against `services`.
pub fn decode_catalog(
    data: &BTreeMap<String, String>,
    services: &[Service],
) -> Result<Vec<Solution>, FetchError> {
    let mut solutions = Vec::with_capacity(data.len());
    for (name, raw_versions) in data {
        let mut versions: Vec<SolutionVersion> =
            serde_json::from_str(raw_versions).map_err(|source| FetchError::Parse {
                solution: name.clone(),
                source,
            })?;
        for version in &mut versions {
            if version.deployed {
                version.ui_url = deployed_ui_url(services, name, &version.version);
            }
        }
        solutions.push(Solution {
            name: name.clone(),
            versions,
        });
    }
    Ok(solutions)
}

/// Resolve the UI URL for a deployed Solution version.
///
/// A Service matches when both its part-of and version labels equal the
/// Solution name and version string. First match in list order wins;
/// duplicate label sets are a cluster misconfiguration this layer does not
/// arbitrate. No match, or a match without a nodePort, yields an empty
/// string.
pub fn deployed_ui_url(services: &[Service], solution: &str, version: &str) -> String {
    services
        .iter()
        .find(|service| {
            service.metadata.labels.as_ref().is_some_and(|labels| {
                labels.get(PART_OF_SOLUTION_LABEL).map(String::as_str) == Some(solution)
                    && labels.get(SOLUTION_VERSION_LABEL).map(String::as_str) == Some(version)
            })
        })
        .and_then(|service| service.spec.as_ref())
        .and_then(|spec| spec.ports.as_ref())
        .and_then(|ports| ports.first())
        .and_then(|port| port.node_port)
        // No ingress IP is resolvable for a Solution UI so far; expose the
        // nodePort on localhost.
        .map(|node_port| format!("http://localhost:{node_port}"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockSolutionsApi;
    use k8s_openapi::api::core::v1::{ConfigMap, ServicePort, ServiceSpec};
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

    fn ui_service(solution: &str, version: &str, node_port: i32) -> Service {
        Service {
            metadata: ObjectMeta {
                name: Some(format!("{solution}-ui")),
                labels: Some(
                    [
                        (PART_OF_SOLUTION_LABEL.to_string(), solution.to_string()),
                        (SOLUTION_VERSION_LABEL.to_string(), version.to_string()),
                    ]
                    .into_iter()
                    .collect(),
                ),
                ..Default::default()
            },
            spec: Some(ServiceSpec {
                ports: Some(vec![ServicePort {
                    node_port: Some(node_port),
                    ..Default::default()
                }]),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn catalog_config_map(entries: &[(&str, &str)]) -> ConfigMap {
        ConfigMap {
            data: Some(
                entries
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            ),
            ..Default::default()
        }
    }

    fn api_error() -> kube::Error {
        kube::Error::Api(kube::core::ErrorResponse {
            status: "Failure".to_string(),
            message: "boom".to_string(),
            reason: "InternalError".to_string(),
            code: 500,
        })
    }

    #[tokio::test]
    async fn test_fetch_ui_services_replaces_list() {
        let mut api = MockSolutionsApi::new();
        api.expect_get_ui_services()
            .times(1)
            .returning(|| Ok(vec![ui_service("example", "1.0.0", 30010)]));

        let store = SolutionsStore::new();
        fetch_ui_services(&api, &store).await.unwrap();
        assert_eq!(store.services().len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_ui_services_error_leaves_store_untouched() {
        let mut api = MockSolutionsApi::new();
        api.expect_get_ui_services().returning(|| Err(api_error()));

        let store = SolutionsStore::new();
        store.set_services(vec![ui_service("kept", "1.0.0", 30001)]);

        let result = fetch_ui_services(&api, &store).await;
        assert!(matches!(result, Err(FetchError::Api(_))));
        assert_eq!(store.services().len(), 1);
        assert_eq!(
            store.services()[0].metadata.name.as_deref(),
            Some("kept-ui")
        );
    }

    #[tokio::test]
    async fn test_fetch_solutions_cross_references_services() {
        let mut api = MockSolutionsApi::new();
        api.expect_get_solutions_config_maps().returning(|| {
            Ok(vec![catalog_config_map(&[(
                "example-solution",
                r#"[{"version": "1.0.0", "deployed": true}, {"version": "1.1.0"}]"#,
            )])])
        });

        let store = SolutionsStore::new();
        store.set_services(vec![ui_service("example-solution", "1.0.0", 30010)]);

        fetch_solutions(&api, &store).await.unwrap();

        let solutions = store.solutions();
        assert_eq!(solutions.len(), 1);
        assert_eq!(solutions[0].versions[0].ui_url, "http://localhost:30010");
        assert_eq!(solutions[0].versions[1].ui_url, "");
    }

    #[tokio::test]
    async fn test_fetch_solutions_without_catalog_is_a_no_op() {
        let mut api = MockSolutionsApi::new();
        api.expect_get_solutions_config_maps()
            .returning(|| Ok(Vec::new()));

        let store = SolutionsStore::new();
        store.set_solutions(vec![Solution {
            name: "previous".to_string(),
            versions: Vec::new(),
        }]);

        fetch_solutions(&api, &store).await.unwrap();
        assert_eq!(store.solutions()[0].name, "previous");
    }

    #[tokio::test]
    async fn test_fetch_solutions_malformed_entry_aborts_cycle() {
        let mut api = MockSolutionsApi::new();
        api.expect_get_solutions_config_maps()
            .returning(|| Ok(vec![catalog_config_map(&[("broken", "not json")])]));

        let store = SolutionsStore::new();
        let result = fetch_solutions(&api, &store).await;

        match result {
            Err(FetchError::Parse { solution, .. }) => assert_eq!(solution, "broken"),
            other => panic!("expected a parse error, got {other:?}"),
        }
        assert!(store.solutions().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_environments_replaces_list() {
        let mut api = MockSolutionsApi::new();
        api.expect_get_environments().returning(|| Ok(Vec::new()));

        let store = SolutionsStore::new();
        store.set_environments(vec![crate::models::creation_request("old", "stale")]);

        fetch_environments(&api, &store).await.unwrap();
        assert!(store.environments().is_empty());
    }

    #[test]
    fn test_decode_catalog_keeps_key_order() {
        let data: BTreeMap<String, String> = [
            ("alpha", r#"[{"version": "1.0.0"}]"#),
            ("beta", r#"[{"version": "2.0.0"}]"#),
            ("gamma", r#"[]"#),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let solutions = decode_catalog(&data, &[]).unwrap();
        let names: Vec<_> = solutions.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_deployed_ui_url_first_match_wins() {
        let services = vec![
            ui_service("example", "1.0.0", 30010),
            ui_service("example", "1.0.0", 30020),
        ];
        assert_eq!(
            deployed_ui_url(&services, "example", "1.0.0"),
            "http://localhost:30010"
        );
    }

    #[test]
    fn test_deployed_ui_url_requires_both_labels() {
        let services = vec![ui_service("example", "2.0.0", 30010)];
        assert_eq!(deployed_ui_url(&services, "example", "1.0.0"), "");
        assert_eq!(deployed_ui_url(&services, "other", "2.0.0"), "");
    }

    #[test]
    fn test_deployed_ui_url_without_node_port() {
        let mut service = ui_service("example", "1.0.0", 30010);
        service.spec.as_mut().unwrap().ports.as_mut().unwrap()[0].node_port = None;
        assert_eq!(deployed_ui_url(&[service], "example", "1.0.0"), "");
    }
}
