//! Kubernetes API surface consumed by the sync engine
//!
//! `SolutionsApi` is the seam between the fetch operations and the cluster:
//! everything the engine needs from the API server goes through this trait,
//! which keeps the refresh machinery testable without a live cluster.

use async_trait::async_trait;
use k8s_openapi::api::core::v1::{ConfigMap, Service};
use kube::Client;
use kube::api::{Api, ListParams, PostParams};

use crate::constants::SOLUTIONS_CONFIG_MAP_NAME;
use crate::models::Environment;

/// Cluster operations the sync engine depends on.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SolutionsApi: Send + Sync {
    /// List candidate Solution UI services across all namespaces.
    async fn get_ui_services(&self) -> Result<Vec<Service>, kube::Error>;

    /// List the Solution catalog ConfigMap across all namespaces.
    async fn get_solutions_config_maps(&self) -> Result<Vec<ConfigMap>, kube::Error>;

    /// List Environment custom resources.
    async fn get_environments(&self) -> Result<Vec<Environment>, kube::Error>;

    /// Submit a new Environment to the cluster.
    async fn create_environment(&self, environment: Environment)
    -> Result<Environment, kube::Error>;
}

/// `SolutionsApi` implementation backed by a `kube::Client`.
pub struct KubeApi {
    client: Client,
}

impl KubeApi {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SolutionsApi for KubeApi {
    async fn get_ui_services(&self) -> Result<Vec<Service>, kube::Error> {
        let api: Api<Service> = Api::all(self.client.clone());
        let services = api.list(&ListParams::default()).await?;
        Ok(services.items)
    }

    async fn get_solutions_config_maps(&self) -> Result<Vec<ConfigMap>, kube::Error> {
        let api: Api<ConfigMap> = Api::all(self.client.clone());
        let params =
            ListParams::default().fields(&format!("metadata.name={}", SOLUTIONS_CONFIG_MAP_NAME));
        let config_maps = api.list(&params).await?;
        Ok(config_maps.items)
    }

    async fn get_environments(&self) -> Result<Vec<Environment>, kube::Error> {
        let api: Api<Environment> = Api::all(self.client.clone());
        match api.list(&ListParams::default()).await {
            Ok(environments) => Ok(environments.items),
            // The Environment CRD may not be served yet on a fresh cluster;
            // an absent collection is an empty list, not a failure.
            Err(kube::Error::Api(response)) if response.code == 404 => Ok(Vec::new()),
            Err(err) => Err(err),
        }
    }

    async fn create_environment(
        &self,
        environment: Environment,
    ) -> Result<Environment, kube::Error> {
        let api: Api<Environment> = Api::all(self.client.clone());
        api.create(&PostParams::default(), &environment).await
    }
}
