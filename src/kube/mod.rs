//! Kubernetes client module
//!
//! Handles connection to the Kubernetes API server and provides a configured
//! client for use throughout the application.

use std::path::Path;

use anyhow::Result;
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};

/// Initialize and return a Kubernetes client.
///
/// Uses the default kubeconfig loading strategy:
/// 1. In-cluster config (if running in a pod)
/// 2. KUBECONFIG environment variable
/// 3. ~/.kube/config
pub async fn create_client() -> Result<Client> {
    let config = Config::infer().await?;
    let client = Client::try_from(config)?;
    Ok(client)
}

/// Initialize a client for a specific kubeconfig context.
pub async fn create_client_for_context(context: &str) -> Result<Client> {
    let kubeconfig = Kubeconfig::read()?;
    let options = KubeConfigOptions {
        context: Some(context.to_string()),
        ..Default::default()
    };
    let config = Config::from_custom_kubeconfig(kubeconfig, &options).await?;
    let client = Client::try_from(config)?;
    Ok(client)
}

/// Initialize a client from a kubeconfig file path.
pub async fn create_client_from_kubeconfig_path(path: &Path) -> Result<Client> {
    let kubeconfig = Kubeconfig::read_from(path)?;
    let config = Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default()).await?;
    let client = Client::try_from(config)?;
    Ok(client)
}

/// Get the current kubeconfig context name.
///
/// Falls back to "default" when the kubeconfig carries no current-context,
/// e.g. when running in-cluster.
pub async fn get_context() -> Result<String> {
    match Kubeconfig::read() {
        Ok(kubeconfig) => Ok(kubeconfig
            .current_context
            .unwrap_or_else(|| "default".to_string())),
        Err(_) => Ok("default".to_string()),
    }
}
