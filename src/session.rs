//! Headless session for library consumers
//!
//! `SolutionsSession` wraps a Kubernetes client, the resource store, and the
//! two refresh loops into a single abstraction usable without any UI
//! dependencies. View layers read the store through it, drive the refresh
//! triggers, and consume session events (navigation, refresh stops) from its
//! channel.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tracing::warn;

use crate::api::{KubeApi, SolutionsApi};
use crate::config::Config;
use crate::constants::SOLUTIONS_ROUTE;
use crate::models::{Environment, creation_request};
use crate::refresh::{self, FetchError, RefreshFamily, RefreshLoop};
use crate::store::SolutionsStore;

/// Events a session emits for its consumer.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// The consumer should navigate to the given route.
    Navigate(String),
    /// A refresh loop terminated on a fetch error.
    RefreshStopped {
        family: RefreshFamily,
        error: String,
    },
}

/// A headless session connected to a single cluster.
///
/// # Example
///
/// ```rust,no_run
/// use solsync::config::Config;
/// use solsync::session::SolutionsSession;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::default();
/// let mut session = SolutionsSession::connect_default(&config).await?;
///
/// session.start_solutions_refresh();
/// session.start_environments_refresh();
///
/// for solution in session.store().solutions() {
///     println!("{} ({} versions)", solution.name, solution.versions.len());
/// }
/// # Ok(())
/// # }
/// ```
pub struct SolutionsSession {
    api: Arc<dyn SolutionsApi>,
    store: SolutionsStore,
    read_only: bool,
    solutions_refresh: RefreshLoop,
    environments_refresh: RefreshLoop,
    event_tx: mpsc::UnboundedSender<SessionEvent>,
    event_rx: mpsc::UnboundedReceiver<SessionEvent>,
}

impl SolutionsSession {
    /// Connect using the default kubeconfig loading strategy.
    pub async fn connect_default(config: &Config) -> Result<Self> {
        let client = crate::kube::create_client()
            .await
            .context("Failed to create Kubernetes client")?;
        Ok(Self::with_api(Arc::new(KubeApi::new(client)), config))
    }

    /// Connect using a specific kubeconfig context.
    pub async fn connect(context: &str, config: &Config) -> Result<Self> {
        let client = crate::kube::create_client_for_context(context)
            .await
            .with_context(|| format!("Failed to connect to context '{context}'"))?;
        Ok(Self::with_api(Arc::new(KubeApi::new(client)), config))
    }

    /// Connect using a specific kubeconfig file path.
    pub async fn connect_from_kubeconfig(path: &Path, config: &Config) -> Result<Self> {
        let client = crate::kube::create_client_from_kubeconfig_path(path)
            .await
            .with_context(|| {
                format!("Failed to create client from kubeconfig: {}", path.display())
            })?;
        Ok(Self::with_api(Arc::new(KubeApi::new(client)), config))
    }

    /// Build a session over an arbitrary API implementation.
    pub fn with_api(api: Arc<dyn SolutionsApi>, config: &Config) -> Self {
        let store = SolutionsStore::new();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let interval = config.refresh_interval();

        let solutions_refresh = RefreshLoop::new(
            RefreshFamily::Solutions,
            Arc::clone(&api),
            store.clone(),
            event_tx.clone(),
        )
        .with_interval(interval);
        let environments_refresh = RefreshLoop::new(
            RefreshFamily::Environments,
            Arc::clone(&api),
            store.clone(),
            event_tx.clone(),
        )
        .with_interval(interval);

        Self {
            api,
            store,
            read_only: config.read_only,
            solutions_refresh,
            environments_refresh,
            event_tx,
            event_rx,
        }
    }

    /// The store consumers read synced state from.
    pub fn store(&self) -> &SolutionsStore {
        &self.store
    }

    /// Start the solutions polling loop (services + catalog).
    pub fn start_solutions_refresh(&self) {
        self.solutions_refresh.start();
    }

    /// Stop the solutions polling loop after the iteration in flight.
    pub fn stop_solutions_refresh(&self) {
        self.solutions_refresh.stop();
    }

    /// Start the environments polling loop.
    pub fn start_environments_refresh(&self) {
        self.environments_refresh.start();
    }

    /// Stop the environments polling loop after the iteration in flight.
    pub fn stop_environments_refresh(&self) {
        self.environments_refresh.stop();
    }

    /// Run one solutions fetch sequence outside the polling loop.
    pub async fn refresh_solutions_once(&self) -> Result<(), FetchError> {
        refresh::run_fetch_sequence(RefreshFamily::Solutions, self.api.as_ref(), &self.store).await
    }

    /// Run one environments fetch outside the polling loop.
    pub async fn refresh_environments_once(&self) -> Result<(), FetchError> {
        refresh::run_fetch_sequence(RefreshFamily::Environments, self.api.as_ref(), &self.store)
            .await
    }

    /// Create a new environment on the cluster.
    ///
    /// On success the environment list is re-fetched and a
    /// [`SessionEvent::Navigate`] to the solutions route is emitted, both in
    /// the background: the call returns as soon as the creation itself is
    /// acknowledged. On failure nothing is re-fetched and no event is
    /// emitted.
    pub async fn create_environment(&self, name: &str, description: &str) -> Result<Environment> {
        if self.read_only {
            anyhow::bail!("environment creation is disabled by the readOnly configuration");
        }

        let request = creation_request(name, description);
        let created = self
            .api
            .create_environment(request)
            .await
            .with_context(|| format!("Failed to create environment '{name}'"))?;

        let api = Arc::clone(&self.api);
        let store = self.store.clone();
        let event_tx = self.event_tx.clone();
        tokio::spawn(async move {
            if let Err(err) = refresh::fetch_environments(api.as_ref(), &store).await {
                warn!("environment list refresh after creation failed: {err}");
            }
            let _ = event_tx.send(SessionEvent::Navigate(SOLUTIONS_ROUTE.to_string()));
        });

        Ok(created)
    }

    /// Wait for and return the next session event.
    ///
    /// Returns `None` if the channel is closed.
    pub async fn recv_event(&mut self) -> Option<SessionEvent> {
        self.event_rx.recv().await
    }

    /// Drain all events currently queued, without waiting.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.event_rx.try_recv() {
            events.push(event);
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockSolutionsApi;
    use kube::ResourceExt;

    fn api_error() -> kube::Error {
        kube::Error::Api(kube::core::ErrorResponse {
            status: "Failure".to_string(),
            message: "denied".to_string(),
            reason: "Forbidden".to_string(),
            code: 403,
        })
    }

    #[tokio::test]
    async fn test_create_environment_refetches_and_navigates() {
        let mut api = MockSolutionsApi::new();
        api.expect_create_environment()
            .times(1)
            .withf(|env| {
                env.name_any() == "prod"
                    && env.spec.description.as_deref() == Some("Production env")
                    && env.spec.solutions.is_empty()
            })
            .returning(|env| Ok(env));
        api.expect_get_environments()
            .times(1)
            .returning(|| Ok(vec![creation_request("prod", "Production env")]));

        let mut session = SolutionsSession::with_api(Arc::new(api), &Config::default());
        let created = session
            .create_environment("prod", "Production env")
            .await
            .unwrap();
        assert_eq!(created.name_any(), "prod");

        // The re-fetch runs before the navigation event goes out.
        let event = session.recv_event().await.unwrap();
        assert_eq!(event, SessionEvent::Navigate("/solutions".to_string()));
        assert_eq!(session.store().environments().len(), 1);
    }

    #[tokio::test]
    async fn test_create_environment_failure_has_no_side_effects() {
        let mut api = MockSolutionsApi::new();
        api.expect_create_environment()
            .times(1)
            .returning(|_| Err(api_error()));
        api.expect_get_environments().times(0);

        let mut session = SolutionsSession::with_api(Arc::new(api), &Config::default());
        let result = session.create_environment("prod", "Production env").await;
        assert!(result.is_err());

        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        assert!(session.drain_events().is_empty());
        assert!(session.store().environments().is_empty());
    }

    #[tokio::test]
    async fn test_create_environment_blocked_when_read_only() {
        let mut api = MockSolutionsApi::new();
        api.expect_create_environment().times(0);

        let config = Config {
            read_only: true,
            ..Default::default()
        };
        let session = SolutionsSession::with_api(Arc::new(api), &config);
        let err = session
            .create_environment("prod", "Production env")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("readOnly"));
    }
}
