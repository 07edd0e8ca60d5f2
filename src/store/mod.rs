//! Resource store
//!
//! Holds the last-fetched lists of solutions, UI services, and environments,
//! plus the per-family refresh flags. This is the single source of truth the
//! view layer reads; every list update replaces the whole list, so readers
//! never observe a partially updated one.

use std::sync::{Arc, RwLock};

use k8s_openapi::api::core::v1::Service;

use crate::models::{Environment, Solution};
use crate::refresh::RefreshFamily;

#[derive(Default)]
struct StoreInner {
    solutions: Vec<Solution>,
    services: Vec<Service>,
    environments: Vec<Environment>,
    solutions_refreshing: bool,
    environments_refreshing: bool,
}

/// Thread-safe store of cluster-derived state.
#[derive(Clone)]
pub struct SolutionsStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl SolutionsStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(StoreInner::default())),
        }
    }

    /// Replace the solution list.
    pub fn set_solutions(&self, solutions: Vec<Solution>) {
        let mut state = self.inner.write().unwrap();
        state.solutions = solutions;
    }

    /// Get all solutions.
    pub fn solutions(&self) -> Vec<Solution> {
        let state = self.inner.read().unwrap();
        state.solutions.clone()
    }

    /// Replace the UI service list.
    pub fn set_services(&self, services: Vec<Service>) {
        let mut state = self.inner.write().unwrap();
        state.services = services;
    }

    /// Get all UI services.
    pub fn services(&self) -> Vec<Service> {
        let state = self.inner.read().unwrap();
        state.services.clone()
    }

    /// Replace the environment list.
    pub fn set_environments(&self, environments: Vec<Environment>) {
        let mut state = self.inner.write().unwrap();
        state.environments = environments;
    }

    /// Get all environments.
    pub fn environments(&self) -> Vec<Environment> {
        let state = self.inner.read().unwrap();
        state.environments.clone()
    }

    /// Flip the refresh flag for a family.
    ///
    /// The flag is the sole stop condition a running refresh loop checks
    /// between iterations.
    pub fn set_refreshing(&self, family: RefreshFamily, refreshing: bool) {
        let mut state = self.inner.write().unwrap();
        match family {
            RefreshFamily::Solutions => state.solutions_refreshing = refreshing,
            RefreshFamily::Environments => state.environments_refreshing = refreshing,
        }
    }

    /// Read the refresh flag for a family.
    pub fn is_refreshing(&self, family: RefreshFamily) -> bool {
        let state = self.inner.read().unwrap();
        match family {
            RefreshFamily::Solutions => state.solutions_refreshing,
            RefreshFamily::Environments => state.environments_refreshing,
        }
    }

    pub fn is_solutions_refreshing(&self) -> bool {
        self.is_refreshing(RefreshFamily::Solutions)
    }

    pub fn is_environments_refreshing(&self) -> bool {
        self.is_refreshing(RefreshFamily::Environments)
    }
}

impl Default for SolutionsStore {
    fn default() -> Self {
        Self::new()
    }
}
