//! Process-wide serving state
//!
//! `initialize` runs exactly once before the HTTP server starts. The resulting
//! `AppState` is wrapped in `web::Data` and only ever read by handlers.

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{error, info, warn};

use super::artifacts::{ArtifactBundle, ArtifactError, NearestNeighborsModel, Registry};
use super::lifecycle::{Lifecycle, LifecycleError, LifecycleState};
use crate::config::{ArtifactConfig, RegistrySource};

pub const SERVICE_NAME: &str = "recommendation-api";

/// Faults that abort startup instead of degrading the service.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("fatal artifact error: {0}")]
    Artifact(#[from] ArtifactError),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}

#[derive(Debug)]
pub struct AppState {
    lifecycle: LifecycleState,
    model: Option<NearestNeighborsModel>,
    users: Registry,
    items: Registry,
    registry_source: RegistrySource,
    loaded_at: Option<DateTime<Utc>>,
}

impl AppState {
    pub fn from_bundle(bundle: ArtifactBundle, registry_source: RegistrySource) -> Self {
        Self {
            lifecycle: LifecycleState::Ready,
            model: Some(bundle.model),
            users: bundle.users,
            items: bundle.items,
            registry_source,
            loaded_at: Some(Utc::now()),
        }
    }

    pub fn degraded(registry_source: RegistrySource) -> Self {
        Self {
            lifecycle: LifecycleState::Degraded,
            model: None,
            users: Registry::default(),
            items: Registry::default(),
            registry_source,
            loaded_at: None,
        }
    }

    pub fn service_name(&self) -> &'static str {
        SERVICE_NAME
    }

    pub fn lifecycle(&self) -> LifecycleState {
        self.lifecycle
    }

    pub fn model(&self) -> Option<&NearestNeighborsModel> {
        self.model.as_ref()
    }

    pub fn is_model_loaded(&self) -> bool {
        self.model.is_some()
    }

    pub fn users(&self) -> &Registry {
        &self.users
    }

    pub fn items(&self) -> &Registry {
        &self.items
    }

    pub fn registry_source(&self) -> RegistrySource {
        self.registry_source
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }
}

/// Single startup attempt.
///
/// Missing or undecodable artifacts put the service into the degraded state;
/// other read failures are returned as `StartupError`.
pub fn initialize(config: &ArtifactConfig) -> Result<AppState, StartupError> {
    let mut lifecycle = Lifecycle::new();
    lifecycle.transition(LifecycleState::Loading)?;

    info!(
        model_path = %config.model_path.display(),
        user_map_path = %config.user_map_path.display(),
        item_map_path = %config.item_map_path.display(),
        user_registry_source = %config.user_registry_source,
        "Loading recommendation artifacts"
    );

    match ArtifactBundle::load(config) {
        Ok(bundle) => {
            lifecycle.transition(LifecycleState::Ready)?;
            Ok(AppState::from_bundle(bundle, config.user_registry_source))
        }
        Err(err) if err.is_recoverable() => {
            match &err {
                ArtifactError::Missing { path } => {
                    error!(path = %path.display(), "Cannot find artifact file")
                }
                other => error!(error = %other, "Could not load model artifacts"),
            }
            warn!("Serving in degraded mode: recommendations unavailable until restart");
            lifecycle.transition(LifecycleState::Degraded)?;
            Ok(AppState::degraded(config.user_registry_source))
        }
        Err(err) => Err(StartupError::Artifact(err)),
    }
}
