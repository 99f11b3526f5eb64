// ============================================
// Startup artifacts
// ============================================
//
// The offline training job exports three bincode files:
//   knn_model.bin  → NearestNeighborsModel
//   user_map.bin   → HashMap<i64, usize>  (user id → row index)
//   item_map.bin   → HashMap<i64, usize>  (item id → column index)
//
// Loading is all-or-nothing; see `ArtifactBundle::load`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::config::{ArtifactConfig, RegistrySource};

/// Fixture user registry used when `USER_REGISTRY_SOURCE=fixture`.
pub const FIXTURE_USER_REGISTRY: [(i64, usize); 3] = [(1, 0), (200, 1), (500, 2)];

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("artifact not found: {}", path.display())]
    Missing { path: PathBuf },

    #[error("artifact {} could not be decoded: {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },

    #[error("artifact {} could not be read: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ArtifactError {
    /// Missing and malformed artifacts leave the service running in degraded
    /// mode. Anything else is an environment problem and aborts startup.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ArtifactError::Missing { .. } | ArtifactError::Malformed { .. }
        )
    }
}

/// Fitted nearest-neighbor index exported by the training job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearestNeighborsModel {
    pub n_neighbors: usize,
    pub metric: String,
    /// Row-major user × item interaction matrix the index was fitted on.
    pub fit_data: Vec<Vec<f32>>,
}

impl NearestNeighborsModel {
    pub fn n_samples(&self) -> usize {
        self.fit_data.len()
    }

    fn validate(&self) -> Result<(), String> {
        if self.n_neighbors == 0 {
            return Err("n_neighbors must be positive".to_string());
        }

        if let Some(width) = self.fit_data.first().map(Vec::len) {
            if let Some(row) = self.fit_data.iter().position(|r| r.len() != width) {
                return Err(format!(
                    "fit_data row {} has {} columns, expected {}",
                    row,
                    self.fit_data[row].len(),
                    width
                ));
            }
        }

        Ok(())
    }
}

/// Immutable external id → internal index mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    entries: HashMap<i64, usize>,
}

impl Registry {
    pub fn contains(&self, id: i64) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn fixture() -> Self {
        FIXTURE_USER_REGISTRY.into_iter().collect()
    }
}

impl FromIterator<(i64, usize)> for Registry {
    fn from_iter<I: IntoIterator<Item = (i64, usize)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl From<HashMap<i64, usize>> for Registry {
    fn from(entries: HashMap<i64, usize>) -> Self {
        Self { entries }
    }
}

/// Everything startup needs to reach the ready state.
#[derive(Debug, Clone)]
pub struct ArtifactBundle {
    pub model: NearestNeighborsModel,
    pub users: Registry,
    pub items: Registry,
}

impl ArtifactBundle {
    pub fn load(config: &ArtifactConfig) -> Result<Self, ArtifactError> {
        let model: NearestNeighborsModel = read_artifact(&config.model_path)?;
        model.validate().map_err(|reason| ArtifactError::Malformed {
            path: config.model_path.clone(),
            reason,
        })?;

        let items = load_registry(&config.item_map_path)?;

        let users = match config.user_registry_source {
            RegistrySource::Artifact => load_registry(&config.user_map_path)?,
            RegistrySource::Fixture => Registry::fixture(),
        };

        info!(
            n_neighbors = model.n_neighbors,
            n_samples = model.n_samples(),
            user_entries = users.len(),
            item_entries = items.len(),
            user_registry_source = %config.user_registry_source,
            "Model and mappings loaded"
        );

        Ok(Self {
            model,
            users,
            items,
        })
    }
}

pub fn load_registry(path: &Path) -> Result<Registry, ArtifactError> {
    let entries: HashMap<i64, usize> = read_artifact(path)?;
    Ok(Registry::from(entries))
}

fn read_artifact<T>(path: &Path) -> Result<T, ArtifactError>
where
    T: for<'de> Deserialize<'de>,
{
    let data = fs::read(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ArtifactError::Missing {
            path: path.to_path_buf(),
        },
        _ => ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    bincode::deserialize(&data).map_err(|e| ArtifactError::Malformed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Serialize an artifact the same way the training job does.
pub fn write_artifact<T: Serialize>(path: &Path, value: &T) -> io::Result<()> {
    let bytes = bincode::serialize(value).map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    fs::write(path, bytes)
}
