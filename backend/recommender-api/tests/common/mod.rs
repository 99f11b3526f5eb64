#![allow(dead_code)]

use actix_web::web;
use std::collections::HashMap;
use tempfile::TempDir;

use recommender_api::config::{ArtifactConfig, RegistrySource};
use recommender_api::services::artifacts::write_artifact;
use recommender_api::{initialize, AppState, NearestNeighborsModel};

/// Registered users in the artifact-backed test registry.
pub const ARTIFACT_USERS: [i64; 4] = [1, 17, 200, 4096];

pub fn artifact_config(dir: &TempDir, source: RegistrySource) -> ArtifactConfig {
    ArtifactConfig {
        model_path: dir.path().join("knn_model.bin"),
        user_map_path: dir.path().join("user_map.bin"),
        item_map_path: dir.path().join("item_map.bin"),
        user_registry_source: source,
    }
}

pub fn write_artifacts(config: &ArtifactConfig) {
    let model = NearestNeighborsModel {
        n_neighbors: 10,
        metric: "cosine".to_string(),
        fit_data: vec![vec![1.0, 0.0, 2.0], vec![0.0, 3.0, 1.0]],
    };
    let users: HashMap<i64, usize> = ARTIFACT_USERS
        .iter()
        .enumerate()
        .map(|(idx, id)| (*id, idx))
        .collect();
    let items: HashMap<i64, usize> = [12, 45, 88, 102, 11, 23, 7]
        .iter()
        .enumerate()
        .map(|(idx, id)| (*id, idx))
        .collect();

    write_artifact(&config.model_path, &model).expect("write model");
    write_artifact(&config.user_map_path, &users).expect("write user map");
    write_artifact(&config.item_map_path, &items).expect("write item map");
}

/// State after a successful startup. Keep the `TempDir` alive for the test.
pub fn ready_state(source: RegistrySource) -> (TempDir, web::Data<AppState>) {
    let dir = TempDir::new().expect("tempdir");
    let config = artifact_config(&dir, source);
    write_artifacts(&config);
    let state = initialize(&config).expect("startup");
    (dir, web::Data::new(state))
}

/// State after startup found no artifacts on disk.
pub fn degraded_state() -> (TempDir, web::Data<AppState>) {
    let dir = TempDir::new().expect("tempdir");
    let config = artifact_config(&dir, RegistrySource::Artifact);
    let state = initialize(&config).expect("startup");
    (dir, web::Data::new(state))
}
