pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod openapi;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};

pub use services::{
    initialize, recommend, AppState, ArtifactBundle, ArtifactError, LifecycleState,
    NearestNeighborsModel, Registry, StartupError, UserId, RECOMMENDATION_LIST,
};
