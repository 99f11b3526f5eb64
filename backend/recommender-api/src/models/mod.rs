use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::services::{LifecycleState, DEFAULT_RECOMMENDATIONS};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WelcomeResponse {
    pub message: String,
}

/// Readiness payload. Always served with 200; `status` carries the verdict.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// "ok" when the model is loaded, "error" otherwise
    pub status: String,
    pub service: String,
    pub model_loaded: bool,
}

/// Query parameters for GET /recommend/{user_id}
#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    #[serde(default = "default_n_recommendations")]
    pub n_recommendations: i64,
}

fn default_n_recommendations() -> i64 {
    DEFAULT_RECOMMENDATIONS
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ModelInfoResponse {
    pub state: LifecycleState,
    pub registry_source: String,
    pub user_count: usize,
    pub item_count: usize,
    pub n_neighbors: Option<usize>,
    pub metric: Option<String>,
    pub loaded_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_default() {
        let query: RecommendationQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.n_recommendations, 5);
    }

    #[test]
    fn test_lifecycle_state_serializes_lowercase() {
        let info = ModelInfoResponse {
            state: LifecycleState::Degraded,
            registry_source: "artifact".to_string(),
            user_count: 0,
            item_count: 0,
            n_neighbors: None,
            metric: None,
            loaded_at: None,
        };
        let value = serde_json::to_value(&info).unwrap();
        assert_eq!(value["state"], "degraded");
        assert!(value["n_neighbors"].is_null());
    }
}
