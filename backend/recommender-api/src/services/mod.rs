//! Serving shell services
//!
//! - `artifacts`: bincode artifact loading and registries
//! - `lifecycle`: startup state machine
//! - `state`: process-wide state and the startup hook
//! - `recommendation`: request validation and the recommendation payload

pub mod artifacts;
pub mod lifecycle;
pub mod recommendation;
pub mod state;

pub use artifacts::{ArtifactBundle, ArtifactError, NearestNeighborsModel, Registry};
pub use lifecycle::{Lifecycle, LifecycleError, LifecycleState};
pub use recommendation::{recommend, UserId, DEFAULT_RECOMMENDATIONS, RECOMMENDATION_LIST};
pub use state::{initialize, AppState, StartupError, SERVICE_NAME};
