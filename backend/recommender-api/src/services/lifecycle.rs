/// Startup lifecycle of the serving shell
///
/// State transitions:
/// - Uninitialized → Loading: startup begins
/// - Loading → Ready: all artifacts loaded
/// - Loading → Degraded: a recoverable artifact fault occurred
///
/// Ready and Degraded are terminal for the life of the process.
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use tracing::info;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleState {
    Uninitialized,
    Loading,
    Ready,
    Degraded,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecycleState::Uninitialized => "uninitialized",
            LifecycleState::Loading => "loading",
            LifecycleState::Ready => "ready",
            LifecycleState::Degraded => "degraded",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("illegal lifecycle transition {from} -> {to}")]
pub struct LifecycleError {
    pub from: LifecycleState,
    pub to: LifecycleState,
}

#[derive(Debug)]
pub struct Lifecycle {
    current: LifecycleState,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            current: LifecycleState::Uninitialized,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.current
    }

    pub fn transition(&mut self, to: LifecycleState) -> Result<(), LifecycleError> {
        use LifecycleState::*;

        let allowed = matches!(
            (self.current, to),
            (Uninitialized, Loading) | (Loading, Ready) | (Loading, Degraded)
        );
        if !allowed {
            return Err(LifecycleError {
                from: self.current,
                to,
            });
        }

        info!(from = %self.current, to = %to, "Lifecycle transition");
        self.current = to;
        Ok(())
    }
}
