use serde::{Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;

use super::state::AppState;
use crate::error::{AppError, Result};

/// Items served to every registered user until the ranking model is wired in.
pub const RECOMMENDATION_LIST: [i64; 7] = [12, 45, 88, 102, 11, 23, 7];

pub const DEFAULT_RECOMMENDATIONS: i64 = 5;

/// User identifier taken from the request path.
///
/// Any integer is accepted. Integers outside the i64 range cannot appear in a
/// registry and are kept verbatim so they still resolve to not-found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserId {
    Id(i64),
    OutOfRange(String),
}

impl FromStr for UserId {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.parse::<i64>() {
            Ok(id) => Ok(UserId::Id(id)),
            Err(_) if is_integer_literal(s) => Ok(UserId::OutOfRange(s.to_string())),
            Err(e) => Err(format!("'{}' is not an integer: {}", s, e)),
        }
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Id(id) => write!(f, "{}", id),
            UserId::OutOfRange(raw) => f.write_str(raw),
        }
    }
}

fn is_integer_literal(s: &str) -> bool {
    let digits = s.strip_prefix(|c: char| c == '-' || c == '+').unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Resolve recommendations for `user_id`.
///
/// Checks run in order and the first failure wins:
/// 1. model not loaded → `ServiceUnavailable`
/// 2. user not registered → `NotFound`
pub fn recommend(state: &AppState, user_id: UserId, n_recommendations: i64) -> Result<Vec<i64>> {
    if !state.is_model_loaded() {
        return Err(AppError::ServiceUnavailable(
            "Model is unavailable (503 Service Unavailable).".to_string(),
        ));
    }

    let registered = match user_id {
        UserId::Id(id) => state.users().contains(id),
        UserId::OutOfRange(_) => false,
    };
    if !registered {
        return Err(AppError::NotFound(format!(
            "User ID {} not found in user map.",
            user_id
        )));
    }

    let take = usize::try_from(n_recommendations)
        .unwrap_or(0)
        .min(RECOMMENDATION_LIST.len());

    Ok(RECOMMENDATION_LIST[..take].to_vec())
}
