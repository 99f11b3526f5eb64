use actix_web::http::uri::{InvalidUri, Uri};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} has invalid value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub artifacts: ArtifactConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactConfig {
    pub model_path: PathBuf,
    pub user_map_path: PathBuf,
    pub item_map_path: PathBuf,
    pub user_registry_source: RegistrySource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

/// Where the user registry comes from at startup.
///
/// `Fixture` replaces the user map artifact with a small fixed mapping and is
/// meant for local development and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrySource {
    Artifact,
    Fixture,
}

impl FromStr for RegistrySource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "artifact" => Ok(RegistrySource::Artifact),
            "fixture" => Ok(RegistrySource::Fixture),
            other => Err(format!("expected 'artifact' or 'fixture', got '{}'", other)),
        }
    }
}

impl fmt::Display for RegistrySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistrySource::Artifact => f.write_str("artifact"),
            RegistrySource::Fixture => f.write_str("fixture"),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        Ok(Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                host: env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_var("APP_PORT", "8000")?,
                workers: match env::var("HTTP_WORKERS") {
                    Ok(raw) => Some(parse_workers(&raw)?),
                    Err(_) => None,
                },
            },
            artifacts: ArtifactConfig {
                model_path: env::var("MODEL_PATH")
                    .unwrap_or_else(|_| default_model_path().to_string())
                    .into(),
                user_map_path: env::var("USER_MAP_PATH")
                    .unwrap_or_else(|_| default_user_map_path().to_string())
                    .into(),
                item_map_path: env::var("ITEM_MAP_PATH")
                    .unwrap_or_else(|_| default_item_map_path().to_string())
                    .into(),
                user_registry_source: parse_var("USER_REGISTRY_SOURCE", "artifact")?,
            },
            cors: CorsConfig {
                allowed_origins: parse_origins(
                    &env::var("CORS_ALLOWED_ORIGINS")
                        .unwrap_or_else(|_| default_cors_origins().to_string()),
                )?,
            },
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.app.host, self.app.port)
    }
}

fn parse_var<T>(key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw = env::var(key).unwrap_or_else(|_| default.to_string());
    parse_value(key, &raw)
}

fn parse_value<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

fn parse_workers(raw: &str) -> Result<usize, ConfigError> {
    let workers: usize = parse_value("HTTP_WORKERS", raw)?;
    if workers == 0 {
        return Err(ConfigError::Invalid {
            key: "HTTP_WORKERS",
            value: raw.to_string(),
            reason: "must be greater than 0".to_string(),
        });
    }
    Ok(workers)
}

/// Split a comma-separated origin list. Each entry must be a concrete
/// `scheme://host[:port]` origin; the CORS layer does not accept `*`.
fn parse_origins(raw: &str) -> Result<Vec<String>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            check_origin(origin)
                .map(|()| origin.to_string())
                .map_err(|reason| ConfigError::Invalid {
                    key: "CORS_ALLOWED_ORIGINS",
                    value: origin.to_string(),
                    reason,
                })
        })
        .collect()
}

fn check_origin(origin: &str) -> Result<(), String> {
    if origin == "*" {
        return Err("wildcard origin is not supported, list origins explicitly".to_string());
    }
    let uri: Uri = origin.parse().map_err(|e: InvalidUri| e.to_string())?;
    if uri.scheme().is_none() || uri.host().is_none() {
        return Err("expected scheme://host[:port]".to_string());
    }
    Ok(())
}

fn default_model_path() -> &'static str {
    "./artifacts/knn_model.bin"
}

fn default_user_map_path() -> &'static str {
    "./artifacts/user_map.bin"
}

fn default_item_map_path() -> &'static str {
    "./artifacts/item_map.bin"
}

fn default_cors_origins() -> &'static str {
    "http://localhost:5173,http://127.0.0.1:5173"
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const KEYS: [&str; 9] = [
        "APP_ENV",
        "APP_HOST",
        "APP_PORT",
        "HTTP_WORKERS",
        "MODEL_PATH",
        "USER_MAP_PATH",
        "ITEM_MAP_PATH",
        "USER_REGISTRY_SOURCE",
        "CORS_ALLOWED_ORIGINS",
    ];

    fn clear_env() {
        for key in KEYS {
            env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let config = Config::from_env().unwrap();

        assert_eq!(config.app.port, 8000);
        assert_eq!(config.app.workers, None);
        assert_eq!(config.bind_addr(), "0.0.0.0:8000");
        assert_eq!(
            config.artifacts.item_map_path,
            PathBuf::from("./artifacts/item_map.bin")
        );
        assert_eq!(
            config.artifacts.user_registry_source,
            RegistrySource::Artifact
        );
        assert_eq!(
            config.cors.allowed_origins,
            vec!["http://localhost:5173", "http://127.0.0.1:5173"]
        );
    }

    #[test]
    #[serial]
    fn test_overrides() {
        clear_env();
        env::set_var("APP_PORT", "9100");
        env::set_var("HTTP_WORKERS", "2");
        env::set_var("MODEL_PATH", "/srv/models/knn.bin");
        env::set_var("ITEM_MAP_PATH", "/srv/models/items.bin");
        env::set_var("USER_REGISTRY_SOURCE", "Fixture");
        env::set_var("CORS_ALLOWED_ORIGINS", "https://a.example, ,https://b.example");

        let config = Config::from_env().unwrap();
        clear_env();

        assert_eq!(config.app.port, 9100);
        assert_eq!(config.app.workers, Some(2));
        assert_eq!(
            config.artifacts.model_path,
            PathBuf::from("/srv/models/knn.bin")
        );
        assert_eq!(
            config.artifacts.item_map_path,
            PathBuf::from("/srv/models/items.bin")
        );
        assert_eq!(
            config.artifacts.user_registry_source,
            RegistrySource::Fixture
        );
        assert_eq!(
            config.cors.allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    #[serial]
    fn test_invalid_port_is_rejected() {
        clear_env();
        env::set_var("APP_PORT", "eighty");
        let err = Config::from_env().unwrap_err();
        clear_env();

        assert!(err.to_string().contains("APP_PORT"));
    }

    #[test]
    #[serial]
    fn test_unknown_registry_source_is_rejected() {
        clear_env();
        env::set_var("USER_REGISTRY_SOURCE", "database");
        let err = Config::from_env().unwrap_err();
        clear_env();

        assert!(err.to_string().contains("USER_REGISTRY_SOURCE"));
    }

    #[test]
    #[serial]
    fn test_zero_workers_is_rejected() {
        clear_env();
        env::set_var("HTTP_WORKERS", "0");
        let err = Config::from_env().unwrap_err();
        clear_env();

        let ConfigError::Invalid { key, value, .. } = err;
        assert_eq!(key, "HTTP_WORKERS");
        assert_eq!(value, "0");
    }

    #[test]
    #[serial]
    fn test_wildcard_or_invalid_origin_is_rejected() {
        for raw in [
            "*",
            "https://a.example,*",
            "not a uri",
            "localhost:5173",
            "/relative",
        ] {
            clear_env();
            env::set_var("CORS_ALLOWED_ORIGINS", raw);
            let result = Config::from_env();
            clear_env();

            match result {
                Err(ConfigError::Invalid { key, .. }) => {
                    assert_eq!(key, "CORS_ALLOWED_ORIGINS", "origin list {:?}", raw)
                }
                Ok(config) => panic!(
                    "origin list {:?} accepted as {:?}",
                    raw, config.cors.allowed_origins
                ),
            }
        }
    }

    #[test]
    fn test_explicit_origins_pass_validation() {
        let origins = parse_origins("http://localhost:5173, https://shop.example:8443").unwrap();
        assert_eq!(
            origins,
            vec!["http://localhost:5173", "https://shop.example:8443"]
        );
    }
}
