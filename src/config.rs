use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::models::ScoringWeights;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub store: StoreSettings,
    #[serde(default)]
    pub appwrite: Option<AppwriteSettings>,
    #[serde(default)]
    pub collection: CollectionSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    pub auth: AuthSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
    /// CORS origins; empty means permissive
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Appwrite,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreSettings {
    #[serde(default = "default_backend")]
    pub backend: StoreBackend,
    /// JSON documents loaded into the memory backend at startup
    #[serde(default)]
    pub seed_path: Option<PathBuf>,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            seed_path: None,
        }
    }
}

fn default_backend() -> StoreBackend { StoreBackend::Appwrite }

#[derive(Debug, Clone, Deserialize)]
pub struct AppwriteSettings {
    pub endpoint: String,
    pub api_key: String,
    pub project_id: String,
    pub database_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionSettings {
    #[serde(default = "default_users_collection")]
    pub users: String,
    #[serde(default = "default_jobs_collection")]
    pub jobs: String,
    #[serde(default = "default_gigs_collection")]
    pub gigs: String,
}

impl Default for CollectionSettings {
    fn default() -> Self {
        Self {
            users: default_users_collection(),
            jobs: default_jobs_collection(),
            gigs: default_gigs_collection(),
        }
    }
}

fn default_users_collection() -> String { "users".to_string() }
fn default_jobs_collection() -> String { "jobs".to_string() }
fn default_gigs_collection() -> String { "micro_gigs".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_max_distance_km")]
    pub max_distance_km: f64,
    #[serde(default = "default_limit")]
    pub default_limit: i64,
    #[serde(default = "default_max_limit")]
    pub max_limit: i64,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default)]
    pub include_gigs: bool,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            max_distance_km: default_max_distance_km(),
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            page_size: default_page_size(),
            include_gigs: false,
        }
    }
}

fn default_max_distance_km() -> f64 { crate::core::scoring::DEFAULT_MAX_DISTANCE_KM }
fn default_limit() -> i64 { crate::core::recommender::DEFAULT_LIMIT }
fn default_max_limit() -> i64 { 100 }
fn default_page_size() -> usize { crate::core::recommender::DEFAULT_PAGE_SIZE }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_skill_weight")]
    pub skill: f64,
    #[serde(default = "default_distance_weight")]
    pub distance: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            skill: default_skill_weight(),
            distance: default_distance_weight(),
        }
    }
}

fn default_skill_weight() -> f64 { crate::core::scoring::SKILL_WEIGHT }
fn default_distance_weight() -> f64 { crate::core::scoring::DISTANCE_WEIGHT }

impl WeightsConfig {
    /// Weights must be finite, non-negative and sum to 1 so scores stay within [0, 1]
    pub fn to_weights(&self) -> Result<ScoringWeights, ConfigError> {
        let finite = self.skill.is_finite() && self.distance.is_finite();
        if !finite
            || self.skill < 0.0
            || self.distance < 0.0
            || ((self.skill + self.distance) - 1.0).abs() > 1e-9
        {
            return Err(ConfigError::Message(format!(
                "scoring weights must be non-negative and sum to 1 (skill={}, distance={})",
                self.skill, self.distance
            )));
        }

        Ok(ScoringWeights {
            skill: self.skill,
            distance: self.distance,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub secret_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with LINKWORK__)
    pub fn load() -> Result<Self, ConfigError> {
        let files = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false));

        Self::finish(files)
    }

    /// Load configuration from a custom path
    ///
    /// Environment variables and `SECRET_KEY` still apply on top of the file.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::finish(Config::builder().add_source(File::from(path.as_ref())))
    }

    fn finish(files: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let settings = files
            // e.g., LINKWORK__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("LINKWORK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = apply_env_overrides(settings)?;

        settings.try_deserialize::<Settings>()?.validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        self.scoring.weights.to_weights()?;

        if self.matching.page_size == 0 {
            return Err(ConfigError::Message("matching.page_size must be at least 1".to_string()));
        }
        if self.matching.max_limit <= 0 {
            return Err(ConfigError::Message(format!(
                "matching.max_limit must be positive (got {})",
                self.matching.max_limit
            )));
        }

        if self.store.backend == StoreBackend::Appwrite && self.appwrite.is_none() {
            return Err(ConfigError::Message(
                "store.backend is appwrite but no [appwrite] section is configured".to_string(),
            ));
        }
        if self.auth.secret_key.trim().is_empty() {
            return Err(ConfigError::Message("auth.secret_key must not be empty".to_string()));
        }

        Ok(self)
    }
}

/// Apply well-known environment variables on top of the layered config
///
/// `SECRET_KEY` is honoured for the token secret, matching how the rest of
/// the platform is deployed.
fn apply_env_overrides(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(secret) = env::var("SECRET_KEY") {
        builder = builder.set_override("auth.secret_key", secret)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn from_toml(toml: &str) -> Result<Settings, ConfigError> {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize::<Settings>()?
            .validated()
    }

    #[test]
    fn test_default_weights() {
        let weights = WeightsConfig::default();
        assert_eq!(weights.skill, 0.6);
        assert_eq!(weights.distance, 0.4);
        assert!(weights.to_weights().is_ok());
    }

    #[test]
    fn test_invalid_weights_rejected() {
        let weights = WeightsConfig { skill: 0.7, distance: 0.7 };
        assert!(weights.to_weights().is_err());

        let weights = WeightsConfig { skill: 1.2, distance: -0.2 };
        assert!(weights.to_weights().is_err());
    }

    #[test]
    fn test_non_finite_weights_rejected() {
        let weights = WeightsConfig { skill: f64::NAN, distance: f64::NAN };
        assert!(weights.to_weights().is_err());

        let weights = WeightsConfig { skill: f64::INFINITY, distance: 0.4 };
        assert!(weights.to_weights().is_err());

        let result = from_toml(
            r#"
            [server]
            host = "127.0.0.1"
            port = 8000

            [store]
            backend = "memory"

            [scoring.weights]
            skill = nan
            distance = nan

            [auth]
            secret_key = "dev-secret"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_page_and_limit_rejected() {
        let base = r#"
            [server]
            host = "127.0.0.1"
            port = 8000

            [store]
            backend = "memory"

            [auth]
            secret_key = "dev-secret"
            "#;

        assert!(from_toml(&format!("{}\n[matching]\npage_size = 0\n", base)).is_err());
        assert!(from_toml(&format!("{}\n[matching]\nmax_limit = 0\n", base)).is_err());
        assert!(from_toml(&format!("{}\n[matching]\nmax_limit = -3\n", base)).is_err());
        assert!(from_toml(&format!("{}\n[matching]\nmax_limit = 5\n", base)).is_ok());
    }

    #[test]
    fn test_load_from_applies_secret_override() {
        let path = std::env::temp_dir().join(format!("linkwork-config-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            r#"
            [server]
            host = "127.0.0.1"
            port = 8000

            [store]
            backend = "memory"
            seed_path = "seed.json"

            [auth]
            secret_key = "from-file"
            "#,
        )
        .unwrap();

        std::env::set_var("SECRET_KEY", "from-env");
        let settings = Settings::load_from(&path);
        std::env::remove_var("SECRET_KEY");
        std::fs::remove_file(&path).unwrap();

        let settings = settings.unwrap();
        assert_eq!(settings.auth.secret_key, "from-env");
        assert_eq!(settings.store.seed_path, Some(PathBuf::from("seed.json")));
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }

    #[test]
    fn test_minimal_memory_config() {
        let settings = from_toml(
            r#"
            [server]
            host = "127.0.0.1"
            port = 8000

            [store]
            backend = "memory"

            [auth]
            secret_key = "dev-secret"
            "#,
        )
        .unwrap();

        assert_eq!(settings.store.backend, StoreBackend::Memory);
        assert_eq!(settings.matching.max_distance_km, 50.0);
        assert_eq!(settings.matching.default_limit, 10);
        assert_eq!(settings.matching.page_size, 100);
        assert!(!settings.matching.include_gigs);
        assert_eq!(settings.collection.gigs, "micro_gigs");
    }

    #[test]
    fn test_appwrite_backend_requires_section() {
        let result = from_toml(
            r#"
            [server]
            host = "127.0.0.1"
            port = 8000

            [auth]
            secret_key = "dev-secret"
            "#,
        );

        assert!(result.is_err());
    }
}
