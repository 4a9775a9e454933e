//! Application configuration loaded from environment variables.

use commerce::CommerceConfig;
use orchestration::MarketingConfig;
use projections::ListingFilter;
use thiserror::Error;

pub const STORE_URL: &str = "Shopify_Development_Store_URL";
pub const ACCESS_TOKEN: &str = "Shopify_Admin_GraphQL_API_Access_Token";
pub const API_VERSION: &str = "SHOPIFY_API_VERSION";
pub const PRIVATE_API_KEY: &str = "Klaviyo_Private_API_Key";
pub const MARKETING_API_URL: &str = "KLAVIYO_API_URL";
pub const IDENTITY_TAG: &str = "ASSESSMENT_USERNAME";
pub const PROFILE_EMAIL: &str = "KLAVIYO_PROFILE_EMAIL";
pub const HIDDEN_ORDER_NAMES: &str = "HIDDEN_ORDER_NAMES";

/// Configuration errors raised at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Server configuration.
///
/// Reads from environment variables:
/// - `Shopify_Development_Store_URL`, `Shopify_Admin_GraphQL_API_Access_Token`
///   and `SHOPIFY_API_VERSION` (default `2024-10`) for the commerce platform
/// - `Klaviyo_Private_API_Key` and `KLAVIYO_API_URL` for marketing events
/// - `ASSESSMENT_USERNAME`: the identity tag every request acts as
/// - `KLAVIYO_PROFILE_EMAIL`: fallback notification email
/// - `HIDDEN_ORDER_NAMES`: comma-separated listing denylist
/// - `HOST` (default `"0.0.0.0"`), `PORT` (default `3000`), `RUST_LOG` (default `"info"`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub commerce: CommerceConfig,
    pub marketing: MarketingConfig,
    pub identity_tag: String,
    pub profile_email: Option<String>,
    /// `None` keeps the built-in denylist.
    pub hidden_order_names: Option<Vec<String>>,
    /// Environment files that were found and loaded by [`Config::from_env`].
    pub env_files: Vec<&'static str>,
}

impl Config {
    /// Loads `.env.local` then `.env` if present, then reads the process
    /// environment.
    ///
    /// Runs before any subscriber is installed, so the loaded files are
    /// recorded in `env_files` for the caller to log.
    pub fn from_env() -> Result<Self, ConfigError> {
        let env_files = load_env_files(&[".env.local", ".env"]);
        let mut config = Self::from_lookup(|name| std::env::var(name).ok())?;
        config.env_files = env_files;
        Ok(config)
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let required = |name: &'static str| var(name).ok_or(ConfigError::Missing(name));

        let mut commerce = CommerceConfig::new(
            required(STORE_URL)?.trim_end_matches('/'),
            required(ACCESS_TOKEN)?,
        );
        if let Some(version) = var(API_VERSION) {
            commerce.api_version = version;
        }

        let mut marketing = MarketingConfig::new(required(PRIVATE_API_KEY)?);
        if let Some(url) = var(MARKETING_API_URL) {
            marketing = marketing.with_base_url(url);
        }

        let port = match var("PORT") {
            Some(port) => port.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: port,
            })?,
            None => 3000,
        };

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            log_level: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            commerce,
            marketing,
            identity_tag: required(IDENTITY_TAG)?,
            profile_email: var(PROFILE_EMAIL),
            hidden_order_names: var(HIDDEN_ORDER_NAMES).map(|names| {
                names
                    .split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
                    .collect()
            }),
            env_files: Vec::new(),
        })
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn listing_filter(&self) -> ListingFilter {
        match &self.hidden_order_names {
            Some(names) => ListingFilter::new(names.iter().cloned()),
            None => ListingFilter::default(),
        }
    }
}

/// Loads each existing file into the process environment, in order, and
/// returns the ones that were read.
///
/// Variables already set are never overwritten.
pub fn load_env_files<'a>(files: &[&'a str]) -> Vec<&'a str> {
    files
        .iter()
        .copied()
        .filter(|file| dotenvy::from_filename(file).is_ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    const REQUIRED: &[(&str, &str)] = &[
        (STORE_URL, "https://demo.myshopify.com/"),
        (ACCESS_TOKEN, "shpat_secret"),
        (PRIVATE_API_KEY, "pk_secret"),
        (IDENTITY_TAG, "alice"),
    ];

    #[test]
    fn test_default_values() {
        let config = Config::from_lookup(env(REQUIRED)).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.commerce.api_version, "2024-10");
        assert_eq!(
            config.commerce.endpoint(),
            "https://demo.myshopify.com/admin/api/2024-10/graphql.json"
        );
        assert_eq!(
            config.marketing.events_endpoint(),
            "https://a.klaviyo.com/api/events/"
        );
        assert_eq!(config.identity_tag, "alice");
        assert_eq!(config.profile_email, None);
        assert_eq!(config.listing_filter(), ListingFilter::default());
        assert!(config.env_files.is_empty());
    }

    #[test]
    fn test_missing_required_variable() {
        for (missing, _) in REQUIRED {
            let pairs: Vec<_> = REQUIRED
                .iter()
                .copied()
                .filter(|(name, _)| name != missing)
                .collect();
            let err = Config::from_lookup(env(&pairs)).unwrap_err();
            assert_eq!(err, ConfigError::Missing(*missing));
        }
    }

    #[test]
    fn test_blank_value_counts_as_missing() {
        let pairs: Vec<_> = REQUIRED
            .iter()
            .map(|&(name, value)| {
                if name == IDENTITY_TAG {
                    (name, "  ")
                } else {
                    (name, value)
                }
            })
            .collect();
        let err = Config::from_lookup(env(&pairs)).unwrap_err();
        assert_eq!(err, ConfigError::Missing(IDENTITY_TAG));
    }

    #[test]
    fn test_optional_overrides() {
        let mut pairs = REQUIRED.to_vec();
        pairs.extend([
            (API_VERSION, "2025-01"),
            (MARKETING_API_URL, "http://localhost:9000"),
            (PROFILE_EMAIL, "buyer@example.com"),
            (HIDDEN_ORDER_NAMES, "#1001, #1002,,"),
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
        ]);
        let config = Config::from_lookup(env(&pairs)).unwrap();

        assert_eq!(config.commerce.api_version, "2025-01");
        assert_eq!(
            config.marketing.events_endpoint(),
            "http://localhost:9000/api/events/"
        );
        assert_eq!(config.profile_email.as_deref(), Some("buyer@example.com"));
        assert_eq!(
            config.hidden_order_names,
            Some(vec!["#1001".to_string(), "#1002".to_string()])
        );
        assert_eq!(config.addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_invalid_port() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("PORT", "http"));
        let err = Config::from_lookup(env(&pairs)).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                name: "PORT",
                value: "http".to_string()
            }
        );
    }

    #[test]
    fn test_load_env_files_reports_only_existing_files() {
        let dir = std::env::temp_dir().join(format!("api-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let present = dir.join("present.env");
        std::fs::write(&present, "API_CONFIG_TEST_ONLY_VAR=loaded\n").unwrap();
        let present = present.to_str().unwrap().to_string();
        let absent = dir.join("absent.env").to_str().unwrap().to_string();

        let loaded = load_env_files(&[absent.as_str(), present.as_str()]);

        assert_eq!(loaded, vec![present.as_str()]);
        assert_eq!(
            std::env::var("API_CONFIG_TEST_ONLY_VAR").as_deref(),
            Ok("loaded")
        );
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = Config::from_lookup(env(REQUIRED)).unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("shpat_secret"));
        assert!(!debug.contains("pk_secret"));
    }
}
