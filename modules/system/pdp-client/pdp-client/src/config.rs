//! Configuration for the PDP client.

use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use secrecy::SecretString;
use serde::Deserialize;

/// Sidecar PDP address used when none is configured.
pub const DEFAULT_PDP_URL: &str = "http://localhost:7766";

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Prefix of environment variables overriding file configuration.
pub const ENV_PREFIX: &str = "PDP_CLIENT_";

/// Keys whose environment overrides are parsed as typed values. All other
/// overrides are taken verbatim, so `PDP_CLIENT_TOKEN=0042` stays `"0042"`.
const TYPED_ENV_KEYS: &[&str] = &["timeout_secs"];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to load config: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("invalid {field} '{value}': {source}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("timeout_secs must be greater than zero")]
    InvalidTimeout,
}

/// Configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PdpClientConfig {
    /// API key sent as `Authorization: Bearer <token>`.
    pub token: SecretString,

    /// Base URL of the native sidecar PDP.
    pub pdp_url: String,

    /// Base URL of an OPA-style policy engine. When set (and non-empty),
    /// requests are wrapped under `input` and responses unwrapped from `result`.
    pub opa_url: Option<String>,

    /// Transport timeout in seconds.
    pub timeout_secs: u64,

    /// Tenant used by callers that do not specify one.
    pub default_tenant: String,
}

impl Default for PdpClientConfig {
    fn default() -> Self {
        Self {
            token: SecretString::from(String::new()),
            pdp_url: DEFAULT_PDP_URL.to_owned(),
            opa_url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            default_tenant: pdp_client_sdk::DEFAULT_TENANT.to_owned(),
        }
    }
}

impl PdpClientConfig {
    /// Load configuration from an optional YAML file, then `PDP_CLIENT_*`
    /// environment variables (environment wins). Missing keys keep defaults.
    ///
    /// # Errors
    ///
    /// - `NotFound` if `path` is given but does not exist
    /// - `Load` if a source cannot be parsed or contains unknown keys
    /// - any error from [`PdpClientConfig::validate`]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::new();
        if let Some(path) = path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            figment = figment.merge(Yaml::file(path));
        }

        let env = Env::prefixed(ENV_PREFIX);
        figment = figment.merge(env.clone().only(TYPED_ENV_KEYS));
        for (key, value) in env.ignore(TYPED_ENV_KEYS).iter() {
            figment = figment.merge(Serialized::global(key.as_str(), value));
        }

        let cfg: Self = figment.extract().map_err(Box::new)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check that both base URLs parse and the timeout is usable.
    ///
    /// # Errors
    ///
    /// - `InvalidUrl` if `pdp_url` or `opa_url` is not an absolute URL
    /// - `InvalidTimeout` if `timeout_secs` is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        parse_url("pdp_url", &self.pdp_url)?;
        if let Some(opa_url) = self.opa_url() {
            parse_url("opa_url", opa_url)?;
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout);
        }
        Ok(())
    }

    /// OPA base URL, treating an empty string as unset.
    #[must_use]
    pub fn opa_url(&self) -> Option<&str> {
        self.opa_url.as_deref().filter(|u| !u.is_empty())
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn parse_url(field: &'static str, value: &str) -> Result<(), ConfigError> {
    url::Url::parse(value)
        .map(|_| ())
        .map_err(|source| ConfigError::InvalidUrl {
            field,
            value: value.to_owned(),
            source,
        })
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::io::Write;

    use secrecy::ExposeSecret;

    use super::*;

    fn yaml_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults() {
        let cfg = PdpClientConfig::default();

        assert_eq!(cfg.pdp_url, DEFAULT_PDP_URL);
        assert!(cfg.opa_url().is_none());
        assert_eq!(cfg.timeout(), Duration::from_secs(30));
        assert_eq!(cfg.default_tenant, "default");
        assert_eq!(cfg.token.expose_secret(), "");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn empty_opa_url_is_unset() {
        let cfg = PdpClientConfig {
            opa_url: Some(String::new()),
            ..PdpClientConfig::default()
        };

        assert!(cfg.opa_url().is_none());
    }

    #[test]
    fn debug_redacts_token() {
        let cfg = PdpClientConfig {
            token: SecretString::from("super-secret".to_owned()),
            ..PdpClientConfig::default()
        };

        assert!(!format!("{cfg:?}").contains("super-secret"));
    }

    #[test]
    fn load_from_yaml_file() {
        let file = yaml_file(
            "token: permit_key_abc\npdp_url: http://pdp:7000\nopa_url: http://opa:8181\ntimeout_secs: 5\n",
        );

        let cfg = temp_env::with_vars_unset(
            ["PDP_CLIENT_TOKEN", "PDP_CLIENT_PDP_URL", "PDP_CLIENT_OPA_URL"],
            || PdpClientConfig::load(Some(file.path())),
        )
        .unwrap();

        assert_eq!(cfg.token.expose_secret(), "permit_key_abc");
        assert_eq!(cfg.pdp_url, "http://pdp:7000");
        assert_eq!(cfg.opa_url(), Some("http://opa:8181"));
        assert_eq!(cfg.timeout_secs, 5);
    }

    #[test]
    fn env_overrides_file() {
        let file = yaml_file("pdp_url: http://pdp:7000\n");

        let cfg = temp_env::with_vars(
            [
                ("PDP_CLIENT_PDP_URL", Some("http://override:7766")),
                ("PDP_CLIENT_TOKEN", Some("from_env")),
            ],
            || PdpClientConfig::load(Some(file.path())),
        )
        .unwrap();

        assert_eq!(cfg.pdp_url, "http://override:7766");
        assert_eq!(cfg.token.expose_secret(), "from_env");
    }

    #[test]
    fn numeric_looking_env_values_stay_strings() {
        let cfg = temp_env::with_vars(
            [
                ("PDP_CLIENT_TOKEN", Some("0012345")),
                ("PDP_CLIENT_DEFAULT_TENANT", Some("42")),
                ("PDP_CLIENT_TIMEOUT_SECS", Some("7")),
            ],
            || PdpClientConfig::load(None),
        )
        .unwrap();

        assert_eq!(cfg.token.expose_secret(), "0012345");
        assert_eq!(cfg.default_tenant, "42");
        assert_eq!(cfg.timeout_secs, 7);
    }

    #[test]
    fn unknown_env_keys_are_rejected() {
        let result = temp_env::with_var("PDP_CLIENT_RETRIES", Some("3"), || {
            PdpClientConfig::load(None)
        });

        assert!(matches!(result, Err(ConfigError::Load(_))));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let file = yaml_file("pdp_url: http://pdp:7000\nretries: 3\n");

        let result = PdpClientConfig::load(Some(file.path()));

        assert!(matches!(result, Err(ConfigError::Load(_))));
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = PdpClientConfig::load(Some(Path::new("/nonexistent/pdp-client.yaml")));

        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn invalid_urls_are_rejected() {
        let cfg = PdpClientConfig {
            opa_url: Some("not a url".to_owned()),
            ..PdpClientConfig::default()
        };

        match cfg.validate() {
            Err(ConfigError::InvalidUrl { field, .. }) => assert_eq!(field, "opa_url"),
            other => panic!("Expected InvalidUrl, got: {other:?}"),
        }
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let cfg = PdpClientConfig {
            timeout_secs: 0,
            ..PdpClientConfig::default()
        };

        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidTimeout)));
    }
}
