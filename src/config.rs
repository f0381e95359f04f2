use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Environment prefix for nested overrides, e.g. `KAFKA_PROVIDER__KAFKA__CLIENT_ID`.
pub const ENV_PREFIX: &str = "KAFKA_PROVIDER";

/// Plain environment variable carrying the broker address list.
pub const BOOTSTRAP_SERVERS_ENV: &str = "BOOTSTRAP_SERVERS";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub kafka: KafkaConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KafkaConfig {
    /// Comma separated `host:port` list. Left empty when not supplied so that
    /// the bootstrap reports it as a configuration error.
    #[serde(default)]
    pub bootstrap_servers: String,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub message_timeout_ms: Option<u64>,
    #[serde(default)]
    pub default_topic: Option<String>,
    #[serde(default = "default_flush_timeout_secs")]
    pub flush_timeout_secs: u64,
    /// Extra librdkafka properties forwarded verbatim.
    #[serde(default)]
    pub properties: HashMap<String, String>,
}

impl Default for KafkaConfig {
    fn default() -> Self {
        Self {
            bootstrap_servers: String::new(),
            client_id: None,
            message_timeout_ms: None,
            default_topic: None,
            flush_timeout_secs: default_flush_timeout_secs(),
            properties: HashMap::new(),
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        Self::load(Some(path.as_ref()), None)
    }

    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::load(None, None)
    }

    /// Layers the optional TOML file, `KAFKA_PROVIDER__*` variables and
    /// `BOOTSTRAP_SERVERS`, in increasing order of precedence.
    ///
    /// `env` replaces the process environment when given.
    pub fn load(
        path: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, config::ConfigError> {
        let bootstrap_servers = match &env {
            Some(vars) => vars.get(BOOTSTRAP_SERVERS_ENV).cloned(),
            None => std::env::var(BOOTSTRAP_SERVERS_ENV).ok(),
        };

        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(true),
            );
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .source(env),
            )
            .set_override_option("kafka.bootstrap_servers", bootstrap_servers)?
            .build()?;

        settings.try_deserialize()
    }
}

fn default_flush_timeout_secs() -> u64 {
    10
}
