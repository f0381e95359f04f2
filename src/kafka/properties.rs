//! The producer property map and its construction from a broker list.

use crate::kafka::Serializer;
use crate::{Error, Result};
use std::collections::BTreeMap;
use std::fmt;

pub const BOOTSTRAP_SERVERS: &str = "bootstrap.servers";
pub const KEY_SERIALIZER: &str = "key.serializer";
pub const VALUE_SERIALIZER: &str = "value.serializer";

/// Keys every configuration must carry before a producer is built.
pub const REQUIRED_KEYS: [&str; 3] = [BOOTSTRAP_SERVERS, KEY_SERIALIZER, VALUE_SERIALIZER];

const REDACTED: &str = "[redacted]";

/// True for properties whose values are credentials.
pub fn is_sensitive(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    key.contains("password") || key.contains("secret")
}

/// `value`, or a placeholder when `key` holds a credential.
pub fn display_value<'a>(key: &str, value: &'a str) -> &'a str {
    if is_sensitive(key) {
        REDACTED
    } else {
        value
    }
}

/// Property map handed to [`build_producer_handle`](crate::kafka::build_producer_handle).
///
/// Keys are kept sorted so that logging and comparisons are stable.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct ProducerConfiguration {
    properties: BTreeMap<String, String>,
}

impl ProducerConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    pub fn bootstrap_servers(&self) -> Option<&str> {
        self.get(BOOTSTRAP_SERVERS)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Returns the value of a required key, failing if it is absent or blank.
    pub fn require(&self, key: &str) -> Result<&str> {
        if !self.contains(key) {
            return Err(Error::Config(format!("Missing required property '{}'", key)));
        }

        match self.get(key) {
            Some(value) if !value.trim().is_empty() => Ok(value),
            _ => Err(Error::Config(format!("'{}' must not be empty", key))),
        }
    }
}

impl fmt::Debug for ProducerConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(key, value)| (key, display_value(key, value))))
            .finish()
    }
}

/// Builds the property map for a comma separated `host:port` list.
///
/// The list is stored exactly as given. Reachability is not checked.
pub fn build_configuration(bootstrap_servers: &str) -> Result<ProducerConfiguration> {
    validate_bootstrap_servers(bootstrap_servers)?;

    let mut config = ProducerConfiguration::new();
    config
        .set(BOOTSTRAP_SERVERS, bootstrap_servers)
        .set(KEY_SERIALIZER, Serializer::String.as_str())
        .set(VALUE_SERIALIZER, Serializer::String.as_str());

    Ok(config)
}

fn validate_bootstrap_servers(bootstrap_servers: &str) -> Result<()> {
    if bootstrap_servers.trim().is_empty() {
        return Err(Error::Config(format!("'{}' must not be empty", BOOTSTRAP_SERVERS)));
    }

    for endpoint in bootstrap_servers.split(',') {
        validate_endpoint(endpoint.trim())?;
    }

    Ok(())
}

fn validate_endpoint(endpoint: &str) -> Result<()> {
    if endpoint.is_empty() {
        return Err(Error::Config(format!(
            "'{}' contains an empty endpoint",
            BOOTSTRAP_SERVERS
        )));
    }

    let (host, port) = endpoint.rsplit_once(':').ok_or_else(|| {
        Error::Config(format!("Endpoint '{}' is not in host:port form", endpoint))
    })?;

    if !is_valid_host(host) {
        return Err(Error::Config(format!(
            "Endpoint '{}' has an invalid host '{}'",
            endpoint, host
        )));
    }

    let valid_port = !port.is_empty()
        && port.bytes().all(|b| b.is_ascii_digit())
        && matches!(port.parse::<u16>(), Ok(p) if p > 0);

    if !valid_port {
        return Err(Error::Config(format!(
            "Endpoint '{}' has an invalid port '{}'",
            endpoint, port
        )));
    }

    Ok(())
}

// IPv6 literals must be bracketed; any other host may not contain ':'.
fn is_valid_host(host: &str) -> bool {
    if host.is_empty() || host.chars().any(char::is_whitespace) {
        return false;
    }

    match host.strip_prefix('[') {
        Some(rest) => rest
            .strip_suffix(']')
            .is_some_and(|inner| !inner.is_empty() && !inner.contains(['[', ']'])),
        None => !host.contains([':', '[', ']']),
    }
}
