//! Outputs under test and the receivers standing in for them.

use serde::{Deserialize, Serialize};

use crate::{
    config::ComponentName,
    templates::{
        FLUENTD_CONFIG_KEY, FLUENTD_HTTP_SOURCE_CONF, VECTOR_CONFIG_KEY, VECTOR_HTTP_SOURCE_CONF,
    },
};

/// Directory receiver configuration is mounted at.
pub const CONFIG_MOUNT_PATH: &str = "/tmp/config";

/// An output the collector under test forwards to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSpec {
    /// Name of the output. Receiver objects are named after it, lower-cased.
    pub name: String,

    /// Where the collector sends records, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl OutputSpec {
    /// An output called `name` with no URL.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: None,
        }
    }

    /// Set the URL of the output.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// The name receiver objects get: the output name, lower-cased.
    pub fn receiver_name(&self) -> String {
        self.name.to_lowercase()
    }
}

/// The collector acting as HTTP receiver for an output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpReceiver {
    /// A vector `http` source writing to a file.
    Vector,
    /// A fluentd `http` source writing to a file.
    Fluentd,
}

impl HttpReceiver {
    /// Component whose image runs the receiver.
    pub const fn component(self) -> ComponentName {
        match self {
            HttpReceiver::Vector => ComponentName::Vector,
            HttpReceiver::Fluentd => ComponentName::Fluentd,
        }
    }

    /// Key of the configuration file inside the `ConfigMap`.
    pub const fn config_key(self) -> &'static str {
        match self {
            HttpReceiver::Vector => VECTOR_CONFIG_KEY,
            HttpReceiver::Fluentd => FLUENTD_CONFIG_KEY,
        }
    }

    /// The static configuration document.
    pub const fn template(self) -> &'static str {
        match self {
            HttpReceiver::Vector => VECTOR_HTTP_SOURCE_CONF,
            HttpReceiver::Fluentd => FLUENTD_HTTP_SOURCE_CONF,
        }
    }

    /// Path of the configuration file inside the container.
    pub fn config_path(self) -> String {
        format!("{}/{}", CONFIG_MOUNT_PATH, self.config_key())
    }

    /// Command line starting the receiver.
    pub fn command(self) -> Vec<String> {
        let config_path = self.config_path();
        match self {
            HttpReceiver::Vector => vec!["vector".into(), "--config-toml".into(), config_path],
            HttpReceiver::Fluentd => vec!["fluentd".into(), "-c".into(), config_path],
        }
    }

    /// Environment of the receiver container, given the adapted log level.
    pub fn env(self, log_level: &str) -> Vec<(&'static str, String)> {
        match self {
            HttpReceiver::Vector => vec![
                ("VECTOR_LOG", log_level.to_owned()),
                ("VECTOR_INTERNAL_LOG_RATE_LIMIT", "0".to_owned()),
            ],
            HttpReceiver::Fluentd => Vec::new(),
        }
    }
}
