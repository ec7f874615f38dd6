//! Framework configuration, read from the environment.

use std::fmt;

/// Default image of the vector receiver, used when `RELATED_IMAGE_VECTOR` is
/// not set.
pub const DEFAULT_VECTOR_IMAGE: &str = "quay.io/openshift-logging/vector:latest";

/// Default image of the fluentd receiver, used when `RELATED_IMAGE_FLUENTD` is
/// not set.
pub const DEFAULT_FLUENTD_IMAGE: &str = "quay.io/openshift-logging/fluentd:latest";

/// Environment variable holding the framework verbosity.
pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

/// A component whose image can be looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentName {
    /// The vector collector.
    Vector,
    /// The fluentd collector.
    Fluentd,
}

impl ComponentName {
    /// The component name as used in image variables.
    pub const fn as_str(self) -> &'static str {
        match self {
            ComponentName::Vector => "vector",
            ComponentName::Fluentd => "fluentd",
        }
    }

    /// The environment variable overriding the component image.
    pub const fn image_env(self) -> &'static str {
        match self {
            ComponentName::Vector => "RELATED_IMAGE_VECTOR",
            ComponentName::Fluentd => "RELATED_IMAGE_FLUENTD",
        }
    }

    const fn default_image(self) -> &'static str {
        match self {
            ComponentName::Vector => DEFAULT_VECTOR_IMAGE,
            ComponentName::Fluentd => DEFAULT_FLUENTD_IMAGE,
        }
    }
}

impl fmt::Display for ComponentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings shared by every receiver the framework provisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameworkConfig {
    /// Image of the vector receiver.
    pub vector_image: String,
    /// Image of the fluentd receiver.
    pub fluentd_image: String,
    /// Log level passed to vector through `VECTOR_LOG`.
    pub log_level: String,
}

impl Default for FrameworkConfig {
    fn default() -> Self {
        Self {
            vector_image: DEFAULT_VECTOR_IMAGE.to_owned(),
            fluentd_image: DEFAULT_FLUENTD_IMAGE.to_owned(),
            log_level: "debug".to_owned(),
        }
    }
}

impl FrameworkConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`, which returns the value of an
    /// environment variable if it is set.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            vector_image: component_image(ComponentName::Vector, &lookup),
            fluentd_image: component_image(ComponentName::Fluentd, &lookup),
            log_level: adapt_log_level(lookup(LOG_LEVEL_ENV).as_deref()).to_owned(),
        }
    }

    /// The image configured for `component`.
    pub fn image(&self, component: ComponentName) -> &str {
        match component {
            ComponentName::Vector => &self.vector_image,
            ComponentName::Fluentd => &self.fluentd_image,
        }
    }
}

/// Look up the image of `component`, falling back to its default when the
/// variable is unset or blank.
pub fn component_image<F>(component: ComponentName, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(component.image_env()).filter(|image| !image.trim().is_empty()) {
        Some(image) => image,
        None => {
            debug!(
                message = "Image not set, using default.",
                component = %component,
                variable = component.image_env(),
                image = component.default_image(),
            );
            component.default_image().to_owned()
        }
    }
}

/// Map the framework verbosity to a vector log level.
///
/// Unset means `debug`. `1` and below is `info`, `2` is `debug`, `3` and
/// above is `trace`.
pub fn adapt_log_level(verbosity: Option<&str>) -> &'static str {
    let Some(verbosity) = verbosity else {
        return "debug";
    };
    match verbosity.trim().parse::<i32>() {
        Ok(level) if level <= 1 => "info",
        Ok(2) => "debug",
        Ok(_) => "trace",
        Err(error) => {
            warn!(
                message = "Unable to parse log level, using default.",
                variable = LOG_LEVEL_ENV,
                value = %verbosity,
                %error,
            );
            "debug"
        }
    }
}
