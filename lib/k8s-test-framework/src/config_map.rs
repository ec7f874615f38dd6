//! Construct `ConfigMap`s for test pods.

use std::collections::BTreeMap;

use k8s_openapi::{api::core::v1::ConfigMap, apimachinery::pkg::apis::meta::v1::ObjectMeta};

/// Build a `ConfigMap` named `name` in `namespace` holding `data`.
pub fn new_config_map<K, V>(
    namespace: &str,
    name: &str,
    data: impl IntoIterator<Item = (K, V)>,
) -> ConfigMap
where
    K: Into<String>,
    V: Into<String>,
{
    let data = data
        .into_iter()
        .map(|(key, value)| (key.into(), value.into()))
        .collect::<BTreeMap<String, String>>();

    ConfigMap {
        metadata: ObjectMeta {
            name: Some(name.to_owned()),
            namespace: Some(namespace.to_owned()),
            ..ObjectMeta::default()
        },
        data: Some(data),
        ..ConfigMap::default()
    }
}
