//! Create objects in the cluster.

use std::fmt;

use async_trait::async_trait;
use k8s_openapi::NamespaceResourceScope;
use kube::{
    api::{Api, PostParams},
    Resource, ResourceExt,
};
use serde::{de::DeserializeOwned, Serialize};
use snafu::{OptionExt, ResultExt};

use crate::{ConnectSnafu, CreateSnafu, MissingNamespaceSnafu, Result};

/// A namespaced Kubernetes object that can be sent to the API server.
pub trait NamespacedObject:
    Resource<Scope = NamespaceResourceScope, DynamicType = ()>
    + Clone
    + DeserializeOwned
    + Serialize
    + fmt::Debug
    + Send
    + Sync
    + 'static
{
}

impl<K> NamespacedObject for K where
    K: Resource<Scope = NamespaceResourceScope, DynamicType = ()>
        + Clone
        + DeserializeOwned
        + Serialize
        + fmt::Debug
        + Send
        + Sync
        + 'static
{
}

/// Creates objects on behalf of a test.
#[async_trait]
pub trait ObjectClient: Send + Sync {
    /// Create `object` in the namespace set in its metadata.
    async fn create<K: NamespacedObject>(&self, object: &K) -> Result<()>;
}

/// Resolve the kind, name and namespace of `object`, rejecting objects that
/// carry no namespace.
pub(crate) fn object_ref<K: NamespacedObject>(object: &K) -> Result<(String, String, String)> {
    let kind = K::kind(&()).into_owned();
    let name = object.name_any();
    let namespace = object
        .meta()
        .namespace
        .clone()
        .filter(|namespace| !namespace.is_empty())
        .context(MissingNamespaceSnafu {
            kind: kind.as_str(),
            name: name.as_str(),
        })?;
    Ok((kind, name, namespace))
}

/// An [`ObjectClient`] talking to a real cluster.
#[derive(Clone)]
pub struct KubeClient {
    client: kube::Client,
}

impl KubeClient {
    /// Wrap an existing [`kube::Client`].
    pub fn new(client: kube::Client) -> Self {
        Self { client }
    }

    /// Build a client from the ambient kubeconfig or in-cluster environment.
    pub async fn try_default() -> Result<Self> {
        let client = kube::Client::try_default().await.context(ConnectSnafu)?;
        Ok(Self::new(client))
    }
}

impl fmt::Debug for KubeClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KubeClient")
            .field("default_namespace", &self.client.default_namespace())
            .finish()
    }
}

#[async_trait]
impl ObjectClient for KubeClient {
    async fn create<K: NamespacedObject>(&self, object: &K) -> Result<()> {
        let (kind, name, namespace) = object_ref(object)?;
        debug!(message = "Creating object.", %kind, %namespace, %name);

        let api: Api<K> = Api::namespaced(self.client.clone(), &namespace);
        api.create(&PostParams::default(), object)
            .await
            .context(CreateSnafu { kind, name })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{new_config_map, Error, PodBuilder};

    #[test]
    fn object_ref_of_config_map() {
        let config_map = new_config_map("ns", "receiver", [("k", "v")]);
        let (kind, name, namespace) = object_ref(&config_map).unwrap();
        assert_eq!(kind, "ConfigMap");
        assert_eq!(name, "receiver");
        assert_eq!(namespace, "ns");
    }

    #[test]
    fn object_ref_of_pod() {
        let pod = PodBuilder::new("ns", "functional").build();
        let (kind, name, namespace) = object_ref(&pod).unwrap();
        assert_eq!(kind, "Pod");
        assert_eq!(name, "functional");
        assert_eq!(namespace, "ns");
    }

    #[test]
    fn object_without_namespace_is_rejected() {
        let mut config_map = new_config_map("", "receiver", [("k", "v")]);
        assert!(matches!(
            object_ref(&config_map),
            Err(Error::MissingNamespace { .. })
        ));

        config_map.metadata.namespace = None;
        let error = object_ref(&config_map).unwrap_err();
        assert_eq!(
            error.to_string(),
            r#"ConfigMap "receiver" has no namespace set"#
        );
    }
}
