//! Attach HTTP receivers to a functional test pod.
//!
//! Each receiver gets a `ConfigMap` holding its static configuration and a
//! container in the pod under test that mounts it. The `ConfigMap` is created
//! first; if that fails the pod builder is left as it was.

use k8s_test_framework::{new_config_map, ObjectClient, PodBuilder, Result};

use crate::{
    config::FrameworkConfig,
    output::{HttpReceiver, OutputSpec, CONFIG_MOUNT_PATH},
};

/// Provisions receivers for the collector under test.
#[derive(Debug)]
pub struct CollectorFunctionalFramework<C> {
    client: C,
    config: FrameworkConfig,
}

impl<C: ObjectClient> CollectorFunctionalFramework<C> {
    /// Create a framework creating objects through `client`.
    pub fn new(client: C, config: FrameworkConfig) -> Self {
        Self { client, config }
    }

    /// The client objects are created through.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// The framework configuration.
    pub fn config(&self) -> &FrameworkConfig {
        &self.config
    }

    /// Add a vector receiver for `output` to the pod.
    pub async fn add_vector_http_output(
        &self,
        pod_builder: &mut PodBuilder,
        output: &OutputSpec,
    ) -> Result<()> {
        self.add_http_output(HttpReceiver::Vector, pod_builder, output)
            .await
    }

    /// Add a fluentd receiver for `output` to the pod.
    pub async fn add_fluentd_http_output(
        &self,
        pod_builder: &mut PodBuilder,
        output: &OutputSpec,
    ) -> Result<()> {
        self.add_http_output(HttpReceiver::Fluentd, pod_builder, output)
            .await
    }

    /// Add a `receiver` for `output` to the pod.
    ///
    /// The `ConfigMap` and the container are both named after the lower-cased
    /// output name, and the `ConfigMap` is created in the pod's namespace.
    pub async fn add_http_output(
        &self,
        receiver: HttpReceiver,
        pod_builder: &mut PodBuilder,
        output: &OutputSpec,
    ) -> Result<()> {
        debug!(
            message = "Adding http output.",
            receiver = receiver.component().as_str(),
            name = %output.name,
        );
        let name = output.receiver_name();

        let config_map = new_config_map(
            pod_builder.namespace(),
            &name,
            [(receiver.config_key(), receiver.template())],
        );
        debug!(
            message = "Creating configmap.",
            namespace = pod_builder.namespace(),
            %name,
            key = receiver.config_key(),
            content = receiver.template(),
        );
        self.client.create(&config_map).await?;

        debug!(
            message = "Adding receiver container.",
            receiver = receiver.component().as_str(),
            %name,
        );
        let image = self.config.image(receiver.component());
        let mut container = pod_builder
            .add_container(&name, image)
            .add_volume_mount(&name, CONFIG_MOUNT_PATH, "", false);
        for (key, value) in receiver.env(&self.config.log_level) {
            container = container.add_env_var(key, &value);
        }
        container
            .with_cmd(receiver.command())
            .end()
            .add_config_map_volume(&name, &name);
        Ok(())
    }
}
