//! Incrementally construct a test `Pod`.
//!
//! The builder is owned by the test and mutated in place, so helpers can
//! attach sidecars to a pod that someone else started describing:
//!
//! ```
//! use k8s_test_framework::PodBuilder;
//!
//! let mut builder = PodBuilder::new("test-ns", "functional");
//! builder
//!     .add_container("receiver", "receiver:latest")
//!     .add_volume_mount("receiver", "/tmp/config", "", false)
//!     .add_env_var("LOG", "debug")
//!     .with_cmd(["receiver", "-c", "/tmp/config/receiver.conf"])
//!     .end()
//!     .add_config_map_volume("receiver", "receiver");
//!
//! let pod = builder.build();
//! assert_eq!(pod.spec.unwrap().containers.len(), 1);
//! ```

use std::collections::BTreeMap;

use k8s_openapi::{
    api::core::v1::{
        ConfigMapVolumeSource, Container, EmptyDirVolumeSource, EnvVar, Pod, PodSpec, Volume,
        VolumeMount,
    },
    apimachinery::pkg::apis::meta::v1::ObjectMeta,
};

/// Builds a [`Pod`] specification.
#[derive(Debug, Clone)]
pub struct PodBuilder {
    pod: Pod,
}

impl PodBuilder {
    /// Start describing a pod called `name` in `namespace`.
    pub fn new(namespace: &str, name: &str) -> Self {
        let pod = Pod {
            metadata: ObjectMeta {
                name: Some(name.to_owned()),
                namespace: Some(namespace.to_owned()),
                ..ObjectMeta::default()
            },
            spec: Some(PodSpec::default()),
            ..Pod::default()
        };
        Self { pod }
    }

    /// The namespace the pod lives in.
    pub fn namespace(&self) -> &str {
        self.pod.metadata.namespace.as_deref().unwrap_or_default()
    }

    /// The name of the pod.
    pub fn name(&self) -> &str {
        self.pod.metadata.name.as_deref().unwrap_or_default()
    }

    /// The pod as described so far.
    pub fn pod(&self) -> &Pod {
        &self.pod
    }

    /// Finish and take the pod.
    pub fn build(self) -> Pod {
        self.pod
    }

    /// Add a label to the pod metadata.
    pub fn add_label(&mut self, key: &str, value: &str) -> &mut Self {
        self.pod
            .metadata
            .labels
            .get_or_insert_with(BTreeMap::new)
            .insert(key.to_owned(), value.to_owned());
        self
    }

    /// Start describing a container.
    ///
    /// The container only becomes part of the pod once
    /// [`ContainerBuilder::end`] is called.
    pub fn add_container(&mut self, name: &str, image: &str) -> ContainerBuilder<'_> {
        ContainerBuilder {
            pod_builder: self,
            container: Container {
                name: name.to_owned(),
                image: Some(image.to_owned()),
                ..Container::default()
            },
        }
    }

    /// Add a volume named `name` backed by the `ConfigMap` `config_map_name`.
    pub fn add_config_map_volume(&mut self, name: &str, config_map_name: &str) -> &mut Self {
        self.add_volume(Volume {
            name: name.to_owned(),
            config_map: Some(ConfigMapVolumeSource {
                name: Some(config_map_name.to_owned()),
                ..ConfigMapVolumeSource::default()
            }),
            ..Volume::default()
        })
    }

    /// Add an `emptyDir` volume named `name`.
    pub fn add_empty_dir_volume(&mut self, name: &str) -> &mut Self {
        self.add_volume(Volume {
            name: name.to_owned(),
            empty_dir: Some(EmptyDirVolumeSource::default()),
            ..Volume::default()
        })
    }

    fn add_volume(&mut self, volume: Volume) -> &mut Self {
        self.spec_mut()
            .volumes
            .get_or_insert_with(Vec::new)
            .push(volume);
        self
    }

    fn spec_mut(&mut self) -> &mut PodSpec {
        self.pod.spec.get_or_insert_with(PodSpec::default)
    }
}

/// Describes a single container of the pod under construction.
#[derive(Debug)]
#[must_use = "the container is only added to the pod when `end` is called"]
pub struct ContainerBuilder<'a> {
    pod_builder: &'a mut PodBuilder,
    container: Container,
}

impl<'a> ContainerBuilder<'a> {
    /// Mount the volume `name` at `path`.
    ///
    /// An empty `sub_path` leaves the sub path unset.
    pub fn add_volume_mount(
        mut self,
        name: &str,
        path: &str,
        sub_path: &str,
        read_only: bool,
    ) -> Self {
        let sub_path = (!sub_path.is_empty()).then(|| sub_path.to_owned());
        self.container
            .volume_mounts
            .get_or_insert_with(Vec::new)
            .push(VolumeMount {
                name: name.to_owned(),
                mount_path: path.to_owned(),
                sub_path,
                read_only: Some(read_only),
                ..VolumeMount::default()
            });
        self
    }

    /// Set the environment variable `name` to `value`.
    pub fn add_env_var(mut self, name: &str, value: &str) -> Self {
        self.container
            .env
            .get_or_insert_with(Vec::new)
            .push(EnvVar {
                name: name.to_owned(),
                value: Some(value.to_owned()),
                ..EnvVar::default()
            });
        self
    }

    /// Set the command the container runs, replacing any previous one.
    pub fn with_cmd<I, S>(mut self, command: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.container.command = Some(command.into_iter().map(Into::into).collect());
        self
    }

    /// Append the container to the pod and return the pod builder.
    pub fn end(self) -> &'a mut PodBuilder {
        let Self {
            pod_builder,
            container,
        } = self;
        pod_builder.spec_mut().containers.push(container);
        pod_builder
    }
}

#[cfg(test)]
mod tests {
    use similar_asserts::assert_eq;

    use super::*;

    #[test]
    fn new_sets_identity() {
        let builder = PodBuilder::new("test-ns", "functional");
        assert_eq!(builder.namespace(), "test-ns");
        assert_eq!(builder.name(), "functional");

        let pod = builder.build();
        let spec = pod.spec.expect("spec must be set");
        assert!(spec.containers.is_empty());
        assert!(spec.volumes.is_none());
    }

    #[test]
    fn container_is_added_on_end() {
        let mut builder = PodBuilder::new("ns", "pod");
        builder
            .add_container("receiver", "image:tag")
            .add_volume_mount("config", "/tmp/config", "", false)
            .add_env_var("A", "1")
            .add_env_var("B", "2")
            .with_cmd(["receiver", "--config", "/tmp/config/a.conf"])
            .end();

        let containers = &builder.pod().spec.as_ref().unwrap().containers;
        assert_eq!(containers.len(), 1);

        let container = &containers[0];
        assert_eq!(container.name, "receiver");
        assert_eq!(container.image.as_deref(), Some("image:tag"));
        assert_eq!(
            container.volume_mounts,
            Some(vec![VolumeMount {
                name: "config".to_owned(),
                mount_path: "/tmp/config".to_owned(),
                sub_path: None,
                read_only: Some(false),
                ..VolumeMount::default()
            }])
        );
        let env = container
            .env
            .as_ref()
            .unwrap()
            .iter()
            .map(|var| (var.name.as_str(), var.value.as_deref().unwrap()))
            .collect::<Vec<_>>();
        assert_eq!(env, vec![("A", "1"), ("B", "2")]);
        assert_eq!(
            container.command,
            Some(vec![
                "receiver".to_owned(),
                "--config".to_owned(),
                "/tmp/config/a.conf".to_owned()
            ])
        );
    }

    #[test]
    fn dropped_container_builder_adds_nothing() {
        let mut builder = PodBuilder::new("ns", "pod");
        let _ = builder.add_container("abandoned", "image:tag");
        assert!(builder.pod().spec.as_ref().unwrap().containers.is_empty());
    }

    #[test]
    fn with_cmd_replaces_previous_command() {
        let mut builder = PodBuilder::new("ns", "pod");
        builder
            .add_container("c", "i")
            .with_cmd(["first"])
            .with_cmd(["second", "arg"])
            .end();
        let container = &builder.pod().spec.as_ref().unwrap().containers[0];
        assert_eq!(
            container.command,
            Some(vec!["second".to_owned(), "arg".to_owned()])
        );
    }

    #[test]
    fn sub_path_and_read_only_are_kept() {
        let mut builder = PodBuilder::new("ns", "pod");
        builder
            .add_container("c", "i")
            .add_volume_mount("certs", "/etc/certs/tls.crt", "tls.crt", true)
            .end();
        let mount = &builder.pod().spec.as_ref().unwrap().containers[0]
            .volume_mounts
            .as_ref()
            .unwrap()[0];
        assert_eq!(mount.sub_path.as_deref(), Some("tls.crt"));
        assert_eq!(mount.read_only, Some(true));
    }

    #[test]
    fn volumes_and_containers_keep_insertion_order() {
        let mut builder = PodBuilder::new("ns", "pod");
        builder
            .add_container("first", "i")
            .end()
            .add_config_map_volume("first", "first-cm")
            .add_empty_dir_volume("scratch")
            .add_container("second", "i")
            .end();

        let spec = builder.build().spec.unwrap();
        let containers = spec
            .containers
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(containers, vec!["first", "second"]);

        let volumes = spec.volumes.unwrap();
        assert_eq!(volumes.len(), 2);
        assert_eq!(volumes[0].name, "first");
        assert_eq!(
            volumes[0].config_map.as_ref().unwrap().name.as_deref(),
            Some("first-cm")
        );
        assert_eq!(volumes[1].name, "scratch");
        assert!(volumes[1].empty_dir.is_some());
    }

    #[test]
    fn labels_accumulate() {
        let mut builder = PodBuilder::new("ns", "pod");
        builder
            .add_label("app", "functional")
            .add_label("test", "http");
        let labels = builder.pod().metadata.labels.clone().unwrap();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels["app"], "functional");
        assert_eq!(labels["test"], "http");
    }
}
