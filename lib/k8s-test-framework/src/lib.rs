//! Kubernetes test framework.
//!
//! The primary goal of this framework is to provide the building blocks for
//! functional tests that run collectors inside a pod: constructing the pod
//! and its `ConfigMap`s declaratively, and creating objects in the cluster
//! through a small client abstraction that can be swapped for a recording
//! mock in unit tests.

#![deny(
    missing_debug_implementations,
    missing_copy_implementations,
    missing_docs
)]

#[macro_use]
extern crate tracing;

pub mod client;
pub mod config_map;
#[cfg(any(test, feature = "mocks"))]
pub mod mock;
pub mod pod_builder;

use snafu::Snafu;

pub use client::{KubeClient, NamespacedObject, ObjectClient};
pub use config_map::new_config_map;
pub use pod_builder::{ContainerBuilder, PodBuilder};

/// An error returned by the framework.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    /// The object to create carries no namespace.
    #[snafu(display("{} {:?} has no namespace set", kind, name))]
    MissingNamespace {
        /// The kind of the object.
        kind: String,
        /// The name of the object.
        name: String,
    },

    /// The API server refused to create the object.
    #[snafu(display("failed to create {} {:?}: {}", kind, name, source))]
    Create {
        /// The kind of the object.
        kind: String,
        /// The name of the object.
        name: String,
        /// The underlying error.
        source: kube::Error,
    },

    /// The object could not be encoded.
    #[snafu(display("failed to encode {} {:?}: {}", kind, name, source))]
    Encode {
        /// The kind of the object.
        kind: String,
        /// The name of the object.
        name: String,
        /// The underlying error.
        source: serde_json::Error,
    },

    /// A client could not be built from the ambient configuration.
    #[snafu(display("unable to build a kubernetes client: {}", source))]
    Connect {
        /// The underlying error.
        source: kube::Error,
    },
}

/// A `Result` alias with the framework [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;
