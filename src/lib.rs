//! Functional test helpers for log collectors running in Kubernetes.
//!
//! Tests describe a pod with [`PodBuilder`] and use a
//! [`CollectorFunctionalFramework`] to attach receivers standing in for the
//! outputs the collector under test forwards to.

#![deny(missing_debug_implementations, missing_docs)]

#[macro_use]
extern crate tracing;

pub mod config;
pub mod functional;
pub mod output;
pub mod templates;
#[cfg(test)]
mod test_util;

pub use config::{ComponentName, FrameworkConfig};
pub use functional::CollectorFunctionalFramework;
pub use k8s_test_framework::{KubeClient, ObjectClient, PodBuilder};
pub use output::{HttpReceiver, OutputSpec};
