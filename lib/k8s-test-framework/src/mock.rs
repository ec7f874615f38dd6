//! A mock object client.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use kube::error::ErrorResponse;
use serde::de::DeserializeOwned;
use snafu::ResultExt;

use crate::{
    client::{object_ref, NamespacedObject, ObjectClient},
    EncodeSnafu, Error, Result,
};

/// An object recorded by the [`RecordingClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedObject {
    /// The kind of the object.
    pub kind: String,
    /// The namespace the object was created in.
    pub namespace: String,
    /// The name of the object.
    pub name: String,
    /// The full object, as it would have been sent to the API server.
    pub object: serde_json::Value,
}

impl CreatedObject {
    /// Decode the recorded object back into its typed form.
    pub fn decode<K: DeserializeOwned>(&self) -> serde_json::Result<K> {
        serde_json::from_value(self.object.clone())
    }
}

/// Mock client.
///
/// Records every successful creation in order. When configured to reject,
/// every creation fails with the configured API error and nothing is
/// recorded.
#[derive(Debug, Default)]
pub struct RecordingClient {
    created: Mutex<Vec<CreatedObject>>,
    reject_with: Option<ErrorResponse>,
}

impl RecordingClient {
    /// Create a client that accepts everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a client that rejects every creation with the given API error.
    pub fn rejecting(code: u16, reason: &str, message: &str) -> Self {
        Self {
            created: Mutex::default(),
            reject_with: Some(ErrorResponse {
                status: "Failure".to_owned(),
                message: message.to_owned(),
                reason: reason.to_owned(),
                code,
            }),
        }
    }

    /// Objects created so far, in creation order.
    pub fn created(&self) -> Vec<CreatedObject> {
        self.created
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl ObjectClient for RecordingClient {
    async fn create<K: NamespacedObject>(&self, object: &K) -> Result<()> {
        let (kind, name, namespace) = object_ref(object)?;

        if let Some(response) = &self.reject_with {
            trace!(
                message = "Rejecting object.",
                %kind,
                %namespace,
                %name,
                code = response.code
            );
            return Err(Error::Create {
                kind,
                name,
                source: kube::Error::Api(response.clone()),
            });
        }

        let value = serde_json::to_value(object).context(EncodeSnafu {
            kind: kind.as_str(),
            name: name.as_str(),
        })?;
        self.created
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(CreatedObject {
                kind,
                namespace,
                name,
                object: value,
            });
        Ok(())
    }
}
