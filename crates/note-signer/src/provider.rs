//! The note-signer provider.
//!
//! The provider has no configuration of its own. It exists to name itself
//! to the host and hand out its ephemeral resources.

use std::sync::Arc;

use note_signer_core::{EntropySource, OsEntropy};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{ProviderError, Result};
use crate::resource::{EphemeralResource, KeyPairResource};
use crate::schema::Schema;

/// Type name the provider registers under.
pub const PROVIDER_TYPE_NAME: &str = "note-signer";

/// Provider name and version as reported to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderMetadata {
    pub type_name: String,
    pub version: String,
}

/// Provider-level configuration. Currently empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderModel {}

/// The provider.
#[derive(Clone)]
pub struct NoteSignerProvider {
    /// "dev" for local builds, "test" under acceptance tests, the release
    /// version otherwise.
    version: String,
    entropy: Arc<dyn EntropySource>,
}

impl NoteSignerProvider {
    /// Create a provider reporting `version`, drawing keys from the OS CSPRNG.
    pub fn new(version: impl Into<String>) -> Self {
        Self::with_entropy(version, Arc::new(OsEntropy))
    }

    /// Create a provider whose resources draw keys from `entropy`.
    pub fn with_entropy(version: impl Into<String>, entropy: Arc<dyn EntropySource>) -> Self {
        Self {
            version: version.into(),
            entropy,
        }
    }

    /// Provider type name and version.
    pub fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            type_name: PROVIDER_TYPE_NAME.to_string(),
            version: self.version.clone(),
        }
    }

    /// The provider-level configuration shape.
    pub fn describe(&self) -> Schema {
        Schema::new("Provider for generating note signing key pairs.")
    }

    /// Accept provider configuration. Only an empty object or null is valid.
    pub fn configure(&self, config: Value) -> Result<ProviderModel> {
        let model = match config {
            Value::Null => ProviderModel::default(),
            object @ Value::Object(_) => serde_json::from_value(object)?,
            other => {
                return Err(ProviderError::InvalidConfig(format!(
                    "expected an object, got {other}"
                )))
            }
        };
        debug!(version = %self.version, "provider configured");
        Ok(model)
    }

    /// One instance of each ephemeral resource.
    pub fn ephemeral_resources(&self) -> Vec<Box<dyn EphemeralResource>> {
        vec![Box::new(KeyPairResource::with_entropy(Arc::clone(
            &self.entropy,
        )))]
    }

    /// The ephemeral resource registered as `type_name`.
    pub fn ephemeral_resource(&self, type_name: &str) -> Result<Box<dyn EphemeralResource>> {
        self.ephemeral_resources()
            .into_iter()
            .find(|r| r.type_name(PROVIDER_TYPE_NAME) == type_name)
            .ok_or_else(|| ProviderError::UnknownResource(type_name.to_string()))
    }

    /// Type names of all ephemeral resources.
    pub fn ephemeral_resource_types(&self) -> Vec<String> {
        self.ephemeral_resources()
            .iter()
            .map(|r| r.type_name(PROVIDER_TYPE_NAME))
            .collect()
    }
}

impl std::fmt::Debug for NoteSignerProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoteSignerProvider")
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}
