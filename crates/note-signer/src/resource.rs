//! Ephemeral resources.
//!
//! An ephemeral resource produces a value each time the host opens it and
//! keeps nothing afterwards. The lifecycle is `describe`, `open`, `close`,
//! independent of how the host reaches the provider.

use std::fmt;
use std::sync::Arc;

use note_signer_core::{generate_key_with, EntropySource, OsEntropy};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::Result;
use crate::schema::{Attribute, Schema};

/// Output of [`EphemeralResource::open`].
#[derive(Debug, Clone, PartialEq)]
pub struct OpenResponse {
    /// The resource value, shaped by the resource's schema.
    pub result: Value,
    /// Non-fatal diagnostics.
    pub diagnostics: Diagnostics,
}

/// A resource whose value is computed fresh on every open.
pub trait EphemeralResource: Send + Sync {
    /// Suffix joined to the provider type name to form the resource type name.
    fn type_suffix(&self) -> &'static str;

    /// The full resource type name, `<provider>_<suffix>`.
    fn type_name(&self, provider_type_name: &str) -> String {
        format!("{}_{}", provider_type_name, self.type_suffix())
    }

    /// The configuration shape.
    fn describe(&self) -> Schema;

    /// Compute the resource value from its configuration.
    fn open(&self, config: Value) -> Result<OpenResponse>;

    /// Release anything held since `open`.
    fn close(&self) {}
}

/// Configuration and result model of the `keypair` resource.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeyPairModel {
    pub name: String,
    #[serde(default)]
    pub private_key: Option<String>,
    #[serde(default)]
    pub public_key: Option<String>,
}

impl fmt::Debug for KeyPairModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPairModel")
            .field("name", &self.name)
            .field("private_key", &self.private_key.as_ref().map(|_| "<sensitive>"))
            .field("public_key", &self.public_key)
            .finish()
    }
}

/// Generates a note signing key pair on every open.
#[derive(Clone)]
pub struct KeyPairResource {
    entropy: Arc<dyn EntropySource>,
}

impl KeyPairResource {
    /// A resource drawing keys from the OS CSPRNG.
    pub fn new() -> Self {
        Self::with_entropy(Arc::new(OsEntropy))
    }

    /// A resource drawing keys from `entropy`.
    pub fn with_entropy(entropy: Arc<dyn EntropySource>) -> Self {
        Self { entropy }
    }
}

impl Default for KeyPairResource {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for KeyPairResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPairResource").finish_non_exhaustive()
    }
}

impl EphemeralResource for KeyPairResource {
    fn type_suffix(&self) -> &'static str {
        "keypair"
    }

    fn describe(&self) -> Schema {
        Schema::new("Generates a public/private key pair for signing notes.")
            .with_attribute(
                "name",
                Attribute::required_string(
                    "The name to associate with the key pair. This is embedded in the public key.",
                ),
            )
            .with_attribute(
                "private_key",
                Attribute::computed_string(
                    "The generated private key in note format. This value is sensitive and should be protected.",
                )
                .sensitive(),
            )
            .with_attribute(
                "public_key",
                Attribute::computed_string("The generated public key in note format."),
            )
    }

    fn open(&self, config: Value) -> Result<OpenResponse> {
        let mut model: KeyPairModel = serde_json::from_value(config)?;
        let mut diagnostics = Diagnostics::new();

        if model.private_key.is_some() || model.public_key.is_some() {
            warn!(name = %model.name, "computed attributes set in configuration");
            diagnostics.push(Diagnostic::warning(
                "Computed attribute set in configuration",
                "private_key and public_key are generated on open; configured values are ignored.",
            ));
        }

        debug!(name = %model.name, "generating note key pair");
        let (private_key, public_key) = generate_key_with(self.entropy.as_ref(), &model.name)?;
        debug!(name = %model.name, public_key = %public_key, "generated note key pair");

        model.private_key = Some(private_key);
        model.public_key = Some(public_key);

        Ok(OpenResponse {
            result: serde_json::to_value(&model)?,
            diagnostics,
        })
    }

    fn close(&self) {
        debug!("closing keypair resource");
    }
}
