//! The `rsa_ciphertext` resource: schema, lifecycle and plan rules.
//!
//! The resource is create-only. Reading and deleting do no work, and every
//! input is force-new, so a changed input always means destroy and recreate.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::engine::{EncryptionRequest, encrypt};
use crate::error::EncryptionError;
use crate::padding::{HashAlgorithm, Padding};
use crate::provider::{Attribute, ResourceSchema};

pub const RESOURCE_TYPE: &str = "rsa_ciphertext";

const DESCRIPTION: &str = "Encrypts plain text using an RSA public key with support for PKCS1.5 \
and OAEP. Since RSA encryption includes random padding, passing the same input text to multiple \
resources will result in different ciphertext each time.";

fn default_padding() -> String {
    Padding::default().to_string()
}

fn default_hash() -> String {
    HashAlgorithm::default().to_string()
}

/// User-supplied configuration of a ciphertext resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CiphertextInputs {
    pub plaintext: String,
    pub public_key: String,
    #[serde(default = "default_padding")]
    pub padding: String,
    #[serde(default = "default_hash")]
    pub hash: String,
}

impl CiphertextInputs {
    pub fn new(plaintext: impl Into<String>, public_key: impl Into<String>) -> Self {
        Self {
            plaintext: plaintext.into(),
            public_key: public_key.into(),
            padding: default_padding(),
            hash: default_hash(),
        }
    }

    pub fn with_padding(mut self, padding: impl Into<String>) -> Self {
        self.padding = padding.into();
        self
    }

    pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = hash.into();
        self
    }

    pub fn to_request(&self) -> Result<EncryptionRequest, EncryptionError> {
        EncryptionRequest::from_inputs(
            &self.plaintext,
            &self.public_key,
            &self.padding,
            &self.hash,
        )
    }
}

/// What the host persists once a resource has been created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CiphertextState {
    pub id: String,
    pub inputs: CiphertextInputs,
    pub ciphertext: String,
}

/// Action needed to bring persisted state in line with a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Plan {
    Create,
    Replace,
    NoOp,
}

/// Outcome of applying a configuration.
#[derive(Debug)]
pub enum Transition {
    Created(CiphertextState),
    Unchanged(CiphertextState),
    Replaced {
        previous_id: String,
        state: CiphertextState,
    },
}

impl Transition {
    pub fn state(&self) -> &CiphertextState {
        match self {
            Transition::Created(state) | Transition::Unchanged(state) => state,
            Transition::Replaced { state, .. } => state,
        }
    }

    pub fn into_state(self) -> CiphertextState {
        match self {
            Transition::Created(state) | Transition::Unchanged(state) => state,
            Transition::Replaced { state, .. } => state,
        }
    }
}

pub struct CiphertextResource;

impl CiphertextResource {
    pub fn schema() -> ResourceSchema {
        ResourceSchema {
            description: DESCRIPTION.to_string(),
            attributes: vec![
                Attribute::required("plaintext", "The plaintext to encrypt").force_new(),
                Attribute::required(
                    "public_key",
                    "The public key used for encryption, in PEM format",
                )
                .force_new(),
                Attribute::optional(
                    "padding",
                    "The padding mode to use",
                    Padding::Pkcs1v15.as_str(),
                )
                .one_of(&["PKCS1.5", "OAEP"])
                .force_new(),
                Attribute::optional(
                    "hash",
                    "The hash algorithm to use, for OAEP only",
                    HashAlgorithm::Sha256.as_str(),
                )
                .one_of(&["SHA256", "SHA512"])
                .force_new(),
                Attribute::computed("ciphertext", "The encrypted ciphertext, base64 encoded"),
            ],
        }
    }

    /// Encrypts the configured plaintext. This is the only transition that does work.
    pub fn create(inputs: &CiphertextInputs) -> Result<CiphertextState, EncryptionError> {
        let request = inputs.to_request()?;
        let result = encrypt(&request)?;
        let id = result.identity();

        info!(
            resource = RESOURCE_TYPE,
            id = %id,
            padding = %request.padding,
            key_bits = request.key.bits(),
            "resource created"
        );

        Ok(CiphertextState {
            id,
            inputs: inputs.clone(),
            ciphertext: result.encoded,
        })
    }

    /// There is no remote state to refresh from.
    pub fn read(state: CiphertextState) -> CiphertextState {
        state
    }

    /// Nothing to tear down; the host forgets the identity.
    pub fn delete(state: CiphertextState) {
        info!(resource = RESOURCE_TYPE, id = %state.id, "resource deleted");
    }

    pub fn plan(prior: Option<&CiphertextState>, config: &CiphertextInputs) -> Plan {
        match prior {
            None => Plan::Create,
            Some(state) if state.inputs == *config => Plan::NoOp,
            Some(_) => Plan::Replace,
        }
    }

    /// Runs the transition [`plan`](Self::plan) selects.
    ///
    /// On replacement the prior state is returned to the caller untouched
    /// if the new ciphertext cannot be produced.
    pub fn apply(
        prior: Option<CiphertextState>,
        config: &CiphertextInputs,
    ) -> Result<Transition, EncryptionError> {
        match prior {
            None => Self::create(config).map(Transition::Created),
            Some(state) if state.inputs == *config => {
                Ok(Transition::Unchanged(Self::read(state)))
            }
            Some(state) => {
                let replacement = Self::create(config)?;
                let previous_id = state.id.clone();
                Self::delete(state);
                Ok(Transition::Replaced {
                    previous_id,
                    state: replacement,
                })
            }
        }
    }
}
