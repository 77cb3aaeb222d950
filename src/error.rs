use std::error::Error as StdError;

use openssl::error::ErrorStack;
use thiserror::Error;

use crate::padding::Padding;

/// Reasons a PEM document is not a usable RSA public key.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("no PEM-encoded blocks were found")]
    NoPemBlock(#[source] pem::PemError),

    #[error("the PEM block does not contain a valid public key")]
    MalformedKey(#[source] ErrorStack),

    #[error("expected an RSA public key, found {algorithm}")]
    WrongKeyType { algorithm: String },
}

/// Errors returned while turning resource inputs into ciphertext.
#[derive(Debug, Error)]
pub enum EncryptionError {
    #[error("invalid public key")]
    InvalidPublicKey(#[from] ValidationError),

    #[error("invalid {field} {value:?}: expected one of {allowed}")]
    InvalidPaddingOrHash {
        field: &'static str,
        value: String,
        allowed: &'static str,
    },

    /// `max` is `None` when the padding overhead alone exceeds the modulus.
    #[error("plaintext too large: {size} bytes ({})", capacity(.max))]
    PlaintextTooLarge { size: usize, max: Option<usize> },

    #[error("failed to encrypt with {padding}")]
    EncryptionFailure {
        padding: Padding,
        #[source]
        source: ErrorStack,
    },
}

impl EncryptionError {
    /// Name of the input attribute the error points at, if any.
    pub fn attribute(&self) -> Option<&'static str> {
        match self {
            EncryptionError::InvalidPublicKey(_) => Some("public_key"),
            EncryptionError::InvalidPaddingOrHash { field, .. } => Some(*field),
            EncryptionError::PlaintextTooLarge { .. } => Some("plaintext"),
            EncryptionError::EncryptionFailure { .. } => None,
        }
    }
}

fn capacity(max: &Option<usize>) -> String {
    match max {
        Some(max) => format!("max: {max} bytes"),
        None => "key too small for this padding".to_string(),
    }
}

/// Renders an error followed by each of its sources, joined with `": "`.
pub fn cause_chain(err: &(dyn StdError + 'static)) -> String {
    let mut rendered = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !text.is_empty() {
            rendered.push_str(": ");
            rendered.push_str(&text);
        }
        source = cause.source();
    }
    rendered
}
