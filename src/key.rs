use openssl::nid::Nid;
use openssl::pkey::{Id, PKey, Public};

use crate::error::ValidationError;

/// An RSA public key decoded from a PEM-wrapped SubjectPublicKeyInfo.
pub struct PublicKeyMaterial {
    key: PKey<Public>,
    modulus_len: usize,
}

impl PublicKeyMaterial {
    pub fn pkey(&self) -> &PKey<Public> {
        &self.key
    }

    pub fn bits(&self) -> u32 {
        self.key.bits()
    }

    /// Length of the modulus in bytes, which is also the ciphertext length.
    pub fn modulus_len(&self) -> usize {
        self.modulus_len
    }
}

impl std::fmt::Debug for PublicKeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublicKeyMaterial")
            .field("bits", &self.bits())
            .finish()
    }
}

/// Parses the first PEM block of `pem_text` and checks it holds an RSA public key.
pub fn validate(pem_text: &str) -> Result<PublicKeyMaterial, ValidationError> {
    let block = first_pem_block(pem_text).map_err(ValidationError::NoPemBlock)?;

    let key =
        PKey::public_key_from_der(block.contents()).map_err(ValidationError::MalformedKey)?;

    if key.id() != Id::RSA {
        return Err(ValidationError::WrongKeyType {
            algorithm: algorithm_name(key.id()),
        });
    }

    let modulus_len = key.rsa().map_err(ValidationError::MalformedKey)?.size() as usize;

    Ok(PublicKeyMaterial { key, modulus_len })
}

/// Returns the first block that decodes, skipping armour with a broken body.
fn first_pem_block(text: &str) -> Result<pem::Pem, pem::PemError> {
    let mut first_err = None;
    for (start, _) in text.match_indices("-----BEGIN ") {
        match pem::parse(&text[start..]) {
            Ok(block) => return Ok(block),
            Err(err) => {
                first_err.get_or_insert(err);
            }
        }
    }
    Err(first_err.unwrap_or(pem::PemError::MissingBeginTag))
}

fn algorithm_name(id: Id) -> String {
    if id == Id::EC {
        return "EC".to_string();
    }
    Nid::from_raw(id.as_raw())
        .short_name()
        .map(str::to_string)
        .unwrap_or_else(|_| format!("key type {}", id.as_raw()))
}
