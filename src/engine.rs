use base64::{Engine, engine::general_purpose::STANDARD};
use openssl::encrypt::Encrypter;
use openssl::error::ErrorStack;
use openssl::rsa::Padding as RsaPadding;
use tracing::debug;

use crate::error::EncryptionError;
use crate::identity::identity;
use crate::key::{PublicKeyMaterial, validate};
use crate::padding::{HashAlgorithm, Padding};

/// Everything needed for a single encryption.
///
/// `hash` is validated for every request but only consulted for OAEP.
#[derive(Debug)]
pub struct EncryptionRequest {
    pub plaintext: Vec<u8>,
    pub key: PublicKeyMaterial,
    pub padding: Padding,
    pub hash: HashAlgorithm,
}

impl EncryptionRequest {
    pub fn new(
        plaintext: impl Into<Vec<u8>>,
        key: PublicKeyMaterial,
        padding: Padding,
        hash: HashAlgorithm,
    ) -> Self {
        Self {
            plaintext: plaintext.into(),
            key,
            padding,
            hash,
        }
    }

    /// Builds a request from the raw string inputs of a resource.
    ///
    /// Padding and hash names are checked before the key is parsed.
    pub fn from_inputs(
        plaintext: &str,
        public_key: &str,
        padding: &str,
        hash: &str,
    ) -> Result<Self, EncryptionError> {
        let padding: Padding = padding.parse()?;
        let hash: HashAlgorithm = hash.parse()?;
        let key = validate(public_key)?;

        Ok(Self::new(plaintext, key, padding, hash))
    }

    /// Largest plaintext, in bytes, this request's key and padding can carry.
    ///
    /// `None` means the key cannot carry any plaintext, not even an empty one.
    pub fn max_plaintext_len(&self) -> Option<usize> {
        max_plaintext_len(&self.key, self.padding, self.hash)
    }
}

/// Ciphertext bytes together with their base64 rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptionResult {
    pub ciphertext: Vec<u8>,
    pub encoded: String,
}

impl EncryptionResult {
    fn from_bytes(ciphertext: Vec<u8>) -> Self {
        let encoded = STANDARD.encode(&ciphertext);
        Self {
            ciphertext,
            encoded,
        }
    }

    /// State-store identity derived from the base64 ciphertext.
    pub fn identity(&self) -> String {
        identity(&self.encoded)
    }
}

pub fn max_plaintext_len(
    key: &PublicKeyMaterial,
    padding: Padding,
    hash: HashAlgorithm,
) -> Option<usize> {
    key.modulus_len().checked_sub(padding.overhead(hash))
}

/// Encrypts the request's plaintext with fresh padding randomness.
///
/// Two calls with the same request produce different ciphertext.
pub fn encrypt(req: &EncryptionRequest) -> Result<EncryptionResult, EncryptionError> {
    let max = req.max_plaintext_len();
    if max.is_none_or(|max| req.plaintext.len() > max) {
        return Err(EncryptionError::PlaintextTooLarge {
            size: req.plaintext.len(),
            max,
        });
    }

    let ciphertext = public_encrypt(req).map_err(|source| EncryptionError::EncryptionFailure {
        padding: req.padding,
        source,
    })?;

    debug!(
        padding = %req.padding,
        hash = %req.hash,
        key_bits = req.key.bits(),
        ciphertext_len = ciphertext.len(),
        "plaintext encrypted"
    );

    Ok(EncryptionResult::from_bytes(ciphertext))
}

fn public_encrypt(req: &EncryptionRequest) -> Result<Vec<u8>, ErrorStack> {
    let mut encrypter = Encrypter::new(req.key.pkey())?;

    match req.padding {
        Padding::Pkcs1v15 => encrypter.set_rsa_padding(RsaPadding::PKCS1)?,
        Padding::Oaep => {
            let md = req.hash.digest();
            encrypter.set_rsa_padding(RsaPadding::PKCS1_OAEP)?;
            encrypter.set_rsa_oaep_md(md)?;
            encrypter.set_rsa_mgf1_md(md)?;
        }
    }

    let mut buf = vec![0; encrypter.encrypt_len(&req.plaintext)?];
    let len = encrypter.encrypt(&req.plaintext, &mut buf)?;
    buf.truncate(len);

    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use openssl::pkey::PKey;
    use openssl::rsa::Rsa;

    fn public_pem(bits: u32) -> String {
        let pkey = PKey::from_rsa(Rsa::generate(bits).unwrap()).unwrap();
        String::from_utf8(pkey.public_key_to_pem().unwrap()).unwrap()
    }

    #[test]
    fn rejects_bad_padding_before_parsing_key() {
        let err =
            EncryptionRequest::from_inputs("hi", "not a key", "PSS", "SHA256").unwrap_err();
        assert!(matches!(
            err,
            EncryptionError::InvalidPaddingOrHash { field: "padding", .. }
        ));
    }

    #[test]
    fn validates_hash_even_for_pkcs1() {
        let pem = public_pem(1024);
        let err = EncryptionRequest::from_inputs("hi", &pem, "PKCS1.5", "MD5").unwrap_err();
        assert!(matches!(
            err,
            EncryptionError::InvalidPaddingOrHash { field: "hash", .. }
        ));
    }

    #[test]
    fn reports_invalid_key() {
        let err = EncryptionRequest::from_inputs("hi", "nope", "OAEP", "SHA512").unwrap_err();
        assert!(matches!(err, EncryptionError::InvalidPublicKey(_)));
    }

    #[test]
    fn capacity_follows_padding_and_hash() {
        let pem = public_pem(2048);
        let pkcs1 = EncryptionRequest::from_inputs("", &pem, "PKCS1.5", "SHA512").unwrap();
        assert_eq!(pkcs1.max_plaintext_len(), Some(245));

        let sha256 = EncryptionRequest::from_inputs("", &pem, "OAEP", "SHA256").unwrap();
        assert_eq!(sha256.max_plaintext_len(), Some(190));

        let sha512 = EncryptionRequest::from_inputs("", &pem, "OAEP", "SHA512").unwrap();
        assert_eq!(sha512.max_plaintext_len(), Some(126));
    }

    #[test]
    fn capacity_is_none_when_overhead_exceeds_modulus() {
        let pem = public_pem(1024);
        let req = EncryptionRequest::from_inputs("", &pem, "OAEP", "SHA512").unwrap();
        assert_eq!(req.max_plaintext_len(), None);

        let req = EncryptionRequest::from_inputs("", &pem, "OAEP", "SHA256").unwrap();
        assert_eq!(req.max_plaintext_len(), Some(62));
    }

    #[test]
    fn encodes_with_standard_padded_base64() {
        let req = EncryptionRequest::from_inputs("abc", &public_pem(1024), "PKCS1.5", "SHA256")
            .unwrap();
        let result = encrypt(&req).unwrap();

        assert_eq!(result.ciphertext.len(), 128);
        assert_eq!(STANDARD.decode(&result.encoded).unwrap(), result.ciphertext);
        assert!(result.encoded.ends_with('='));
        assert_eq!(result.identity().len(), 40);
    }
}
