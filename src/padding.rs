use std::fmt;
use std::str::FromStr;

use openssl::hash::MessageDigest;

use crate::error::EncryptionError;

/// RSA padding scheme applied to the plaintext before encryption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Padding {
    #[default]
    Pkcs1v15,
    Oaep,
}

impl Padding {
    pub const ALLOWED: &'static str = "PKCS1.5, OAEP";

    pub fn as_str(&self) -> &'static str {
        match self {
            Padding::Pkcs1v15 => "PKCS1.5",
            Padding::Oaep => "OAEP",
        }
    }

    /// Bytes of the modulus consumed by padding, given the OAEP hash.
    pub fn overhead(&self, hash: HashAlgorithm) -> usize {
        match self {
            Padding::Pkcs1v15 => 11,
            Padding::Oaep => 2 * hash.output_len() + 2,
        }
    }
}

impl fmt::Display for Padding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Padding {
    type Err = EncryptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("PKCS1.5") {
            Ok(Padding::Pkcs1v15)
        } else if s.eq_ignore_ascii_case("OAEP") {
            Ok(Padding::Oaep)
        } else {
            Err(EncryptionError::InvalidPaddingOrHash {
                field: "padding",
                value: s.to_string(),
                allowed: Self::ALLOWED,
            })
        }
    }
}

/// Hash used for OAEP and its MGF1 mask generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashAlgorithm {
    #[default]
    Sha256,
    Sha512,
}

impl HashAlgorithm {
    pub const ALLOWED: &'static str = "SHA256, SHA512";

    pub fn as_str(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "SHA256",
            HashAlgorithm::Sha512 => "SHA512",
        }
    }

    pub fn output_len(&self) -> usize {
        match self {
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Sha512 => 64,
        }
    }

    pub fn digest(&self) -> MessageDigest {
        match self {
            HashAlgorithm::Sha256 => MessageDigest::sha256(),
            HashAlgorithm::Sha512 => MessageDigest::sha512(),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashAlgorithm {
    type Err = EncryptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("SHA256") {
            Ok(HashAlgorithm::Sha256)
        } else if s.eq_ignore_ascii_case("SHA512") {
            Ok(HashAlgorithm::Sha512)
        } else {
            Err(EncryptionError::InvalidPaddingOrHash {
                field: "hash",
                value: s.to_string(),
                allowed: Self::ALLOWED,
            })
        }
    }
}
