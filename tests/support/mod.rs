//! Shared helpers for integration tests.

#![allow(dead_code)]

use base64::{Engine, engine::general_purpose::STANDARD};
use openssl::encrypt::Decrypter;
use openssl::pkey::{PKey, Private};
use openssl::rsa::{Padding as RsaPadding, Rsa};
use rsa_ciphertext::{HashAlgorithm, Padding};

/// Known 2048-bit public key used by the end-to-end resource scenario.
pub const KNOWN_PUBLIC_KEY: &str = "-----BEGIN PUBLIC KEY-----
MIIBIjANBgkqhkiG9w0BAQEFAAOCAQ8AMIIBCgKCAQEA0u6+kZ7yoy1IMUjfoDY+
WwaTtfaQyLmYM/bs/CtekvDFbSQnOHIunnLKFo8OQW/PeLBur+BIcfzS5spVpXB5
07P3yzf/mUYwX3sdy1Zu3JdcWKKho793niIAdKNQg48xipCniVg6J5l3WK5816KB
Dc2+Bjwer2z5cE9G1pUPRnK3m0uHrVsFxmMnk38RZcZnGmokoBzMjUa/2w1kCHuD
Eq3kdSHvLBmmo5bP9OHHV9F4KVlB8cDp3TSc74U0BVEUDe3BBf9VgXfvqhjDTRJh
lpC+QxgdBj958K/h8BnRB6vkW3l5OXirowyXg4ZAWQn0XJ+lby5w7yCg4HetyYH5
0QIDAQAB
-----END PUBLIC KEY-----
";

/// A freshly generated RSA key pair; the private half stands in for the recipient.
pub struct KeyPair {
    private_key: PKey<Private>,
}

impl KeyPair {
    pub fn generate(bits: u32) -> Self {
        let rsa = Rsa::generate(bits).expect("generate RSA key");
        Self {
            private_key: PKey::from_rsa(rsa).expect("wrap RSA key"),
        }
    }

    pub fn public_pem(&self) -> String {
        let pem = self.private_key.public_key_to_pem().expect("export public key");
        String::from_utf8(pem).expect("PEM is ASCII")
    }

    pub fn decrypt(&self, ciphertext: &[u8], padding: Padding, hash: HashAlgorithm) -> Vec<u8> {
        let mut decrypter = Decrypter::new(&self.private_key).expect("create decrypter");
        match padding {
            Padding::Pkcs1v15 => decrypter.set_rsa_padding(RsaPadding::PKCS1).unwrap(),
            Padding::Oaep => {
                decrypter.set_rsa_padding(RsaPadding::PKCS1_OAEP).unwrap();
                decrypter.set_rsa_oaep_md(hash.digest()).unwrap();
                decrypter.set_rsa_mgf1_md(hash.digest()).unwrap();
            }
        }

        let mut buf = vec![0; decrypter.decrypt_len(ciphertext).unwrap()];
        let len = decrypter.decrypt(ciphertext, &mut buf).expect("decrypt");
        buf.truncate(len);
        buf
    }

    pub fn decrypt_base64(&self, encoded: &str, padding: Padding, hash: HashAlgorithm) -> Vec<u8> {
        let ciphertext = STANDARD.decode(encoded).expect("valid base64");
        self.decrypt(&ciphertext, padding, hash)
    }
}
