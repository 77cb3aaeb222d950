use openssl::sha::sha1;

/// Derives the state-store identity of a ciphertext resource.
///
/// SHA-1 only gives the host a short, stable lookup key. It must not be
/// used where collision resistance against an attacker matters.
pub fn identity(ciphertext_base64: &str) -> String {
    if ciphertext_base64.is_empty() {
        return String::new();
    }
    hex::encode(sha1(ciphertext_base64.trim().as_bytes()))
}
