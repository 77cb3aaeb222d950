//! Encrypt-on-create RSA ciphertext resource.
//!
//! The core ([`key`], [`engine`], [`identity`]) is a pure function library:
//! validate an RSA public key, encrypt with PKCS#1 v1.5 or OAEP, and derive
//! a state-store identity from the ciphertext. [`resource`] and
//! [`provider`] adapt it to a create-only declarative lifecycle, and the
//! remaining modules serve that lifecycle over HTTP.

pub mod config;
pub mod engine;
pub mod error;
pub mod handlers;
pub mod identity;
pub mod key;
pub mod models;
pub mod padding;
pub mod provider;
pub mod resource;
pub mod state;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

// Re-export important types for easier use
pub use engine::{EncryptionRequest, EncryptionResult, encrypt};
pub use error::{EncryptionError, ValidationError};
pub use identity::identity;
pub use key::{PublicKeyMaterial, validate};
pub use padding::{HashAlgorithm, Padding};
pub use provider::Provider;
pub use resource::{CiphertextInputs, CiphertextResource, CiphertextState, Plan};
pub use state::AppState;

/// Builds the HTTP host's router around shared state.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/schema", get(handlers::get_schema))
        .route("/resources/rsa_ciphertext", post(handlers::create_ciphertext))
        .route(
            "/resources/rsa_ciphertext/{id}",
            get(handlers::read_ciphertext)
                .put(handlers::apply_ciphertext)
                .delete(handlers::delete_ciphertext),
        )
        .route("/stats", get(handlers::get_stats))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
