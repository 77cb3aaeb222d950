use std::collections::HashMap;
use std::time::Instant;

use tokio::sync::RwLock;

use crate::provider::Provider;
use crate::resource::CiphertextState;

/// Shared state of the HTTP host.
///
/// The store maps resource identity to persisted state. It belongs to the
/// host; the encryption core never touches it.
pub struct AppState {
    pub provider: Provider,
    pub store: RwLock<HashMap<String, CiphertextState>>,
    started: Instant,
}

impl AppState {
    pub fn new(provider: Provider) -> Self {
        Self {
            provider,
            store: RwLock::new(HashMap::new()),
            started: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started.elapsed().as_secs()
    }
}
