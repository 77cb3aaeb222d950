use serde::Serialize;

use crate::resource::{CiphertextState, Plan};

// Request bodies are `resource::CiphertextInputs`; these are the responses.

// Model for a created or refreshed resource. Plaintext and key stay out of responses.
#[derive(Debug, Serialize)]
pub struct ResourceResponse {
    pub id: String,
    pub ciphertext: String,
    pub padding: String,
    pub hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<Plan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replaced_id: Option<String>,
}

impl ResourceResponse {
    pub fn from_state(state: &CiphertextState) -> Self {
        Self {
            id: state.id.clone(),
            ciphertext: state.ciphertext.clone(),
            padding: state.inputs.padding.clone(),
            hash: state.inputs.hash.clone(),
            plan: None,
            replaced_id: None,
        }
    }

    pub fn with_plan(mut self, plan: Plan) -> Self {
        self.plan = Some(plan);
        self
    }
}

// Model for error responses, shaped like a host diagnostic
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub summary: String,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<&'static str>,
}

// Model for service statistics
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub status: String,
    pub uptime_seconds: u64,
    pub version: String,
    pub resources: usize,
}
