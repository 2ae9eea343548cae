//! Network messages - communication between App and Network layers

use serde_json::Value;

use crate::errors::SubmitError;

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// POST the parsed payload to the endpoint
    Submit {
        id: u64,
        endpoint: String,
        payload: Value,
    },
    /// Cancel a pending submission
    Cancel(u64),
    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    /// 2xx answer; `body` is the decoded JSON, or a JSON string if the
    /// endpoint did not answer with JSON
    Success {
        id: u64,
        status: u16,
        body: Value,
        time_ms: u64,
    },
    /// Transport failure or non-2xx status
    Failed {
        id: u64,
        error: SubmitError,
        time_ms: u64,
    },
    /// Submission was cancelled
    Cancelled {
        id: u64,
    },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::Success { id, .. } => *id,
            NetworkResponse::Failed { id, .. } => *id,
            NetworkResponse::Cancelled { id } => *id,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, NetworkResponse::Success { .. })
    }
}
