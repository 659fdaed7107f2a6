use postpilot_domain::ID;
use serde::{Deserialize, Serialize};

/// Outcome body shared by the messaging endpoints.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendOutcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SendOutcome {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn err(error: String) -> Self {
        Self {
            success: false,
            error: Some(error),
        }
    }
}

pub mod notify_approval {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub post_id: String,
        pub title: String,
        pub message: String,
    }

    pub type APIResponse = SendOutcome;
}

pub mod inbound_message {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub sender: String,
        pub text: String,
    }

    pub type APIResponse = SendOutcome;
}

pub mod send_approval_requests {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub post_ids: Vec<ID>,
        pub recipients: Vec<String>,
    }

    pub type APIResponse = SendOutcome;
}
