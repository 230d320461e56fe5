use serde::{Deserialize, Serialize};

use crate::Journey;

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct JourneyRequest {
    #[serde(rename = "contactId", default)]
    pub contact_id: Option<String>,
}

/// Body of the journey endpoint. Callers branch on `success`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct JourneyResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journey: Option<Journey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl JourneyResponse {
    pub fn ok(journey: Journey) -> Self {
        Self {
            success: true,
            journey: Some(journey),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            journey: None,
            error: Some(error.into()),
        }
    }
}

/// Body of the auth endpoint. Always delivered with HTTP 200.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AuthResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl AuthResponse {
    pub fn granted(access_token: String, instance_url: String, token_type: String) -> Self {
        Self {
            success: true,
            access_token: Some(access_token),
            instance_url: Some(instance_url),
            token_type: Some(token_type),
            error: None,
            timestamp: None,
        }
    }

    pub fn denied(error: impl Into<String>, timestamp: String) -> Self {
        Self {
            success: false,
            access_token: None,
            instance_url: None,
            token_type: None,
            error: Some(error.into()),
            timestamp: Some(timestamp),
        }
    }
}
