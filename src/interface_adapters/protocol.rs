use serde::{Deserialize, Serialize};

use crate::domain::entities::{ManagerId, ManagerIdentity};

// Envelope wrapped around every JSON API response.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
        }
    }

    pub fn ok_with_message(data: T, message: &str) -> Self {
        Self {
            message: Some(message.to_string()),
            ..Self::ok(data)
        }
    }
}

impl ApiResponse<()> {
    pub fn failure(error: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.to_string()),
            message: None,
        }
    }
}

// Request payload for manager login. Missing fields are reported by the
// use case rather than rejected by the extractor.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

// Authenticated manager as exposed to the browser.
#[derive(Debug, Serialize)]
pub struct ManagerSessionView {
    pub id: ManagerId,
    pub name: String,
    pub email: String,
    pub authenticated: bool,
}

impl From<ManagerIdentity> for ManagerSessionView {
    fn from(manager: ManagerIdentity) -> Self {
        Self {
            id: manager.id,
            name: manager.name,
            email: manager.email,
            authenticated: true,
        }
    }
}

// Public manager card shown after scanning a QR code.
#[derive(Debug, Serialize)]
pub struct ManagerPublicView {
    pub id: ManagerId,
    pub name: String,
}

// Response payload for logout.
#[derive(Debug, Serialize)]
pub struct LogoutView {
    pub revoked: bool,
}

// Liveness payload for monitoring; not wrapped in the envelope.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub database: &'static str,
}

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
}
