// 📦 Response Envelope - {success, data?, error?, details?}

use serde::Serialize;

/// API Response wrapper
///
/// Absent members are left out of the JSON entirely.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            details: None,
        }
    }

    pub fn failure(error: impl Into<String>, details: Option<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            details,
        }
    }
}

impl ApiResponse<()> {
    /// `{success: true}` with nothing else
    pub fn empty() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
            details: None,
        }
    }
}
