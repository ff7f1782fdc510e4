use serde::Serialize;
use utoipa::ToSchema;

/// Generic acknowledgement used by endpoints without a richer body.
#[derive(Debug, Serialize, ToSchema)]
pub struct OkResponse {
    /// Always `true`; errors use the error body instead.
    pub success: bool,
}

impl OkResponse {
    /// The positive acknowledgement.
    pub fn ok() -> Self {
        Self { success: true }
    }
}
