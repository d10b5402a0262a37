use thiserror::Error;

/// Why a list fetch did not produce records.
///
/// Cloneable so it can travel over UI event channels.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(String),
    /// Non-2xx responses are never treated as success, even with a JSON body.
    #[error("server responded with HTTP {status}")]
    Status { status: u16 },
    #[error("server returned an empty response body")]
    EmptyResponse,
    #[error("failed to decode response: {0}")]
    Decode(String),
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl FetchError {
    /// Request could not complete or returned nothing usable.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            FetchError::Transport(_) | FetchError::Status { .. } | FetchError::EmptyResponse
        )
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, FetchError::Decode(_))
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(value: serde_json::Error) -> Self {
        FetchError::Decode(value.to_string())
    }
}
