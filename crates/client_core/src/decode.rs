//! Schema-checked decoding of list payloads.

use serde::de::DeserializeOwned;
use shared::error::FetchError;

/// Decodes `body` as a JSON array of `T`.
///
/// The whole array fails if any element does not match `T`; callers never see
/// a partial list. A body holding only whitespace is reported as
/// [`FetchError::EmptyResponse`].
pub fn decode_records<T: DeserializeOwned>(body: &[u8]) -> Result<Vec<T>, FetchError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(FetchError::EmptyResponse);
    }
    Ok(serde_json::from_slice::<Vec<T>>(body)?)
}

#[cfg(test)]
#[path = "tests/decode_tests.rs"]
mod tests;
