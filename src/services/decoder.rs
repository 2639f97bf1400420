//! Response decoder
//!
//! Extracts the assistant reply from a raw response

use crate::models::openai::ChatCompletionResponse;
use crate::services::client::RawResponse;
use crate::utils::error::{DispatchError, DispatchResult};
use crate::utils::logging::{truncate_content, MAX_LOGGED_BODY};

/// Decode a raw response into `choices[0].message.content`
pub fn decode_response(response: &RawResponse) -> DispatchResult<String> {
    if !response.is_success() {
        return Err(DispatchError::RequestFailed {
            status: response.status,
            status_text: truncate_content(&response.status_text, MAX_LOGGED_BODY),
            body: truncate_content(&String::from_utf8_lossy(&response.body), MAX_LOGGED_BODY),
        });
    }

    let payload: ChatCompletionResponse =
        serde_json::from_slice(&response.body).map_err(DispatchError::Decode)?;

    payload
        .first_content()
        .map(str::to_string)
        .ok_or_else(|| DispatchError::MissingField("choices[0].message.content".to_string()))
}
