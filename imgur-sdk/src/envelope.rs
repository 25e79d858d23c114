// ABOUTME: Decoding of the {data, success, status} wrapper around every API response
// ABOUTME: Maps unsuccessful envelopes to API errors and malformed bodies to decode errors

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::ImgurError;

/// Wire wrapper shared by all API responses.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
    pub success: bool,
    pub status: i64,
}

/// Only the flag and status, for bodies whose payload we don't model.
#[derive(Debug, Deserialize)]
struct EnvelopeHead {
    success: bool,
    status: i64,
}

/// Decodes `body` as an envelope carrying `T`.
///
/// `context` describes the request (e.g. "image abc123") and is used in
/// error messages.
pub fn decode_envelope<T: DeserializeOwned>(body: &[u8], context: &str) -> Result<T, ImgurError> {
    // Check the flag first so a rejected envelope is never blamed on a
    // payload that does not match `T`.
    check_success(body, context)?;

    let envelope: Envelope<T> =
        serde_json::from_slice(body).map_err(|source| decode_error(body, context, source))?;

    envelope.data.ok_or_else(|| ImgurError::Decode {
        context: context.to_string(),
        body: String::from_utf8_lossy(body).into_owned(),
        source: None,
    })
}

/// Verifies the success flag without interpreting the payload.
pub fn check_success(body: &[u8], context: &str) -> Result<(), ImgurError> {
    let head: EnvelopeHead =
        serde_json::from_slice(body).map_err(|source| decode_error(body, context, source))?;

    if !head.success {
        return Err(ImgurError::Api {
            status: head.status,
            message: format!("request to imgur failed for {context} - {}", head.status),
        });
    }

    Ok(())
}

fn decode_error(body: &[u8], context: &str, source: serde_json::Error) -> ImgurError {
    ImgurError::Decode {
        context: context.to_string(),
        body: String::from_utf8_lossy(body).into_owned(),
        source: Some(source),
    }
}
