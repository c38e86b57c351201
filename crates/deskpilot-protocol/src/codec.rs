//! Byte-level encoding of the request/response envelopes.
//!
//! All output goes through `serde_json::Value` first, whose object map is a
//! `BTreeMap`, so keys come out sorted at every nesting level. Golden files
//! compare stably as a result.

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::warn;

use crate::types::Request;
use crate::types::Response;

#[derive(Error, Debug)]
#[error("Failed to decode {what}: {source}")]
pub struct DecodeError {
    what: &'static str,
    #[source]
    source: serde_json::Error,
}

impl DecodeError {
    pub fn line(&self) -> usize {
        self.source.line()
    }
}

fn decode<T: DeserializeOwned>(what: &'static str, bytes: &[u8]) -> Result<T, DecodeError> {
    serde_json::from_slice(bytes).map_err(|source| DecodeError { what, source })
}

pub fn decode_request(bytes: &[u8]) -> Result<Request, DecodeError> {
    decode("request", bytes)
}

pub fn decode_response(bytes: &[u8]) -> Result<Response, DecodeError> {
    decode("response", bytes)
}

/// Serializes any value with sorted keys.
pub fn to_sorted_vec<T: Serialize>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(&serde_json::to_value(value)?)
}

/// Pretty-printed variant of [`to_sorted_vec`], used for files on disk.
pub fn to_sorted_vec_pretty<T: Serialize>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec_pretty(&serde_json::to_value(value)?)
}

/// Encodes a response. Never fails: an unencodable response becomes an empty
/// byte sequence and a warning.
pub fn encode_response(response: &Response) -> Vec<u8> {
    match to_sorted_vec(response) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(id = response.id(), error = %e, "Failed to encode response");
            Vec::new()
        }
    }
}

pub fn encode_request(request: &Request) -> Vec<u8> {
    match to_sorted_vec(request) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(id = request.id, method = %request.method, error = %e, "Failed to encode request");
            Vec::new()
        }
    }
}
