//! Response Envelopes
//!
//! Decoded backend replies, the client-synthesized error envelope, and the
//! outcome type returned by the blocking client.

use crate::error::{FunderError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A response whose body decoded as JSON
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    /// HTTP status code
    pub status: u16,

    /// Decoded JSON body, shape determined by the backend
    pub body: Value,
}

impl Reply {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Map the body onto a caller-chosen type
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(T::deserialize(&self.body)?)
    }

    /// The backend's embedded `{Code, Message, Id}` status, if the body carries one
    pub fn server_status(&self) -> Option<ServerStatus> {
        ServerStatus::deserialize(&self.body).ok()
    }

    pub fn into_body(self) -> Value {
        self.body
    }
}

/// Status object the backend embeds in acknowledgements and error bodies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerStatus {
    #[serde(rename = "Code")]
    pub code: u16,

    #[serde(rename = "Message", default)]
    pub message: String,

    /// Identifier of the created payment or pledge
    #[serde(rename = "Id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Normalized failure shape for errors the client synthesizes itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub code: u16,
    pub code_message: String,
    pub message: String,
}

impl ErrorEnvelope {
    pub const SERVICE_UNAVAILABLE: u16 = 503;

    /// Envelope for a request that never got a response
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self {
            code: Self::SERVICE_UNAVAILABLE,
            code_message: "Service unavailable".to_string(),
            message: message.into(),
        }
    }

    /// Envelope for a response whose body is not JSON
    pub fn malformed_response(status: u16, message: impl Into<String>) -> Self {
        Self {
            code: status,
            code_message: "Malformed response".to_string(),
            message: message.into(),
        }
    }

    pub fn to_json(&self) -> Value {
        serde_json::json!({
            "code": self.code,
            "code_message": self.code_message,
            "message": self.message,
        })
    }
}

/// Outcome of a blocking call.
///
/// Any status with a JSON body is returned unbranched; a transport failure
/// is returned as a 503 envelope rather than an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Body(Reply),
    Unavailable(ErrorEnvelope),
}

impl Response {
    pub(crate) fn from_outcome(outcome: Result<Reply>) -> Result<Self> {
        match outcome {
            Ok(reply) => Ok(Response::Body(reply)),
            Err(err @ FunderError::Unavailable(_)) => match err.envelope() {
                Some(envelope) => Ok(Response::Unavailable(envelope)),
                None => Err(err),
            },
            Err(err) => Err(err),
        }
    }

    /// HTTP status, or 503 when no response was obtained
    pub fn status(&self) -> u16 {
        match self {
            Response::Body(reply) => reply.status,
            Response::Unavailable(envelope) => envelope.code,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Response::Unavailable(_))
    }

    pub fn reply(&self) -> Option<&Reply> {
        match self {
            Response::Body(reply) => Some(reply),
            Response::Unavailable(_) => None,
        }
    }

    /// The body as JSON: the backend's body, or the envelope
    pub fn into_json(self) -> Value {
        match self {
            Response::Body(reply) => reply.body,
            Response::Unavailable(envelope) => envelope.to_json(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Campaign {
        name: String,
        goal: f64,
        num_backers: i64,
    }

    #[test]
    fn test_envelope_json_shape() {
        let envelope = ErrorEnvelope::service_unavailable("NetworkError");
        assert_eq!(
            envelope.to_json(),
            json!({"code": 503, "code_message": "Service unavailable", "message": "NetworkError"})
        );
        assert_eq!(serde_json::to_value(&envelope).unwrap(), envelope.to_json());
    }

    #[test]
    fn test_decode_typed_body() {
        let reply = Reply::new(
            200,
            json!({"name": "alpha", "goal": 1000.0, "numBackers": 3, "amtRaised": 75.0}),
        );
        let campaign: Campaign = reply.decode().unwrap();
        assert_eq!(campaign.name, "alpha");
        assert_eq!(campaign.goal, 1000.0);
        assert_eq!(campaign.num_backers, 3);
    }

    #[test]
    fn test_decode_mismatch_is_decode_error() {
        let reply = Reply::new(200, json!([1, 2, 3]));
        let err = reply.decode::<Campaign>().unwrap_err();
        assert!(matches!(err, FunderError::Decode(_)));
    }

    #[test]
    fn test_server_status() {
        let reply = Reply::new(
            202,
            json!({"Code": 202, "Message": "Payment queued", "Id": "8ae7e044-09f4-4e9e-981d-a6110e8bdc38"}),
        );
        let status = reply.server_status().unwrap();
        assert_eq!(status.code, 202);
        assert_eq!(status.message, "Payment queued");
        assert_eq!(
            status.id.as_deref(),
            Some("8ae7e044-09f4-4e9e-981d-a6110e8bdc38")
        );

        let plain = Reply::new(200, json!({"goal": 1000}));
        assert!(plain.server_status().is_none());
    }

    #[test]
    fn test_response_from_unavailable() {
        let outcome = Err(FunderError::Unavailable("connection refused".into()));
        let response = Response::from_outcome(outcome).unwrap();
        assert!(response.is_unavailable());
        assert_eq!(response.status(), 503);
        assert_eq!(response.into_json()["code_message"], "Service unavailable");
    }

    #[test]
    fn test_response_keeps_other_errors() {
        let outcome = Err(FunderError::Config("base URL is not set".into()));
        assert!(matches!(
            Response::from_outcome(outcome),
            Err(FunderError::Config(_))
        ));
    }
}
