//! Status Classification
//!
//! Inclusive status-code ranges and the method body policy.

use reqwest::Method;

/// Class of an HTTP status code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// 100-199
    Informational,
    /// 200-299
    Success,
    /// 300-399
    Redirection,
    /// 400-499
    ClientError,
    /// 500-599
    ServerError,
}

impl StatusClass {
    /// Classify a status code; `None` outside 100-599
    pub fn of(code: u16) -> Option<Self> {
        match code {
            100..=199 => Some(StatusClass::Informational),
            200..=299 => Some(StatusClass::Success),
            300..=399 => Some(StatusClass::Redirection),
            400..=499 => Some(StatusClass::ClientError),
            500..=599 => Some(StatusClass::ServerError),
            _ => None,
        }
    }

    pub fn is_error(self) -> bool {
        matches!(self, StatusClass::ClientError | StatusClass::ServerError)
    }
}

pub fn is_informational(code: u16) -> bool {
    StatusClass::of(code) == Some(StatusClass::Informational)
}

pub fn is_success(code: u16) -> bool {
    StatusClass::of(code) == Some(StatusClass::Success)
}

pub fn is_redirection(code: u16) -> bool {
    StatusClass::of(code) == Some(StatusClass::Redirection)
}

pub fn is_client_error(code: u16) -> bool {
    StatusClass::of(code) == Some(StatusClass::ClientError)
}

pub fn is_server_error(code: u16) -> bool {
    StatusClass::of(code) == Some(StatusClass::ServerError)
}

pub fn is_error(code: u16) -> bool {
    is_client_error(code) || is_server_error(code)
}

/// Whether parameters travel in the body (true) or the query string (false).
///
/// Unrecognized methods carry a body.
pub fn uses_body(method: &Method) -> bool {
    !matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}
