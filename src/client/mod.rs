//! Client Module
//!
//! Request construction, transport, and status classification.

pub mod encoding;
pub mod http;
pub mod status;

pub use http::{HttpClient, PreparedRequest, RawReply};
pub use status::StatusClass;
