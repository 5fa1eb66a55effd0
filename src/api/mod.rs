//! API Module
//!
//! Request parameter and response envelope types.

pub mod envelope;
pub mod params;

pub use envelope::{ErrorEnvelope, Reply, Response, ServerStatus};
pub use params::{ParamValue, Params};
