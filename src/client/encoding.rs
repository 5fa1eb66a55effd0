//! Form Encoding
//!
//! `application/x-www-form-urlencoded` encoding of parameter pairs. Keys and
//! values are percent-encoded with the `encodeURIComponent` character set, so
//! a space becomes `%20` rather than `+`.

use crate::error::{FunderError, Result};

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Encode pairs as `k1=v1&k2=v2`
pub fn encode_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    pairs
        .into_iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key.as_ref()),
                urlencoding::encode(value.as_ref())
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Decode an encoded query string or body back into pairs.
///
/// Splits on `&`, then on the first `=`, then percent-decodes each side.
pub fn decode_pairs(encoded: &str) -> Result<Vec<(String, String)>> {
    if encoded.is_empty() {
        return Ok(Vec::new());
    }

    encoded
        .split('&')
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            Ok((decode_component(key)?, decode_component(value)?))
        })
        .collect()
}

fn decode_component(component: &str) -> Result<String> {
    urlencoding::decode(component)
        .map(|decoded| decoded.into_owned())
        .map_err(|e| FunderError::Decode(format!("Invalid percent-encoding in '{}': {}", component, e)))
}
