//! Bearer token claim decoding.
//!
//! The client never verifies signatures; it only peeks at the payload to
//! learn the role and subject the server issued, so the navbar can reflect
//! them. The server re-validates every token it receives.

#[cfg(test)]
#[path = "token_test.rs"]
mod token_test;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;

use crate::error::TokenError;

/// Claims the server places in access tokens.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    /// Expiry as seconds since the Unix epoch.
    #[serde(default)]
    pub exp: Option<i64>,
}

impl Claims {
    /// Whether `exp` lies at or before `now` (seconds since the Unix epoch).
    /// Tokens without an expiry never expire.
    pub fn is_expired(&self, now: i64) -> bool {
        self.exp.is_some_and(|exp| exp <= now)
    }
}

/// Current wall-clock time in seconds since the Unix epoch.
#[cfg(feature = "hydrate")]
#[allow(clippy::cast_possible_truncation)]
pub fn unix_now() -> Option<i64> {
    Some((js_sys::Date::now() / 1000.0) as i64)
}

/// Current wall-clock time in seconds since the Unix epoch, or `None` when
/// the system clock reads before it.
#[cfg(not(feature = "hydrate"))]
pub fn unix_now() -> Option<i64> {
    match std::time::UNIX_EPOCH.elapsed() {
        Ok(elapsed) => Some(i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX)),
        Err(err) => {
            log::debug!("system clock before epoch: {err}");
            None
        }
    }
}

/// Decode the payload segment of a JWT without verifying it.
///
/// # Errors
///
/// Returns [`TokenError::Malformed`] unless the token has exactly three
/// dot-separated segments, [`TokenError::Encoding`] for a non-base64url
/// payload and [`TokenError::Claims`] for a payload that is not a JSON object.
pub fn decode_claims(token: &str) -> Result<Claims, TokenError> {
    let mut parts = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(TokenError::Malformed);
    };
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
    Ok(serde_json::from_slice(&bytes)?)
}
