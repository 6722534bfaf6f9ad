use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::error::AppError;
use crate::state::SharedState;

/// Proof that the request carried the configured admin token.
#[derive(Debug, Clone, Copy)]
pub struct Admin;

/// Compare digests so the comparison time does not depend on where the tokens differ.
pub fn token_matches(presented: &str, expected: &str) -> bool {
    let presented = Sha256::digest(presented.as_bytes());
    let expected = Sha256::digest(expected.as_bytes());
    presented.as_slice().ct_eq(expected.as_slice()).into()
}

impl FromRequestParts<SharedState> for Admin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        // Bearer token from Authorization header first
        if let Some(auth_header) = parts.headers.get("authorization") {
            let auth_str = auth_header
                .to_str()
                .map_err(|_| AppError::Unauthorized("Invalid authorization header".to_string()))?;

            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                return if token_matches(token, &state.config.admin_token) {
                    Ok(Admin)
                } else {
                    Err(AppError::Unauthorized("Invalid admin token".to_string()))
                };
            }
        }

        let jar = CookieJar::from_headers(&parts.headers);
        if let Some(cookie) = jar.get("admin_token") {
            if token_matches(cookie.value(), &state.config.admin_token) {
                return Ok(Admin);
            }
            return Err(AppError::Unauthorized("Invalid admin token".to_string()));
        }

        Err(AppError::Unauthorized("Missing admin token".to_string()))
    }
}
