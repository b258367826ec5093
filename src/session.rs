// Session module - bearer token storage and JWT claim inspection
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::debug_info;
use crate::error::ApiError;

/// Payload the backend signs into every token (`{userId, email, role}` plus iat/exp)
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TokenClaims {
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub email: String,
    pub role: String,
    pub iat: Option<i64>,
    pub exp: Option<i64>,
}

impl TokenClaims {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        self.iat.and_then(|ts| Utc.timestamp_opt(ts, 0).single())
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|ts| Utc.timestamp_opt(ts, 0).single())
    }

    /// Tokens without an `exp` claim never expire
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at() {
            Some(expiry) => expiry <= now,
            None => false,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

pub fn load_token(path: impl AsRef<Path>) -> Result<String, ApiError> {
    let path = path.as_ref();
    let token = fs::read_to_string(path)?.trim().to_string();
    if token.is_empty() {
        return Err(ApiError::InvalidToken(format!("{} is empty", path.display())));
    }
    debug_info!("Loaded token from {}", path.display());
    Ok(token)
}

/// Like `load_token` but a missing file is not an error
pub fn load_token_if_present(path: impl AsRef<Path>) -> Result<Option<String>, ApiError> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(None);
    }
    load_token(path).map(Some)
}

pub fn save_token(path: impl AsRef<Path>, token: &str) -> Result<(), ApiError> {
    let path = path.as_ref();
    let token = token.trim();
    if token.is_empty() {
        return Err(ApiError::InvalidToken("refusing to save an empty token".to_string()));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, format!("{}\n", token))?;
    debug_info!("Saved token to {}", path.display());
    Ok(())
}

/// Returns whether a token file was actually removed
pub fn clear_token(path: impl AsRef<Path>) -> Result<bool, ApiError> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(false);
    }
    fs::remove_file(path)?;
    Ok(true)
}

/// Decode the payload segment of a JWT. The signature is not verified.
pub fn decode_claims(token: &str) -> Result<TokenClaims, ApiError> {
    let token = token.trim();
    let token = token.strip_prefix("Bearer ").unwrap_or(token);

    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(ApiError::InvalidToken(format!(
            "expected 3 dot-separated segments, found {}",
            segments.len()
        )));
    }

    // Some encoders keep the '=' padding; the no-pad engine rejects it
    let payload = segments[1].trim_end_matches('=');
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.as_bytes())
        .map_err(|e| ApiError::InvalidToken(format!("payload is not base64url: {}", e)))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| ApiError::InvalidToken(format!("payload is not valid claims JSON: {}", e)))
}
