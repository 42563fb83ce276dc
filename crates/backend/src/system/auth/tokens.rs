use anyhow::{anyhow, Result};
use chrono::Utc;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::RwLock;

use super::jwt;

/// In-memory refresh token store, keyed by token hash. Mirrors the
/// semantics of a `sys_refresh_tokens` table (expiry, revocation)
/// without a database; tokens do not survive a restart.
struct RefreshRecord {
    user_id: String,
    expires_at: String,
    revoked_at: Option<String>,
}

static TOKENS: Lazy<RwLock<HashMap<String, RefreshRecord>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

pub fn store_refresh_token(user_id: &str, token: &str) -> Result<()> {
    let record = RefreshRecord {
        user_id: user_id.to_string(),
        expires_at: jwt::calculate_refresh_token_expiration(),
        revoked_at: None,
    };
    TOKENS
        .write()
        .map_err(|_| anyhow!("refresh token store lock poisoned"))?
        .insert(hash_token(token), record);
    Ok(())
}

/// Resolve a refresh token to its user id, rejecting unknown, expired
/// and revoked tokens.
pub fn validate_refresh_token(token: &str) -> Result<String> {
    let tokens = TOKENS
        .read()
        .map_err(|_| anyhow!("refresh token store lock poisoned"))?;
    let record = tokens
        .get(&hash_token(token))
        .ok_or_else(|| anyhow!("Invalid or expired refresh token"))?;

    let now = Utc::now().to_rfc3339();
    if record.revoked_at.is_some() || record.expires_at <= now {
        return Err(anyhow!("Invalid or expired refresh token"));
    }
    Ok(record.user_id.clone())
}

pub fn revoke_refresh_token(token: &str) -> Result<()> {
    let mut tokens = TOKENS
        .write()
        .map_err(|_| anyhow!("refresh token store lock poisoned"))?;
    if let Some(record) = tokens.get_mut(&hash_token(token)) {
        record.revoked_at = Some(Utc::now().to_rfc3339());
    }
    Ok(())
}

fn hash_token(token: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_token_validates_until_revoked() {
        let token = jwt::generate_refresh_token();
        store_refresh_token("u-42", &token).unwrap();
        assert_eq!(validate_refresh_token(&token).unwrap(), "u-42");

        revoke_refresh_token(&token).unwrap();
        assert!(validate_refresh_token(&token).is_err());
    }

    #[test]
    fn unknown_token_is_rejected() {
        assert!(validate_refresh_token("never-issued").is_err());
    }
}
