use anyhow::{anyhow, Result};
use chrono::Utc;
use contracts::system::users::User;
use once_cell::sync::Lazy;
use std::sync::RwLock;

/// In-memory user store. The service ships with a fixed demo account
/// list and no user management, so a table would be overkill; the
/// repository surface still mirrors one.
pub struct UserRecord {
    pub user: User,
    pub password_hash: String,
}

static USERS: Lazy<RwLock<Vec<UserRecord>>> = Lazy::new(|| RwLock::new(Vec::new()));

pub fn insert(user: User, password_hash: String) -> Result<()> {
    let mut users = USERS.write().map_err(|_| anyhow!("user store lock poisoned"))?;
    if users.iter().any(|r| r.user.username == user.username) {
        return Err(anyhow!("Username already exists"));
    }
    users.push(UserRecord {
        user,
        password_hash,
    });
    Ok(())
}

pub fn get_by_username(username: &str) -> Result<Option<User>> {
    let users = USERS.read().map_err(|_| anyhow!("user store lock poisoned"))?;
    Ok(users
        .iter()
        .find(|r| r.user.username == username)
        .map(|r| r.user.clone()))
}

pub fn get_by_id(id: &str) -> Result<Option<User>> {
    let users = USERS.read().map_err(|_| anyhow!("user store lock poisoned"))?;
    Ok(users.iter().find(|r| r.user.id == id).map(|r| r.user.clone()))
}

pub fn get_password_hash(id: &str) -> Result<Option<String>> {
    let users = USERS.read().map_err(|_| anyhow!("user store lock poisoned"))?;
    Ok(users
        .iter()
        .find(|r| r.user.id == id)
        .map(|r| r.password_hash.clone()))
}

pub fn update_last_login(id: &str) -> Result<()> {
    let mut users = USERS.write().map_err(|_| anyhow!("user store lock poisoned"))?;
    if let Some(record) = users.iter_mut().find(|r| r.user.id == id) {
        record.user.last_login_at = Some(Utc::now().to_rfc3339());
    }
    Ok(())
}

pub fn count() -> Result<usize> {
    let users = USERS.read().map_err(|_| anyhow!("user store lock poisoned"))?;
    Ok(users.len())
}
