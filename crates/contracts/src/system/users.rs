use serde::{Deserialize, Serialize};

use super::auth::Role;

/// A user account. The service keeps these in memory (demo credential
/// list), so the record carries only what login and `/me` need.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub full_name: Option<String>,
    pub role: Role,
    pub is_active: bool,
    pub created_at: String,
    pub last_login_at: Option<String>,
}
