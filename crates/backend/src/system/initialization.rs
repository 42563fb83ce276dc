use anyhow::Result;
use chrono::Utc;
use contracts::system::auth::Role;
use contracts::system::users::User;

use crate::system::auth::password;
use crate::system::users::store;

/// The demo account list: one account per role. Passwords are hashed
/// at startup; this is a demo convenience, not a credential scheme.
const DEMO_USERS: [(&str, &str, Role, &str); 3] = [
    ("admin", "admin123", Role::Admin, "Admin User"),
    ("manager", "manager123", Role::Manager, "Manager User"),
    ("analyst", "analyst123", Role::Analyst, "Analyst User"),
];

/// Seed the in-memory user store with the demo accounts. Idempotent:
/// a populated store is left alone.
pub fn ensure_demo_users() -> Result<()> {
    if store::count()? > 0 {
        return Ok(());
    }

    let now = Utc::now().to_rfc3339();
    for (username, pass, role, full_name) in DEMO_USERS {
        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            username: username.to_string(),
            full_name: Some(full_name.to_string()),
            role,
            is_active: true,
            created_at: now.clone(),
            last_login_at: None,
        };
        store::insert(user, password::hash_password(pass)?)?;
        tracing::info!("seeded demo user `{username}` ({role})");
    }

    tracing::warn!("running with built-in demo credentials");
    Ok(())
}
