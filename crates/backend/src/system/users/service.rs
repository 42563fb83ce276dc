use anyhow::Result;
use contracts::system::users::User;

use super::store;
use crate::system::auth::password;

/// Get user by ID
pub fn get_by_id(id: &str) -> Result<Option<User>> {
    store::get_by_id(id)
}

/// Verify user credentials (for login)
pub fn verify_credentials(username: &str, pass: &str) -> Result<Option<User>> {
    let user = match store::get_by_username(username)? {
        Some(u) => u,
        None => return Ok(None),
    };

    if !user.is_active {
        return Err(anyhow::anyhow!("User account is inactive"));
    }

    let password_hash = store::get_password_hash(&user.id)?
        .ok_or_else(|| anyhow::anyhow!("Password hash not found"))?;

    if !password::verify_password(pass, &password_hash)? {
        return Ok(None);
    }

    let _ = store::update_last_login(&user.id);

    Ok(Some(user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::initialization;
    use contracts::system::auth::Role;

    #[test]
    fn demo_credentials_verify_and_wrong_password_does_not() {
        initialization::ensure_demo_users().unwrap();

        let user = verify_credentials("manager", "manager123").unwrap().unwrap();
        assert_eq!(user.role, Role::Manager);
        assert!(user.last_login_at.is_some());

        assert!(verify_credentials("manager", "nope").unwrap().is_none());
        assert!(verify_credentials("ghost", "manager123").unwrap().is_none());
    }
}
