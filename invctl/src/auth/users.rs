//! In-memory directory of users allowed to sign in.
//!
//! Built once at startup from `auth.users`. Plaintext passwords from the config are hashed
//! immediately and never kept. Profile edits and password changes live for the lifetime of the
//! process only.

use dashmap::DashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::{
    api::models::users::{ProfileResponse, ProfileUpdate, SessionUser},
    auth::password::{self, Argon2Params},
    config::AuthConfig,
    errors::Error,
    types::UserId,
};

#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: String,
    pub phone: String,
    password_hash: String,
}

impl UserRecord {
    pub fn session_user(&self) -> SessionUser {
        SessionUser {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role.clone(),
        }
    }
}

impl From<UserRecord> for ProfileResponse {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            role: user.role,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: Arc<DashMap<UserId, UserRecord>>,
}

impl UserDirectory {
    /// Build the directory, hashing each configured password.
    pub fn from_config(config: &AuthConfig) -> Result<Self, Error> {
        let params = Argon2Params::from(&config.password);
        let users = DashMap::new();
        for user in &config.users {
            let password_hash = password::hash_string_with_params(&user.password, Some(params))?;
            users.insert(
                user.id.clone(),
                UserRecord {
                    id: user.id.clone(),
                    name: user.name.clone(),
                    email: user.email.clone(),
                    role: user.role.clone(),
                    phone: user.phone.clone(),
                    password_hash,
                },
            );
        }
        info!("Loaded {} user(s) into the directory", users.len());
        Ok(Self { users: Arc::new(users) })
    }

    pub fn get(&self, id: &str) -> Option<UserRecord> {
        self.users.get(id).map(|u| u.clone())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.users.contains_key(id)
    }

    /// Case-insensitive email lookup
    pub fn find_by_email(&self, email: &str) -> Option<UserRecord> {
        self.users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email.trim()))
            .map(|u| u.clone())
    }

    /// Check an email/password pair. Email matching ignores case; the password must match exactly.
    #[instrument(skip_all)]
    pub async fn verify_credentials(&self, email: &str, password: &str) -> Result<Option<SessionUser>, Error> {
        let Some(user) = self.find_by_email(email) else {
            debug!("No user with the submitted email");
            return Ok(None);
        };

        if !self.verify_password(&user.id, password).await? {
            return Ok(None);
        }
        Ok(Some(user.session_user()))
    }

    /// Verify a password on a blocking thread to avoid blocking async runtime
    pub async fn verify_password(&self, id: &str, password: &str) -> Result<bool, Error> {
        let Some(hash) = self.users.get(id).map(|u| u.password_hash.clone()) else {
            return Ok(false);
        };
        let password = password.to_string();
        tokio::task::spawn_blocking(move || password::verify_string(&password, &hash))
            .await
            .map_err(|e| Error::Internal {
                operation: format!("spawn password verification task: {e}"),
            })?
    }

    pub fn set_password_hash(&self, id: &str, password_hash: String) -> Result<(), Error> {
        let mut user = self.users.get_mut(id).ok_or_else(|| Error::NotFound {
            resource: "User".to_string(),
            id: id.to_string(),
        })?;
        user.password_hash = password_hash;
        Ok(())
    }

    /// Apply an already validated profile update.
    pub fn update_profile(&self, id: &str, update: ProfileUpdate) -> Result<UserRecord, Error> {
        if let Some(email) = &update.email
            && self
                .users
                .iter()
                .any(|u| u.id != id && u.email.eq_ignore_ascii_case(email))
        {
            return Err(Error::BadRequest {
                message: "Email is already in use.".to_string(),
            });
        }

        let mut user = self.users.get_mut(id).ok_or_else(|| Error::NotFound {
            resource: "User".to_string(),
            id: id.to_string(),
        })?;
        if let Some(name) = update.name {
            user.name = name;
        }
        if let Some(email) = update.email {
            user.email = email;
        }
        if let Some(phone) = update.phone {
            user.phone = phone;
        }
        Ok(user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PasswordConfig, UserConfig};

    fn test_auth_config() -> AuthConfig {
        AuthConfig {
            password: PasswordConfig {
                argon2_memory_kib: 1024,
                argon2_iterations: 1,
                ..Default::default()
            },
            users: vec![
                UserConfig::default(),
                UserConfig {
                    id: "2".to_string(),
                    name: "Second".to_string(),
                    email: "second@example.com".to_string(),
                    role: "Staff".to_string(),
                    password: "secondpass".to_string(),
                    phone: String::new(),
                },
            ],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_verify_credentials_ignores_email_case() {
        let users = UserDirectory::from_config(&test_auth_config()).unwrap();

        let user = users
            .verify_credentials("ROSHAN@Example.com", "password123")
            .await
            .unwrap()
            .expect("credentials should match");
        assert_eq!(user.id, "1");
        assert_eq!(user.role, "Admin");
    }

    #[tokio::test]
    async fn test_verify_credentials_password_is_exact() {
        let users = UserDirectory::from_config(&test_auth_config()).unwrap();

        assert!(users.verify_credentials("roshan@example.com", "Password123").await.unwrap().is_none());
        assert!(users.verify_credentials("nobody@example.com", "password123").await.unwrap().is_none());
        // another user's password does not work for this account
        assert!(users.verify_credentials("roshan@example.com", "secondpass").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_password_change_takes_effect() {
        let users = UserDirectory::from_config(&test_auth_config()).unwrap();
        let hash = password::hash_string_with_params(
            "brand-new-pass",
            Some(Argon2Params {
                memory_kib: 1024,
                iterations: 1,
                parallelism: 1,
            }),
        )
        .unwrap();
        users.set_password_hash("1", hash).unwrap();

        assert!(users.verify_password("1", "brand-new-pass").await.unwrap());
        assert!(!users.verify_password("1", "password123").await.unwrap());
    }

    #[test]
    fn test_update_profile() {
        let users = UserDirectory::from_config(&test_auth_config()).unwrap();

        let updated = users
            .update_profile(
                "1",
                ProfileUpdate {
                    name: Some("Renamed".to_string()),
                    phone: Some("+1 555 0100".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.email, "roshan@example.com");
        assert_eq!(updated.phone, "+1 555 0100");
        assert_eq!(updated.role, "Admin");
    }

    #[test]
    fn test_update_profile_rejects_taken_email() {
        let users = UserDirectory::from_config(&test_auth_config()).unwrap();

        let result = users.update_profile(
            "1",
            ProfileUpdate {
                email: Some("Second@Example.com".to_string()),
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(Error::BadRequest { .. })));
    }
}
