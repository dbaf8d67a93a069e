//! Identity store: holder authentication and account management.
//!
//! The circulation core never sees this service; it only ever consumes the
//! holder identifier strings that authentication produces.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::{
    error::{AppError, AppResult},
    models::{
        user::{RegisterRequest, UserProfile},
        Role, User,
    },
    services::SharedRepository,
};

#[derive(Clone)]
pub struct IdentityService {
    repository: SharedRepository,
}

impl IdentityService {
    pub fn new(repository: SharedRepository) -> Self {
        Self { repository }
    }

    fn hash_password(password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
    }

    fn verify_password(user: &User, password: &str) -> bool {
        PasswordHash::new(&user.password_hash)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(password.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }

    /// Register a new holder account. Usernames are globally unique.
    pub fn register(&self, request: RegisterRequest) -> AppResult<UserProfile> {
        if request.username.trim().is_empty() {
            return Err(AppError::Validation("Username cannot be empty".to_string()));
        }
        if request.password.is_empty() {
            return Err(AppError::Validation("Password cannot be empty".to_string()));
        }

        let user = User {
            username: request.username,
            password_hash: Self::hash_password(&request.password)?,
            role: request.role.unwrap_or(Role::Member),
            email: request.email,
            phone: request.phone,
        };

        let mut repo = self
            .repository
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        repo.users.add(user.clone())?;

        tracing::info!("Registered user {}", user.username);
        Ok(UserProfile::from(&user))
    }

    /// Verify credentials. The failure is deliberately opaque: an unknown
    /// username and a wrong password are indistinguishable to the caller.
    pub fn authenticate(&self, username: &str, password: &str) -> AppResult<UserProfile> {
        let repo = self
            .repository
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let user = repo.users.get(username).ok_or_else(|| {
            AppError::Authentication("Invalid username or password".to_string())
        })?;
        if !Self::verify_password(user, password) {
            return Err(AppError::Authentication(
                "Invalid username or password".to_string(),
            ));
        }

        tracing::info!("User {} logged in", username);
        Ok(UserProfile::from(user))
    }

    /// Change a password after verifying the old one.
    pub fn change_password(
        &self,
        username: &str,
        old_password: &str,
        new_password: &str,
    ) -> AppResult<()> {
        if new_password.is_empty() {
            return Err(AppError::Validation("Password cannot be empty".to_string()));
        }

        let mut repo = self
            .repository
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let user = repo.users.get(username).ok_or_else(|| {
            AppError::Authentication("Invalid username or password".to_string())
        })?;
        if !Self::verify_password(user, old_password) {
            return Err(AppError::Authentication(
                "Invalid username or password".to_string(),
            ));
        }

        let mut updated = user.clone();
        updated.password_hash = Self::hash_password(new_password)?;
        repo.users.update(updated)?;

        tracing::info!("User {} changed password", username);
        Ok(())
    }

    /// Update contact information.
    pub fn update_contact(
        &self,
        username: &str,
        email: Option<String>,
        phone: Option<String>,
    ) -> AppResult<UserProfile> {
        let mut repo = self
            .repository
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let user = repo
            .users
            .get(username)
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", username)))?;

        let mut updated = user.clone();
        updated.email = email;
        updated.phone = phone;
        repo.users.update(updated.clone())?;
        Ok(UserProfile::from(&updated))
    }

    pub fn get_user(&self, username: &str) -> AppResult<UserProfile> {
        let repo = self
            .repository
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        repo.users
            .get(username)
            .map(UserProfile::from)
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", username)))
    }

    pub fn list_users(&self) -> Vec<UserProfile> {
        let repo = self
            .repository
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        repo.users.list().iter().map(UserProfile::from).collect()
    }

    /// Delete a holder account. A holder with open loans cannot go; the
    /// outstanding units have to come back first.
    pub fn delete_user(&self, username: &str) -> AppResult<()> {
        let mut repo = self
            .repository
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if repo.users.get(username).is_none() {
            return Err(AppError::NotFound(format!("User {} not found", username)));
        }
        if !repo.ledger.open_loans_for(username).is_empty() {
            return Err(AppError::HolderHasOpenLoans(format!(
                "User {} still has open loans",
                username
            )));
        }

        repo.users.remove(username)?;
        tracing::info!("Removed user {}", username);
        Ok(())
    }

    /// Seed the administrator account on first start.
    pub fn bootstrap_admin(&self, username: &str, password: &str) -> AppResult<()> {
        {
            let repo = self
                .repository
                .read()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            if !repo.users.is_empty() {
                return Ok(());
            }
        }

        self.register(RegisterRequest {
            username: username.to_string(),
            password: password.to_string(),
            role: Some(Role::Admin),
            email: None,
            phone: None,
        })?;
        tracing::info!("Bootstrapped administrator account {}", username);
        Ok(())
    }
}
