//! User store: the repository owning holder accounts.

use std::path::Path;

use crate::{
    error::{AppError, AppResult},
    models::User,
    repository::store::{JsonStore, Snapshot},
};

pub struct UsersRepository {
    store: JsonStore<User>,
    users: Vec<User>,
    next_seq: u64,
}

impl UsersRepository {
    /// Open the user store backed by the given snapshot file.
    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let store = JsonStore::new(path.as_ref());
        let snapshot = store.load()?;
        tracing::info!("Loaded {} users", snapshot.records.len());
        Ok(Self {
            store,
            users: snapshot.records,
            next_seq: snapshot.next_seq,
        })
    }

    pub fn get(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|user| user.username == username)
    }

    /// Insert a new account. Usernames are globally unique.
    pub fn add(&mut self, user: User) -> AppResult<()> {
        if self.get(&user.username).is_some() {
            return Err(AppError::AlreadyExists(format!(
                "User {} already exists",
                user.username
            )));
        }

        self.users.push(user);
        if let Err(e) = self.save() {
            self.users.pop();
            return Err(e);
        }
        Ok(())
    }

    /// Replace the stored account wholesale.
    pub fn update(&mut self, user: User) -> AppResult<()> {
        let index = self
            .users
            .iter()
            .position(|u| u.username == user.username)
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user.username)))?;

        let previous = std::mem::replace(&mut self.users[index], user);
        if let Err(e) = self.save() {
            self.users[index] = previous;
            return Err(e);
        }
        Ok(())
    }

    pub fn remove(&mut self, username: &str) -> AppResult<User> {
        let index = self
            .users
            .iter()
            .position(|u| u.username == username)
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", username)))?;

        let removed = self.users.remove(index);
        if let Err(e) = self.save() {
            self.users.insert(index, removed);
            return Err(e);
        }
        Ok(removed)
    }

    pub fn list(&self) -> Vec<User> {
        self.users.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    fn save(&self) -> AppResult<()> {
        self.store.save(&Snapshot {
            next_seq: self.next_seq,
            records: self.users.clone(),
        })
    }
}
