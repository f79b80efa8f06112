use super::{Collection, RecordStore};
use crate::error::AppError;
use crate::models::User;

/// Credential store: username to password-hash records.
pub struct UserStore {
    users: Collection<User>,
}

impl UserStore {
    pub fn new(backend: impl RecordStore<User> + 'static) -> Self {
        Self {
            users: Collection::new(backend),
        }
    }

    /// Looks up a user by exact (case-sensitive) username.
    pub async fn find(&self, username: &str) -> Result<Option<User>, AppError> {
        let users = self.users.read_all().await?;
        Ok(users.into_iter().find(|u| u.username == username))
    }

    /// Appends a new user, refusing a username that is already taken.
    pub async fn insert(&self, user: User) -> Result<(), AppError> {
        self.users
            .modify(|users| {
                if users.iter().any(|u| u.username == user.username) {
                    return Err(AppError::Conflict("User already exists".into()));
                }
                users.push(user);
                Ok(())
            })
            .await
    }

    pub async fn all(&self) -> Result<Vec<User>, AppError> {
        self.users.read_all().await
    }
}
