use super::model::{CreateUserRequest, User};
use super::repository::UserRepository;
use crate::di::{Container, Injectable};
use crate::error::Result;
use std::sync::Arc;

pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl Injectable for UserService {
    fn inject(container: &Container) -> Result<Self> {
        Ok(Self {
            repository: container.resolve_trait::<dyn UserRepository>()?,
        })
    }
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> Vec<User> {
        let users = self.repository.find_all().await;
        tracing::debug!(count = users.len(), "Listing users");
        users
    }

    pub async fn create(&self, req: CreateUserRequest) -> User {
        let user = self.repository.insert(req.name, req.email).await;
        tracing::info!(id = user.id, "Created user");
        user
    }

    /// Returns the number of records removed. Zero is not an error.
    pub async fn delete(&self, id: i64) -> usize {
        let removed = self.repository.delete_by_id(id).await;
        if removed == 0 {
            tracing::debug!(id, "Delete matched no users");
        } else {
            tracing::info!(id, removed, "Deleted user");
        }
        removed
    }
}
