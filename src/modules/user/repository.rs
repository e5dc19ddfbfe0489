use super::model::{User, seed_users};
use crate::config::{IdStrategy, ServerConfig};
use crate::di::{Container, Injectable};
use crate::error::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_all(&self) -> Vec<User>;

    /// Assign an id and append the record. Id assignment and the append happen atomically.
    async fn insert(&self, name: Option<String>, email: Option<String>) -> User;

    /// Remove every record with this id and return how many were removed.
    async fn delete_by_id(&self, id: i64) -> usize;

    async fn count(&self) -> usize;
}

struct UserTable {
    rows: Vec<User>,
    next_id: i64,
}

impl UserTable {
    fn new(rows: Vec<User>) -> Self {
        let next_id = rows.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        Self { rows, next_id }
    }

    fn allocate_id(&mut self, strategy: IdStrategy) -> i64 {
        let id = match strategy {
            IdStrategy::Sequence => self.next_id,
            IdStrategy::Length => self.rows.len() as i64 + 1,
        };
        self.next_id = self.next_id.max(id + 1);
        id
    }
}

/// Process-local user store
///
/// Records keep insertion order. Nothing is persisted.
pub struct InMemoryUserRepository {
    table: RwLock<UserTable>,
    id_strategy: IdStrategy,
}

impl InMemoryUserRepository {
    /// A store holding the two seed records.
    pub fn new(id_strategy: IdStrategy) -> Self {
        Self::with_users(seed_users(), id_strategy)
    }

    pub fn with_users(users: Vec<User>, id_strategy: IdStrategy) -> Self {
        Self {
            table: RwLock::new(UserTable::new(users)),
            id_strategy,
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new(IdStrategy::default())
    }
}

impl Injectable for InMemoryUserRepository {
    fn inject(container: &Container) -> Result<Self> {
        let config = container.resolve::<ServerConfig>()?;
        Ok(Self::new(config.id_strategy))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_all(&self) -> Vec<User> {
        self.table.read().await.rows.clone()
    }

    async fn insert(&self, name: Option<String>, email: Option<String>) -> User {
        let mut table = self.table.write().await;
        let id = table.allocate_id(self.id_strategy);
        let user = User { id, name, email };
        table.rows.push(user.clone());
        user
    }

    async fn delete_by_id(&self, id: i64) -> usize {
        let mut table = self.table.write().await;
        let before = table.rows.len();
        table.rows.retain(|u| u.id != id);
        before - table.rows.len()
    }

    async fn count(&self) -> usize {
        self.table.read().await.rows.len()
    }
}
