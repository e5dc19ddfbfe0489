//! # userdesk
//!
//! A small HTTP service that keeps a list of user records in memory and lets
//! clients list, create and delete them.
//!
//! | Method | Path              | Status |
//! |--------|-------------------|--------|
//! | GET    | `/api/users`      | 200    |
//! | POST   | `/api/users`      | 201    |
//! | DELETE | `/api/users/{id}` | 200    |
//! | GET    | `/`               | 200    |
//!
//! The store, the service and the controller are wired through a small
//! dependency injection [`Container`], so every test can build its own
//! isolated application.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use userdesk::config::{ConfigService, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_service(&ConfigService::from_env())?;
//!     userdesk::server::run(config).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod di;
pub mod error;
pub mod lifecycle;
pub mod module;
pub mod modules;
pub mod server;

pub use di::{Container, ContainerBuilder, HasContainer, Inject, Injectable};
pub use error::{AppError, Result};
pub use module::Module;

/// Prelude module for convenient imports
///
/// ```
/// use userdesk::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{ConfigService, IdStrategy, ServerConfig};
    pub use crate::di::{Container, ContainerBuilder, HasContainer, Inject, Injectable};
    pub use crate::error::{AppError, Result};
    pub use crate::module::Module;
    pub use crate::modules::user::{
        CreateUserRequest, DeleteUserResponse, InMemoryUserRepository, User, UserController,
        UserModule, UserRepository, UserService,
    };
    pub use crate::server::{AppState, build_container, build_router};
    pub use std::sync::Arc;
}
