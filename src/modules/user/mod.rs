pub mod controller;
pub mod model;
pub mod repository;
pub mod service;

pub use controller::UserController;
pub use model::{CreateUserRequest, DeleteUserResponse, User};
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;

use crate::di::{Container, Injectable};
use crate::error::Result;
use crate::module::Module;
use std::sync::Arc;

/// Registers the record store, [`UserService`] and [`UserController`].
///
/// Expects a [`crate::config::ServerConfig`] to be registered already.
pub struct UserModule;

impl Module for UserModule {
    fn register(container: &mut Container) -> Result<()> {
        container.register_trait::<dyn UserRepository, InMemoryUserRepository, _>(|i| {
            i as Arc<dyn UserRepository>
        });

        let repository = InMemoryUserRepository::inject(container)?;
        container.register(repository);
        let service = UserService::inject(container)?;
        container.register(service);

        let controller = UserController::inject(container)?;
        container.register(controller);

        Ok(())
    }
}
