//! Router assembly and server bootstrap.

mod landing;

use crate::config::ServerConfig;
use crate::di::{Container, ContainerBuilder, HasContainer};
use crate::error::{AppError, Result};
use crate::lifecycle::shutdown_signal;
use crate::module::Module;
use crate::modules::user::{UserController, UserModule};
use axum::{Router, http::Uri, routing::get};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[derive(Clone)]
pub struct AppState {
    container: Arc<Container>,
}

impl AppState {
    pub fn new(container: Container) -> Self {
        Self {
            container: Arc::new(container),
        }
    }
}

impl HasContainer for AppState {
    fn get_container(&self) -> &Container {
        &self.container
    }
}

/// Register the configuration and every module into a fresh container.
pub fn build_container(config: ServerConfig) -> Result<Container> {
    let mut container = ContainerBuilder::new().register(config).build();
    UserModule::register(&mut container)?;
    Ok(container)
}

pub fn build_router(container: Container) -> Result<Router> {
    let state = AppState::new(container);
    let user_controller = state.get_container().resolve::<UserController>()?;

    let router = Router::new()
        .route("/", get(landing::index))
        .nest(
            UserController::base_path(),
            UserController::router(user_controller),
        )
        .fallback(not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    Ok(router)
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

/// Serve until Ctrl+C or SIGTERM.
pub async fn run(config: ServerConfig) -> Result<()> {
    let addr = config.socket_addr();
    let debug_mode = config.debug;
    let id_strategy = config.id_strategy;

    let router = build_router(build_container(config)?)?;
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(debug_mode, %id_strategy, "Server running on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Initiating graceful shutdown...");
        })
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
