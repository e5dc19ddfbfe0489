use super::model::{CreateUserRequest, DeleteUserResponse, User};
use super::service::UserService;
use crate::di::{Container, HasContainer, Injectable};
use crate::error::{AppError, Result};
use axum::{
    Json, Router,
    extract::{
        Path,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
};
use std::sync::Arc;

/// HTTP handlers for `/api/users`
pub struct UserController {
    service: Arc<UserService>,
}

impl Injectable for UserController {
    fn inject(container: &Container) -> Result<Self> {
        Ok(Self {
            service: container.resolve::<UserService>()?,
        })
    }
}

impl UserController {
    pub fn base_path() -> &'static str {
        "/api/users"
    }

    /// Routes relative to [`UserController::base_path`].
    pub fn router<S>(controller: Arc<Self>) -> Router<S>
    where
        S: Clone + Send + Sync + HasContainer + 'static,
    {
        Router::new()
            .route(
                "/",
                get({
                    let controller = controller.clone();
                    move || {
                        let controller = controller.clone();
                        async move { controller.list().await.into_response() }
                    }
                })
                .post({
                    let controller = controller.clone();
                    move |payload: std::result::Result<Json<CreateUserRequest>, JsonRejection>| {
                        let controller = controller.clone();
                        async move { controller.create(payload).await.into_response() }
                    }
                }),
            )
            .route(
                "/{id}",
                delete({
                    let controller = controller.clone();
                    move |id: std::result::Result<Path<String>, PathRejection>| {
                        let controller = controller.clone();
                        async move { controller.delete(id).await.into_response() }
                    }
                }),
            )
    }

    pub async fn list(&self) -> Json<Vec<User>> {
        Json(self.service.list().await)
    }

    pub async fn create(
        &self,
        payload: std::result::Result<Json<CreateUserRequest>, JsonRejection>,
    ) -> Result<(StatusCode, Json<User>)> {
        let Json(req) = payload.map_err(|e| AppError::InvalidPayload(e.body_text()))?;
        let user = self.service.create(req).await;
        Ok((StatusCode::CREATED, Json(user)))
    }

    /// Ids that are not unsigned integers do not match the route, same as an unknown path.
    pub async fn delete(
        &self,
        id: std::result::Result<Path<String>, PathRejection>,
    ) -> Result<Json<DeleteUserResponse>> {
        let Path(raw) = id.map_err(|e| AppError::NotFound(e.body_text()))?;
        let id = parse_user_id(&raw)
            .ok_or_else(|| AppError::NotFound(format!("No user route for id '{}'", raw)))?;
        self.service.delete(id).await;
        Ok(Json(DeleteUserResponse::default()))
    }
}

/// Digits only: no sign, no whitespace, and it must fit in an `i64`.
fn parse_user_id(raw: &str) -> Option<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}
