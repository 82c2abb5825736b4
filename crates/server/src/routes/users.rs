use axum::{Form, Json};
use shared::api::{
    error::{ServerError, ServerErrorContext},
    payloads::{CreateUserRequest, CreateUserResponse, UserSummary},
};
use tracing::instrument;

use crate::{db::DatabaseConnection, services::users};

#[instrument(skip(conn))]
pub async fn create_user(
    conn: DatabaseConnection,
    Form(request): Form<CreateUserRequest>,
) -> Result<Json<CreateUserResponse>, ServerError> {
    let user = conn
        .run(move |conn| users::create_user(conn, request.username))
        .await
        .context("Error creating user")?;

    Ok(Json(user.into()))
}

#[instrument(skip(conn))]
pub async fn list_users(
    conn: DatabaseConnection,
) -> Result<Json<Vec<UserSummary>>, ServerError> {
    let users = conn
        .run(|conn| users::list_users(conn))
        .await
        .context("Error listing users")?;

    Ok(Json(users))
}
