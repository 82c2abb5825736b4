use axum::{extract::Path, Form, Json};
use shared::api::{
    error::{ServerError, ServerErrorContext},
    payloads::{LogExerciseRequest, LogExerciseResponse},
};
use tracing::instrument;

use crate::{db::DatabaseConnection, services::exercises};

#[instrument(skip(conn))]
pub async fn log_exercise(
    conn: DatabaseConnection,
    Path(id): Path<String>,
    Form(request): Form<LogExerciseRequest>,
) -> Result<Json<LogExerciseResponse>, ServerError> {
    let response = conn
        .run(move |conn| exercises::log_exercise(conn, &id, request))
        .await
        .context("Error saving exercise")?;

    Ok(Json(response))
}
