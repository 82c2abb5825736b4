use axum::{
    extract::{Path, Query},
    Json,
};
use shared::api::{
    error::{ServerError, ServerErrorContext},
    payloads::{LogsQuery, LogsResponse},
};
use tracing::instrument;

use crate::{
    db::DatabaseConnection,
    services::logs::{self, LogFilter},
};

#[instrument(skip(conn))]
pub async fn fetch_logs(
    conn: DatabaseConnection,
    Path(id): Path<String>,
    Query(query): Query<LogsQuery>,
) -> Result<Json<LogsResponse>, ServerError> {
    let filter = LogFilter::from(&query);
    let response = conn
        .run(move |conn| logs::get_logs(conn, &id, &filter))
        .await
        .context("Error retrieving logs")?;

    Ok(Json(response))
}
