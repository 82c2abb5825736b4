use chrono::NaiveDate;
use rusqlite::Connection;
use shared::{
    api::{
        error::ServerError,
        payloads::{LogExerciseRequest, LogExerciseResponse},
    },
    model::{Exercise, NewExercise},
    types::{calendar_string, parse_calendar_date, today, ExerciseDuration},
};
use tracing::{debug, instrument};

use super::users::find_user;

pub const INVALID_DATE: &str = "Invalid date";

/// The day an exercise is logged against. A missing or blank date means today
pub fn resolve_date(raw: Option<&str>) -> Result<NaiveDate, ServerError> {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(today()),
        Some(raw) => {
            parse_calendar_date(raw).ok_or_else(|| ServerError::invalid_input(INVALID_DATE))
        },
    }
}

#[instrument(skip(conn))]
pub fn log_exercise(
    conn: &mut Connection,
    user_id: &str,
    request: LogExerciseRequest,
) -> Result<LogExerciseResponse, ServerError> {
    let user = find_user(conn, user_id)?;
    let date = resolve_date(request.date.as_deref())?;
    let duration = request
        .duration
        .as_deref()
        .and_then(ExerciseDuration::from_input);

    let exercise = Exercise::create(
        conn,
        NewExercise::new(user.id, request.description, duration, date),
    )?;
    debug!(id = %exercise.id, user_id = %user.id, "Logged exercise");

    Ok(LogExerciseResponse {
        id: user.id,
        username: user.username,
        description: exercise.description,
        duration: exercise.duration,
        date: calendar_string(exercise.date),
    })
}
