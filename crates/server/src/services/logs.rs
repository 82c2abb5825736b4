use chrono::NaiveDate;
use rusqlite::Connection;
use shared::{
    api::{
        error::ServerError,
        payloads::{LogEntry, LogsQuery, LogsResponse},
        DEFAULT_LOG_LIMIT,
    },
    model::{Exercise, ExerciseFilter, User},
    types::parse_calendar_date,
};
use tracing::{debug, instrument};

use super::users::find_user;

/// Highest row cap a client can ask for
pub const MAX_LOG_LIMIT: u64 = u32::MAX as u64;

/// One side of the requested date range
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DateBound {
    Date(NaiveDate),
    /// The client sent something that isn't a date. Nothing can satisfy it
    Unsatisfiable,
}

impl DateBound {
    /// `None` when the client didn't constrain this side of the range
    pub fn from_query(value: Option<&str>) -> Option<Self> {
        let value = value.map(str::trim).filter(|v| !v.is_empty())?;
        Some(match parse_calendar_date(value) {
            Some(date) => Self::Date(date),
            None => Self::Unsatisfiable,
        })
    }
}

/// Row cap from the `limit` parameter. Anything that isn't a number of at
/// least one falls back to [DEFAULT_LOG_LIMIT]
pub fn parse_limit(value: Option<&str>) -> u64 {
    value
        .and_then(|v| v.trim().parse::<f64>().ok())
        .map(f64::trunc)
        .filter(|v| *v >= 1.0)
        .map(|v| v.min(MAX_LOG_LIMIT as f64) as u64)
        .unwrap_or(DEFAULT_LOG_LIMIT)
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogFilter {
    pub from: Option<DateBound>,
    pub to: Option<DateBound>,
    pub limit: u64,
}

impl From<&LogsQuery> for LogFilter {
    fn from(query: &LogsQuery) -> Self {
        Self {
            from: DateBound::from_query(query.from.as_deref()),
            to: DateBound::from_query(query.to.as_deref()),
            limit: parse_limit(query.limit.as_deref()),
        }
    }
}

impl LogFilter {
    /// The store filter for `user`, or `None` if a bound can never match
    fn exercise_filter(&self, user: &User) -> Option<ExerciseFilter> {
        let date = |bound: Option<DateBound>| match bound {
            None => Some(None),
            Some(DateBound::Date(date)) => Some(Some(date)),
            Some(DateBound::Unsatisfiable) => None,
        };

        Some(ExerciseFilter {
            user_id: user.id,
            from: date(self.from)?,
            to: date(self.to)?,
            limit: self.limit,
        })
    }
}

#[instrument(skip(conn))]
pub fn get_logs(
    conn: &Connection,
    user_id: &str,
    filter: &LogFilter,
) -> Result<LogsResponse, ServerError> {
    let user = find_user(conn, user_id)?;

    let exercises = match filter.exercise_filter(&user) {
        Some(exercise_filter) => Exercise::fetch_filtered(conn, &exercise_filter)?,
        None => {
            debug!("Date bound isn't a date, no exercise can match");
            Vec::new()
        },
    };

    let log: Vec<LogEntry> = exercises.into_iter().map(LogEntry::from).collect();

    Ok(LogsResponse {
        id: user.id,
        username: user.username,
        count: log.len(),
        log,
    })
}
