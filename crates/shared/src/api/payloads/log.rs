use serde::{Deserialize, Serialize};

use crate::{
    model::Exercise,
    types::{calendar_string, ExerciseDuration, Uuid},
};

/// Query string of `GET /api/users/:id/logs`. Values are kept as text because
/// unusable values are tolerated rather than rejected
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogsQuery {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<ExerciseDuration>,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogsResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub username: String,
    /// Number of entries in `log`, after the limit was applied
    pub count: usize,
    pub log: Vec<LogEntry>,
}

impl From<Exercise> for LogEntry {
    fn from(exercise: Exercise) -> Self {
        Self {
            description: exercise.description,
            duration: exercise.duration,
            date: calendar_string(exercise.date),
        }
    }
}
