use serde::{Deserialize, Serialize};

use crate::types::{ExerciseDuration, Uuid};

/// Form body of `POST /api/users/:id/exercises`. Every field is optional at
/// this level, the service decides what each missing value means
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogExerciseRequest {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogExerciseResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<ExerciseDuration>,
    /// Calendar string, e.g. `Mon Jan 01 2024`
    pub date: String,
}
