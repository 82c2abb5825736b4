use serde::{Deserialize, Serialize, Serializer};
#[cfg(feature = "backend")]
use rusqlite::{
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, Value, ValueRef},
    ToSql,
};

/// Largest float that still maps exactly onto an integer
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Exercise duration in minutes, kept exactly as the client sent it.
///
/// Numeric input is stored and returned as a number. Anything else is passed
/// through untouched as text rather than being rejected.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ExerciseDuration {
    Minutes(f64),
    Text(String),
}

impl ExerciseDuration {
    /// Interprets a form value. Empty input means no duration was given
    pub fn from_input(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }

        match trimmed.parse::<f64>() {
            Ok(minutes) if minutes.is_finite() => Some(Self::Minutes(minutes)),
            _ => Some(Self::Text(value.to_owned())),
        }
    }
}

impl Serialize for ExerciseDuration {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            // Whole minutes go out as integers so `30` doesn't become `30.0`
            Self::Minutes(minutes)
                if minutes.fract() == 0.0 && minutes.abs() <= MAX_EXACT_INTEGER =>
            {
                serializer.serialize_i64(*minutes as i64)
            },
            Self::Minutes(minutes) => serializer.serialize_f64(*minutes),
            Self::Text(text) => serializer.serialize_str(text),
        }
    }
}

#[cfg(feature = "backend")]
impl ToSql for ExerciseDuration {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Self::Minutes(minutes) => ToSqlOutput::Owned(Value::Real(*minutes)),
            Self::Text(text) => ToSqlOutput::Borrowed(ValueRef::Text(text.as_bytes())),
        })
    }
}

#[cfg(feature = "backend")]
impl FromSql for ExerciseDuration {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value {
            ValueRef::Integer(minutes) => Ok(Self::Minutes(minutes as f64)),
            ValueRef::Real(minutes) => Ok(Self::Minutes(minutes)),
            ValueRef::Text(_) => value.as_str().map(|v| Self::Text(v.to_owned())),
            ValueRef::Null | ValueRef::Blob(_) => Err(FromSqlError::InvalidType),
        }
    }
}

#[cfg(test)]
mod test {
    use super::ExerciseDuration;

    #[test]
    fn test_from_input() {
        assert_eq!(ExerciseDuration::from_input("30"), Some(ExerciseDuration::Minutes(30.0)));
        assert_eq!(
            ExerciseDuration::from_input(" 12.5 "),
            Some(ExerciseDuration::Minutes(12.5))
        );
        assert_eq!(
            ExerciseDuration::from_input("half an hour"),
            Some(ExerciseDuration::Text("half an hour".to_owned()))
        );
        assert_eq!(
            ExerciseDuration::from_input("inf"),
            Some(ExerciseDuration::Text("inf".to_owned()))
        );
        assert_eq!(ExerciseDuration::from_input(""), None);
        assert_eq!(ExerciseDuration::from_input("  "), None);
    }

    #[test]
    fn test_serialize() {
        let json = |d: ExerciseDuration| serde_json::to_string(&d).unwrap();
        assert_eq!(json(ExerciseDuration::Minutes(30.0)), "30");
        assert_eq!(json(ExerciseDuration::Minutes(-5.0)), "-5");
        assert_eq!(json(ExerciseDuration::Minutes(12.5)), "12.5");
        assert_eq!(json(ExerciseDuration::Text("long".to_owned())), "\"long\"");
    }

    #[test]
    fn test_deserialize_from_response() {
        let d: ExerciseDuration = serde_json::from_str("45").unwrap();
        assert_eq!(d, ExerciseDuration::Minutes(45.0));
        let d: ExerciseDuration = serde_json::from_str("\"a while\"").unwrap();
        assert_eq!(d, ExerciseDuration::Text("a while".to_owned()));
    }
}
