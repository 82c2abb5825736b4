use http::StatusCode;
use thiserror::Error;

/// Message clients get for a store failure when the route didn't set one
pub const DEFAULT_STORE_ERROR_MESSAGE: &str = "Something went wrong";

#[derive(Debug, Clone, Error)]
pub enum ServerError {
    /// The referenced record doesn't exist
    #[error("{message}")]
    NotFound { message: String },
    /// The client sent a value that can't be used
    #[error("{message}")]
    InvalidInput { message: String },
    /// Reading or writing the database failed. `context` is what the client
    /// sees, `message` is only logged
    #[error("{context}: {message}")]
    Store { context: String, message: String },
}

impl ServerError {
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound { message: message.into() }
    }

    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput { message: message.into() }
    }

    pub fn store<S: Into<String>>(message: S) -> Self {
        Self::Store {
            context: DEFAULT_STORE_ERROR_MESSAGE.to_owned(),
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::NotFound { .. } => StatusCode::NOT_FOUND,
            ServerError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ServerError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Builds a [ServerError::Store] from format args
#[macro_export]
macro_rules! store_error {
    ($($arg:tt)*) => {
        $crate::api::error::ServerError::store(format!($($arg)*))
    };
}

pub trait ServerErrorContext<T> {
    /// Sets the message reported to the client if this is a store error.
    /// Other kinds already carry a client facing message and are left alone
    fn context<S: Into<String>>(self, context: S) -> Result<T, ServerError>;
}

impl<T, E: Into<ServerError>> ServerErrorContext<T> for Result<T, E> {
    fn context<S: Into<String>>(self, context: S) -> Result<T, ServerError> {
        self.map_err(|e| match e.into() {
            ServerError::Store { message, .. } => ServerError::Store {
                context: context.into(),
                message,
            },
            other => other,
        })
    }
}

#[cfg(feature = "backend")]
mod backend {
    use axum::{
        response::{IntoResponse, Response},
        Json,
    };
    use deadpool_sqlite::{HookError, InteractError, PoolError};
    use serde_json::json;
    use tracing::error;

    use super::ServerError;

    impl IntoResponse for ServerError {
        fn into_response(self) -> Response {
            let code = self.status_code();
            match self {
                ServerError::NotFound { message } => (code, message).into_response(),
                ServerError::InvalidInput { message } => {
                    (code, Json(json!({ "error": message }))).into_response()
                },
                ServerError::Store { context, message } => {
                    error!(%context, %message, "store error");
                    (code, context).into_response()
                },
            }
        }
    }

    impl From<rusqlite::Error> for ServerError {
        fn from(err: rusqlite::Error) -> Self {
            Self::store(format!("rusqlite: {err}"))
        }
    }

    impl From<PoolError> for ServerError {
        fn from(err: PoolError) -> Self {
            Self::store(format!("pool: {err}"))
        }
    }

    impl From<InteractError> for ServerError {
        fn from(err: InteractError) -> Self {
            Self::store(format!("interact: {err}"))
        }
    }

    impl From<ServerError> for HookError {
        fn from(err: ServerError) -> Self {
            Self::Message(err.to_string())
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_context_only_replaces_store_message() {
        let store: Result<(), _> = Err(ServerError::store("disk I/O error"));
        match store.context("Error saving exercise") {
            Err(ServerError::Store { context, message }) => {
                assert_eq!(context, "Error saving exercise");
                assert_eq!(message, "disk I/O error");
            },
            other => panic!("unexpected {other:?}"),
        }

        let not_found: Result<(), _> = Err(ServerError::not_found("Could not find user"));
        match not_found.context("Error saving exercise") {
            Err(ServerError::NotFound { message }) => assert_eq!(message, "Could not find user"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_store_error_macro_uses_default_context() {
        let err = store_error!("missing table {}", "user");
        assert_eq!(err.to_string(), "Something went wrong: missing table user");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ServerError::not_found("x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ServerError::invalid_input("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ServerError::store("x").status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
