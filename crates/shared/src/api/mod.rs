use const_format::concatcp;
pub mod error;
pub mod payloads;

pub const API_BASE_PATH: &str = "/api/";

/// Row cap for exercise log queries without a usable `limit`
pub const DEFAULT_LOG_LIMIT: u64 = 500;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Object {
    Users,
    UserExercises,
    UserLogs,
}

impl Object {
    pub const fn path(&self) -> &str {
        use Object::*;
        match self {
            Users => concatcp!(API_BASE_PATH, "users"),
            UserExercises => concatcp!(API_BASE_PATH, "users/:id/exercises"),
            UserLogs => concatcp!(API_BASE_PATH, "users/:id/logs"),
        }
    }

    /// Path with the `:id` segment filled in
    pub fn path_for(&self, id: &str) -> String {
        self.path().replace(":id", id)
    }
}

#[cfg(test)]
mod test {
    use super::Object;

    #[test]
    fn test_paths() {
        assert_eq!(Object::Users.path(), "/api/users");
        assert_eq!(Object::UserLogs.path_for("abc"), "/api/users/abc/logs");
        assert_eq!(Object::UserExercises.path_for("abc"), "/api/users/abc/exercises");
    }
}
