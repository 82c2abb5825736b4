use rusqlite::Connection;
use shared::{
    api::{error::ServerError, payloads::UserSummary},
    model::{NewUser, User},
    types::Uuid,
};
use tracing::{debug, instrument};

pub const USER_NOT_FOUND: &str = "Could not find user";

/// Looks up the user a request refers to. An id that isn't a well formed
/// identifier can't match any user so it's reported the same way
pub fn find_user(conn: &Connection, id: &str) -> Result<User, ServerError> {
    let not_found = || ServerError::not_found(USER_NOT_FOUND);
    let id = Uuid::parse(id).map_err(|_| not_found())?;

    User::fetch_by_id(conn, &id)?.ok_or_else(not_found)
}

#[instrument(skip(conn))]
pub fn create_user(conn: &mut Connection, username: String) -> Result<User, ServerError> {
    let user = User::create(conn, NewUser::new(username))?;
    debug!(id = %user.id, "Created user");
    Ok(user)
}

pub fn list_users(conn: &Connection) -> Result<Vec<UserSummary>, ServerError> {
    let users = User::fetch_all(conn)?;
    Ok(users.into_iter().map(UserSummary::from).collect())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::db::test_connection;

    #[test]
    fn test_create_user_keeps_username() {
        let mut conn = test_connection();
        let user = create_user(&mut conn, "fcc_test".to_owned()).unwrap();
        assert_eq!(user.username, "fcc_test");
        assert_eq!(find_user(&conn, &user.id.to_string()).unwrap(), user);
    }

    #[test]
    fn test_empty_and_duplicate_usernames_are_allowed() {
        let mut conn = test_connection();
        let a = create_user(&mut conn, "dup".to_owned()).unwrap();
        let b = create_user(&mut conn, "dup".to_owned()).unwrap();
        let empty = create_user(&mut conn, String::new()).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(empty.username, "");
    }

    #[test]
    fn test_list_users_in_insertion_order() {
        let mut conn = test_connection();
        assert!(list_users(&conn).unwrap().is_empty());

        let names = ["carol", "alice", "bob"];
        for name in names {
            create_user(&mut conn, name.to_owned()).unwrap();
        }

        let listed: Vec<_> = list_users(&conn)
            .unwrap()
            .into_iter()
            .map(|u| u.username)
            .collect();
        assert_eq!(listed, names);
    }

    #[test]
    fn test_find_user_not_found() {
        let conn = test_connection();
        for id in [Uuid::new_v4().to_string(), "not-an-id".to_owned()] {
            match find_user(&conn, &id) {
                Err(ServerError::NotFound { message }) => assert_eq!(message, USER_NOT_FOUND),
                other => panic!("unexpected {other:?}"),
            }
        }
    }
}
