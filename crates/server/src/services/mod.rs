//! Request logic. Every function takes the store connection explicitly and is
//! run through [crate::db::DatabaseConnection::run] by the route handlers

pub mod exercises;
pub mod logs;
pub mod users;
