pub mod db;

mod cli;
pub use cli::*;

mod state;
pub use state::*;

mod signal;
pub use signal::*;

pub mod routes;

pub mod services;
