mod tracing;
pub use self::tracing::*;

mod env;
pub use env::*;
