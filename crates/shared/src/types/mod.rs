mod uuid;
pub use self::uuid::*;

mod calendar_date;
pub use calendar_date::*;

mod duration;
pub use duration::*;
