//! Daily records: keys, week tags, the typed record and the upsert protocol.

pub mod key;
pub mod locks;
pub mod reader;
pub mod repo;
pub mod repo_types;
pub mod upsert;
pub mod week;

pub use key::day_key;
pub use reader::DailySnapshot;
pub use repo_types::{DayRecord, Macros};
pub use upsert::upsert_today;
