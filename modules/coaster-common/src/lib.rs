pub mod config;
pub mod error;
pub mod fields;
pub mod types;

pub use config::Config;
pub use error::CoasterError;
pub use fields::{coaster_columns, FIELD_ALIASES, TITLE_COLUMN};
pub use types::*;
