pub mod logging;
pub mod retry;

pub use logging::env_filter;
pub use retry::{retry, RetryPolicy};
