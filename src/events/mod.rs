mod log;
mod types;

pub use log::EventLog;
pub use types::AttentionEvent;
