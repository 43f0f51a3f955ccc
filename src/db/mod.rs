pub mod entries;
pub mod initialize;
pub mod log;
pub mod migrate;
pub mod pool;
pub mod reference;
pub mod stats;
pub mod users;

/// Creation timestamp stored alongside every row (local time, RFC 3339).
pub fn now_stamp() -> String {
    chrono::Local::now().to_rfc3339()
}
