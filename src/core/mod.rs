//! Business logic, independent of the command line.

pub mod aggregate;
pub mod auth;
pub mod backup;
pub mod date;
pub mod entries;
pub mod filter;
pub mod log;
pub mod permission;
pub mod report;
