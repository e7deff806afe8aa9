//! Auth panel core: formatting, grading, and persisted metrics behind the
//! login status panel shared by the trading game's pages.

pub mod config;
pub mod email;
pub mod error;
pub mod format;
pub mod grade;
pub mod keys;
pub mod logout;
pub mod metrics;
pub mod panel;
pub mod storage;
pub mod store;
