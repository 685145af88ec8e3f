//! TaskHound summary reporter
//!
//! Renders per-host counts of privileged and normal scheduled tasks collected
//! by an earlier scan as a fixed-width terminal table.

pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod record;
pub mod summary;

pub use output::{OutputHandler, ReportSink};
pub use record::{TaskKind, TaskRecord};
pub use summary::{render_summary, HostCounts, Summary};
