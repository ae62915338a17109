//! CLI library components for regcheck.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
pub mod types;
