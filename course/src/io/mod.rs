//! I/O helpers for course commands.

pub mod config;
pub mod process;
pub mod stage;
