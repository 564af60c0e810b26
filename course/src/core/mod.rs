//! Deterministic, pure logic shared by the course commands.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! data and return deterministic outputs suitable for tests.

pub mod interpreter;
pub mod module_id;
pub mod verdict;
