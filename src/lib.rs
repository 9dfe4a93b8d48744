//! bursar - Student payment registry
//!
//! Registers students, records payments against their accounts, keeps the
//! registry in a line-oriented text file, and writes plain-text receipts.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::BursarError;
