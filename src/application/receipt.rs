//! Generate receipt use case

use crate::application::Registry;
use crate::error::{BursarError, Result};
use crate::infrastructure::StudentStore;
use chrono::{DateTime, Local};
use std::path::PathBuf;

/// Write a receipt for the student with `id` and return the file path.
/// The registry is only read.
pub fn generate_receipt<S: StudentStore>(
    registry: &Registry<S>,
    id: &str,
    now: DateTime<Local>,
) -> Result<PathBuf> {
    let student = registry
        .find_by_id(id)
        .ok_or_else(|| BursarError::NotFound(id.trim().to_string()))?;

    registry.store().write_receipt(student, now)
}
