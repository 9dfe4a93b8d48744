//! Flat-file student store

use crate::domain::{format_receipt, receipt_file_name, Student};
use crate::error::{BursarError, Result};
use crate::infrastructure::Config;
use chrono::{DateTime, Local};
use rust_decimal::Decimal;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info, warn};

/// Durable storage for the student registry
pub trait StudentStore {
    /// Load all students in stored order. A store that does not exist yet is empty.
    fn load(&self) -> Result<Vec<Student>>;

    /// Replace the stored registry with `students`
    fn save(&mut self, students: &[Student]) -> Result<()>;

    /// Write a receipt document for `student` and return where it went
    fn write_receipt(&self, student: &Student, timestamp: DateTime<Local>) -> Result<PathBuf>;
}

/// Store backed by a line-oriented `id,name,amount` text file.
///
/// Every save rewrites the whole file in place; an interrupted write can
/// leave it truncated.
#[derive(Debug, Clone)]
pub struct FlatFileStore {
    data_file: PathBuf,
    receipt_dir: PathBuf,
}

impl FlatFileStore {
    pub fn new(data_file: PathBuf, receipt_dir: PathBuf) -> Self {
        FlatFileStore {
            data_file,
            receipt_dir,
        }
    }

    /// Build a store from config, resolving relative paths against `base`
    pub fn from_config(config: &Config, base: &Path) -> Self {
        Self::new(config.data_path(base), config.receipt_path(base))
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    pub fn receipt_dir(&self) -> &Path {
        &self.receipt_dir
    }

    /// Split a stored line into its three fields.
    ///
    /// Trailing empty fields are dropped before counting, so `a,b,` has two
    /// fields and is skipped rather than failing on an empty amount.
    fn split_record(line: &str) -> Option<[&str; 3]> {
        let mut fields: Vec<&str> = line.split(',').collect();
        while fields.last().is_some_and(|f| f.is_empty()) {
            fields.pop();
        }

        match fields.as_slice() {
            [id, name, amount] => Some([id.trim(), name.trim(), amount.trim()]),
            _ => None,
        }
    }

    /// Write `contents` into a file just created at `path`.
    /// On failure the partial file is removed.
    fn fill_new_file(path: &Path, mut file: impl Write, contents: &[u8]) -> Result<()> {
        if let Err(e) = file.write_all(contents).and_then(|_| file.flush()) {
            drop(file);
            if let Err(remove_err) = fs::remove_file(path) {
                warn!(path = %path.display(), error = %remove_err, "could not remove partial receipt");
            }
            return Err(BursarError::persistence(path, e));
        }
        Ok(())
    }

    /// Stored amounts: plain decimals, or the exponent form (`1.0E7`) older
    /// files contain for large values
    fn parse_stored_amount(amount: &str) -> Option<Decimal> {
        Decimal::from_str(amount)
            .or_else(|_| Decimal::from_scientific(amount))
            .ok()
            .filter(|a| *a >= Decimal::ZERO)
    }

    fn ensure_dir(dir: &Path) -> Result<()> {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir).map_err(|e| BursarError::persistence(dir, e))?;
        }
        Ok(())
    }
}

impl StudentStore for FlatFileStore {
    fn load(&self) -> Result<Vec<Student>> {
        let contents = match fs::read_to_string(&self.data_file) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.data_file.display(), "no data file yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(BursarError::persistence(&self.data_file, e)),
        };

        let mut students = Vec::new();
        for (idx, line) in contents.lines().enumerate() {
            let Some([id, name, amount]) = Self::split_record(line) else {
                if !line.trim().is_empty() {
                    warn!(line = idx + 1, "skipping record without exactly three fields");
                }
                continue;
            };

            let amount_paid =
                Self::parse_stored_amount(amount).ok_or_else(|| BursarError::Load {
                    path: self.data_file.clone(),
                    line: idx + 1,
                    value: amount.to_string(),
                })?;

            students.push(Student::new(id, name, amount_paid));
        }

        debug!(
            path = %self.data_file.display(),
            records = students.len(),
            "loaded students"
        );
        Ok(students)
    }

    fn save(&mut self, students: &[Student]) -> Result<()> {
        if let Some(parent) = self.data_file.parent() {
            Self::ensure_dir(parent)?;
        }

        let mut contents = String::new();
        for student in students {
            contents.push_str(&format!(
                "{},{},{}\n",
                student.id, student.name, student.amount_paid
            ));
        }

        fs::write(&self.data_file, contents)
            .map_err(|e| BursarError::persistence(&self.data_file, e))?;

        debug!(
            path = %self.data_file.display(),
            records = students.len(),
            "saved students"
        );
        Ok(())
    }

    fn write_receipt(&self, student: &Student, timestamp: DateTime<Local>) -> Result<PathBuf> {
        Self::ensure_dir(&self.receipt_dir)?;

        let contents = format_receipt(student, timestamp.naive_local());
        let mut nonce = timestamp.timestamp_millis();

        loop {
            let path = self
                .receipt_dir
                .join(receipt_file_name(&student.id, nonce));

            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => {
                    Self::fill_new_file(&path, file, contents.as_bytes())?;
                    info!(id = %student.id, path = %path.display(), "receipt written");
                    return Ok(path);
                }
                // Same id within the same millisecond
                Err(e) if e.kind() == ErrorKind::AlreadyExists => nonce += 1,
                Err(e) => return Err(BursarError::persistence(&path, e)),
            }
        }
    }
}
