//! Domain layer - Student records and receipt formatting

pub mod receipt;
pub mod student;

pub use receipt::{format_amount, format_receipt, receipt_file_name};
pub use student::{parse_amount, parse_payment, Student};
