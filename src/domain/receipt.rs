//! Payment receipt formatting

use crate::domain::Student;
use chrono::NaiveDateTime;
use rust_decimal::{Decimal, RoundingStrategy};

const HEADER: &str = "--------- Payment Receipt ---------";
const FOOTER: &str = "-----------------------------------";

/// Format an amount with exactly two decimal places (half away from zero)
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

/// Render the receipt text for a student at the given moment
pub fn format_receipt(student: &Student, now: NaiveDateTime) -> String {
    format!(
        "{}\n\
        Date: {}\n\
        Student ID: {}\n\
        Student Name: {}\n\
        Total Amount Paid: ${}\n\
        {}\n",
        HEADER,
        now.format("%Y-%m-%d %H:%M:%S"),
        student.id,
        student.name,
        format_amount(student.amount_paid),
        FOOTER
    )
}

/// File name for a receipt: `receipt_<id>_<nonce>.txt`
///
/// Characters outside `[A-Za-z0-9_-]` in the id are replaced with `_` so the
/// name always stays inside the receipt directory.
pub fn receipt_file_name(id: &str, nonce: i64) -> String {
    let safe_id: String = id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("receipt_{}_{}.txt", safe_id, nonce)
}
