//! Student record and amount parsing

use crate::error::{BursarError, Result};
use rust_decimal::Decimal;
use std::str::FromStr;

/// A registered student and the total they have paid so far
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub id: String,
    pub name: String,
    pub amount_paid: Decimal,
}

impl Student {
    pub fn new(id: impl Into<String>, name: impl Into<String>, amount_paid: Decimal) -> Self {
        Student {
            id: id.into(),
            name: name.into(),
            amount_paid,
        }
    }

    /// Case-insensitive id comparison
    pub fn has_id(&self, id: &str) -> bool {
        self.id
            .chars()
            .flat_map(char::to_lowercase)
            .eq(id.chars().flat_map(char::to_lowercase))
    }

    /// Add a payment to the running total.
    ///
    /// Callers validate the payment with [`parse_payment`] first; the total
    /// never decreases. A sum past `Decimal::MAX` leaves the total unchanged.
    pub fn add_payment(&mut self, payment: Decimal) -> Result<Decimal> {
        debug_assert!(payment > Decimal::ZERO);
        self.amount_paid = self.amount_paid.checked_add(payment).ok_or_else(|| {
            BursarError::Validation("payment would exceed the maximum amount".to_string())
        })?;
        Ok(self.amount_paid)
    }
}

/// Optional sign, digits, at most one `.` with at least one digit overall
fn is_plain_decimal(input: &str) -> bool {
    let unsigned = input.strip_prefix(['+', '-']).unwrap_or(input);
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    !(whole.is_empty() && fraction.is_empty())
        && whole.bytes().all(|b| b.is_ascii_digit())
        && fraction.bytes().all(|b| b.is_ascii_digit())
}

fn parse_decimal(input: &str) -> Option<Decimal> {
    let input = input.trim();
    if !is_plain_decimal(input) {
        return None;
    }
    Decimal::from_str(input).ok()
}

/// Parse an opening balance: any decimal number >= 0
pub fn parse_amount(input: &str) -> Result<Decimal> {
    match parse_decimal(input) {
        // abs() folds "-0" into 0
        Some(amount) if amount >= Decimal::ZERO => Ok(amount.abs()),
        _ => Err(BursarError::Validation(format!(
            "amount must be a non-negative number, got '{}'",
            input.trim()
        ))),
    }
}

/// Parse a payment: any decimal number > 0
pub fn parse_payment(input: &str) -> Result<Decimal> {
    match parse_decimal(input) {
        Some(payment) if payment > Decimal::ZERO => Ok(payment),
        _ => Err(BursarError::Validation(format!(
            "payment amount must be a positive number, got '{}'",
            input.trim()
        ))),
    }
}
