//! Parsing and validation of user-entered order fields

use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Date format accepted for order dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Keyword that cancels the delete prompt
pub const EXIT_KEYWORD: &str = "exit";

/// Why a numeric or date field was rejected
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("value is negative")]
    Negative,
    #[error("value could not be parsed")]
    Invalid,
}

fn order_id_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^[A-Za-z0-9]+$").expect("order id pattern is valid"))
}

/// Normalize a typed OrderID: trim and upper-case
pub fn normalize_order_id(input: &str) -> String {
    input.trim().to_uppercase()
}

/// An OrderID must be non-empty and contain only ASCII letters and digits
pub fn is_valid_order_id(order_id: &str) -> bool {
    order_id_regex().is_match(order_id)
}

/// Parse a non-negative whole quantity, bounded by the INTEGER column (i64)
pub fn parse_quantity(input: &str) -> Result<u64, FieldError> {
    let value: i64 = input.trim().parse().map_err(|_| FieldError::Invalid)?;
    u64::try_from(value).map_err(|_| FieldError::Negative)
}

/// Parse a non-negative, finite price
pub fn parse_price(input: &str) -> Result<f64, FieldError> {
    let value: f64 = input.trim().parse().map_err(|_| FieldError::Invalid)?;
    if !value.is_finite() {
        return Err(FieldError::Invalid);
    }
    if value < 0.0 {
        return Err(FieldError::Negative);
    }
    Ok(value)
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_order_date(input: &str) -> Result<NaiveDate, FieldError> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|_| FieldError::Invalid)
}

/// Only a literal "yes" (any case) confirms
pub fn is_confirmed(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("yes")
}

pub fn is_exit_keyword(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case(EXIT_KEYWORD)
}
