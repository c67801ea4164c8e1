//! Plain records mirroring Northwind tables and read projections.
//!
//! # Responsibility
//! - Define the data shapes produced and consumed by the repository.
//! - Validate required fields and column limits before writes.
//!
//! # Invariants
//! - Records carry no identity map; two reads yield unrelated values.
//! - Integer ids are `0` until the row is persisted.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod employee;
pub mod product;
pub mod projection;

/// `Orders.OrderID`. Orders are only touched through their detail lines.
pub type OrderId = i64;

/// Record validation failure raised before any SQL mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text column is empty or whitespace.
    EmptyField {
        entity: &'static str,
        field: &'static str,
    },
    /// A text column exceeds the Northwind column width.
    TooLong {
        entity: &'static str,
        field: &'static str,
        max_chars: usize,
        actual: usize,
    },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField { entity, field } => {
                write!(f, "{entity}.{field} must not be empty")
            }
            Self::TooLong {
                entity,
                field,
                max_chars,
                actual,
            } => write!(
                f,
                "{entity}.{field} is {actual} characters long; at most {max_chars} allowed"
            ),
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn require_text(
    entity: &'static str,
    field: &'static str,
    value: &str,
    max_chars: usize,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField { entity, field });
    }
    limit_text(entity, field, Some(value), max_chars)
}

pub(crate) fn limit_text(
    entity: &'static str,
    field: &'static str,
    value: Option<&str>,
    max_chars: usize,
) -> Result<(), ValidationError> {
    let actual = value.map_or(0, |text| text.chars().count());
    if actual > max_chars {
        return Err(ValidationError::TooLong {
            entity,
            field,
            max_chars,
            actual,
        });
    }
    Ok(())
}
