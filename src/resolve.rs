//! Column resolution heuristics
//!
//! Maps loosely-named input columns to the canonical amount and year fields.
//! Resolution is a pure function of the header list: an ordered alias list is
//! checked first, then (for the amount only) a substring fallback. When more
//! than one column matches loosely, the first in column order wins; that
//! tie-break is observable behavior and is kept as-is.

use crate::error::{ValuationError, ValuationResult};

/// Amount aliases, checked in priority order.
pub const AMOUNT_ALIASES: [&str; 4] = ["payable_amount", "amount", "earnings", "royalty"];

/// Year aliases, checked in priority order. No substring fallback.
pub const YEAR_ALIASES: [&str; 3] = ["distribution_year", "year", "date"];

/// Indices of the resolved amount and year columns within the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedColumns {
    pub amount: usize,
    pub year: usize,
}

/// Resolve the amount and year columns from a header row.
pub fn resolve_columns(headers: &[String]) -> ValuationResult<ResolvedColumns> {
    let amount = resolve_amount(headers).ok_or(ValuationError::MissingColumn("amount"))?;
    let year = resolve_year(headers).ok_or(ValuationError::MissingColumn("year"))?;
    Ok(ResolvedColumns { amount, year })
}

fn resolve_amount(headers: &[String]) -> Option<usize> {
    for alias in AMOUNT_ALIASES {
        if let Some(idx) = find_exact(headers, alias) {
            return Some(idx);
        }
    }
    // Fallback: first column whose name contains "amount"
    headers
        .iter()
        .position(|h| h.to_lowercase().contains("amount"))
}

fn resolve_year(headers: &[String]) -> Option<usize> {
    for alias in YEAR_ALIASES {
        if let Some(idx) = find_exact(headers, alias) {
            return Some(idx);
        }
    }
    None
}

fn find_exact(headers: &[String], alias: &str) -> Option<usize> {
    headers.iter().position(|h| h.to_lowercase() == alias)
}
