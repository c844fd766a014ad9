//! Yearly aggregation and valuation input extraction
//!
//! Groups payment rows by year, sums amounts, and selects the 4-point time
//! series (3 prior full years + current-year-to-date) that seeds the
//! valuation template. When the current calendar year is absent from the
//! data, the latest year present is reinterpreted as the anchor instead, so
//! historical/backfilled exports still produce a usable series.

use crate::error::{ValuationError, ValuationResult};
use crate::table::DataTable;
use std::collections::BTreeMap;

/// Summed amounts keyed by year, ascending. Each year appears once.
pub type YearlyTotals = BTreeMap<i32, f64>;

/// The scalar aggregates handed to the template writer. Computed once per
/// run and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ValuationInputs {
    pub year_minus_3: f64,
    pub year_minus_2: f64,
    pub year_minus_1: f64,
    pub ytd: f64,
    /// Normalized starting cash flow: `year_minus_1` when strictly positive,
    /// otherwise `ytd`.
    pub base_year: f64,
}

/// Group rows by the resolved year column and sum the resolved amount column.
pub fn aggregate_by_year(
    table: &DataTable,
    year_col: usize,
    amount_col: usize,
) -> ValuationResult<YearlyTotals> {
    let mut totals = YearlyTotals::new();

    for (row_idx, row) in table.rows.iter().enumerate() {
        let year_cell = row.get(year_col).map(String::as_str).unwrap_or("");
        let amount_cell = row.get(amount_col).map(String::as_str).unwrap_or("");

        // Blank rows contribute nothing
        if year_cell.trim().is_empty() && amount_cell.trim().is_empty() {
            continue;
        }

        let year = parse_year(year_cell).ok_or_else(|| {
            ValuationError::Parse(format!(
                "Row {}: invalid year value '{}'",
                row_idx + 2,
                year_cell
            ))
        })?;

        let amount = parse_amount(amount_cell).ok_or_else(|| {
            ValuationError::Parse(format!(
                "Row {}: invalid amount value '{}'",
                row_idx + 2,
                amount_cell
            ))
        })?;

        *totals.entry(year).or_insert(0.0) += amount;
    }

    Ok(totals)
}

/// Extract the 4-point input vector relative to `current_year`, falling back
/// to the latest year present when the current year has no data.
pub fn extract_inputs(totals: &YearlyTotals, current_year: i32) -> ValuationInputs {
    let get = |year: i32| totals.get(&year).copied().unwrap_or(0.0);

    let mut anchor = current_year;
    let mut ytd = get(anchor);

    // No current-year data: re-anchor on the latest year in the dataset
    if ytd == 0.0 {
        if let Some(&latest) = totals.keys().next_back() {
            anchor = latest;
            ytd = get(anchor);
        }
    }

    let year_minus_1 = get(anchor - 1);
    let year_minus_2 = get(anchor - 2);
    let year_minus_3 = get(anchor - 3);
    let base_year = if year_minus_1 > 0.0 { year_minus_1 } else { ytd };

    ValuationInputs {
        year_minus_3,
        year_minus_2,
        year_minus_1,
        ytd,
        base_year,
    }
}

fn parse_year(cell: &str) -> Option<i32> {
    let trimmed = cell.trim();
    if let Ok(year) = trimmed.parse::<i32>() {
        return Some(year);
    }
    // Spreadsheet exports sometimes deliver years as floats ("2023.0")
    trimmed.parse::<f64>().ok().map(|f| f.trunc() as i32)
}

fn parse_amount(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn table(rows: &[(&str, &str)]) -> DataTable {
        DataTable {
            headers: vec!["year".to_string(), "amount".to_string()],
            rows: rows
                .iter()
                .map(|(y, a)| vec![y.to_string(), a.to_string()])
                .collect(),
        }
    }

    fn totals(entries: &[(i32, f64)]) -> YearlyTotals {
        entries.iter().copied().collect()
    }

    #[test]
    fn test_grouping_sums_per_year() {
        let t = table(&[("2022", "100"), ("2022", "50"), ("2023", "300")]);
        let result = aggregate_by_year(&t, 0, 1).unwrap();
        assert_eq!(result, totals(&[(2022, 150.0), (2023, 300.0)]));
    }

    #[test]
    fn test_grouping_is_order_independent() {
        let forward = table(&[("2022", "100"), ("2023", "300"), ("2022", "50")]);
        let shuffled = table(&[("2023", "300"), ("2022", "50"), ("2022", "100")]);
        assert_eq!(
            aggregate_by_year(&forward, 0, 1).unwrap(),
            aggregate_by_year(&shuffled, 0, 1).unwrap()
        );
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let t = table(&[("2021", "10.5"), ("2022", "20.25")]);
        let first = aggregate_by_year(&t, 0, 1).unwrap();
        let second = aggregate_by_year(&t, 0, 1).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_float_year_cells_accepted() {
        let t = table(&[("2022.0", "100")]);
        let result = aggregate_by_year(&t, 0, 1).unwrap();
        assert_eq!(result, totals(&[(2022, 100.0)]));
    }

    #[test]
    fn test_blank_rows_skipped_and_empty_amounts_are_zero() {
        let t = table(&[("2022", "100"), ("", ""), ("2022", "")]);
        let result = aggregate_by_year(&t, 0, 1).unwrap();
        assert_eq!(result, totals(&[(2022, 100.0)]));
    }

    #[test]
    fn test_invalid_amount_is_an_error() {
        let t = table(&[("2022", "n/a")]);
        let err = aggregate_by_year(&t, 0, 1).unwrap_err();
        assert!(matches!(err, ValuationError::Parse(_)));
    }

    #[test]
    fn test_invalid_year_is_an_error() {
        let t = table(&[("last year", "100")]);
        let err = aggregate_by_year(&t, 0, 1).unwrap_err();
        assert!(matches!(err, ValuationError::Parse(_)));
    }

    #[test]
    fn test_extract_wall_clock_branch() {
        let t = totals(&[(2027, 80.0), (2028, 90.0), (2029, 110.0), (2030, 40.0)]);
        let inputs = extract_inputs(&t, 2030);
        assert_eq!(inputs.ytd, 40.0);
        assert_eq!(inputs.year_minus_1, 110.0);
        assert_eq!(inputs.year_minus_2, 90.0);
        assert_eq!(inputs.year_minus_3, 80.0);
        assert_eq!(inputs.base_year, 110.0);
    }

    #[test]
    fn test_extract_latest_year_fallback() {
        // Historical dataset evaluated long after the fact
        let t = totals(&[(2021, 100.0), (2022, 150.0), (2023, 200.0)]);
        let inputs = extract_inputs(&t, 2030);
        assert_eq!(inputs.ytd, 200.0);
        assert_eq!(inputs.year_minus_1, 150.0);
        assert_eq!(inputs.year_minus_2, 100.0);
        assert_eq!(inputs.year_minus_3, 0.0);
        assert_eq!(inputs.base_year, 150.0);
    }

    #[test]
    fn test_zero_current_year_reanchors_on_latest_year_present() {
        // The current year key exists with a zero sum. The fallback anchors
        // on the latest year present, which is still the current year, so the
        // back-year lookups stay relative to it.
        let t = totals(&[(2023, 200.0), (2025, 0.0)]);
        let inputs = extract_inputs(&t, 2025);
        assert_eq!(inputs.ytd, 0.0);
        assert_eq!(inputs.year_minus_1, 0.0);
        assert_eq!(inputs.year_minus_2, 200.0);
        assert_eq!(inputs.base_year, 0.0);
    }

    #[test]
    fn test_base_year_uses_ytd_when_prior_year_not_positive() {
        let t = totals(&[(2030, 75.0)]);
        let inputs = extract_inputs(&t, 2030);
        assert_eq!(inputs.year_minus_1, 0.0);
        assert_eq!(inputs.ytd, 75.0);
        assert_eq!(inputs.base_year, 75.0);
    }

    #[test]
    fn test_empty_totals_yield_all_zero_inputs() {
        let inputs = extract_inputs(&YearlyTotals::new(), 2030);
        assert_eq!(inputs, ValuationInputs::default());
    }
}
