//! End-to-end valuation pipeline
//!
//! Ties the stages together: parse the uploaded table, resolve columns,
//! aggregate by year, derive the input scalars, render the workbook. The run
//! either completes fully or returns the first error; no partial workbook is
//! ever produced.

use crate::aggregate::{self, ValuationInputs, YearlyTotals};
use crate::error::ValuationResult;
use crate::naming;
use crate::resolve;
use crate::table::DataTable;
use crate::template::ValuationTemplate;
use chrono::{Datelike, Local};

/// Everything a front-end needs after a successful run: the workbook bytes
/// plus the intermediate figures for display.
#[derive(Debug, Clone)]
pub struct ValuationOutcome {
    pub workbook: Vec<u8>,
    pub output_filename: String,
    pub royalty_name: String,
    pub totals: YearlyTotals,
    pub inputs: ValuationInputs,
}

/// Run the full pipeline on raw file bytes, using the wall-clock year as the
/// current-year anchor.
pub fn run_valuation(filename: &str, bytes: &[u8]) -> ValuationResult<ValuationOutcome> {
    run_valuation_at(filename, bytes, Local::now().year())
}

/// Pipeline with an explicit current year, so tests are deterministic.
pub fn run_valuation_at(
    filename: &str,
    bytes: &[u8],
    current_year: i32,
) -> ValuationResult<ValuationOutcome> {
    let table = DataTable::from_bytes(filename, bytes)?;
    let columns = resolve::resolve_columns(&table.headers)?;
    let totals = aggregate::aggregate_by_year(&table, columns.year, columns.amount)?;
    let inputs = aggregate::extract_inputs(&totals, current_year);

    let royalty_name = naming::royalty_name_from(filename);
    let workbook = ValuationTemplate::new(&royalty_name, inputs, current_year).render()?;

    Ok(ValuationOutcome {
        workbook,
        output_filename: naming::output_filename(&royalty_name),
        royalty_name,
        totals,
        inputs,
    })
}
