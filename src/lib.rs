//! Royalty DCF - royalty earnings to DCF valuation workbook
//!
//! This library converts a royalty-earnings CSV (or .xlsx export) into a
//! pre-formatted discounted-cash-flow valuation spreadsheet. Payments are
//! aggregated by year, the aggregates seed a fixed set of input cells, and
//! all valuation math is left to formulas embedded in the output workbook.
//!
//! # Pipeline
//!
//! - Locate the amount and year columns heuristically ([`resolve`])
//! - Group and sum payments by year, derive the base-year cash flow ([`aggregate`])
//! - Stamp the aggregates and default assumptions into the template ([`template`])
//!
//! Two front-ends funnel into the same pipeline: the `valuate` CLI and the
//! `valuate-server` web upload form.
//!
//! # Example
//!
//! ```no_run
//! use royalty_dcf::pipeline::run_valuation;
//!
//! let bytes = std::fs::read("listing-482.csv")?;
//! let outcome = run_valuation("listing-482.csv", &bytes)?;
//!
//! println!("Royalty: {}", outcome.royalty_name);
//! std::fs::write(&outcome.output_filename, &outcome.workbook)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod aggregate;
pub mod cli;
pub mod error;
pub mod naming;
pub mod pipeline;
pub mod resolve;
pub mod server;
pub mod table;
pub mod template;

// Re-export commonly used types
pub use aggregate::{ValuationInputs, YearlyTotals};
pub use error::{ValuationError, ValuationResult};
pub use table::DataTable;
