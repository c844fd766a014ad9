use clap::{Parser, Subcommand};
use royalty_dcf::cli;
use royalty_dcf::error::ValuationResult;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "valuate")]
#[command(about = "Turn royalty earnings exports into DCF valuation spreadsheets.")]
#[command(long_about = "Valuate - Music royalty DCF valuation sheets

Reads a marketplace earnings export (.csv or .xlsx), aggregates royalties
by year, and writes a ready-to-edit Excel valuation model with scenario
analysis, a 5-year DCF projection, and sensitivity tables. All valuation
math lives in the spreadsheet as live formulas; tweak the green input
cells and everything recalculates.

COMMANDS:
  generate - Build a valuation workbook from an earnings export
  summary  - Show yearly totals and derived inputs without writing a file

EXAMPLES:
  valuate generate listing-482.csv              # Write 'Listing 482 Valuation.xlsx'
  valuate generate earnings.xlsx -o ~/Desktop   # Choose the output directory
  valuate summary listing-482.csv               # Inspect the aggregation")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Build a valuation workbook from an earnings export.

Accepts .csv and .xlsx exports. The amount column is found by name
(payable_amount, amount, earnings, royalty, or anything containing
'amount'); the year column must be named distribution_year, year, or date.

The workbook lands in 'Output Sheets/' next to the executable unless
--output-dir says otherwise. Files named like 'listing-482.csv' produce
'Listing 482 Valuation.xlsx'; other files use their stem as the name.")]
    /// Build a valuation workbook from an earnings export
    Generate {
        /// Path to the earnings export (.csv or .xlsx)
        file: PathBuf,

        /// Directory to write the workbook into
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Reveal the generated file in the file manager
        #[arg(long)]
        reveal: bool,
    },

    /// Show yearly totals and derived valuation inputs
    Summary {
        /// Path to the earnings export (.csv or .xlsx)
        file: PathBuf,
    },
}

fn main() -> ValuationResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            file,
            output_dir,
            reveal,
        } => cli::generate(file, output_dir, reveal),

        Commands::Summary { file } => cli::summary(file),
    }
}
