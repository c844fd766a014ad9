use crate::error::ValuationResult;
use crate::pipeline::{self, ValuationOutcome};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

/// Format an amount for display with thousands separators.
fn format_amount(n: f64) -> String {
    let formatted = format!("{:.2}", n.abs());
    let (whole, cents) = formatted.split_once('.').unwrap_or((&formatted, "00"));

    let mut grouped = String::new();
    for (i, digit) in whole.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let grouped: String = grouped.chars().rev().collect();

    let sign = if n < 0.0 { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, cents)
}

/// Execute the generate command
pub fn generate(file: PathBuf, output_dir: Option<PathBuf>, reveal: bool) -> ValuationResult<()> {
    println!("{}", "💿 Royalty DCF - Generating valuation".bold().green());
    println!("   File: {}", file.display());
    println!();

    let bytes = fs::read(&file)?;
    let filename = file.to_string_lossy();
    let outcome = pipeline::run_valuation(&filename, &bytes)?;

    let out_dir = match output_dir {
        Some(dir) => dir,
        None => default_output_dir(),
    };
    fs::create_dir_all(&out_dir)?;
    let out_path = out_dir.join(&outcome.output_filename);
    fs::write(&out_path, &outcome.workbook)?;

    print_totals(&outcome);

    println!("{}", "✅ Valuation sheet written".bold().green());
    println!("   {}", out_path.display().to_string().bright_blue());

    if reveal {
        reveal_in_file_manager(&out_path);
    }

    Ok(())
}

/// Execute the summary command - show totals without writing a workbook
pub fn summary(file: PathBuf) -> ValuationResult<()> {
    println!("{}", "💿 Royalty DCF - Earnings summary".bold().green());
    println!("   File: {}", file.display());
    println!();

    let bytes = fs::read(&file)?;
    let filename = file.to_string_lossy();
    let outcome = pipeline::run_valuation(&filename, &bytes)?;

    print_totals(&outcome);

    println!("{}", "📐 Valuation inputs:".bold().cyan());
    println!("   Year -3:   {}", format_amount(outcome.inputs.year_minus_3));
    println!("   Year -2:   {}", format_amount(outcome.inputs.year_minus_2));
    println!("   Year -1:   {}", format_amount(outcome.inputs.year_minus_1));
    println!("   YTD:       {}", format_amount(outcome.inputs.ytd));
    println!(
        "   Base year: {}",
        format_amount(outcome.inputs.base_year).bold()
    );

    Ok(())
}

fn print_totals(outcome: &ValuationOutcome) {
    println!("{}", "📊 Earnings by year:".bold().cyan());
    let mut grand_total = 0.0;
    for (year, total) in &outcome.totals {
        println!(
            "   {}  {}",
            year.to_string().bright_blue(),
            format_amount(*total)
        );
        grand_total += total;
    }
    println!("   {}  {}", "Total".bold(), format_amount(grand_total).bold());
    println!();
}

/// Default output directory: `Output Sheets/` next to the executable, falling
/// back to the working directory when the executable path is unavailable.
fn default_output_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Output Sheets")
}

/// Highlight the generated file in the platform file manager. Best effort;
/// failures are ignored.
fn reveal_in_file_manager(path: &Path) {
    #[cfg(target_os = "macos")]
    {
        let _ = std::process::Command::new("open").arg("-R").arg(path).spawn();
    }
    #[cfg(target_os = "windows")]
    {
        let _ = std::process::Command::new("explorer")
            .arg(format!("/select,{}", path.display()))
            .spawn();
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        let _ = path;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(1234.5), "1,234.50");
        assert_eq!(format_amount(1234567.891), "1,234,567.89");
        assert_eq!(format_amount(-42.25), "-42.25");
    }

    #[test]
    fn test_generate_writes_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("listing-7.csv");
        fs::write(&input, "amount,year\n100,2022\n200,2023\n").unwrap();

        let out_dir = dir.path().join("sheets");
        generate(input, Some(out_dir.clone()), false).unwrap();

        let out_path = out_dir.join("Listing 7 Valuation.xlsx");
        let bytes = fs::read(out_path).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_generate_propagates_pipeline_errors() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bad.csv");
        fs::write(&input, "track,plays\nSong,10\n").unwrap();

        let result = generate(input, Some(dir.path().join("out")), false);
        assert!(result.is_err());
    }
}
