//! Section tables for the valuation sheet
//!
//! Each function returns the cell records of one layout section. Addresses,
//! formula text, number formats and fills are exact literals; downstream
//! models reference these cells by fixed address.

use super::{formula, number, text, CellSpec, Style};
use crate::aggregate::ValuationInputs;

/// Sensitivity axis: discount rates, one per table row.
const DISCOUNT_RATES: [f64; 6] = [0.08, 0.10, 0.12, 0.14, 0.16, 0.18];

/// Sensitivity axis: growth rates (years 1-3), one per table column.
const GROWTH_RATES: [f64; 7] = [0.00, 0.02, 0.04, 0.06, 0.08, 0.10, 0.12];

/// Sensitivity axis: terminal growth rates, one per table column.
const TERMINAL_GROWTH_RATES: [f64; 7] = [-0.10, -0.07, -0.05, -0.03, 0.00, 0.02, 0.03];

/// Column letter for the j-th sensitivity column (C, D, ...).
fn grid_col(j: usize) -> char {
    (b'C' + j as u8) as char
}

pub fn title() -> Vec<CellSpec> {
    vec![
        text("A1", "MUSIC ROYALTY DCF VALUATION MODEL").style(Style::Title),
        text("A2", "Master Template with Weighted Scenario Analysis").style(Style::ItalicGray),
    ]
}

pub fn data_input(royalty_name: &str, inputs: &ValuationInputs) -> Vec<CellSpec> {
    vec![
        text("A4", "DATA INPUT").style(Style::Section),
        text("A5", "Royalty Name/ID:"),
        text("B5", royalty_name).style(Style::Input),
        text("C5", "<- Edit").style(Style::Edit),
        text("A7", "HISTORICAL ROYALTIES").style(Style::Header),
        text("A8", "Year -3 Royalties"),
        number("B8", inputs.year_minus_3).style(Style::Input).num("#,##0.00"),
        text("C8", "<- Edit").style(Style::Edit),
        text("A9", "Year -2 Royalties"),
        number("B9", inputs.year_minus_2).style(Style::Input).num("#,##0.00"),
        text("C9", "<- Edit").style(Style::Edit),
        text("A10", "Year -1 Royalties"),
        number("B10", inputs.year_minus_1).style(Style::Input).num("#,##0.00"),
        text("C10", "<- Edit").style(Style::Edit),
        text("A11", "Current YTD Royalties"),
        number("B11", inputs.ytd).style(Style::Input).num("#,##0.00"),
        text("C11", "<- Edit").style(Style::Edit),
        text("A12", "3-Year Average"),
        formula("B12", "=AVERAGE(B8:B10)").num("#,##0.00"),
        text("A13", "Base Year Royalties"),
        number("B13", inputs.base_year).style(Style::Input).num("#,##0.00"),
        text("C13", "<- Edit (normalized starting CF)").style(Style::Edit),
    ]
}

pub fn key_assumptions() -> Vec<CellSpec> {
    vec![
        text("A15", "KEY ASSUMPTIONS").style(Style::Section),
        text("A16", "Growth Rate (Years 1-3)"),
        number("B16", 0.05).style(Style::Input).num("0.0%"),
        text("C16", "<- Edit").style(Style::Edit),
        text("A17", "Growth Rate (Years 4-5)"),
        number("B17", 0.03).style(Style::Input).num("0.0%"),
        text("C17", "<- Edit").style(Style::Edit),
        text("A18", "Discount Rate"),
        number("B18", 0.12).style(Style::Input).num("0.0%"),
        text("C18", "<- Edit").style(Style::Edit),
        text("A19", "Terminal Growth Rate"),
        number("B19", -0.05).style(Style::Input).num("0.0%"),
        text("C19", "<- Edit (usually negative)").style(Style::Edit),
    ]
}

pub fn scenario_analysis() -> Vec<CellSpec> {
    let mut specs = vec![
        text("E4", "SCENARIO ANALYSIS").style(Style::Section),
        text("F5", "Bear").style(Style::BearHeader),
        text("G5", "Base").style(Style::BaseHeader),
        text("H5", "Bull").style(Style::BullHeader),
        text("E6", "Base Year CF"),
        formula("F6", "=B13*0.9").num("#,##0.00"),
        formula("G6", "=B13").num("#,##0.00"),
        formula("H6", "=B13*1.1").num("#,##0.00"),
        text("E7", "Growth (Yr 1-3)"),
        formula("F7", "=B16-0.02").num("0.0%"),
        formula("G7", "=B16").num("0.0%"),
        formula("H7", "=B16+0.03").num("0.0%"),
        text("E8", "Growth (Yr 4-5)"),
        formula("F8", "=B17-0.01").num("0.0%"),
        formula("G8", "=B17").num("0.0%"),
        formula("H8", "=B17+0.02").num("0.0%"),
        text("E9", "Discount Rate"),
        formula("F9", "=B18+0.02").num("0.0%"),
        formula("G9", "=B18").num("0.0%"),
        formula("H9", "=B18").num("0.0%"),
        text("E10", "Terminal Growth"),
        formula("F10", "=B19-0.02").num("0.0%"),
        formula("G10", "=B19").num("0.0%"),
        formula("H10", "=B19+0.02").num("0.0%"),
        text("E12", "Year 5 CF"),
        text("E13", "Terminal Value"),
        text("E14", "PV of Terminal"),
        text("E16", "Implied Value").style(Style::Header),
    ];

    for c in ['F', 'G', 'H'] {
        specs.push(formula(format!("{c}12"), format!("={c}6*(1+{c}7)^3*(1+{c}8)^2")).num("#,##0.00"));
        specs.push(
            formula(format!("{c}13"), format!("={c}12*(1+{c}10)/({c}9-{c}10)")).num("#,##0.00"),
        );
        specs.push(formula(format!("{c}14"), format!("={c}13/(1+{c}9)^5")).num("#,##0.00"));
        specs.push(
            formula(
                format!("{c}16"),
                format!(
                    "={c}6/(1+{c}9)\
                     +{c}6*(1+{c}7)/(1+{c}9)^2\
                     +{c}6*(1+{c}7)^2/(1+{c}9)^3\
                     +{c}6*(1+{c}7)^3*(1+{c}8)/(1+{c}9)^4\
                     +{c}12/(1+{c}9)^5\
                     +{c}14"
                ),
            )
            .style(Style::Bold)
            .num("$#,##0.00"),
        );
    }

    specs.push(text("E17", "vs Base Case"));
    specs.push(formula("F17", "=F16/G16-1").num("0.0%"));
    specs.push(text("G17", "-"));
    specs.push(formula("H17", "=H16/G16-1").num("0.0%"));

    specs
}

/// Weighted-average block. Only the cells that survive the overlapping
/// 5-year projection rows are emitted here; rows 22, 24, 25 and 27 of
/// columns E-H belong to [`dcf_projection`], which carries the fonts this
/// block originally applied to the shared cells.
pub fn weighted_average() -> Vec<CellSpec> {
    vec![
        text("E19", "WEIGHTED AVERAGE VALUATION").style(Style::Section),
        text("E20", "Scenario Weights").style(Style::Header),
        text("F20", "Bear Weight"),
        text("G20", "Base Weight"),
        text("H20", "Bull Weight"),
        number("F21", 0.25).style(Style::Input).num("0%"),
        number("G21", 0.50).style(Style::Input).num("0%"),
        number("H21", 0.25).style(Style::Input).num("0%"),
        text("I21", "<- Edit weights (must = 100%)").style(Style::Edit),
        text("E26", "EV / Base Year CF"),
        formula("F26", "=F24/B13").num("0.0x"),
    ]
}

pub fn dcf_projection(fiscal_year: i32) -> Vec<CellSpec> {
    let mut specs = vec![text("A21", "5-YEAR DCF PROJECTION").style(Style::Section)];

    // Header row. F22 keeps the 0% number format of the superseded weight
    // check; E24/F24 below keep its fonts and fill the same way.
    let headers = [
        "Year", "Base", "Year 1", "Year 2", "Year 3", "Year 4", "Year 5", "Terminal",
    ];
    for (i, header) in headers.iter().enumerate() {
        let cell = format!("{}22", (b'A' + i as u8) as char);
        let mut spec = text(cell, *header).style(Style::Header);
        if i == 5 {
            spec = spec.num("0%");
        }
        specs.push(spec);
    }

    specs.push(text("A23", "Fiscal Year"));
    specs.push(number("B23", fiscal_year as f64));
    for c in ['C', 'D', 'E', 'F', 'G'] {
        let prev = (c as u8 - 1) as char;
        specs.push(formula(format!("{c}23"), format!("={prev}23+1")));
    }
    specs.push(text("H23", "Perpetuity"));

    specs.push(text("A24", "Royalty Income"));
    specs.push(formula("B24", "=B13").num("#,##0.00"));
    specs.push(formula("C24", "=B24*(1+$B$16)").num("#,##0.00"));
    specs.push(formula("D24", "=C24*(1+$B$16)").num("#,##0.00"));
    specs.push(formula("E24", "=D24*(1+$B$16)").style(Style::Section).num("#,##0.00"));
    specs.push(formula("F24", "=E24*(1+$B$17)").style(Style::WeightedResult).num("#,##0.00"));
    specs.push(formula("G24", "=F24*(1+$B$17)").num("#,##0.00"));
    specs.push(formula("H24", "=G24*(1+$B$19)").num("#,##0.00"));

    specs.push(text("A25", "Growth Rate"));
    specs.push(text("B25", "-"));
    for c in ['C', 'D', 'E'] {
        specs.push(formula(format!("{c}25"), "=$B$16").num("0.0%"));
    }
    for c in ['F', 'G'] {
        specs.push(formula(format!("{c}25"), "=$B$17").num("0.0%"));
    }
    specs.push(formula("H25", "=$B$19").num("0.0%"));

    specs.push(text("A27", "Discount Factor"));
    specs.push(number("B27", 1.0));
    for (i, c) in ['C', 'D', 'E', 'F', 'G'].into_iter().enumerate() {
        specs.push(formula(format!("{c}27"), format!("=1/(1+$B$18)^{}", i + 1)).num("0.0000"));
    }
    specs.push(formula("H27", "=G27").num("0.0000"));

    specs.push(text("A28", "PV of Cash Flow"));
    for c in ['C', 'D', 'E', 'F', 'G'] {
        specs.push(formula(format!("{c}28"), format!("={c}24*{c}27")).num("#,##0.00"));
    }

    specs
}

pub fn valuation_summary() -> Vec<CellSpec> {
    vec![
        text("A30", "VALUATION SUMMARY").style(Style::Section),
        text("A31", "Terminal Value (undiscounted)"),
        formula("B31", "=H24/($B$18-$B$19)").num("#,##0.00"),
        text("C31", "Gordon Growth formula").style(Style::ItalicGray),
        text("A32", "PV of Terminal Value"),
        formula("B32", "=B31*G27").num("#,##0.00"),
        text("A34", "Sum of PV of Cash Flows"),
        formula("B34", "=SUM(C28:G28)").num("#,##0.00"),
        text("A35", "PV of Terminal Value"),
        formula("B35", "=B32").num("#,##0.00"),
        text("A36", "Enterprise Value"),
        formula("B36", "=B34+B35").style(Style::Bold).num("$#,##0.00"),
        text("A38", "% from Cash Flows"),
        formula("B38", "=B34/B36").num("0.0%"),
        text("A39", "% from Terminal Value"),
        formula("B39", "=B35/B36").num("0.0%"),
    ]
}

pub fn sensitivity_growth() -> Vec<CellSpec> {
    let mut specs = vec![
        text("A41", "SENSITIVITY: Discount Rate vs Growth Rate (Years 1-3)").style(Style::Section),
        text("A42", "Enterprise Value"),
        text("C42", "Growth Rate (Years 1-3)").style(Style::Header),
        text("A44", "Discount"),
        text("A45", "Rate"),
    ];

    for (j, growth) in GROWTH_RATES.iter().enumerate() {
        specs.push(
            number(format!("{}43", grid_col(j)), *growth)
                .style(Style::HeaderCenter)
                .num("0%"),
        );
    }

    for (i, discount) in DISCOUNT_RATES.iter().enumerate() {
        let row = 44 + i;
        specs.push(number(format!("B{row}"), *discount).style(Style::Header).num("0%"));

        for j in 0..GROWTH_RATES.len() {
            let col = grid_col(j);
            let f = format!(
                "=($B$13*(1+{col}$43)^3*(1+$B$17)^2*(1+$B$19)/($B{row}-$B$19))/(1+$B{row})^5\
                 +$B$13/(1+$B{row})\
                 +$B$13*(1+{col}$43)/(1+$B{row})^2\
                 +$B$13*(1+{col}$43)^2/(1+$B{row})^3\
                 +$B$13*(1+{col}$43)^3*(1+$B$17)/(1+$B{row})^4\
                 +$B$13*(1+{col}$43)^3*(1+$B$17)^2/(1+$B{row})^5"
            );
            specs.push(formula(format!("{col}{row}"), f).num("#,##0"));
        }
    }

    specs
}

pub fn sensitivity_terminal() -> Vec<CellSpec> {
    let mut specs = vec![
        text("A52", "SENSITIVITY: Discount Rate vs Terminal Growth Rate").style(Style::Section),
        text("A53", "Enterprise Value"),
        text("C53", "Terminal Growth Rate").style(Style::Header),
        text("A55", "Discount"),
        text("A56", "Rate"),
    ];

    for (j, terminal) in TERMINAL_GROWTH_RATES.iter().enumerate() {
        specs.push(
            number(format!("{}54", grid_col(j)), *terminal)
                .style(Style::HeaderCenter)
                .num("0%"),
        );
    }

    for (i, discount) in DISCOUNT_RATES.iter().enumerate() {
        let row = 55 + i;
        specs.push(number(format!("B{row}"), *discount).style(Style::Header).num("0%"));

        for j in 0..TERMINAL_GROWTH_RATES.len() {
            let col = grid_col(j);
            let f = format!(
                "=($B$13*(1+$B$16)^3*(1+$B$17)^2*(1+{col}$54)/($B{row}-{col}$54))/(1+$B{row})^5\
                 +$B$13/(1+$B{row})\
                 +$B$13*(1+$B$16)/(1+$B{row})^2\
                 +$B$13*(1+$B$16)^2/(1+$B{row})^3\
                 +$B$13*(1+$B$16)^3*(1+$B$17)/(1+$B{row})^4\
                 +$B$13*(1+$B$16)^3*(1+$B$17)^2/(1+$B{row})^5"
            );
            specs.push(formula(format!("{col}{row}"), f).num("#,##0"));
        }
    }

    specs
}

pub fn value_drivers() -> Vec<CellSpec> {
    vec![
        text("E29", "KEY VALUE DRIVERS").style(Style::Section),
        text("E30", "Driver").style(Style::Header),
        text("F30", "Impact"),
        text("G30", "+1% Change"),
        text("H30", "% Sensitivity"),
        text("E31", "Royalty Growth Rate"),
        text("F31", "High"),
        formula(
            "G31",
            "=($B$13*(1+($B$16+0.01))^3*(1+$B$17)^2*(1+$B$19)/($B$18-$B$19))/(1+$B$18)^5\
             +$B$13/(1+$B$18)+$B$13*(1+($B$16+0.01))/(1+$B$18)^2\
             +$B$13*(1+($B$16+0.01))^2/(1+$B$18)^3\
             +$B$13*(1+($B$16+0.01))^3*(1+$B$17)/(1+$B$18)^4\
             +$B$13*(1+($B$16+0.01))^3*(1+$B$17)^2/(1+$B$18)^5\
             -B36",
        )
        .num("+#,##0.00;-#,##0.00"),
        formula("H31", "=G31/B36").num("+0.0%;-0.0%"),
        text("E32", "Terminal Growth Rate"),
        text("F32", "High"),
        formula(
            "G32",
            "=($B$13*(1+$B$16)^3*(1+$B$17)^2*(1+($B$19+0.01))/($B$18-($B$19+0.01)))/(1+$B$18)^5\
             +$B$13/(1+$B$18)+$B$13*(1+$B$16)/(1+$B$18)^2\
             +$B$13*(1+$B$16)^2/(1+$B$18)^3\
             +$B$13*(1+$B$16)^3*(1+$B$17)/(1+$B$18)^4\
             +$B$13*(1+$B$16)^3*(1+$B$17)^2/(1+$B$18)^5\
             -B36",
        )
        .num("+#,##0.00;-#,##0.00"),
        formula("H32", "=G32/B36").num("+0.0%;-0.0%"),
        text("E33", "Discount Rate"),
        text("F33", "High"),
        formula(
            "G33",
            "=($B$13*(1+$B$16)^3*(1+$B$17)^2*(1+$B$19)/(($B$18+0.01)-$B$19))/(1+($B$18+0.01))^5\
             +$B$13/(1+($B$18+0.01))+$B$13*(1+$B$16)/(1+($B$18+0.01))^2\
             +$B$13*(1+$B$16)^2/(1+($B$18+0.01))^3\
             +$B$13*(1+$B$16)^3*(1+$B$17)/(1+($B$18+0.01))^4\
             +$B$13*(1+$B$16)^3*(1+$B$17)^2/(1+($B$18+0.01))^5\
             -B36",
        )
        .num("+#,##0.00;-#,##0.00"),
        formula("H33", "=G33/B36").num("+0.0%;-0.0%"),
    ]
}

pub fn value_composition() -> Vec<CellSpec> {
    vec![
        text("E36", "VALUE COMPOSITION").style(Style::Section),
        text("E37", "Component").style(Style::Header),
        text("F37", "Value"),
        text("G37", "% of Total"),
        text("E38", "PV of 5-Year Cash Flows"),
        formula("F38", "=B34").num("#,##0.00"),
        formula("G38", "=B34/B36").num("0.0%"),
        text("E39", "PV of Terminal Value"),
        formula("F39", "=B35").num("#,##0.00"),
        formula("G39", "=B35/B36").num("0.0%"),
        text("E40", "Total Enterprise Value"),
        formula("F40", "=B36").style(Style::Bold).num("#,##0.00"),
        text("G40", "100%"),
    ]
}

pub fn model_notes() -> Vec<CellSpec> {
    let notes = [
        "* Green cells are INPUT cells - edit these with your royalty data",
        "* Royalties = pure cash flow (no costs modeled)",
        "* Terminal Value = Year 5 CF x (1+g) / (r-g) using Gordon Growth Model",
        "* Two-phase growth: Years 1-3 near-term, Years 4-5 mature growth",
        "* Weighted Valuation combines Bear/Base/Bull using your probability weights",
        "* Sensitivity tables show impact of key assumption changes",
    ];

    let mut specs = vec![text("A62", "MODEL NOTES").style(Style::Section)];
    for (i, note) in notes.iter().enumerate() {
        specs.push(text(format!("A{}", 63 + i), *note).style(Style::NoteGray));
    }
    specs
}
