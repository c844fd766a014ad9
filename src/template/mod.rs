//! Valuation workbook template
//!
//! Renders the "Valuation Model" sheet: a fixed layout of labels, input
//! scalars, default assumptions, and literal Excel formula strings. The tool
//! computes no valuation figure itself; every derived number materializes
//! when the workbook is opened in spreadsheet software. Formula text and
//! cell addresses are exact literals and must not be reworded, or existing
//! downstream models break.
//!
//! The layout is declarative: each section in [`sections`] is a table of
//! [`CellSpec`] records (A1-style reference, content, number format, style),
//! and a single loop stamps them into the worksheet.

mod sections;

use crate::aggregate::ValuationInputs;
use crate::error::{ValuationError, ValuationResult};
use rust_xlsxwriter::{Color, Format, FormatAlign, Formula, Workbook};

const SHEET_NAME: &str = "Valuation Model";

/// Column widths for columns A..I.
const COLUMN_WIDTHS: [(u16, f64); 9] = [
    (0, 28.0),
    (1, 14.0),
    (2, 14.0),
    (3, 14.0),
    (4, 26.0),
    (5, 14.0),
    (6, 14.0),
    (7, 14.0),
    (8, 30.0),
];

const GRAY: Color = Color::RGB(0x666666);
const EDIT_BLUE: Color = Color::RGB(0x0066CC);
const INPUT_GREEN: Color = Color::RGB(0xE2EFDA);
const BEAR_FILL: Color = Color::RGB(0xFCE4D6);
const BASE_FILL: Color = Color::RGB(0xDDEBF7);
const BULL_FILL: Color = Color::RGB(0xE2EFDA);
const WEIGHTED_FILL: Color = Color::RGB(0xFFF2CC);

/// Cell payload: literal text, a scalar, or an opaque formula string that
/// spreadsheet software evaluates later.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Text(String),
    Number(f64),
    Formula(String),
}

/// Named cell styles, resolved to `rust_xlsxwriter::Format`s at write time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    None,
    /// Bold 16pt (sheet title)
    Title,
    /// Italic 11pt gray (subtitle, inline annotations)
    ItalicGray,
    /// Bold 12pt (section titles)
    Section,
    /// Bold 11pt
    Header,
    /// Bold 11pt, centered (sensitivity axis headers)
    HeaderCenter,
    /// Italic blue "<- Edit" markers
    Edit,
    /// Green fill marking editable input cells
    Input,
    /// Scenario column headers
    BearHeader,
    BaseHeader,
    BullHeader,
    Bold,
    /// Bold 14pt on the yellow weighted-valuation fill
    WeightedResult,
    /// 10pt gray footnote text
    NoteGray,
}

/// One cell of the template: where, what, and how it is formatted.
#[derive(Debug, Clone)]
pub struct CellSpec {
    pub cell: String,
    pub content: Content,
    pub style: Style,
    pub num_format: Option<&'static str>,
}

impl CellSpec {
    fn new(cell: impl Into<String>, content: Content) -> Self {
        Self {
            cell: cell.into(),
            content,
            style: Style::None,
            num_format: None,
        }
    }

    fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    fn num(mut self, num_format: &'static str) -> Self {
        self.num_format = Some(num_format);
        self
    }
}

fn text(cell: impl Into<String>, value: impl Into<String>) -> CellSpec {
    CellSpec::new(cell, Content::Text(value.into()))
}

fn number(cell: impl Into<String>, value: f64) -> CellSpec {
    CellSpec::new(cell, Content::Number(value))
}

fn formula(cell: impl Into<String>, value: impl Into<String>) -> CellSpec {
    CellSpec::new(cell, Content::Formula(value.into()))
}

/// The populated valuation template, ready to render to .xlsx bytes.
///
/// Rendering is a pure function of the three fields; callers pass the
/// invocation year explicitly so tests stay deterministic.
#[derive(Debug, Clone)]
pub struct ValuationTemplate {
    royalty_name: String,
    inputs: ValuationInputs,
    fiscal_year: i32,
}

impl ValuationTemplate {
    pub fn new(royalty_name: impl Into<String>, inputs: ValuationInputs, fiscal_year: i32) -> Self {
        Self {
            royalty_name: royalty_name.into(),
            inputs,
            fiscal_year,
        }
    }

    /// All cell records of the template, in layout order.
    pub fn cell_specs(&self) -> Vec<CellSpec> {
        let mut specs = Vec::with_capacity(256);
        specs.extend(sections::title());
        specs.extend(sections::data_input(&self.royalty_name, &self.inputs));
        specs.extend(sections::key_assumptions());
        specs.extend(sections::scenario_analysis());
        specs.extend(sections::weighted_average());
        specs.extend(sections::dcf_projection(self.fiscal_year));
        specs.extend(sections::valuation_summary());
        specs.extend(sections::sensitivity_growth());
        specs.extend(sections::sensitivity_terminal());
        specs.extend(sections::value_drivers());
        specs.extend(sections::value_composition());
        specs.extend(sections::model_notes());
        specs
    }

    /// Render the workbook to .xlsx bytes.
    pub fn render(&self) -> ValuationResult<Vec<u8>> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(SHEET_NAME)
            .map_err(|e| ValuationError::Excel(format!("Failed to set worksheet name: {}", e)))?;

        for spec in self.cell_specs() {
            let (row, col) = parse_ref(&spec.cell)?;
            let format = build_format(spec.style, spec.num_format);

            let result = match &spec.content {
                Content::Text(s) => worksheet.write_string_with_format(row, col, s, &format),
                Content::Number(n) => worksheet.write_number_with_format(row, col, *n, &format),
                Content::Formula(f) => {
                    worksheet.write_formula_with_format(row, col, Formula::new(f), &format)
                }
            };
            result.map_err(|e| {
                ValuationError::Excel(format!("Failed to write cell {}: {}", spec.cell, e))
            })?;
        }

        for (col, width) in COLUMN_WIDTHS {
            worksheet
                .set_column_width(col, width)
                .map_err(|e| ValuationError::Excel(format!("Failed to set column width: {}", e)))?;
        }

        workbook
            .save_to_buffer()
            .map_err(|e| ValuationError::Excel(format!("Failed to save workbook: {}", e)))
    }
}

fn build_format(style: Style, num_format: Option<&'static str>) -> Format {
    let format = match style {
        Style::None => Format::new(),
        Style::Title => Format::new().set_bold().set_font_size(16),
        Style::ItalicGray => Format::new().set_italic().set_font_size(11).set_font_color(GRAY),
        Style::Section => Format::new().set_bold().set_font_size(12),
        Style::Header => Format::new().set_bold().set_font_size(11),
        Style::HeaderCenter => Format::new()
            .set_bold()
            .set_font_size(11)
            .set_align(FormatAlign::Center),
        Style::Edit => Format::new().set_italic().set_font_color(EDIT_BLUE),
        Style::Input => Format::new().set_background_color(INPUT_GREEN),
        Style::BearHeader => scenario_header(BEAR_FILL),
        Style::BaseHeader => scenario_header(BASE_FILL),
        Style::BullHeader => scenario_header(BULL_FILL),
        Style::Bold => Format::new().set_bold(),
        Style::WeightedResult => Format::new()
            .set_bold()
            .set_font_size(14)
            .set_background_color(WEIGHTED_FILL),
        Style::NoteGray => Format::new().set_font_size(10).set_font_color(GRAY),
    };

    match num_format {
        Some(num) => format.set_num_format(num),
        None => format,
    }
}

fn scenario_header(fill: Color) -> Format {
    Format::new()
        .set_bold()
        .set_font_size(11)
        .set_background_color(fill)
        .set_align(FormatAlign::Center)
}

/// Parse an A1-style reference into a 0-indexed (row, column) pair.
fn parse_ref(cell: &str) -> ValuationResult<(u32, u16)> {
    let letters: String = cell.chars().take_while(|c| c.is_ascii_alphabetic()).collect();
    let digits = &cell[letters.len()..];

    if letters.is_empty() || digits.is_empty() {
        return Err(ValuationError::Excel(format!(
            "Invalid cell reference '{}'",
            cell
        )));
    }

    let mut col: u32 = 0;
    for c in letters.chars() {
        col = col * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
    }

    let row: u32 = digits
        .parse()
        .map_err(|_| ValuationError::Excel(format!("Invalid cell reference '{}'", cell)))?;
    if row == 0 {
        return Err(ValuationError::Excel(format!(
            "Invalid cell reference '{}'",
            cell
        )));
    }

    Ok((row - 1, (col - 1) as u16))
}
