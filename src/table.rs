//! In-memory input table read from CSV or Excel

use crate::error::{ValuationError, ValuationResult};
use calamine::{Data, Reader, Xlsx};
use std::io::Cursor;
use std::path::Path;

/// A delimited table with a header row. Cells are kept as strings; the
/// aggregator parses the two columns it cares about and ignores the rest.
#[derive(Debug, Clone, Default)]
pub struct DataTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl DataTable {
    /// Read a table from raw bytes, dispatching on the file name extension.
    /// Anything that is not `.xlsx` is treated as CSV.
    pub fn from_bytes(filename: &str, bytes: &[u8]) -> ValuationResult<Self> {
        if filename.to_lowercase().ends_with(".xlsx") {
            Self::from_xlsx_bytes(bytes)
        } else {
            Self::from_csv_bytes(bytes)
        }
    }

    /// Read a table from a file on disk.
    pub fn from_path(path: &Path) -> ValuationResult<Self> {
        let bytes = std::fs::read(path)?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Self::from_bytes(&filename, &bytes)
    }

    /// Parse CSV bytes into a table.
    pub fn from_csv_bytes(bytes: &[u8]) -> ValuationResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(bytes);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let mut row: Vec<String> = record.iter().map(|c| c.to_string()).collect();
            // Short records are padded so column indices stay valid
            row.resize(headers.len(), String::new());
            rows.push(row);
        }

        Ok(Self { headers, rows })
    }

    /// Parse the first worksheet of an .xlsx file into a table.
    pub fn from_xlsx_bytes(bytes: &[u8]) -> ValuationResult<Self> {
        let cursor = Cursor::new(bytes.to_vec());
        let mut workbook: Xlsx<_> = Xlsx::new(cursor)
            .map_err(|e| ValuationError::Excel(format!("Failed to open Excel file: {}", e)))?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ValuationError::Excel("Workbook has no worksheets".to_string()))?;

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| ValuationError::Excel(format!("Failed to read worksheet: {}", e)))?;

        let mut rows_iter = range.rows();
        let headers: Vec<String> = match rows_iter.next() {
            Some(header_row) => header_row.iter().map(cell_to_string).collect(),
            None => return Ok(Self::default()),
        };

        let rows: Vec<Vec<String>> = rows_iter
            .map(|row| {
                let mut cells: Vec<String> = row.iter().map(cell_to_string).collect();
                cells.resize(headers.len(), String::new());
                cells
            })
            .collect();

        Ok(Self { headers, rows })
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}
