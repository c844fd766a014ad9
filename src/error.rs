use thiserror::Error;

pub type ValuationResult<T> = Result<T, ValuationError>;

#[derive(Error, Debug)]
pub enum ValuationError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Could not find a column for '{0}' in the input file")]
    MissingColumn(&'static str),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Excel error: {0}")]
    Excel(String),
}
