//! Format-neutral tables and the writers that materialize them.
//!
//! Extractors produce records; [`Table::from_records`] turns them into an
//! episode-sorted [`Table`], and [`write_table`] hands it to the writer for
//! the selected [`OutputFormat`].

mod delimited;
mod spreadsheet;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub use delimited::{read_csv, read_csv_file, CsvTableWriter};
pub use spreadsheet::XlsxTableWriter;

/// A single table value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell {
    Int(i64),
    Float(f64),
}

impl Cell {
    pub fn as_f64(&self) -> f64 {
        match *self {
            Cell::Int(v) => v as f64,
            Cell::Float(v) => v,
        }
    }

    /// Text rendering used by delimited output.
    ///
    /// Floats always carry a decimal point (`-1.0`) and NaN becomes an
    /// empty field.
    pub fn render(&self) -> String {
        match *self {
            Cell::Int(v) => v.to_string(),
            Cell::Float(v) if v.is_nan() => String::new(),
            Cell::Float(v) => format!("{:?}", v),
        }
    }

    /// Parse a rendered value back. Empty text reads as NaN.
    pub fn parse(text: &str) -> Option<Cell> {
        let text = text.trim();
        if text.is_empty() {
            return Some(Cell::Float(f64::NAN));
        }
        if let Ok(v) = text.parse::<i64>() {
            return Some(Cell::Int(v));
        }
        text.parse::<f64>().ok().map(Cell::Float)
    }
}

/// A record type that can be laid out as a table row.
pub trait Row {
    /// Header names, in cell order.
    const COLUMNS: &'static [&'static str];

    /// Sort key for the output table.
    fn episode(&self) -> i64;

    fn cells(&self) -> Vec<Cell>;
}

/// Column names plus rows of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build a table from records, ordered ascending by episode.
    ///
    /// The sort is stable: records sharing an episode keep the order in
    /// which they appeared in the log.
    pub fn from_records<R: Row>(records: &[R]) -> Self {
        let mut ordered: Vec<&R> = records.iter().collect();
        ordered.sort_by_key(|record| record.episode());

        let mut table = Self::new(R::COLUMNS.iter().map(|c| c.to_string()).collect());
        for record in ordered {
            table.push_row(record.cells());
        }
        table
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All values of one column, by header name.
    pub fn column(&self, name: &str) -> Option<Vec<Cell>> {
        let index = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|row| row[index]).collect())
    }
}

/// Concrete on-disk format of a written table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Comma-separated text
    Csv,
    /// Excel workbook
    Xlsx,
}

impl OutputFormat {
    /// Pick the format from the destination suffix: `.csv` and `.txt` are
    /// delimited text, anything else is a spreadsheet.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("csv") | Some("txt") => OutputFormat::Csv,
            _ => OutputFormat::Xlsx,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Xlsx => "xlsx",
        }
    }
}

/// Configured output format; `auto` defers to the destination suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FormatSetting {
    /// Choose by file extension (.csv/.txt -> csv, otherwise xlsx)
    #[default]
    Auto,
    /// Always write comma-separated text
    Csv,
    /// Always write an Excel workbook
    Xlsx,
}

impl FormatSetting {
    pub fn resolve(self, path: &Path) -> OutputFormat {
        match self {
            FormatSetting::Auto => OutputFormat::from_path(path),
            FormatSetting::Csv => OutputFormat::Csv,
            FormatSetting::Xlsx => OutputFormat::Xlsx,
        }
    }
}

/// Errors raised while writing or reading tables.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("Failed to write CSV to {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to write spreadsheet to {}: {source}", path.display())]
    Xlsx {
        path: PathBuf,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },

    #[error("Failed to read CSV: {0}")]
    Read(#[from] csv::Error),

    #[error("Row {row}: value {value:?} in column {column} is not a number")]
    InvalidCell {
        row: usize,
        column: String,
        value: String,
    },
}

/// Writer trait for table formats
pub trait TableWriter {
    fn write(&mut self, table: &Table, path: &Path) -> Result<(), TableError>;
}

/// Create a writer for the given format
pub fn writer(format: OutputFormat) -> Box<dyn TableWriter> {
    match format {
        OutputFormat::Csv => Box::new(CsvTableWriter::new()),
        OutputFormat::Xlsx => Box::new(XlsxTableWriter::new()),
    }
}

/// Write `table` to `path` in the given format, replacing any existing file.
pub fn write_table(table: &Table, path: &Path, format: OutputFormat) -> Result<(), TableError> {
    tracing::debug!(
        path = %path.display(),
        format = format.name(),
        rows = table.len(),
        "writing table"
    );
    writer(format).write(table, path)
}
