//! Comma-separated table output (and the matching reader).

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use super::{Cell, Table, TableError, TableWriter};

/// Writes tables as comma-separated text with a header row.
#[derive(Debug, Default)]
pub struct CsvTableWriter;

impl CsvTableWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write the table to any writer. Records end with `\n`.
    pub fn write_to<W: Write>(&self, table: &Table, writer: W) -> Result<(), csv::Error> {
        let mut wtr = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);

        wtr.write_record(table.columns())?;
        for row in table.rows() {
            wtr.write_record(row.iter().map(Cell::render))?;
        }
        wtr.flush()?;
        Ok(())
    }
}

impl TableWriter for CsvTableWriter {
    fn write(&mut self, table: &Table, path: &Path) -> Result<(), TableError> {
        let wrap = |source: csv::Error| TableError::Csv {
            path: path.to_path_buf(),
            source,
        };
        let file = File::create(path).map_err(|e| wrap(e.into()))?;
        self.write_to(table, file).map_err(wrap)
    }
}

/// Read a comma-separated table with a header row.
pub fn read_csv<R: Read>(reader: R) -> Result<Table, TableError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let columns: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let mut table = Table::new(columns);

    for (index, record) in rdr.records().enumerate() {
        let record = record?;
        let mut row = Vec::with_capacity(record.len());
        for (col, value) in record.iter().enumerate() {
            let cell = Cell::parse(value).ok_or_else(|| TableError::InvalidCell {
                row: index + 1,
                column: table.columns()[col].clone(),
                value: value.to_string(),
            })?;
            row.push(cell);
        }
        table.push_row(row);
    }

    Ok(table)
}

pub fn read_csv_file(path: &Path) -> Result<Table, TableError> {
    let file = File::open(path).map_err(csv::Error::from)?;
    read_csv(file)
}
