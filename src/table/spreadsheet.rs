//! Excel workbook output.

use std::path::Path;

use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook, XlsxError};

use super::{Table, TableError, TableWriter};

/// Writes tables as a single-sheet `.xlsx` workbook with a bold header row.
///
/// Numbers are stored as numeric cells; NaN and infinities are left blank
/// since the format cannot represent them.
#[derive(Debug, Default)]
pub struct XlsxTableWriter;

impl XlsxTableWriter {
    pub fn new() -> Self {
        Self
    }

    /// Lay the table out in a new workbook.
    pub fn build(&self, table: &Table) -> Result<Workbook, XlsxError> {
        let mut workbook = Workbook::new();
        let header = Format::new().set_bold();
        let sheet = workbook.add_worksheet();

        for (col, name) in table.columns().iter().enumerate() {
            sheet.write_string_with_format(0, col_num(col)?, name, &header)?;
        }

        for (index, row) in table.rows().iter().enumerate() {
            let row_num = RowNum::try_from(index + 1).map_err(|_| XlsxError::RowColumnLimitError)?;
            for (col, cell) in row.iter().enumerate() {
                let value = cell.as_f64();
                if !value.is_finite() {
                    continue;
                }
                sheet.write_number(row_num, col_num(col)?, value)?;
            }
        }

        Ok(workbook)
    }
}

fn col_num(col: usize) -> Result<ColNum, XlsxError> {
    ColNum::try_from(col).map_err(|_| XlsxError::RowColumnLimitError)
}

impl TableWriter for XlsxTableWriter {
    fn write(&mut self, table: &Table, path: &Path) -> Result<(), TableError> {
        let wrap = |source: XlsxError| TableError::Xlsx {
            path: path.to_path_buf(),
            source,
        };
        let mut workbook = self.build(table).map_err(wrap)?;
        workbook.save(path).map_err(wrap)
    }
}
