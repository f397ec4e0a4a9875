//! Spreadsheet rendering of [`ReportDocument`]s.

use rust_xlsxwriter::{Color, Format, FormatPattern, Workbook};

use crate::server::{
    error::Error,
    service::report::document::{Cell, ReportDocument},
};

/// Worksheet names are limited to 31 characters.
const MAX_SHEET_NAME: usize = 31;

/// Renders the document as a single-sheet workbook.
///
/// The first row holds the bold column headers on a grey background, followed by one row
/// per document row. Summary lines are not included.
pub fn render(document: &ReportDocument) -> Result<Vec<u8>, Error> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let sheet_name: String = document.title.chars().take(MAX_SHEET_NAME).collect();
    worksheet.set_name(sheet_name)?;

    let header_format = Format::new()
        .set_bold()
        .set_pattern(FormatPattern::Solid)
        .set_background_color(Color::RGB(0xE0E0E0));

    for (col, column) in document.columns.iter().enumerate() {
        let col = col as u16;
        worksheet.set_column_width(col, column.width)?;
        worksheet.write_string_with_format(0, col, column.header, &header_format)?;
    }

    for (row_index, row) in document.rows.iter().enumerate() {
        let row_number = row_index as u32 + 1;

        for (col, cell) in row.iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Text(text) => {
                    worksheet.write_string(row_number, col, text)?;
                }
                Cell::Number(number) => {
                    worksheet.write_number(row_number, col, *number)?;
                }
                Cell::Empty => {}
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

#[cfg(test)]
mod tests {
    use crate::server::service::report::document::{Cell, Column, ReportDocument};

    use super::render;

    /// Expect a zip container, as every xlsx file is one
    #[test]
    fn renders_xlsx_archive() {
        let mut document = ReportDocument::new(
            "Work Hours Report",
            vec![Column::new("Date", 12.0), Column::new("Hours Worked", 15.0)],
        );
        document.push_row(vec![Cell::from("2025-03-03"), Cell::from(7.5)]);

        let bytes = render(&document).unwrap();

        assert!(bytes.starts_with(b"PK"));
    }
}
