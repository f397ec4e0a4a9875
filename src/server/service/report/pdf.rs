//! Minimal PDF 1.4 writer for [`ReportDocument`]s.
//!
//! Produces A4 pages of Helvetica text: a centred title, the summary lines, then one block of
//! `Header: value` lines per row. Only the standard Type 1 fonts are used, so no font data is
//! embedded. Characters outside Latin-1 are replaced with `?`.

use std::fmt::Write;

use crate::server::service::report::document::ReportDocument;

const PAGE_WIDTH: f64 = 595.0;
const PAGE_HEIGHT: f64 = 842.0;
const MARGIN: f64 = 50.0;

const TITLE_SIZE: f64 = 20.0;
const SUMMARY_SIZE: f64 = 12.0;
const BODY_SIZE: f64 = 10.0;
const LINE_SPACING: f64 = 1.4;
/// Average Helvetica glyph width as a fraction of the font size
const AVERAGE_GLYPH_WIDTH: f64 = 0.5;

#[derive(Clone, Copy, PartialEq)]
enum Font {
    Regular,
    Bold,
}

impl Font {
    fn resource(self) -> &'static str {
        match self {
            Self::Regular => "F1",
            Self::Bold => "F2",
        }
    }
}

struct Line {
    text: String,
    size: f64,
    font: Font,
    centered: bool,
    /// Extra vertical space before this line, in points
    space_before: f64,
}

impl Line {
    fn new(text: impl Into<String>, size: f64, font: Font) -> Self {
        Self {
            text: text.into(),
            size,
            font,
            centered: false,
            space_before: 0.0,
        }
    }
}

struct PlacedLine {
    x: f64,
    y: f64,
    size: f64,
    font: Font,
    text: String,
}

/// Renders the document as a PDF file.
pub fn render(document: &ReportDocument) -> Vec<u8> {
    let pages = paginate(layout(document));

    write_pdf(&pages).into_bytes()
}

fn layout(document: &ReportDocument) -> Vec<Line> {
    let mut lines = Vec::new();

    lines.push(Line {
        centered: true,
        ..Line::new(document.title.as_str(), TITLE_SIZE, Font::Bold)
    });

    for (i, summary) in document.summary.iter().enumerate() {
        let mut line = Line::new(summary.as_str(), SUMMARY_SIZE, Font::Regular);
        if i == 0 {
            line.space_before = SUMMARY_SIZE;
        }
        lines.push(line);
    }

    for row in &document.rows {
        let mut first = true;

        for (column, cell) in document.columns.iter().zip(row) {
            let text = format!("{}: {}", column.header, cell);

            for (i, wrapped) in wrap(&text, BODY_SIZE).into_iter().enumerate() {
                let font = if first && i == 0 { Font::Bold } else { Font::Regular };
                let mut line = Line::new(wrapped, BODY_SIZE, font);
                if first && i == 0 {
                    line.space_before = BODY_SIZE;
                }
                lines.push(line);
            }
            first = false;
        }
    }

    lines
}

/// Breaks `text` on spaces so each line fits the printable width.
fn wrap(text: &str, size: f64) -> Vec<String> {
    let max_chars = ((PAGE_WIDTH - 2.0 * MARGIN) / (size * AVERAGE_GLYPH_WIDTH)) as usize;

    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split(' ') {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };

        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);

        while current.chars().count() > max_chars {
            let rest: String = current.chars().skip(max_chars).collect();
            current = current.chars().take(max_chars).collect();
            lines.push(std::mem::replace(&mut current, rest));
        }
    }
    lines.push(current);

    lines
}

fn paginate(lines: Vec<Line>) -> Vec<Vec<PlacedLine>> {
    let mut pages = vec![Vec::new()];
    let mut y = PAGE_HEIGHT - MARGIN;

    for line in lines {
        let advance = line.size * LINE_SPACING;
        let on_fresh_page = pages.last().is_some_and(|page| page.is_empty());
        let gap = if on_fresh_page { 0.0 } else { line.space_before };

        if y - gap - advance < MARGIN && !on_fresh_page {
            pages.push(Vec::new());
            y = PAGE_HEIGHT - MARGIN;
        } else {
            y -= gap;
        }
        y -= advance;

        let x = if line.centered {
            let width = line.text.chars().count() as f64 * line.size * AVERAGE_GLYPH_WIDTH;
            ((PAGE_WIDTH - width) / 2.0).max(MARGIN)
        } else {
            MARGIN
        };

        if let Some(page) = pages.last_mut() {
            page.push(PlacedLine {
                x,
                y,
                size: line.size,
                font: line.font,
                text: line.text,
            });
        }
    }

    pages
}

/// Escapes a string for a PDF literal, encoding Latin-1 characters as octal escapes.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            ' '..='~' => out.push(c),
            '\u{a0}'..='\u{ff}' => {
                let _ = write!(out, "\\{:03o}", c as u32);
            }
            _ => out.push('?'),
        }
    }

    out
}

fn content_stream(lines: &[PlacedLine]) -> String {
    let mut stream = String::new();

    for line in lines {
        let _ = writeln!(
            stream,
            "BT /{} {} Tf {:.2} {:.2} Td ({}) Tj ET",
            line.font.resource(),
            line.size,
            line.x,
            line.y,
            escape(&line.text)
        );
    }

    stream
}

fn write_pdf(pages: &[Vec<PlacedLine>]) -> String {
    // 1 catalog, 2 page tree, 3-4 fonts, then a page and content stream per page
    let first_page_object = 5;
    let page_ids: Vec<usize> = (0..pages.len())
        .map(|i| first_page_object + i * 2)
        .collect();

    let mut objects: Vec<String> = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            page_ids
                .iter()
                .map(|id| format!("{} 0 R", id))
                .collect::<Vec<_>>()
                .join(" "),
            pages.len()
        ),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_string(),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>"
            .to_string(),
    ];

    for (page, page_id) in pages.iter().zip(&page_ids) {
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
             /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> /Contents {} 0 R >>",
            PAGE_WIDTH,
            PAGE_HEIGHT,
            page_id + 1
        ));

        let stream = content_stream(page);
        objects.push(format!(
            "<< /Length {} >>\nstream\n{}endstream",
            stream.len(),
            stream
        ));
    }

    let mut out = String::from("%PDF-1.4\n");
    let mut offsets = Vec::with_capacity(objects.len());

    for (i, object) in objects.iter().enumerate() {
        offsets.push(out.len());
        let _ = write!(out, "{} 0 obj\n{}\nendobj\n", i + 1, object);
    }

    let xref_offset = out.len();
    let _ = write!(out, "xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in offsets {
        let _ = write!(out, "{:010} 00000 n \n", offset);
    }
    let _ = write!(
        out,
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        xref_offset
    );

    out
}

#[cfg(test)]
mod tests {
    use crate::server::service::report::document::{Cell, Column, ReportDocument};

    use super::{escape, render, wrap};

    fn document(rows: usize) -> ReportDocument {
        let mut document = ReportDocument::new(
            "Leave Usage Report",
            vec![Column::new("Employee", 25.0), Column::new("Used Days", 12.0)],
        )
        .summary_line("Year: 2025");

        for i in 0..rows {
            document.push_row(vec![Cell::from(format!("Employee {}", i)), Cell::from(3)]);
        }
        document
    }

    /// Expect a well-formed file with the row text in the content stream
    #[test]
    fn renders_single_page() {
        let pdf = String::from_utf8(render(&document(2))).unwrap();

        assert!(pdf.starts_with("%PDF-1.4"));
        assert!(pdf.trim_end().ends_with("%%EOF"));
        assert!(pdf.contains("/Count 1"));
        assert!(pdf.contains("(Employee: Employee 1) Tj"));
        assert!(pdf.contains("(Used Days: 3) Tj"));
    }

    /// Expect long reports to break across pages
    #[test]
    fn paginates_long_reports() {
        let pdf = String::from_utf8(render(&document(200))).unwrap();

        assert!(!pdf.contains("/Count 1 "));
        assert!(pdf.matches("/Type /Page ").count() > 1);
    }

    /// Expect delimiters escaped and non Latin-1 text replaced
    #[test]
    fn escapes_text() {
        assert_eq!(escape("a (b) \\"), "a \\(b\\) \\\\");
        assert_eq!(escape("caf\u{e9}"), "caf\\351");
        assert_eq!(escape("\u{4e2d}"), "?");
    }

    /// Expect no wrapped line to exceed the printable width
    #[test]
    fn wraps_long_values() {
        let text = "word ".repeat(60);
        let lines = wrap(text.trim(), 10.0);

        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.chars().count() <= 99));
    }
}
