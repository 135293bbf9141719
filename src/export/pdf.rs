//! Minimal PDF 1.4 writer for the two workload tables.
//!
//! Only the standard Helvetica fonts are used, so nothing has to be embedded.
//! Text widths come from the Helvetica metrics and are used for column sizing
//! and centring.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use crate::export::{COURSE_HEADERS, FACULTY_HEADERS, course_cells, faculty_cells};
use crate::models::{CourseRow, FacultyRow};

const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;
const MARGIN: f32 = 72.0;
const TABLE_SPACER: f32 = 20.0;

const HEADER_FONT_SIZE: f32 = 14.0;
const BODY_FONT_SIZE: f32 = 12.0;
const CELL_SIDE_PADDING: f32 = 6.0;
const GRID_WIDTH: f32 = 1.0;

type Rgb = (f32, f32, f32);

const GREY: Rgb = (0.502, 0.502, 0.502);
const WHITE_SMOKE: Rgb = (0.961, 0.961, 0.961);
const BEIGE: Rgb = (0.961, 0.961, 0.863);
const BLACK: Rgb = (0.0, 0.0, 0.0);

#[derive(Debug, Clone, Copy)]
enum Font {
    Regular,
    Bold,
}

impl Font {
    fn resource(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct RowStyle {
    font: Font,
    size: f32,
    top_padding: f32,
    bottom_padding: f32,
    background: Rgb,
    text: Rgb,
}

impl RowStyle {
    fn height(&self) -> f32 {
        self.size * 1.2 + self.top_padding + self.bottom_padding
    }
}

const HEADER_STYLE: RowStyle = RowStyle {
    font: Font::Bold,
    size: HEADER_FONT_SIZE,
    top_padding: 3.0,
    bottom_padding: 12.0,
    background: GREY,
    text: WHITE_SMOKE,
};

const BODY_STYLE: RowStyle = RowStyle {
    font: Font::Regular,
    size: BODY_FONT_SIZE,
    top_padding: 6.0,
    bottom_padding: 6.0,
    background: BEIGE,
    text: BLACK,
};

struct Table {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    fn new(header: [&str; 5], rows: Vec<[String; 5]>) -> Self {
        Self {
            header: header.iter().map(|h| h.to_string()).collect(),
            rows: rows.into_iter().map(Vec::from).collect(),
        }
    }

    fn column_widths(&self) -> Vec<f32> {
        let mut widths: Vec<f32> = self
            .header
            .iter()
            .map(|cell| text_width(cell, HEADER_STYLE.font, HEADER_STYLE.size))
            .collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = width.max(text_width(cell, BODY_STYLE.font, BODY_STYLE.size));
            }
        }
        widths.iter().map(|w| w + 2.0 * CELL_SIDE_PADDING).collect()
    }
}

/// Lays tables out top to bottom, starting a new page when a row no longer fits.
struct Layout {
    pages: Vec<String>,
    current: String,
    y: f32,
}

impl Layout {
    fn new() -> Self {
        Self {
            pages: Vec::new(),
            current: String::new(),
            y: PAGE_HEIGHT - MARGIN,
        }
    }

    fn break_page(&mut self) {
        let finished = std::mem::take(&mut self.current);
        self.pages.push(finished);
        self.y = PAGE_HEIGHT - MARGIN;
    }

    fn space(&mut self, amount: f32) {
        self.y -= amount;
    }

    fn draw_table(&mut self, table: &Table) {
        let widths = table.column_widths();
        let total: f32 = widths.iter().sum();
        let x = ((PAGE_WIDTH - total) / 2.0).max(0.0);

        self.draw_row(x, &widths, &table.header, &HEADER_STYLE);
        for row in &table.rows {
            self.draw_row(x, &widths, row, &BODY_STYLE);
        }
    }

    fn draw_row(&mut self, x: f32, widths: &[f32], cells: &[String], style: &RowStyle) {
        let height = style.height();
        if self.y - height < MARGIN && self.y < PAGE_HEIGHT - MARGIN {
            self.break_page();
        }
        let top = self.y;
        let bottom = top - height;
        let out = &mut self.current;

        let (r, g, b) = style.background;
        let total: f32 = widths.iter().sum();
        let _ = writeln!(out, "{:.3} {:.3} {:.3} rg", r, g, b);
        let _ = writeln!(out, "{:.2} {:.2} {:.2} {:.2} re f", x, bottom, total, height);

        let _ = writeln!(out, "0 0 0 RG {:.1} w", GRID_WIDTH);
        let mut cell_x = x;
        for width in widths {
            let _ = writeln!(out, "{:.2} {:.2} {:.2} {:.2} re S", cell_x, bottom, width, height);
            cell_x += width;
        }

        let (r, g, b) = style.text;
        let baseline = top - style.top_padding - style.size;
        let mut cell_x = x;
        for (width, cell) in widths.iter().zip(cells) {
            let text_x = cell_x + (width - text_width(cell, style.font, style.size)) / 2.0;
            let _ = writeln!(
                out,
                "BT /{} {:.1} Tf {:.3} {:.3} {:.3} rg {:.2} {:.2} Td ({}) Tj ET",
                style.font.resource(),
                style.size,
                r,
                g,
                b,
                text_x,
                baseline,
                escape_text(cell)
            );
            cell_x += width;
        }

        self.y = bottom;
    }

    fn finish(mut self) -> Vec<String> {
        if !self.current.is_empty() || self.pages.is_empty() {
            self.break_page();
        }
        self.pages
    }
}

/// Renders the faculty table, a spacer and the course table as a PDF document.
pub fn render_pdf(
    faculty: &[FacultyRow],
    courses: &[CourseRow],
    generated_at: DateTime<Utc>,
) -> Vec<u8> {
    let faculty_table = Table::new(FACULTY_HEADERS, faculty.iter().map(faculty_cells).collect());
    let course_table = Table::new(COURSE_HEADERS, courses.iter().map(course_cells).collect());

    let mut layout = Layout::new();
    layout.draw_table(&faculty_table);
    layout.space(TABLE_SPACER);
    layout.draw_table(&course_table);
    let pages = layout.finish();

    assemble(&pages, generated_at)
}

fn assemble(pages: &[String], generated_at: DateTime<Utc>) -> Vec<u8> {
    const FIRST_PAGE_ID: usize = 6;

    let kids = (0..pages.len())
        .map(|i| format!("{} 0 R", FIRST_PAGE_ID + 2 * i))
        .collect::<Vec<_>>()
        .join(" ");

    let mut objects: Vec<Vec<u8>> = vec![
        b"<< /Type /Catalog /Pages 2 0 R >>".to_vec(),
        format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids, pages.len()).into_bytes(),
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>".to_vec(),
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>"
            .to_vec(),
        format!(
            "<< /Title (Faculty Workload) /Producer (faculty-workload) /CreationDate ({}) >>",
            generated_at.format("D:%Y%m%d%H%M%SZ")
        )
        .into_bytes(),
    ];

    for (i, content) in pages.iter().enumerate() {
        let content_id = FIRST_PAGE_ID + 2 * i + 1;
        objects.push(
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
                 /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> /Contents {} 0 R >>",
                PAGE_WIDTH, PAGE_HEIGHT, content_id
            )
            .into_bytes(),
        );
        let mut stream = format!("<< /Length {} >>\nstream\n", content.len()).into_bytes();
        stream.extend_from_slice(content.as_bytes());
        stream.extend_from_slice(b"\nendstream");
        objects.push(stream);
    }

    let mut out: Vec<u8> = b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n", i + 1).as_bytes());
        out.extend_from_slice(body);
        out.extend_from_slice(b"\nendobj\n");
    }

    let xref_offset = out.len();
    let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in offsets {
        let _ = write!(xref, "{:010} 00000 n \n", offset);
    }
    let _ = write!(
        xref,
        "trailer\n<< /Size {} /Root 1 0 R /Info 5 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        xref_offset
    );
    out.extend_from_slice(xref.as_bytes());
    out
}

/// Characters WinAnsiEncoding places in 0x80..=0x9F, where Latin-1 has
/// control codes.
const WIN_ANSI_EXTRAS: [(char, u8); 27] = [
    ('\u{20AC}', 0x80), ('\u{201A}', 0x82), ('\u{0192}', 0x83), ('\u{201E}', 0x84),
    ('\u{2026}', 0x85), ('\u{2020}', 0x86), ('\u{2021}', 0x87), ('\u{02C6}', 0x88),
    ('\u{2030}', 0x89), ('\u{0160}', 0x8A), ('\u{2039}', 0x8B), ('\u{0152}', 0x8C),
    ('\u{017D}', 0x8E), ('\u{2018}', 0x91), ('\u{2019}', 0x92), ('\u{201C}', 0x93),
    ('\u{201D}', 0x94), ('\u{2022}', 0x95), ('\u{2013}', 0x96), ('\u{2014}', 0x97),
    ('\u{02DC}', 0x98), ('\u{2122}', 0x99), ('\u{0161}', 0x9A), ('\u{203A}', 0x9B),
    ('\u{0153}', 0x9C), ('\u{017E}', 0x9E), ('\u{0178}', 0x9F),
];

/// Maps a character to its WinAnsiEncoding byte. The standard fonts carry no
/// other glyphs, so anything else has no code.
fn win_ansi(c: char) -> Option<u8> {
    match c as u32 {
        0x20..=0x7E | 0xA0..=0xFF => u8::try_from(c as u32).ok(),
        _ => WIN_ANSI_EXTRAS
            .iter()
            .find(|(extra, _)| *extra == c)
            .map(|(_, code)| *code),
    }
}

/// Escapes a literal string. Bytes above ASCII go out as octal escapes;
/// characters without a WinAnsi code become `?`.
fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match win_ansi(c) {
            Some(b'(' | b')' | b'\\') => {
                escaped.push('\\');
                escaped.push(c);
            }
            Some(code @ 0x20..=0x7E) => escaped.push(char::from(code)),
            Some(code) => {
                let _ = write!(escaped, "\\{:03o}", code);
            }
            None => escaped.push('?'),
        }
    }
    escaped
}

fn text_width(text: &str, font: Font, size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(glyph_width(c, font))).sum();
    units as f32 * size / 1000.0
}

/// Advance widths of the printable ASCII range (0x20..=0x7E) from the
/// Helvetica AFM, in thousandths of an em.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Same range from the Helvetica-Bold AFM.
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

fn glyph_width(c: char, font: Font) -> u16 {
    let table = match font {
        Font::Regular => &HELVETICA_WIDTHS,
        Font::Bold => &HELVETICA_BOLD_WIDTHS,
    };
    match c {
        ' '..='~' => table[c as usize - 0x20],
        // Outside ASCII a lowercase-letter average is close enough for sizing.
        _ => 556,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bold_header_is_measured_with_bold_metrics() {
        // "Name" = N + a + m + e
        let regular = text_width("Name", Font::Regular, 1000.0);
        let bold = text_width("Name", Font::Bold, 1000.0);
        assert_eq!(regular, (722 + 556 + 833 + 556) as f32);
        assert_eq!(bold, (722 + 556 + 889 + 556) as f32);
    }

    #[test]
    fn typographic_characters_use_win_ansi_codes() {
        assert_eq!(escape_text("O\u{2019}Brien \u{2013} Dean"), "O\\222Brien \\226 Dean");
        assert_eq!(escape_text("Pe\u{00F1}a (PhD)"), "Pe\\361a \\(PhD\\)");
        assert_eq!(escape_text("Nguy\u{1EC5}n"), "Nguy?n");
    }
}
