use std::io::BufWriter;

use printpdf::*;

use crate::error::{PennyError, Result};
use crate::fmt::money;
use crate::models::ReportData;
use crate::reports::top_categories;

// US Letter dimensions (mm)
const PAGE_W: f32 = 215.9;
const PAGE_H: f32 = 279.4;
const MARGIN_TOP: f32 = 22.0;
const MARGIN_BOTTOM: f32 = 22.0;
const MARGIN_LEFT: f32 = 19.05;
const MARGIN_RIGHT: f32 = 19.05;
const ROW_H: f32 = 5.0;
const FONT_SIZE: f32 = 10.0;
const SECTION_SIZE: f32 = 12.0;
const TITLE_SIZE: f32 = 18.0;
const CAPTION_SIZE: f32 = 11.0;
const FOOTER_SIZE: f32 = 8.0;

const CATEGORY_LIMIT: usize = 10;
const TRANSACTION_LIMIT: usize = 20;

fn approx_text_width(text: &str, size: f32) -> f32 {
    text.len() as f32 * size * 0.18
}

#[derive(Clone, Copy)]
enum Align {
    Left,
    Right,
}

struct Col {
    width: f32,
    align: Align,
}

struct ReportWriter {
    doc: PdfDocumentReference,
    font: IndirectFontRef,
    font_bold: IndirectFontRef,
    pages: Vec<(PdfPageIndex, PdfLayerIndex)>,
    y: f32,
}

impl ReportWriter {
    fn new(title: &str) -> Result<Self> {
        let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_W), Mm(PAGE_H), "Layer 1");
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| PennyError::Pdf(format!("{e:?}")))?;
        let font_bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| PennyError::Pdf(format!("{e:?}")))?;
        Ok(Self {
            doc,
            font,
            font_bold,
            pages: vec![(page, layer)],
            y: MARGIN_TOP,
        })
    }

    fn layer(&self) -> PdfLayerReference {
        let (page, layer) = self.pages[self.pages.len() - 1];
        self.doc.get_page(page).get_layer(layer)
    }

    fn pdf_y(&self) -> f32 {
        PAGE_H - self.y
    }

    fn new_page(&mut self) {
        let (page, layer) = self.doc.add_page(Mm(PAGE_W), Mm(PAGE_H), "Layer");
        self.pages.push((page, layer));
        self.y = MARGIN_TOP;
    }

    fn ensure_space(&mut self, needed: f32) {
        if self.y + needed > PAGE_H - MARGIN_BOTTOM {
            self.new_page();
        }
    }

    fn text(&self, s: &str, x: f32, size: f32, bold: bool) {
        let font = if bold { &self.font_bold } else { &self.font };
        self.layer().use_text(s, size, Mm(x), Mm(self.pdf_y()), font);
    }

    fn text_centered(&self, s: &str, size: f32, bold: bool) {
        let x = (PAGE_W - approx_text_width(s, size)) / 2.0;
        self.text(s, x, size, bold);
    }

    fn title(&mut self, title: &str, caption: &str) {
        self.text_centered(title, TITLE_SIZE, true);
        self.y += 8.0;
        self.text_centered(caption, CAPTION_SIZE, false);
        self.y += 9.0;
    }

    /// Section headers never split from their table: a header is only
    /// emitted when it fits on the current page along with the table
    /// header and at least one row.
    fn section_header(&mut self, label: &str) {
        self.ensure_space(ROW_H * 4.0);
        self.text(label, MARGIN_LEFT, SECTION_SIZE, true);
        self.y += ROW_H + 2.0;
    }

    fn hline(&self, x1: f32, x2: f32) {
        let layer = self.layer();
        layer.set_outline_thickness(0.5);
        let line = Line {
            points: vec![
                (Point::new(Mm(x1), Mm(self.pdf_y())), false),
                (Point::new(Mm(x2), Mm(self.pdf_y())), false),
            ],
            is_closed: false,
        };
        layer.add_line(line);
    }

    fn table_header(&mut self, cols: &[Col], headers: &[&str]) {
        self.ensure_space(ROW_H * 2.0);
        let mut x = MARGIN_LEFT;
        for (i, col) in cols.iter().enumerate() {
            if i < headers.len() {
                match col.align {
                    Align::Left => self.text(headers[i], x, FONT_SIZE, true),
                    Align::Right => {
                        let tw = approx_text_width(headers[i], FONT_SIZE);
                        self.text(headers[i], x + col.width - tw, FONT_SIZE, true);
                    }
                }
            }
            x += col.width;
        }
        self.y += ROW_H;
        self.hline(MARGIN_LEFT, PAGE_W - MARGIN_RIGHT);
        self.y += 2.0;
    }

    fn table_row(&mut self, cols: &[Col], values: &[&str]) {
        self.ensure_space(ROW_H);
        let mut x = MARGIN_LEFT;
        for (i, col) in cols.iter().enumerate() {
            if i < values.len() {
                match col.align {
                    Align::Left => self.text(values[i], x, FONT_SIZE, false),
                    Align::Right => {
                        let tw = approx_text_width(values[i], FONT_SIZE);
                        self.text(values[i], x + col.width - tw, FONT_SIZE, false);
                    }
                }
            }
            x += col.width;
        }
        self.y += ROW_H;
    }

    fn blank_row(&mut self) {
        self.y += ROW_H;
    }

    /// Stamp the footer on every page now that the total is known, then
    /// serialize the document.
    fn finish(self) -> Result<Vec<u8>> {
        let total = self.pages.len();
        let stamp = chrono::Local::now().format("%Y-%m-%d").to_string();
        for (i, (page, layer)) in self.pages.iter().enumerate() {
            let footer = format!("Generated on {stamp} | Page {} of {total}", i + 1);
            let x = (PAGE_W - approx_text_width(&footer, FOOTER_SIZE)) / 2.0;
            self.doc.get_page(*page).get_layer(*layer).use_text(
                &footer,
                FOOTER_SIZE,
                Mm(x),
                Mm(MARGIN_BOTTOM / 2.0),
                &self.font,
            );
        }

        let mut buf = BufWriter::new(Vec::new());
        self.doc
            .save(&mut buf)
            .map_err(|e| PennyError::Pdf(format!("{e:?}")))?;
        Ok(buf
            .into_inner()
            .map_err(|e| PennyError::Pdf(e.to_string()))?)
    }
}

// ---------------------------------------------------------------------------
// Report rendering
// ---------------------------------------------------------------------------

/// Build the financial report document: title and period, summary metrics,
/// expense-by-category breakdown, and the most recent transactions.
pub fn render_report(data: &ReportData) -> Result<Vec<u8>> {
    let mut pdf = ReportWriter::new("Financial Report")?;
    pdf.title("Financial Report", &format!("Period: {}", data.period));

    let summary_cols = &[
        Col { width: 130.0, align: Align::Left },
        Col { width: 47.8, align: Align::Right },
    ];
    pdf.section_header("Summary");
    pdf.table_header(summary_cols, &["Metric", "Value"]);
    let income = money(data.summary.total_income);
    pdf.table_row(summary_cols, &["Total Income", &income]);
    let expense = money(data.summary.total_expense);
    pdf.table_row(summary_cols, &["Total Expenses", &expense]);
    let net = money(data.summary.net_income);
    pdf.table_row(summary_cols, &["Net Income", &net]);
    let count = data.summary.transaction_count.to_string();
    pdf.table_row(summary_cols, &["Transaction Count", &count]);
    pdf.blank_row();

    let category_cols = &[
        Col { width: 100.0, align: Align::Left },
        Col { width: 40.0, align: Align::Right },
        Col { width: 37.8, align: Align::Right },
    ];
    pdf.section_header("Expense by Category");
    pdf.table_header(category_cols, &["Category", "Amount", "Percentage"]);
    for (name, value, pct) in top_categories(data, CATEGORY_LIMIT) {
        let amt = money(value);
        let pct = format!("{pct:.1}%");
        pdf.table_row(category_cols, &[&name, &amt, &pct]);
    }
    pdf.blank_row();

    let txn_cols = &[
        Col { width: 28.0, align: Align::Left },
        Col { width: 25.0, align: Align::Left },
        Col { width: 90.0, align: Align::Left },
        Col { width: 34.8, align: Align::Right },
    ];
    pdf.section_header("Recent Transactions");
    pdf.table_header(txn_cols, &["Date", "Type", "Description", "Amount"]);
    for t in data.transactions.iter().take(TRANSACTION_LIMIT) {
        let desc = if t.description.is_empty() {
            t.category.clone().unwrap_or_default()
        } else {
            t.description.clone()
        };
        let amt = money(t.amount);
        pdf.table_row(txn_cols, &[&t.date, t.kind.as_str(), &desc, &amt]);
    }

    pdf.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EnrichedTransaction, TxnKind};
    use crate::reports::build_report_data;

    fn txn(kind: TxnKind, amount: f64, category: Option<&str>) -> EnrichedTransaction {
        EnrichedTransaction {
            date: "2025-11-01".to_string(),
            kind,
            amount,
            description: "Sample".to_string(),
            category: category.map(str::to_string),
            category_color: None,
            account: Some("Checking".to_string()),
            from_account: None,
            to_account: None,
            notes: None,
        }
    }

    fn sample_data(categories: usize, transactions: usize) -> ReportData {
        let mut txns = Vec::new();
        for i in 0..transactions {
            let name = format!("cat{}", i % categories.max(1));
            txns.push(txn(TxnKind::Expense, (i + 1) as f64, Some(name.as_str())));
        }
        txns.push(txn(TxnKind::Income, 5000.0, None));
        build_report_data(txns, "November 2025".to_string())
    }

    #[test]
    fn test_render_report_produces_pdf() {
        let bytes = render_report(&sample_data(5, 12)).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_report_with_zero_expenses() {
        let mut data = build_report_data(vec![txn(TxnKind::Income, 100.0, None)], "x".to_string());
        data.category_data = vec![crate::models::CategorySlice {
            name: "Ghost".to_string(),
            value: 0.0,
            color: "#64748b".to_string(),
        }];
        let bytes = render_report(&data).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_report_with_empty_data() {
        let data = build_report_data(vec![], "Empty".to_string());
        let bytes = render_report(&data).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_report_with_many_rows() {
        // 15 categories / 40 transactions exercise the top-10 and top-20
        // caps along with pagination.
        let bytes = render_report(&sample_data(15, 40)).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_table_rows_flow_onto_new_pages() {
        let mut pdf = ReportWriter::new("t").unwrap();
        let cols = &[Col { width: 100.0, align: Align::Left }];
        for _ in 0..120 {
            pdf.table_row(cols, &["row"]);
        }
        assert!(pdf.pages.len() >= 2);
    }

    #[test]
    fn test_section_header_never_lands_at_page_bottom() {
        let mut pdf = ReportWriter::new("t").unwrap();
        pdf.y = PAGE_H - MARGIN_BOTTOM - ROW_H;
        pdf.section_header("Summary");
        assert_eq!(pdf.pages.len(), 2);
        // Header was written at the top of the fresh page.
        assert!(pdf.y < MARGIN_TOP + 2.0 * ROW_H + 2.0);
    }

    #[test]
    fn test_finish_stamps_every_page() {
        let mut pdf = ReportWriter::new("t").unwrap();
        pdf.new_page();
        pdf.new_page();
        let bytes = pdf.finish().unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
