//! PDF rendition via `printpdf`.
//!
//! Laid out with the builtin Helvetica faces and a descending y cursor on
//! A4 pages. The sentiment distribution is drawn as labelled percentage
//! bars in Courier; the JSON payload carries the raw ratios for anything
//! fancier.

use std::io::BufWriter;

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

use crate::{ReportError, ReportInputs};

const PAGE_W: f32 = 210.0;
const PAGE_H: f32 = 297.0;
const MARGIN_X: f32 = 20.0;
const TOP_Y: f32 = 280.0;
const BOTTOM_Y: f32 = 25.0;
const WRAP_WIDTH: usize = 90;

/// Render the report to PDF bytes.
///
/// # Errors
///
/// Returns [`ReportError::Pdf`] when font registration or document
/// serialization fails.
pub fn render_pdf(
    inputs: &ReportInputs<'_>,
    summary: Option<&str>,
) -> Result<Vec<u8>, ReportError> {
    let brief = inputs.brief;
    let kpis = inputs.kpis;
    let title = format!("Flash Narrative Report for {}", brief.brand);

    let (doc, page1, layer1) = PdfDocument::new(&title, Mm(PAGE_W), Mm(PAGE_H), "Layer 1");
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ReportError::Pdf(format!("font error: {e}")))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ReportError::Pdf(format!("font error: {e}")))?;
    let mono = doc
        .add_builtin_font(BuiltinFont::Courier)
        .map_err(|e| ReportError::Pdf(format!("font error: {e}")))?;

    let mut cursor = Cursor {
        doc: &doc,
        layer: doc.get_page(page1).get_layer(layer1),
        y: TOP_Y,
    };

    // Header.
    cursor.text(&title, 16.0, &bold);
    cursor.gap(2.0);
    cursor.text(
        &format!(
            "This report covers the last {} hours. Generated on {}.",
            brief.lookback_hours,
            inputs.generated_at.format("%Y-%m-%d %H:%M UTC")
        ),
        9.0,
        &font,
    );
    cursor.gap(6.0);

    // KPI block.
    cursor.text("Key Performance Indicators", 12.0, &bold);
    cursor.gap(1.0);
    cursor.wrapped(
        &format!(
            "Mentions: {}   |   MIS: {}   |   MPI: {:.1}%   |   Engagement: {:.1}   |   Reach: {}",
            kpis.total_mentions, kpis.mis, kpis.mpi, kpis.engagement_rate, kpis.reach
        ),
        10.0,
        &font,
    );
    cursor.gap(4.0);

    // Sentiment distribution bars.
    cursor.text("Sentiment Distribution", 12.0, &bold);
    cursor.gap(1.0);
    if kpis.sentiment_ratio.is_empty() {
        cursor.text("No labelled mentions in the window.", 9.0, &font);
    } else {
        for (label, pct) in &kpis.sentiment_ratio {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let bar = "=".repeat((pct / 2.0).round() as usize);
            cursor.text(
                &format!("{:<13} {pct:>5.1}%  {bar}", label.as_str()),
                8.0,
                &mono,
            );
        }
    }
    cursor.gap(4.0);

    // Share of voice.
    cursor.text("Share of Voice", 12.0, &bold);
    cursor.gap(1.0);
    if kpis.sov.is_empty() {
        cursor.text(&format!("{:<20} {:>5.1}%", brief.brand, 0.0), 8.0, &mono);
    } else {
        for entry in &kpis.sov {
            cursor.text(
                &format!("{:<20} {:>5.1}%", entry.brand, entry.share_pct),
                8.0,
                &mono,
            );
        }
    }
    cursor.gap(4.0);

    // Keywords.
    cursor.text("Top Keywords / Themes", 12.0, &bold);
    cursor.gap(1.0);
    if inputs.keywords.is_empty() {
        cursor.text("No keywords identified.", 9.0, &font);
    } else {
        for (keyword, freq) in inputs.keywords {
            cursor.text(&format!("{keyword}: {freq}"), 9.0, &font);
        }
    }

    // Model summary.
    if let Some(text) = summary {
        cursor.gap(4.0);
        cursor.text("AI Summary", 12.0, &bold);
        cursor.gap(1.0);
        cursor.wrapped(text, 9.0, &font);
    }

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| ReportError::Pdf(format!("save error: {e}")))?;
    buf.into_inner()
        .map_err(|e| ReportError::Pdf(format!("buffer error: {e}")))
}

/// Descending layout cursor that opens a new page when the current one
/// runs out.
struct Cursor<'a> {
    doc: &'a printpdf::PdfDocumentReference,
    layer: PdfLayerReference,
    y: f32,
}

impl Cursor<'_> {
    fn line_advance(size: f32) -> f32 {
        size * 0.55
    }

    fn ensure_room(&mut self, needed: f32) {
        if self.y - needed < BOTTOM_Y {
            let (page, layer) = self.doc.add_page(Mm(PAGE_W), Mm(PAGE_H), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = TOP_Y;
        }
    }

    fn text(&mut self, text: &str, size: f32, font: &IndirectFontRef) {
        let advance = Self::line_advance(size);
        self.ensure_room(advance);
        self.layer
            .use_text(text, size, Mm(MARGIN_X), Mm(self.y), font);
        self.y -= advance;
    }

    fn wrapped(&mut self, text: &str, size: f32, font: &IndirectFontRef) {
        for line in wrap_text(text, WRAP_WIDTH) {
            if line.is_empty() {
                self.gap(2.0);
            } else {
                self.text(&line, size, font);
            }
        }
    }

    fn gap(&mut self, mm: f32) {
        self.y -= mm;
    }
}

/// Greedy word wrap preserving paragraph breaks.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        if paragraph.trim().is_empty() {
            lines.push(String::new());
            continue;
        }
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if !current.is_empty() && current.len() + 1 + word.len() > width {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}
