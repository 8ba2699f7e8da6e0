//! Ticket rendering.
//!
//! A ticket is derived on demand from a registration joined with its event
//! and attendee; nothing is persisted. The output is a single A4 PDF page
//! with an event summary, attendee details and a QR code carrying a
//! [`VerificationPayload`]. Missing optional values render as `N/A`, and a QR
//! encoding failure still yields a ticket (without the code).

use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Point, Polygon, Rgb,
};
use serde::Serialize;

use crate::error::CoreError;
use crate::registration::RegistrationStatus;
use crate::types::{DbId, Timestamp};

pub const TICKET_CONTENT_TYPE: &str = "application/pdf";

/// Placeholder for values the ticket cannot resolve.
pub const PLACEHOLDER: &str = "N/A";

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
const QR_SIZE_MM: f32 = 40.0;
/// Quiet zone around the QR code, in modules.
const QR_QUIET_ZONE: usize = 2;

// ---------------------------------------------------------------------------
// Input data
// ---------------------------------------------------------------------------

/// Everything a ticket shows, flattened from registration, event and user.
#[derive(Debug, Clone)]
pub struct TicketData {
    pub registration_id: DbId,
    pub event_id: DbId,
    pub user_id: DbId,
    pub status: RegistrationStatus,
    pub registered_at: Timestamp,
    pub event_title: Option<String>,
    pub event_category: Option<String>,
    pub event_location: Option<String>,
    pub event_start: Option<Timestamp>,
    pub event_end: Option<Timestamp>,
    pub attendee_name: Option<String>,
    pub attendee_email: Option<String>,
    pub attendee_college: Option<String>,
}

impl TicketData {
    pub fn verification_payload(&self) -> VerificationPayload {
        VerificationPayload {
            registration_id: self.registration_id,
            event_id: self.event_id,
            user_id: self.user_id,
        }
    }
}

/// The data encoded in the QR code, checked by door staff at the entrance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationPayload {
    pub registration_id: DbId,
    pub event_id: DbId,
    pub user_id: DbId,
}

impl VerificationPayload {
    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string(self)
            .map_err(|e| CoreError::Internal(format!("Failed to encode ticket payload: {e}")))
    }
}

/// Output of [`render_ticket_pdf`].
#[derive(Debug, Clone)]
pub struct RenderedTicket {
    pub bytes: Vec<u8>,
    /// `false` when the QR code could not be produced and was left out.
    pub qr_embedded: bool,
}

// ---------------------------------------------------------------------------
// Filename
// ---------------------------------------------------------------------------

/// Attachment filename: `<title>_Ticket_<id>.pdf`.
///
/// Characters outside `[A-Za-z0-9_\- ]` become `_`; a missing or blank title
/// falls back to `ticket`.
pub fn ticket_filename(event_title: Option<&str>, registration_id: DbId) -> String {
    let safe: String = event_title
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| {
            t.chars()
                .map(|c| {
                    if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | ' ') {
                        c
                    } else {
                        '_'
                    }
                })
                .collect()
        })
        .unwrap_or_else(|| "ticket".to_string());
    format!("{safe}_Ticket_{registration_id}.pdf")
}

// ---------------------------------------------------------------------------
// QR matrix
// ---------------------------------------------------------------------------

/// A square grid of QR modules, `true` meaning dark.
#[derive(Debug, Clone)]
pub struct QrMatrix {
    pub width: usize,
    pub modules: Vec<bool>,
}

impl QrMatrix {
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        self.modules[y * self.width + x]
    }
}

/// Encode arbitrary text as a QR matrix.
pub fn encode_qr(data: &str) -> Result<QrMatrix, CoreError> {
    let code = qrcode::QrCode::new(data.as_bytes())
        .map_err(|e| CoreError::Internal(format!("QR encoding failed: {e}")))?;
    let width = code.width();
    let modules = code
        .to_colors()
        .into_iter()
        .map(|c| c == qrcode::Color::Dark)
        .collect();
    Ok(QrMatrix { width, modules })
}

// ---------------------------------------------------------------------------
// Text layout
// ---------------------------------------------------------------------------

/// Visual weight of a line of ticket text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Title,
    Heading,
    Body,
    Muted,
}

impl LineStyle {
    fn font_size(self) -> f32 {
        match self {
            Self::Title => 20.0,
            Self::Heading => 14.0,
            Self::Body => 11.0,
            Self::Muted => 9.0,
        }
    }

    /// Vertical space consumed by the line, in mm.
    fn advance(self) -> f32 {
        match self {
            Self::Title => 12.0,
            Self::Heading => 9.0,
            Self::Body => 6.5,
            Self::Muted => 6.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketLine {
    pub style: LineStyle,
    pub text: String,
}

fn line(style: LineStyle, text: impl Into<String>) -> TicketLine {
    TicketLine {
        style,
        text: text.into(),
    }
}

fn or_placeholder(value: Option<&str>) -> &str {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(PLACEHOLDER)
}

fn format_date(ts: Option<Timestamp>) -> String {
    ts.map(|t| t.format("%a %b %d %Y").to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// The ticket's text content, top to bottom.
pub fn ticket_lines(data: &TicketData, generated_at: Timestamp) -> Vec<TicketLine> {
    vec![
        line(LineStyle::Title, "Event Ticket"),
        line(
            LineStyle::Muted,
            format!("Generated: {}", generated_at.format("%Y-%m-%d %H:%M UTC")),
        ),
        line(
            LineStyle::Heading,
            or_placeholder(data.event_title.as_deref()).to_string(),
        ),
        line(
            LineStyle::Body,
            format!("Category: {}", or_placeholder(data.event_category.as_deref())),
        ),
        line(
            LineStyle::Body,
            format!("Location: {}", or_placeholder(data.event_location.as_deref())),
        ),
        line(
            LineStyle::Body,
            format!(
                "Dates: {} - {}",
                format_date(data.event_start),
                format_date(data.event_end)
            ),
        ),
        line(LineStyle::Heading, "Attendee"),
        line(
            LineStyle::Body,
            format!("Name: {}", or_placeholder(data.attendee_name.as_deref())),
        ),
        line(
            LineStyle::Body,
            format!("Email: {}", or_placeholder(data.attendee_email.as_deref())),
        ),
        line(
            LineStyle::Body,
            format!("College: {}", or_placeholder(data.attendee_college.as_deref())),
        ),
        line(
            LineStyle::Body,
            format!("Registration ID: {}", data.registration_id),
        ),
        line(LineStyle::Body, format!("Status: {}", data.status)),
        line(
            LineStyle::Body,
            format!(
                "Registered On: {}",
                data.registered_at.format("%Y-%m-%d %H:%M UTC")
            ),
        ),
    ]
}

const FOOTER: &str = "Present this ticket at the event entrance. QR code verifies your registration.";

/// Average Helvetica glyph width as a fraction of the font size.
const AVG_GLYPH_EM: f32 = 0.55;
const PT_TO_MM: f32 = 0.3528;

impl LineStyle {
    /// Characters that fit between the side margins at this size.
    fn max_chars(self) -> usize {
        let usable = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;
        (usable / (self.font_size() * PT_TO_MM * AVG_GLYPH_EM)) as usize
    }
}

/// Replace characters the built-in fonts cannot encode.
///
/// The standard PDF fonts cover Latin-1 only; anything else becomes `?`.
fn printable(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\t' | '\n' | '\r' => ' ',
            ' '..='~' | '\u{a0}'..='\u{ff}' => c,
            _ => '?',
        })
        .collect()
}

/// Greedy word wrap to at most `width` characters per line. Words longer
/// than a line are split.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        let needed = if current_len == 0 { word.len() } else { current_len + 1 + word.len() };
        if needed > width {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current_len += word.len();
        current.extend(word);
    }
    if current_len > 0 || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Make lines safe to draw: encodable characters, none wider than the page.
pub fn layout_lines(lines: Vec<TicketLine>) -> Vec<TicketLine> {
    lines
        .into_iter()
        .flat_map(|l| {
            let style = l.style;
            wrap(&printable(&l.text), style.max_chars())
                .into_iter()
                .map(move |text| TicketLine { style, text })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// PDF rendering
// ---------------------------------------------------------------------------

/// Render the ticket PDF. QR failures degrade to a ticket without a code.
pub fn render_ticket_pdf(
    data: &TicketData,
    generated_at: Timestamp,
) -> Result<RenderedTicket, CoreError> {
    let qr = data
        .verification_payload()
        .to_json()
        .and_then(|payload| encode_qr(&payload))
        .ok();
    render_document(data, generated_at, qr.as_ref())
}

fn pdf_error(e: printpdf::Error) -> CoreError {
    CoreError::Internal(format!("PDF rendering failed: {e}"))
}

fn render_document(
    data: &TicketData,
    generated_at: Timestamp,
    qr: Option<&QrMatrix>,
) -> Result<RenderedTicket, CoreError> {
    let title = format!("Ticket {}", data.registration_id);
    let (doc, page, layer) = PdfDocument::new(
        title,
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Ticket",
    );
    let layer = doc.get_page(page).get_layer(layer);

    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(pdf_error)?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(pdf_error)?;

    let mut y = PAGE_HEIGHT_MM - MARGIN_MM;
    for l in layout_lines(ticket_lines(data, generated_at)) {
        write_line(&layer, &l, y, &regular, &bold);
        y -= l.style.advance();
    }

    if let Some(matrix) = qr {
        let top = y - 4.0;
        draw_qr(&layer, matrix, PAGE_WIDTH_MM - MARGIN_MM - QR_SIZE_MM, top - QR_SIZE_MM);
        y = top - QR_SIZE_MM - 8.0;
    } else {
        y -= 8.0;
    }

    set_fill(&layer, 0.45);
    for l in layout_lines(vec![line(LineStyle::Muted, FOOTER)]) {
        write_line(&layer, &l, y, &regular, &bold);
        y -= l.style.advance();
    }

    let bytes = doc.save_to_bytes().map_err(pdf_error)?;
    Ok(RenderedTicket {
        bytes,
        qr_embedded: qr.is_some(),
    })
}

fn set_fill(layer: &PdfLayerReference, grey: f32) {
    layer.set_fill_color(Color::Rgb(Rgb::new(grey, grey, grey, None)));
}

fn write_line(
    layer: &PdfLayerReference,
    l: &TicketLine,
    y: f32,
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
) {
    let (font, grey) = match l.style {
        LineStyle::Title | LineStyle::Heading => (bold, 0.0),
        LineStyle::Body => (regular, 0.0),
        LineStyle::Muted => (regular, 0.45),
    };
    set_fill(layer, grey);
    layer.use_text(l.text.clone(), l.style.font_size(), Mm(MARGIN_MM), Mm(y), font);
}

/// Draw dark modules as filled squares with the bottom-left corner at (x, y).
fn draw_qr(layer: &PdfLayerReference, matrix: &QrMatrix, x: f32, y: f32) {
    let cells = matrix.width + 2 * QR_QUIET_ZONE;
    let module = QR_SIZE_MM / cells as f32;
    set_fill(layer, 0.0);

    for row in 0..matrix.width {
        for col in 0..matrix.width {
            if !matrix.is_dark(col, row) {
                continue;
            }
            let left = x + (col + QR_QUIET_ZONE) as f32 * module;
            // Row 0 is the top of the code; PDF y grows upwards.
            let top = y + QR_SIZE_MM - (row + QR_QUIET_ZONE) as f32 * module;
            let bottom = top - module;
            let square = Polygon {
                rings: vec![vec![
                    (Point::new(Mm(left), Mm(bottom)), false),
                    (Point::new(Mm(left + module), Mm(bottom)), false),
                    (Point::new(Mm(left + module), Mm(top)), false),
                    (Point::new(Mm(left), Mm(top)), false),
                ]],
                mode: PaintMode::Fill,
                winding_order: WindingOrder::NonZero,
            };
            layer.add_polygon(square);
        }
    }
}
