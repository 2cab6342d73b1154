//! Page geometry and block layout for the daily report.
//!
//! Everything the renderer draws is decided here: block text, missing-data
//! flags, and which visits land on which page. The renderer only draws.

use crate::pipeline::types::VisitRecord;

// A4 in points.
pub const PAGE_WIDTH: f32 = 595.28;
pub const PAGE_HEIGHT: f32 = 841.89;

/// Left text margin; the color bar starts 5pt further out.
pub const MARGIN_X: f32 = 50.0;
pub const BAR_X: f32 = 45.0;
pub const BAR_WIDTH: f32 = PAGE_WIDTH - 2.0 * BAR_X;
pub const BAR_HEIGHT: f32 = 5.0;

/// Title baseline on every page.
pub const HEADER_Y: f32 = PAGE_HEIGHT - 50.0;
/// Cursor position of the first block, below the header.
pub const FIRST_BLOCK_Y: f32 = PAGE_HEIGHT - 90.0;
/// Fixed vertical space one visit block occupies.
pub const BLOCK_HEIGHT: f32 = 110.0;
/// A block must end above this line or it moves to the next page.
pub const BOTTOM_MARGIN: f32 = 50.0;

/// Red used for missing-data placeholders (and the immediate tier).
pub const MISSING_COLOR: (f32, f32, f32) = (1.0, 0.0, 0.0);

/// Placeholder strings — a missing line is drawn, never omitted.
pub const MISSING_ADDRESS: &str = "Brak adresu";
pub const MISSING_PHONE: &str = "Brak numeru telefonu";

/// Blocks that fit between the first-block cursor and the bottom margin.
pub fn blocks_per_page() -> usize {
    ((FIRST_BLOCK_Y - BOTTOM_MARGIN) / BLOCK_HEIGHT) as usize
}

/// Split visits into pages. Blocks have a fixed height and a page break
/// happens *before* any block that would cross the bottom margin, so
/// pagination reduces to fixed-size chunks; a block is never split.
///
/// Zero visits yield exactly one (empty) page so the document still
/// renders with its header.
pub fn paginate(visits: &[VisitRecord]) -> Vec<&[VisitRecord]> {
    if visits.is_empty() {
        return vec![&[]];
    }
    let per_page = blocks_per_page().max(1);
    visits.chunks(per_page).collect()
}

// ── Block content ───────────────────────────────────────────────────

/// Display content of one visit block, resolved from the record.
#[derive(Debug, Clone, PartialEq)]
pub struct VisitBlock {
    /// Tier label drawn in the tier color under the bar.
    pub tier_label: &'static str,
    pub tier_color: (f32, f32, f32),
    /// `{time} – {summary}` headline.
    pub headline: String,
    pub address_line: String,
    pub address_missing: bool,
    pub phone_line: String,
    pub phone_missing: bool,
    /// Present only when the description carried a problem line.
    pub problem_line: Option<String>,
}

/// Resolve one visit into its drawable block.
pub fn visit_block(visit: &VisitRecord) -> VisitBlock {
    let (address_line, address_missing) = match visit.address.as_deref() {
        Some(address) => (format!("Adres: {address}"), false),
        None => (MISSING_ADDRESS.to_string(), true),
    };
    let (phone_line, phone_missing) = match visit.phone.as_deref() {
        Some(phone) => (format!("Telefon: {phone}"), false),
        None => (MISSING_PHONE.to_string(), true),
    };

    VisitBlock {
        tier_label: visit.tier.label(),
        tier_color: visit.tier.color(),
        headline: format!("{} – {}", visit.time_display(), visit.summary),
        address_line,
        address_missing,
        phone_line,
        phone_missing,
        problem_line: visit.problem.as_ref().map(|p| format!("Problem: {p}")),
    }
}
