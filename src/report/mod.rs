//! Paginated daily report rendering.

pub mod layout;
pub mod pdf;

pub use pdf::render_report;
