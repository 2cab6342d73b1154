//! Calendar collaborator boundary.
//!
//! The pipeline only needs "the day's events, chronologically" — provider
//! authentication and transport live behind [`CalendarProvider`].

pub mod google;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate};

use crate::error::CalendarError;

pub use google::GoogleCalendar;

/// One raw calendar event. Untrusted text throughout — no invariants are
/// enforced here; the extractor degrades missing fields, never errors.
#[derive(Debug, Clone, Default)]
pub struct CalendarEvent {
    pub summary: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start: Option<DateTime<FixedOffset>>,
    pub end: Option<DateTime<FixedOffset>>,
}

/// Calendar provider operations consumed by the pipeline.
#[async_trait]
pub trait CalendarProvider: Send + Sync {
    /// Fetch the events for one day, ordered chronologically by start.
    /// The returned order must be preserved by every downstream consumer.
    async fn events_for_day(
        &self,
        day: NaiveDate,
    ) -> Result<Vec<CalendarEvent>, CalendarError>;
}
