//! Google Calendar REST client.
//!
//! Reads one UTC day window with `singleEvents=true` and
//! `orderBy=startTime`, so the API hands back the chronological order the
//! rest of the pipeline preserves. Timestamps that fail to parse degrade
//! to `None` rather than failing the fetch.

use async_trait::async_trait;
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::calendar::{CalendarEvent, CalendarProvider};
use crate::error::CalendarError;

const EVENTS_BASE_URL: &str = "https://www.googleapis.com/calendar/v3/calendars";

/// Google Calendar client over an injected OAuth bearer token.
pub struct GoogleCalendar {
    client: reqwest::Client,
    calendar_id: String,
    token: SecretString,
}

impl GoogleCalendar {
    pub fn new(calendar_id: String, token: SecretString) -> Self {
        Self {
            client: reqwest::Client::new(),
            calendar_id,
            token,
        }
    }
}

// ── Wire format ─────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct EventsResponse {
    #[serde(default)]
    items: Vec<GoogleEvent>,
}

#[derive(Debug, Deserialize)]
struct GoogleEvent {
    summary: Option<String>,
    description: Option<String>,
    location: Option<String>,
    start: Option<EventTime>,
    end: Option<EventTime>,
}

/// Google sends `dateTime` for timed events and `date` for all-day ones.
/// All-day events have no wall-clock start, so only `dateTime` is parsed.
#[derive(Debug, Deserialize)]
struct EventTime {
    #[serde(rename = "dateTime")]
    date_time: Option<String>,
}

impl EventTime {
    fn parse(&self) -> Option<DateTime<FixedOffset>> {
        self.date_time
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
    }
}

impl From<GoogleEvent> for CalendarEvent {
    fn from(e: GoogleEvent) -> Self {
        CalendarEvent {
            summary: e.summary,
            description: e.description,
            location: e.location,
            start: e.start.as_ref().and_then(EventTime::parse),
            end: e.end.as_ref().and_then(EventTime::parse),
        }
    }
}

// ── Provider impl ───────────────────────────────────────────────────

#[async_trait]
impl CalendarProvider for GoogleCalendar {
    async fn events_for_day(
        &self,
        day: NaiveDate,
    ) -> Result<Vec<CalendarEvent>, CalendarError> {
        let window_start = day.and_time(NaiveTime::MIN).and_utc();
        // timeMax is exclusive, so the next midnight covers the whole day.
        let window_end = window_start + Duration::days(1);

        let url = format!("{EVENTS_BASE_URL}/{}/events", self.calendar_id);
        let response = self
            .client
            .get(&url)
            .bearer_auth(self.token.expose_secret())
            .query(&[
                ("timeMin", window_start.to_rfc3339()),
                ("timeMax", window_end.to_rfc3339()),
                ("singleEvents", "true".to_string()),
                ("orderBy", "startTime".to_string()),
            ])
            .send()
            .await
            .map_err(|e| CalendarError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CalendarError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let events: EventsResponse = response
            .json()
            .await
            .map_err(|e| CalendarError::InvalidResponse(e.to_string()))?;

        tracing::info!(
            calendar = %self.calendar_id,
            count = events.items.len(),
            "Fetched day events"
        );

        Ok(events.items.into_iter().map(CalendarEvent::from).collect())
    }
}
