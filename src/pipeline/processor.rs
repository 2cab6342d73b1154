//! Dispatch pipeline — one synchronous pass per trigger.
//!
//! Flow: fetch day events → extract + classify → route list → shorten
//! (with fallback) → render PDF → SMS fan-out → email with attachment.
//!
//! The pipeline stops at the first hard failure and everything computed
//! before it is discarded. Already-sent SMS are not retracted when a
//! later stage fails — at-most-once per stage, no compensation.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{debug, info};

use crate::calendar::CalendarProvider;
use crate::channels::compose;
use crate::channels::email::EmailSender;
use crate::channels::sms::{self, SmsGateway};
use crate::config::DispatchConfig;
use crate::error::Result;
use crate::pipeline::extract::VisitExtractor;
use crate::pipeline::types::VisitRecord;
use crate::report;
use crate::route;
use crate::shortlink::{self, LinkShortener};

/// Result of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Report rendered, SMS and email delivered.
    Sent {
        route_link: String,
        /// One `{msisdn}: {status}` entry per recipient, send order.
        sms_status: String,
    },
    /// The calendar had nothing for the day; nothing was sent.
    NoEvents,
}

/// The full pipeline over its collaborators. Stateless between runs —
/// every record, route and document is built fresh per invocation.
pub struct DispatchPipeline {
    config: DispatchConfig,
    calendar: Arc<dyn CalendarProvider>,
    shortener: Arc<dyn LinkShortener>,
    sms: Arc<dyn SmsGateway>,
    mailer: Arc<dyn EmailSender>,
    extractor: VisitExtractor,
}

impl DispatchPipeline {
    pub fn new(
        config: DispatchConfig,
        calendar: Arc<dyn CalendarProvider>,
        shortener: Arc<dyn LinkShortener>,
        sms: Arc<dyn SmsGateway>,
        mailer: Arc<dyn EmailSender>,
    ) -> Self {
        Self {
            config,
            calendar,
            shortener,
            sms,
            mailer,
            extractor: VisitExtractor::new(),
        }
    }

    /// Generate and distribute today's report.
    pub async fn run(&self) -> Result<DispatchOutcome> {
        self.run_for_day(Utc::now().date_naive()).await
    }

    /// Same as [`run`](Self::run) with an explicit day, for tests.
    pub async fn run_for_day(&self, day: NaiveDate) -> Result<DispatchOutcome> {
        let events = self.calendar.events_for_day(day).await?;
        if events.is_empty() {
            info!(%day, "No events for the day, nothing to dispatch");
            return Ok(DispatchOutcome::NoEvents);
        }

        // Extraction is total: a malformed event degrades, never aborts.
        let visits: Vec<VisitRecord> =
            events.iter().map(|e| self.extractor.extract(e)).collect();
        for visit in &visits {
            debug!(
                tier = visit.tier.name(),
                summary = %visit.summary,
                time = %visit.time_display(),
                "Visit classified"
            );
        }
        info!(visits = visits.len(), "Extracted visit records");

        let addresses = route::route_addresses(&self.config.depot_address, &visits);
        let full_url = route::maps_url(&addresses);
        let link = shortlink::shorten_or_fallback(self.shortener.as_ref(), &full_url).await;

        let pdf = report::render_report(&self.config.report_title, &visits)?;
        info!(bytes = pdf.len(), "Report rendered");

        let sms_text = compose::sms_body(&self.config.report_title, &visits, link.url());
        let sms_status =
            sms::send_to_all(self.sms.as_ref(), &self.config.sms_recipients, &sms_text).await?;

        let subject = compose::email_subject(&self.config.report_title, day);
        let body = compose::email_body(link.url(), &sms_status);
        let filename = compose::attachment_filename(day);
        self.mailer
            .send_report(&subject, &body, &filename, pdf)
            .await?;

        info!(route_link = link.url(), "Dispatch complete");
        Ok(DispatchOutcome::Sent {
            route_link: link.url().to_string(),
            sms_status,
        })
    }
}
