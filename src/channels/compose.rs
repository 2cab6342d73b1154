//! Outbound message bodies — pure formatting, no I/O.
//!
//! SMS and email are built from the same ordered visit list; neither
//! re-sorts, so the visit order in both matches the report.

use chrono::NaiveDate;

use crate::pipeline::types::VisitRecord;

/// Inline placeholder when a visit has no address in the SMS summary.
const SMS_NO_ADDRESS: &str = "brak adresu";

/// Plain-text SMS body: title line, one line per visit, route link last.
pub fn sms_body(title: &str, visits: &[VisitRecord], route_link: &str) -> String {
    let mut body = format!("{title}:\n");
    for visit in visits {
        let address = visit.address.as_deref().unwrap_or(SMS_NO_ADDRESS);
        body.push_str(&format!(
            "{} – {} ({})\n",
            visit.time_display(),
            visit.summary,
            address
        ));
    }
    body.push_str(&format!("Trasa: {route_link}"));
    body
}

/// Email subject: `{title} – {date}`.
pub fn email_subject(title: &str, day: NaiveDate) -> String {
    format!("{title} – {}", day.format("%Y-%m-%d"))
}

/// Plain-text email body: attachment note, route link, SMS status report.
pub fn email_body(route_link: &str, sms_status: &str) -> String {
    format!(
        "Załączony plan dnia w PDF oraz link do trasy:\n{route_link}\n\nStatus wysyłki SMS:\n{sms_status}\n"
    )
}

/// Attachment filename: `plan_dnia_{date}.pdf`.
pub fn attachment_filename(day: NaiveDate) -> String {
    format!("plan_dnia_{}.pdf", day.format("%Y-%m-%d"))
}
