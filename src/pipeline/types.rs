//! Shared types for the visit pipeline.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Placeholder shown when an event carries no usable start timestamp.
pub const UNKNOWN_TIME: &str = "??:??";

// ── Urgency tier ────────────────────────────────────────────────────

/// Urgency tier of a visit. Closed set — the classifier never produces
/// anything outside these three, so the label/color lookups are total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyTier {
    Standard,
    Urgent,
    Immediate,
}

impl UrgencyTier {
    /// Human label printed under the color bar.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Standard => "Wizyta standardowa",
            Self::Urgent => "Wizyta pilna",
            Self::Immediate => "Wizyta natychmiastowa",
        }
    }

    /// RGB fill color for the report bar and tier label.
    pub fn color(&self) -> (f32, f32, f32) {
        match self {
            Self::Standard => (0.0, 0.5, 0.0),
            Self::Urgent => (1.0, 0.65, 0.0),
            Self::Immediate => (1.0, 0.0, 0.0),
        }
    }

    /// Short identifier for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Urgent => "urgent",
            Self::Immediate => "immediate",
        }
    }
}

// ── Visit record ────────────────────────────────────────────────────

/// One scheduled field-service call, derived from one calendar event.
///
/// Built once by the extractor, never mutated afterwards. Missing
/// address/phone/problem are first-class display states, not errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitRecord {
    /// Wall-clock start, absent for all-day or malformed events.
    pub start_time: Option<NaiveTime>,
    /// Display title, may still carry its urgency marker prefix.
    pub summary: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    /// Free text from a labeled problem line in the description.
    pub problem: Option<String>,
    pub tier: UrgencyTier,
}

impl VisitRecord {
    /// `HH:MM`, or the explicit unknown placeholder.
    pub fn time_display(&self) -> String {
        match self.start_time {
            Some(t) => t.format("%H:%M").to_string(),
            None => UNKNOWN_TIME.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_labels_are_fixed() {
        assert_eq!(UrgencyTier::Standard.label(), "Wizyta standardowa");
        assert_eq!(UrgencyTier::Urgent.label(), "Wizyta pilna");
        assert_eq!(UrgencyTier::Immediate.label(), "Wizyta natychmiastowa");
    }

    #[test]
    fn tier_colors_green_orange_red() {
        assert_eq!(UrgencyTier::Standard.color(), (0.0, 0.5, 0.0));
        assert_eq!(UrgencyTier::Urgent.color(), (1.0, 0.65, 0.0));
        assert_eq!(UrgencyTier::Immediate.color(), (1.0, 0.0, 0.0));
    }

    #[test]
    fn tier_serializes_snake_case() {
        let json = serde_json::to_value(UrgencyTier::Immediate).unwrap();
        assert_eq!(json, serde_json::json!("immediate"));
    }

    #[test]
    fn time_display_formats_hour_minute() {
        let visit = VisitRecord {
            start_time: NaiveTime::from_hms_opt(9, 5, 0),
            summary: "Przegląd".into(),
            address: None,
            phone: None,
            problem: None,
            tier: UrgencyTier::Standard,
        };
        assert_eq!(visit.time_display(), "09:05");
    }

    #[test]
    fn time_display_unknown_placeholder() {
        let visit = VisitRecord {
            start_time: None,
            summary: "Przegląd".into(),
            address: None,
            phone: None,
            problem: None,
            tier: UrgencyTier::Standard,
        };
        assert_eq!(visit.time_display(), UNKNOWN_TIME);
    }
}
