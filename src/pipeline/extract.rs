//! Visit record extraction from raw calendar events.
//!
//! Descriptions are free text that went through years of convention
//! drift, so every field is matched against the union of the observed
//! label styles. Extraction is total: a malformed event degrades field by
//! field, it never aborts the batch.

use regex::Regex;

use crate::calendar::CalendarEvent;
use crate::pipeline::rules;
use crate::pipeline::types::{UrgencyTier, VisitRecord};

/// A labeled-line rule: the capture group holds the field value.
struct LabelRule {
    regex: Regex,
}

impl LabelRule {
    fn new(pattern: &str) -> Self {
        Self {
            regex: Regex::new(pattern).unwrap(),
        }
    }

    fn capture<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.regex
            .captures(line)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim())
            .filter(|v| !v.is_empty())
    }
}

/// Tolerant extractor over the union of historical label conventions.
///
/// Matching is case-sensitive; a leading emoji on a labeled line is
/// optional decoration, not part of the label. The first matching line
/// per field wins.
pub struct VisitExtractor {
    phone_rules: Vec<LabelRule>,
    address_rules: Vec<LabelRule>,
    problem_rules: Vec<LabelRule>,
    visit_type_rules: Vec<LabelRule>,
}

impl Default for VisitExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl VisitExtractor {
    pub fn new() -> Self {
        Self {
            phone_rules: vec![
                LabelRule::new(r"^(?:📞\s*)?(?:Telefon|Tel)\.?:\s*(.+)$"),
                // Oldest convention: the number alone, flagged by a
                // trailing phone glyph.
                LabelRule::new(r"^(.+?)\s*📞$"),
            ],
            address_rules: vec![LabelRule::new(
                r"^(?:📍\s*)?(?:Adres|Lokalizacja):\s*(.+)$",
            )],
            problem_rules: vec![LabelRule::new(
                r"^(?:🔧\s*)?(?:Problem|Opis|Usterka):\s*(.+)$",
            )],
            visit_type_rules: vec![LabelRule::new(
                r"^(?:🏷\u{fe0f}?\s*)?(?:Typ wizyty|Typ|Pilność):\s*(.+)$",
            )],
        }
    }

    /// Turn one calendar event into a visit record. Never fails.
    pub fn extract(&self, event: &CalendarEvent) -> VisitRecord {
        let summary = event.summary.clone().unwrap_or_default();

        let mut phone: Option<String> = None;
        let mut desc_address: Option<String> = None;
        let mut problem: Option<String> = None;
        let mut explicit_tier: Option<UrgencyTier> = None;

        for line in event.description.as_deref().unwrap_or("").lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if phone.is_none() {
                phone = first_capture(&self.phone_rules, line);
            }
            if desc_address.is_none() {
                desc_address = first_capture(&self.address_rules, line);
            }
            if problem.is_none() {
                problem = first_capture(&self.problem_rules, line);
            }
            if explicit_tier.is_none() {
                explicit_tier = first_capture(&self.visit_type_rules, line)
                    .as_deref()
                    .and_then(rules::parse_tier_value);
            }
        }

        // The event's own location field outranks a description address.
        let address = event
            .location
            .clone()
            .filter(|l| !l.trim().is_empty())
            .or(desc_address);

        let tier = rules::classify(&summary, explicit_tier);

        VisitRecord {
            start_time: event.start.map(|dt| dt.time()),
            summary,
            address,
            phone,
            problem,
            tier,
        }
    }
}

fn first_capture(rules: &[LabelRule], line: &str) -> Option<String> {
    rules
        .iter()
        .find_map(|r| r.capture(line))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn make_event(
        summary: &str,
        description: Option<&str>,
        location: Option<&str>,
    ) -> CalendarEvent {
        CalendarEvent {
            summary: Some(summary.to_string()),
            description: description.map(String::from),
            location: location.map(String::from),
            start: DateTime::parse_from_rfc3339("2026-08-05T10:00:00+02:00").ok(),
            end: None,
        }
    }

    #[test]
    fn bare_event_yields_all_optionals_absent() {
        let extractor = VisitExtractor::new();
        let event = CalendarEvent::default();
        let visit = extractor.extract(&event);
        assert_eq!(visit.summary, "");
        assert!(visit.address.is_none());
        assert!(visit.phone.is_none());
        assert!(visit.problem.is_none());
        assert!(visit.start_time.is_none());
        assert_eq!(visit.tier, UrgencyTier::Standard);
    }

    #[test]
    fn empty_description_yields_no_fields() {
        let extractor = VisitExtractor::new();
        let visit = extractor.extract(&make_event("Przegląd", Some(""), None));
        assert!(visit.address.is_none());
        assert!(visit.phone.is_none());
        assert!(visit.problem.is_none());
        assert_eq!(visit.tier, UrgencyTier::Standard);
    }

    #[test]
    fn phone_label_with_emoji_decoration() {
        let extractor = VisitExtractor::new();
        let visit = extractor.extract(&make_event(
            "Naprawa",
            Some("📞 Telefon: 600 100 200"),
            None,
        ));
        assert_eq!(visit.phone.as_deref(), Some("600 100 200"));
    }

    #[test]
    fn phone_label_without_emoji() {
        let extractor = VisitExtractor::new();
        let visit = extractor.extract(&make_event("Naprawa", Some("Tel: 601 202 303"), None));
        assert_eq!(visit.phone.as_deref(), Some("601 202 303"));
    }

    #[test]
    fn phone_trailing_glyph_convention() {
        let extractor = VisitExtractor::new();
        let visit = extractor.extract(&make_event("Naprawa", Some("602 303 404 📞"), None));
        assert_eq!(visit.phone.as_deref(), Some("602 303 404"));
    }

    #[test]
    fn first_matching_phone_line_wins() {
        let extractor = VisitExtractor::new();
        let visit = extractor.extract(&make_event(
            "Naprawa",
            Some("Telefon: 600 000 001\nTelefon: 600 000 002"),
            None,
        ));
        assert_eq!(visit.phone.as_deref(), Some("600 000 001"));
    }

    #[test]
    fn location_field_outranks_description_address() {
        let extractor = VisitExtractor::new();
        let visit = extractor.extract(&make_event(
            "Naprawa",
            Some("📍 Adres: Długa 5, Wrocław"),
            Some("Rynek 1, Świebodzice"),
        ));
        assert_eq!(visit.address.as_deref(), Some("Rynek 1, Świebodzice"));
    }

    #[test]
    fn description_address_used_when_location_absent() {
        let extractor = VisitExtractor::new();
        let visit =
            extractor.extract(&make_event("Naprawa", Some("Adres: Długa 5, Wrocław"), None));
        assert_eq!(visit.address.as_deref(), Some("Długa 5, Wrocław"));
    }

    #[test]
    fn blank_location_does_not_shadow_description_address() {
        let extractor = VisitExtractor::new();
        let visit = extractor.extract(&make_event(
            "Naprawa",
            Some("Adres: Długa 5, Wrocław"),
            Some("   "),
        ));
        assert_eq!(visit.address.as_deref(), Some("Długa 5, Wrocław"));
    }

    #[test]
    fn problem_line_variants() {
        let extractor = VisitExtractor::new();
        for line in ["Problem: kapie z zaworu", "Opis: kapie z zaworu", "🔧 Usterka: kapie z zaworu"]
        {
            let visit = extractor.extract(&make_event("Naprawa", Some(line), None));
            assert_eq!(visit.problem.as_deref(), Some("kapie z zaworu"), "{line}");
        }
    }

    #[test]
    fn visit_type_tag_sets_tier() {
        let extractor = VisitExtractor::new();
        let visit = extractor.extract(&make_event(
            "Naprawa",
            Some("Typ wizyty: pilna"),
            None,
        ));
        assert_eq!(visit.tier, UrgencyTier::Urgent);
    }

    #[test]
    fn visit_type_tag_beats_title_marker() {
        let extractor = VisitExtractor::new();
        let visit = extractor.extract(&make_event(
            "🔥 Awaria",
            Some("Pilność: standardowa"),
            None,
        ));
        assert_eq!(visit.tier, UrgencyTier::Standard);
    }

    #[test]
    fn unrecognized_tag_value_falls_back_to_title() {
        let extractor = VisitExtractor::new();
        let visit = extractor.extract(&make_event("⚠️ Wyciek", Some("Typ: zwykła"), None));
        assert_eq!(visit.tier, UrgencyTier::Urgent);
    }

    #[test]
    fn spec_scenario_red_marker_with_location() {
        let extractor = VisitExtractor::new();
        let visit = extractor.extract(&make_event("🔴 Pilna naprawa", None, Some("Rynek 1")));
        assert_eq!(visit.tier, UrgencyTier::Immediate);
        assert_eq!(visit.address.as_deref(), Some("Rynek 1"));
        assert_eq!(visit.time_display(), "10:00");
    }

    #[test]
    fn multi_line_description_extracts_each_field() {
        let extractor = VisitExtractor::new();
        let visit = extractor.extract(&make_event(
            "Naprawa",
            Some("📞 Telefon: 600 100 200\n📍 Adres: Długa 5\n🔧 Problem: cieknie kran\nTyp: pilna"),
            None,
        ));
        assert_eq!(visit.phone.as_deref(), Some("600 100 200"));
        assert_eq!(visit.address.as_deref(), Some("Długa 5"));
        assert_eq!(visit.problem.as_deref(), Some("cieknie kran"));
        assert_eq!(visit.tier, UrgencyTier::Urgent);
    }

    #[test]
    fn labels_are_case_sensitive() {
        let extractor = VisitExtractor::new();
        let visit = extractor.extract(&make_event("Naprawa", Some("telefon: 600"), None));
        assert!(visit.phone.is_none());
    }
}
