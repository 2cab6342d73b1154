//! Urgency classification rules.
//!
//! One fixed, ordered rule table instead of string checks scattered
//! through the renderer. Precedence:
//! 1. explicit visit-type tag from the description (operator-entered),
//! 2. leading `immediate` marker on the title,
//! 3. leading `urgent` marker on the title,
//! 4. default `standard`.
//!
//! The classifier is total — it always returns a tier.

use crate::pipeline::types::UrgencyTier;

/// A title marker and the tier it signals.
#[derive(Debug, Clone, Copy)]
pub struct MarkerRule {
    pub marker: &'static str,
    pub tier: UrgencyTier,
}

/// Title markers in precedence order: all `immediate` markers before all
/// `urgent` ones, so a first-match scan honors the tier precedence.
/// Keywords count only in their all-caps marker form — ordinary prose
/// like "Pilna naprawa" must not escalate a visit.
pub const TITLE_MARKERS: &[MarkerRule] = &[
    MarkerRule { marker: "🔥", tier: UrgencyTier::Immediate },
    MarkerRule { marker: "🔴", tier: UrgencyTier::Immediate },
    MarkerRule { marker: "NATYCHMIAST", tier: UrgencyTier::Immediate },
    MarkerRule { marker: "⚠️", tier: UrgencyTier::Urgent },
    MarkerRule { marker: "⚠", tier: UrgencyTier::Urgent },
    MarkerRule { marker: "🟠", tier: UrgencyTier::Urgent },
    MarkerRule { marker: "PILNE", tier: UrgencyTier::Urgent },
];

/// Classify a visit from its title and an optional explicit tag.
///
/// `explicit` comes from a labeled visit-type line in the description and
/// wins over any title marker.
pub fn classify(summary: &str, explicit: Option<UrgencyTier>) -> UrgencyTier {
    if let Some(tier) = explicit {
        return tier;
    }
    title_marker(summary).unwrap_or(UrgencyTier::Standard)
}

/// First matching leading marker on the title, if any.
pub fn title_marker(summary: &str) -> Option<UrgencyTier> {
    let trimmed = summary.trim_start();
    TITLE_MARKERS
        .iter()
        .find(|rule| trimmed.starts_with(rule.marker))
        .map(|rule| rule.tier)
}

/// Parse the value of a visit-type tag (`Typ wizyty: pilna`).
///
/// Stem-matched and case-insensitive so the historical grammatical
/// variants (`pilna`, `pilne`, `natychmiastowa`, …) all resolve.
/// Unrecognized values return `None` and fall through to title markers.
pub fn parse_tier_value(value: &str) -> Option<UrgencyTier> {
    let value = value.trim().to_lowercase();
    if value.contains("natychmiast") {
        Some(UrgencyTier::Immediate)
    } else if value.contains("piln") {
        Some(UrgencyTier::Urgent)
    } else if value.contains("standard") {
        Some(UrgencyTier::Standard)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fire_glyph_is_immediate() {
        assert_eq!(classify("🔥 Awaria pieca", None), UrgencyTier::Immediate);
    }

    #[test]
    fn red_circle_is_immediate() {
        assert_eq!(classify("🔴 Pilna naprawa", None), UrgencyTier::Immediate);
    }

    #[test]
    fn warning_glyph_is_urgent() {
        assert_eq!(classify("⚠️ Wyciek wody", None), UrgencyTier::Urgent);
    }

    #[test]
    fn bare_warning_glyph_is_urgent() {
        assert_eq!(classify("⚠ Wyciek wody", None), UrgencyTier::Urgent);
    }

    #[test]
    fn caps_keyword_is_a_marker() {
        assert_eq!(classify("PILNE: brak ogrzewania", None), UrgencyTier::Urgent);
        assert_eq!(classify("NATYCHMIAST awaria", None), UrgencyTier::Immediate);
    }

    #[test]
    fn lowercase_prose_does_not_escalate() {
        assert_eq!(classify("Pilna naprawa", None), UrgencyTier::Standard);
        assert_eq!(classify("natychmiastowa wymiana", None), UrgencyTier::Standard);
    }

    #[test]
    fn unmarked_title_defaults_to_standard() {
        assert_eq!(classify("Przegląd", None), UrgencyTier::Standard);
        assert_eq!(classify("", None), UrgencyTier::Standard);
    }

    #[test]
    fn marker_must_lead_the_title() {
        // A glyph buried mid-title is not a marker.
        assert_eq!(classify("Przegląd 🔥 kotła", None), UrgencyTier::Standard);
    }

    #[test]
    fn explicit_tag_beats_title_marker() {
        let explicit = Some(UrgencyTier::Standard);
        assert_eq!(classify("🔥 Awaria", explicit), UrgencyTier::Standard);
    }

    #[test]
    fn immediate_markers_precede_urgent_in_table() {
        let first_urgent = TITLE_MARKERS
            .iter()
            .position(|r| r.tier == UrgencyTier::Urgent)
            .unwrap();
        assert!(
            TITLE_MARKERS[..first_urgent]
                .iter()
                .all(|r| r.tier == UrgencyTier::Immediate)
        );
    }

    #[test]
    fn tier_values_parse_by_stem() {
        assert_eq!(parse_tier_value("pilna"), Some(UrgencyTier::Urgent));
        assert_eq!(parse_tier_value("Pilne"), Some(UrgencyTier::Urgent));
        assert_eq!(
            parse_tier_value("natychmiastowa"),
            Some(UrgencyTier::Immediate)
        );
        assert_eq!(parse_tier_value(" standardowa "), Some(UrgencyTier::Standard));
        assert_eq!(parse_tier_value("zwykła"), None);
    }
}
