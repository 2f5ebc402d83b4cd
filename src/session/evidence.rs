//! Evidence-phrase detection.
//!
//! The checklist site renders each documentary-evidence requirement as a
//! level-3 heading; a country needs evidence when either of two fixed
//! phrases appears in those headings.

/// Phrases whose presence in a heading marks an evidence requirement.
pub const EVIDENCE_PHRASES: [&str; 2] = [
    "evidence of financial capacity",
    "evidence of english language ability",
];

/// Whether any heading contains an evidence phrase, case-insensitively.
///
/// An empty heading set is a negative result.
pub fn headings_contain_evidence<S: AsRef<str>>(headings: &[S]) -> bool {
    headings.iter().any(|heading| {
        let lowered = heading.as_ref().to_lowercase();
        EVIDENCE_PHRASES
            .iter()
            .any(|phrase| lowered.contains(phrase))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_financial_capacity_phrase() {
        let headings = ["Evidence of financial capacity".to_string()];
        assert!(headings_contain_evidence(&headings));
    }

    #[test]
    fn finds_english_ability_phrase() {
        let headings = ["Evidence of English language ability"];
        assert!(headings_contain_evidence(&headings));
    }

    #[test]
    fn match_is_case_insensitive() {
        let headings = ["EVIDENCE OF FINANCIAL CAPACITY"];
        assert!(headings_contain_evidence(&headings));
    }

    #[test]
    fn matches_inside_longer_heading() {
        let headings = ["Step 3: Evidence of financial capacity (mandatory)"];
        assert!(headings_contain_evidence(&headings));
    }

    #[test]
    fn unrelated_headings_do_not_match() {
        let headings = ["Document checklist", "Health requirements"];
        assert!(!headings_contain_evidence(&headings));
    }

    #[test]
    fn empty_heading_set_is_negative() {
        let headings: [&str; 0] = [];
        assert!(!headings_contain_evidence(&headings));
    }

    #[test]
    fn either_phrase_is_sufficient() {
        let headings = ["Health cover", "evidence of english language ability"];
        assert!(headings_contain_evidence(&headings));
    }
}
