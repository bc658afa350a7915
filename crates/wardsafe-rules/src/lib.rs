//! # wardsafe-rules
//!
//! TOML-driven adverse drug event rules for WardSafe.
//!
//! ## Overview
//!
//! This crate provides [`RuleTable`], which implements the
//! [`AdverseEventDetector`](wardsafe_core::traits::AdverseEventDetector)
//! trait, and the two pure checkers behind it:
//!
//! - [`check_interactions`]: drug-drug combinations, all tokens required
//! - [`check_reactions`]: drug-symptom pairs, one match per qualifying pair
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use wardsafe_rules::RuleTable;
//!
//! let table = Arc::new(RuleTable::builtin()?);
//! let matches = table.interactions(&["Furosemide 40mg", "Lisinopril 10mg"]);
//! ```
//!
//! ## Token matching
//!
//! Tokens are compared case-insensitively. In the default `substring` mode a
//! token may sit inside a longer word, so false positives are possible and
//! accepted. Tables may opt into `match_mode = "word"` instead.

pub mod checker;
pub mod rule;
pub mod table;

pub use checker::{check_interactions, check_reactions};
pub use rule::{InteractionRule, MatchMode, ReactionRule, RuleTableConfig};
pub use table::{RuleTable, DEFAULT_RULES};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;

    use wardsafe_contracts::{
        alert::{AdverseEvent, Severity},
        error::WardError,
        patient::{Medication, MedicationStatus, Patient, Symptom},
    };
    use wardsafe_core::{sink::InMemoryAlertSink, traits::AdverseEventDetector, AdverseEventMonitor};

    use crate::{MatchMode, RuleTable};

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn builtin() -> RuleTable {
        RuleTable::builtin().unwrap()
    }

    fn config_error(result: Result<RuleTable, WardError>) -> String {
        match result {
            Err(WardError::ConfigError { reason }) => reason,
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    // ── 1. built-in table ─────────────────────────────────────────────────────

    #[test]
    fn test_builtin_table_loads() {
        let table = builtin();
        assert_eq!(table.interaction_rules().len(), 3);
        assert_eq!(table.reaction_rules().len(), 3);
        assert_eq!(table.match_mode(), MatchMode::Substring);
    }

    // ── 2. interaction checker ────────────────────────────────────────────────

    /// furosemide + lisinopril → exactly one high-severity match.
    #[test]
    fn test_interaction_pair_matches_once() {
        let matches = builtin().interactions(&["Furosemide 40mg", "Lisinopril 10mg"]);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].rule_id, "furosemide-lisinopril");
        assert_eq!(matches[0].severity, Severity::High);
        assert_eq!(matches[0].description, "May cause excessive blood pressure reduction");
    }

    #[test]
    fn test_interaction_is_case_insensitive() {
        let matches = builtin().interactions(&["FUROSEMIDE", "lisinopril"]);
        assert_eq!(matches.len(), 1);

        let matches = builtin().interactions(&["fUrOsEmIdE iv", "LiSiNoPrIl"]);
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn test_interaction_requires_every_token() {
        let table = builtin();
        assert!(table.interactions(&["Furosemide 40mg"]).is_empty());
        assert!(table.interactions(&["Lisinopril 10mg", "Paracetamol 1g"]).is_empty());
    }

    #[test]
    fn test_empty_medication_list_yields_nothing() {
        assert!(builtin().interactions(&[]).is_empty());
        assert!(builtin().reactions(&[], &["Rash"]).is_empty());
        assert!(builtin().reactions(&["Amoxicillin"], &[]).is_empty());
    }

    /// Matches follow table order and are not deduplicated across rules.
    #[test]
    fn test_interactions_follow_table_order() {
        let matches = builtin().interactions(&[
            "Lisinopril 10mg",
            "Cefazolin 1g",
            "Paracetamol 1g",
            "Tramadol 50mg",
            "Furosemide 40mg",
            "Amoxicillin 500mg",
        ]);

        let ids: Vec<&str> = matches.iter().map(|m| m.rule_id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["amoxicillin-paracetamol", "furosemide-lisinopril", "tramadol-cefazolin"]
        );
    }

    /// One medication name may satisfy several tokens of the same rule.
    #[test]
    fn test_single_combination_product_satisfies_rule() {
        let matches = builtin().interactions(&["Amoxicillin/Paracetamol combination"]);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].rule_id, "amoxicillin-paracetamol");
    }

    // ── 3. reaction checker ───────────────────────────────────────────────────

    #[test]
    fn test_reaction_description_names_the_pair() {
        let matches = builtin().reactions(&["Amoxicillin 500mg"], &["Skin rash"]);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].medication, "Amoxicillin 500mg");
        assert_eq!(matches[0].symptom, "Skin rash");
        assert_eq!(matches[0].severity, Severity::High);
        assert_eq!(
            matches[0].description,
            "Amoxicillin 500mg may cause Skin rash: Possible allergic reaction"
        );
    }

    /// Multiplicity is qualifying medications × qualifying symptoms.
    #[test]
    fn test_reaction_multiplicity_is_a_product() {
        let matches = builtin().reactions(
            &["Tramadol 50mg", "Tramadol SR 100mg", "Paracetamol 1g"],
            &["Nausea", "Headache", "Mild nausea after meals"],
        );

        assert_eq!(matches.len(), 4);
        assert!(matches.iter().all(|m| m.rule_id == "tramadol-nausea"));

        // Medication-major, then symptom.
        let pairs: Vec<(&str, &str)> = matches
            .iter()
            .map(|m| (m.medication.as_str(), m.symptom.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("Tramadol 50mg", "Nausea"),
                ("Tramadol 50mg", "Mild nausea after meals"),
                ("Tramadol SR 100mg", "Nausea"),
                ("Tramadol SR 100mg", "Mild nausea after meals"),
            ]
        );
    }

    #[test]
    fn test_reaction_needs_both_tokens_in_the_same_pair() {
        let matches = builtin().reactions(&["Furosemide 40mg"], &["Nausea"]);
        assert!(matches.is_empty());
    }

    // ── 4. match modes ────────────────────────────────────────────────────────

    const WORD_TABLE: &str = r#"
        match_mode = "word"

        [[interactions]]
        id = "tramadol-cefazolin"
        drugs = ["tramadol", "cefazolin"]
        severity = "low"
        description = "Monitor for enhanced sedative effects"

        [[reactions]]
        id = "tramadol-nausea"
        drug = "tramadol"
        symptom = "nausea"
        severity = "medium"
        description = "Common side effect"
    "#;

    #[test]
    fn test_substring_mode_accepts_sub_word_hits() {
        let matches = builtin().interactions(&["Tramadolex", "Cefazolin"]);
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn test_word_mode_rejects_sub_word_hits() {
        let table = RuleTable::from_toml_str(WORD_TABLE).unwrap();
        assert_eq!(table.match_mode(), MatchMode::Word);

        assert!(table.interactions(&["Tramadolex", "Cefazolin"]).is_empty());
        assert_eq!(table.interactions(&["Tramadol 50mg", "Cefazolin/IV"]).len(), 1);

        assert!(table.reactions(&["Tramadol"], &["Antinausea given"]).is_empty());
        assert_eq!(table.reactions(&["tramadol"], &["Nausea, mild"]).len(), 1);
    }

    #[test]
    fn test_word_mode_boundaries() {
        assert!(MatchMode::Word.contains("tramadol", "tramadol"));
        assert!(MatchMode::Word.contains("(tramadol)", "tramadol"));
        assert!(MatchMode::Word.contains("xtramadol tramadol", "tramadol"));
        assert!(!MatchMode::Word.contains("tramadol2", "tramadol"));
        assert!(!MatchMode::Word.contains("anything", ""));
    }

    #[test]
    fn test_word_mode_finds_overlapping_hits() {
        // "a a" first hits at byte 1 (after 'x'), the bounded hit is at byte 3.
        assert!(MatchMode::Word.contains("xa a a", "a a"));
        assert!(MatchMode::Word.contains("xaspirin aspirin", "aspirin"));
        assert!(!MatchMode::Word.contains("xa a ax", "a a ax"));
        assert!(MatchMode::Word.contains("xé é é", "é é"));
    }

    // ── 5. configuration errors ───────────────────────────────────────────────

    #[test]
    fn test_toml_parse_error() {
        let reason = config_error(RuleTable::from_toml_str("this is not valid toml ][[["));
        assert!(reason.contains("failed to parse rule table TOML"), "got: {reason}");
    }

    #[test]
    fn test_unknown_severity_is_rejected() {
        let toml = r#"
            [[interactions]]
            id = "x"
            drugs = ["a", "b"]
            severity = "catastrophic"
            description = "?"
        "#;
        config_error(RuleTable::from_toml_str(toml));
    }

    #[test]
    fn test_duplicate_rule_id_is_rejected() {
        let toml = r#"
            [[interactions]]
            id = "dup"
            drugs = ["a", "b"]
            severity = "low"
            description = "first"

            [[reactions]]
            id = "dup"
            drug = "a"
            symptom = "rash"
            severity = "low"
            description = "second"
        "#;
        let reason = config_error(RuleTable::from_toml_str(toml));
        assert!(reason.contains("duplicate rule id 'dup'"), "got: {reason}");
    }

    #[test]
    fn test_blank_tokens_are_rejected() {
        let empty_drugs = r#"
            [[interactions]]
            id = "empty"
            drugs = []
            severity = "low"
            description = "never"
        "#;
        assert!(config_error(RuleTable::from_toml_str(empty_drugs)).contains("lists no drugs"));

        let blank_symptom = r#"
            [[reactions]]
            id = "blank"
            drug = "amoxicillin"
            symptom = "  "
            severity = "low"
            description = "matches everything"
        "#;
        assert!(config_error(RuleTable::from_toml_str(blank_symptom)).contains("blank symptom token"));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let reason = config_error(RuleTable::from_file(std::path::Path::new(
            "/nonexistent/wardsafe/rules.toml",
        )));
        assert!(reason.contains("failed to read rule table"), "got: {reason}");
    }

    // ── 6. monitor integration ────────────────────────────────────────────────

    #[test]
    fn test_monitor_scans_with_builtin_table() {
        let med = |id: &str, name: &str, status| Medication {
            id: id.to_string(),
            name: name.to_string(),
            dosage: String::new(),
            frequency: String::new(),
            route: "Oral".to_string(),
            status,
        };
        let patient = Patient {
            id: "2".to_string(),
            name: "Ward Patient".to_string(),
            medications: vec![
                med("m3", "Furosemide", MedicationStatus::Active),
                med("m4", "Lisinopril", MedicationStatus::Active),
                med("m9", "Amoxicillin", MedicationStatus::Discontinued),
            ],
            symptoms: vec![
                Symptom {
                    id: "s1".to_string(),
                    description: "Dizziness on standing".to_string(),
                    severity: 2,
                    recorded_at: Utc::now(),
                    notes: None,
                },
                Symptom {
                    id: "s2".to_string(),
                    description: "Rash".to_string(),
                    severity: 1,
                    recorded_at: Utc::now(),
                    notes: None,
                },
            ],
        };

        let sink = InMemoryAlertSink::new();
        let handle = sink.clone();
        let monitor = AdverseEventMonitor::new(Arc::new(builtin()), Box::new(sink));

        let events = monitor.scan(&patient).unwrap();

        // Interaction first, then the dizziness reaction. The rash reaction
        // does not fire because amoxicillin is discontinued.
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[0], AdverseEvent::Interaction(m) if m.rule_id == "furosemide-lisinopril"));
        assert!(matches!(&events[1], AdverseEvent::Reaction(m) if m.rule_id == "furosemide-dizziness"));
        assert_eq!(handle.len().unwrap(), 2);
    }
}
