//! The Interaction Checker and the Reaction Checker.
//!
//! Both are pure functions over already-loaded rules and already-filtered
//! inputs. Neither deduplicates, short-circuits, or fails; an empty input
//! simply yields no matches.

use tracing::debug;

use wardsafe_contracts::alert::{InteractionMatch, ReactionMatch};

use crate::rule::{InteractionRule, MatchMode, ReactionRule};

/// Flag every interaction rule whose drug tokens are all present.
///
/// A token is present when it occurs (per `mode`) in at least one of the
/// `medications` names. Distinct tokens may be satisfied by the same
/// medication. Matches follow rule order; each rule fires at most once.
pub fn check_interactions(
    rules: &[InteractionRule],
    mode: MatchMode,
    medications: &[&str],
) -> Vec<InteractionMatch> {
    let names: Vec<String> = medications.iter().map(|m| m.to_lowercase()).collect();
    let mut matches = Vec::new();

    for rule in rules {
        if rule.drugs.is_empty() {
            continue;
        }

        let all_present = rule.drugs.iter().all(|drug| {
            let token = drug.to_lowercase();
            names.iter().any(|name| mode.contains(name, &token))
        });
        if !all_present {
            continue;
        }

        debug!(rule_id = %rule.id, severity = %rule.severity, "interaction rule matched");
        matches.push(InteractionMatch {
            rule_id: rule.id.clone(),
            drugs: rule.drugs.clone(),
            severity: rule.severity,
            description: rule.description.clone(),
        });
    }

    matches
}

/// Flag every (medication, symptom, rule) triple where the rule's drug token
/// occurs in the medication name and its symptom token in the symptom text.
///
/// Iteration is medication-major, then symptom, then rule, so the number of
/// matches for one rule is (qualifying medications × qualifying symptoms).
pub fn check_reactions(
    rules: &[ReactionRule],
    mode: MatchMode,
    medications: &[&str],
    symptoms: &[&str],
) -> Vec<ReactionMatch> {
    let tokens: Vec<(String, String)> = rules
        .iter()
        .map(|r| (r.drug.to_lowercase(), r.symptom.to_lowercase()))
        .collect();
    let lowered_symptoms: Vec<String> = symptoms.iter().map(|s| s.to_lowercase()).collect();
    let mut matches = Vec::new();

    for medication in medications {
        let med_name = medication.to_lowercase();

        for (symptom, symptom_desc) in symptoms.iter().zip(&lowered_symptoms) {
            for (rule, (drug_token, symptom_token)) in rules.iter().zip(&tokens) {
                if !(mode.contains(&med_name, drug_token) && mode.contains(symptom_desc, symptom_token)) {
                    continue;
                }

                debug!(
                    rule_id = %rule.id,
                    medication = %medication,
                    symptom = %symptom,
                    "reaction rule matched"
                );
                matches.push(ReactionMatch {
                    rule_id: rule.id.clone(),
                    medication: medication.to_string(),
                    symptom: symptom.to_string(),
                    severity: rule.severity,
                    description: format!("{} may cause {}: {}", medication, symptom, rule.description),
                });
            }
        }
    }

    matches
}
