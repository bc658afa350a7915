//! Adverse event match types.
//!
//! Matches are recomputed on every scan and never cached. Their order is
//! the order the checkers emitted them in.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Clinical severity label attached to a rule and every match it produces.
///
/// Ordered `Low < Medium < High` so callers can sort or threshold alerts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        };
        f.write_str(label)
    }
}

/// A drug-drug interaction rule that fired for a patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionMatch {
    /// Id of the rule that matched.
    pub rule_id: String,
    /// The rule's drug tokens, all of which were found.
    pub drugs: Vec<String>,
    pub severity: Severity,
    pub description: String,
}

/// A drug-symptom reaction rule that fired for one (medication, symptom) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionMatch {
    pub rule_id: String,
    /// The medication name as charted.
    pub medication: String,
    /// The symptom description as recorded.
    pub symptom: String,
    pub severity: Severity,
    /// "<medication> may cause <symptom>: <rule description>"
    pub description: String,
}

/// Anything the adverse event monitor can raise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum AdverseEvent {
    Interaction(InteractionMatch),
    Reaction(ReactionMatch),
}

impl AdverseEvent {
    pub fn severity(&self) -> Severity {
        match self {
            AdverseEvent::Interaction(m) => m.severity,
            AdverseEvent::Reaction(m) => m.severity,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            AdverseEvent::Interaction(m) => &m.description,
            AdverseEvent::Reaction(m) => &m.description,
        }
    }

    pub fn rule_id(&self) -> &str {
        match self {
            AdverseEvent::Interaction(m) => &m.rule_id,
            AdverseEvent::Reaction(m) => &m.rule_id,
        }
    }

    /// Headline shown to clinicians alongside the description.
    pub fn title(&self) -> &'static str {
        match self {
            AdverseEvent::Interaction(_) => "Potential Drug Interaction",
            AdverseEvent::Reaction(_) => "Potential Adverse Drug Reaction",
        }
    }
}

impl From<InteractionMatch> for AdverseEvent {
    fn from(m: InteractionMatch) -> Self {
        AdverseEvent::Interaction(m)
    }
}

impl From<ReactionMatch> for AdverseEvent {
    fn from(m: ReactionMatch) -> Self {
        AdverseEvent::Reaction(m)
    }
}
