//! Rule types and rule table configuration schema.
//!
//! A `RuleTableConfig` is deserialized from TOML and holds two ordered lists:
//! drug-drug `InteractionRule`s and drug-symptom `ReactionRule`s. Order is
//! significant: matches are emitted in declaration order.

use serde::{Deserialize, Serialize};

use wardsafe_contracts::alert::Severity;

/// How a rule token is located inside a medication name or symptom text.
///
/// Both modes are case-insensitive.
///
/// Example in TOML:
/// ```toml
/// match_mode = "substring"
/// match_mode = "word"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchMode {
    /// The token may appear anywhere, including inside a longer word.
    /// "tramadol" matches "Tramadolex".
    #[default]
    Substring,
    /// The token must be bounded by non-alphanumeric characters or the ends
    /// of the text. "tramadol" matches "Tramadol 50mg" but not "Tramadolex".
    Word,
}

impl MatchMode {
    /// Return true if `token` occurs in `haystack` under this mode.
    ///
    /// Both arguments must already be lowercase.
    pub fn contains(self, haystack: &str, token: &str) -> bool {
        match self {
            MatchMode::Substring => haystack.contains(token),
            MatchMode::Word => {
                if token.is_empty() {
                    return false;
                }
                // Hits may overlap, so a rejected hit resumes one char later.
                let mut from = 0;
                while let Some(pos) = haystack[from..].find(token) {
                    let start = from + pos;
                    let end = start + token.len();
                    let before_ok = haystack[..start]
                        .chars()
                        .next_back()
                        .map_or(true, |c| !c.is_alphanumeric());
                    let after_ok = haystack[end..]
                        .chars()
                        .next()
                        .map_or(true, |c| !c.is_alphanumeric());
                    if before_ok && after_ok {
                        return true;
                    }
                    from = start + haystack[start..].chars().next().map_or(1, char::len_utf8);
                }
                false
            }
        }
    }
}

/// A drug-drug interaction: fires when every listed drug token is found in
/// at least one of the patient's active medication names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionRule {
    /// Stable identifier used in logs and in emitted matches.
    pub id: String,

    /// Drug-name tokens. All must match. An empty list never matches.
    pub drugs: Vec<String>,

    pub severity: Severity,

    /// Clinician-facing explanation, copied into each match.
    pub description: String,
}

/// A drug-symptom reaction: fires once per (medication, symptom) pair where
/// the medication name contains `drug` and the symptom text contains `symptom`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactionRule {
    pub id: String,
    pub drug: String,
    pub symptom: String,
    pub severity: Severity,
    pub description: String,
}

/// The top-level structure deserialized from a TOML rule table.
///
/// Example:
/// ```toml
/// match_mode = "substring"
///
/// [[interactions]]
/// id = "furosemide-lisinopril"
/// drugs = ["furosemide", "lisinopril"]
/// severity = "high"
/// description = "May cause excessive blood pressure reduction"
///
/// [[reactions]]
/// id = "amoxicillin-rash"
/// drug = "amoxicillin"
/// symptom = "rash"
/// severity = "high"
/// description = "Possible allergic reaction"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleTableConfig {
    #[serde(default)]
    pub match_mode: MatchMode,

    #[serde(default)]
    pub interactions: Vec<InteractionRule>,

    #[serde(default)]
    pub reactions: Vec<ReactionRule>,
}
