//! TOML-driven rule table.
//!
//! `RuleTable` loads a `RuleTableConfig` from a TOML string or file,
//! validates it once, and implements `AdverseEventDetector` from
//! wardsafe-core. It is immutable after construction; share it across
//! monitors with `Arc<RuleTable>`.

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, info};

use wardsafe_contracts::{
    alert::{InteractionMatch, ReactionMatch},
    error::{WardError, WardResult},
};
use wardsafe_core::traits::AdverseEventDetector;

use crate::checker::{check_interactions, check_reactions};
use crate::rule::{InteractionRule, MatchMode, ReactionRule, RuleTableConfig};

/// The rule table compiled into every binary: the six ward rules the
/// dashboard has always shipped with.
pub const DEFAULT_RULES: &str = include_str!("../tables/default.toml");

/// An immutable, validated set of interaction and reaction rules.
///
/// ```rust,ignore
/// use wardsafe_rules::RuleTable;
///
/// let table = RuleTable::from_file(Path::new("rules/ward.toml"))?;
/// ```
#[derive(Debug, Clone)]
pub struct RuleTable {
    config: RuleTableConfig,
}

impl RuleTable {
    /// Parse `s` as TOML and build a validated `RuleTable`.
    ///
    /// Returns `WardError::ConfigError` if the TOML is malformed, does not
    /// match `RuleTableConfig`, or fails validation.
    pub fn from_toml_str(s: &str) -> WardResult<Self> {
        let config: RuleTableConfig = toml::from_str(s).map_err(|e| WardError::ConfigError {
            reason: format!("failed to parse rule table TOML: {}", e),
        })?;
        Self::from_config(config)
    }

    /// Read the file at `path` and parse it as a TOML rule table.
    pub fn from_file(path: &Path) -> WardResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| WardError::ConfigError {
            reason: format!("failed to read rule table '{}': {}", path.display(), e),
        })?;
        let table = Self::from_toml_str(&contents)?;
        info!(
            path = %path.display(),
            interactions = table.config.interactions.len(),
            reactions = table.config.reactions.len(),
            "rule table loaded"
        );
        Ok(table)
    }

    /// Validate an already-built configuration.
    ///
    /// Rejects duplicate rule ids, interaction rules without drugs, and blank
    /// tokens (a blank token would match every medication or symptom).
    pub fn from_config(config: RuleTableConfig) -> WardResult<Self> {
        let mut seen = HashSet::new();

        for rule in &config.interactions {
            if !seen.insert(rule.id.as_str()) {
                return Err(duplicate_id(&rule.id));
            }
            if rule.drugs.is_empty() {
                return Err(WardError::ConfigError {
                    reason: format!("interaction rule '{}' lists no drugs", rule.id),
                });
            }
            if rule.drugs.iter().any(|d| d.trim().is_empty()) {
                return Err(blank_token(&rule.id, "drug"));
            }
        }

        for rule in &config.reactions {
            if !seen.insert(rule.id.as_str()) {
                return Err(duplicate_id(&rule.id));
            }
            if rule.drug.trim().is_empty() {
                return Err(blank_token(&rule.id, "drug"));
            }
            if rule.symptom.trim().is_empty() {
                return Err(blank_token(&rule.id, "symptom"));
            }
        }

        debug!(
            match_mode = ?config.match_mode,
            interactions = config.interactions.len(),
            reactions = config.reactions.len(),
            "rule table validated"
        );

        Ok(Self { config })
    }

    /// The table compiled from `DEFAULT_RULES`.
    pub fn builtin() -> WardResult<Self> {
        Self::from_toml_str(DEFAULT_RULES)
    }

    pub fn match_mode(&self) -> MatchMode {
        self.config.match_mode
    }

    pub fn interaction_rules(&self) -> &[InteractionRule] {
        &self.config.interactions
    }

    pub fn reaction_rules(&self) -> &[ReactionRule] {
        &self.config.reactions
    }
}

impl AdverseEventDetector for RuleTable {
    fn interactions(&self, medications: &[&str]) -> Vec<InteractionMatch> {
        check_interactions(&self.config.interactions, self.config.match_mode, medications)
    }

    fn reactions(&self, medications: &[&str], symptoms: &[&str]) -> Vec<ReactionMatch> {
        check_reactions(&self.config.reactions, self.config.match_mode, medications, symptoms)
    }
}

fn duplicate_id(id: &str) -> WardError {
    WardError::ConfigError {
        reason: format!("duplicate rule id '{}'", id),
    }
}

fn blank_token(id: &str, field: &str) -> WardError {
    WardError::ConfigError {
        reason: format!("rule '{}' has a blank {} token", id, field),
    }
}
