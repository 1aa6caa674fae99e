//! Pattern bank: label -> (regex, priority) rules

use crate::domain::EntityLabel;
use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

/// Priority assumed for labels the bank does not know (NER labels)
pub const DEFAULT_PRIORITY: u32 = 1;

/// Pattern definition from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct PatternDefinition {
    /// Category label
    pub label: String,
    /// Regex pattern for this category
    pub pattern: String,
    /// Conflict-resolution priority (higher wins a same-start tie)
    pub priority: u32,
}

/// Compiled bank rule
#[derive(Debug, Clone)]
pub struct PatternRule {
    /// Category label
    pub label: EntityLabel,
    /// Compiled regex
    pub regex: Regex,
    /// Conflict-resolution priority
    pub priority: u32,
}

/// Bank definition container
#[derive(Debug, Deserialize)]
struct BankDefinition {
    patterns: Vec<PatternDefinition>,
}

/// Ordered, immutable pattern bank
///
/// Rule order is significant: the detector emits candidates in bank order,
/// and the conflict resolver's stable sort preserves that order when two
/// candidates tie on (start, priority). The bank is built once at startup
/// and shared read-only across requests.
#[derive(Debug)]
pub struct PatternBank {
    rules: Vec<PatternRule>,
}

impl PatternBank {
    /// Load a pattern bank from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read pattern bank: {}", path.as_ref().display()))?;

        Self::from_toml(&content)
    }

    /// Build a pattern bank from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        let definition: BankDefinition =
            toml::from_str(content).context("Failed to parse pattern bank TOML")?;

        let mut rules: Vec<PatternRule> = Vec::with_capacity(definition.patterns.len());
        for def in definition.patterns {
            if rules.iter().any(|r| r.label.as_str() == def.label) {
                anyhow::bail!("Duplicate pattern label: {}", def.label);
            }

            let regex = Regex::new(&def.pattern)
                .with_context(|| format!("Invalid regex for '{}': {}", def.label, def.pattern))?;

            rules.push(PatternRule {
                label: EntityLabel::from(def.label),
                regex,
                priority: def.priority,
            });
        }

        Ok(Self { rules })
    }

    /// Build the built-in default bank
    pub fn built_in() -> Result<Self> {
        // Use embedded default patterns
        let default_toml = include_str!("../../patterns/pii_patterns.toml");
        Self::from_toml(default_toml)
    }

    /// All rules, in bank order
    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }

    /// Look up the rule for a label
    pub fn rule(&self, label: &EntityLabel) -> Option<&PatternRule> {
        self.rules.iter().find(|r| &r.label == label)
    }

    /// Priority for a label; labels not in the bank get [`DEFAULT_PRIORITY`]
    pub fn priority(&self, label: &EntityLabel) -> u32 {
        self.rule(label).map_or(DEFAULT_PRIORITY, |r| r.priority)
    }
}
