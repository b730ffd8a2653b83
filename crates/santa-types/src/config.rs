//! Draw configuration loaded from a TOML file.
//!
//! ```toml
//! names = ["Ann, ann@example.com", "Ben, ben@example.com", "Cat"]
//! exclude = ["Ann, Ben"]
//! exclude_both_ways = true
//! subject = "Secret Santa"
//! message = "Dear {name}, you are buying a gift for {gift_receiver}."
//! send = false
//! display_result = true
//! rng_seed = 42
//! max_attempts = 100
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    ExclusionMode, ExclusionRelation, Participant, ParticipantId, Result, Roster, SantaError,
    constants,
};

/// Matcher parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchParams {
    /// Full draw attempts before reporting exhaustion.
    pub max_attempts: u32,
    /// Fixed RNG seed for a reproducible draw.
    pub seed: Option<u64>,
}

impl Default for MatchParams {
    fn default() -> Self {
        Self {
            max_attempts: constants::DEFAULT_MAX_ATTEMPTS,
            seed: None,
        }
    }
}

impl MatchParams {
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit one JSON object per event instead of human-readable lines.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Top-level configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SantaConfig {
    /// `name` or `name, contact` entries, in giver order.
    pub names: Vec<String>,
    /// `a, b` entries: `a` must not give to `b`.
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Apply each exclusion in both directions.
    #[serde(default = "default_true")]
    pub exclude_both_ways: bool,
    #[serde(default = "default_subject")]
    pub subject: String,
    /// Message body; `{name}` and `{gift_receiver}` are substituted.
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub send: bool,
    #[serde(default = "default_true")]
    pub display_result: bool,
    pub rng_seed: Option<u64>,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_true() -> bool {
    true
}

fn default_subject() -> String {
    constants::DEFAULT_SUBJECT.to_string()
}

fn default_max_attempts() -> u32 {
    constants::DEFAULT_MAX_ATTEMPTS
}

fn default_log_level() -> String {
    constants::DEFAULT_LOG_LEVEL.to_string()
}

impl SantaConfig {
    /// Load and validate a configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            SantaError::Configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.names.len() < constants::MIN_PARTICIPANTS {
            return Err(SantaError::TooFewParticipants {
                count: self.names.len(),
                min: constants::MIN_PARTICIPANTS,
            });
        }
        if self.max_attempts == 0 {
            return Err(SantaError::Configuration(
                "max_attempts must be at least 1".into(),
            ));
        }
        if self.send && self.message.trim().is_empty() {
            return Err(SantaError::Configuration(
                "send is enabled but message is empty".into(),
            ));
        }
        Ok(())
    }

    /// Parse the `names` entries into participants (no exclusions yet).
    pub fn entries(&self) -> Result<Vec<Participant>> {
        self.names.iter().map(|e| parse_name_entry(e)).collect()
    }

    /// Parse the `exclude` entries into an exclusion relation.
    pub fn exclusion_relation(&self) -> Result<ExclusionRelation> {
        let mut relation =
            ExclusionRelation::new(ExclusionMode::from_both_ways(self.exclude_both_ways));
        for entry in &self.exclude {
            let (a, b) = parse_exclusion_entry(entry)?;
            relation.add(a, b);
        }
        Ok(relation)
    }

    /// Parse entries and exclusions and resolve them into a roster.
    pub fn build_roster(&self) -> Result<Roster> {
        Roster::new(self.entries()?, &self.exclusion_relation()?)
    }

    #[must_use]
    pub fn match_params(&self) -> MatchParams {
        MatchParams {
            max_attempts: self.max_attempts,
            seed: self.rng_seed,
        }
    }
}

/// Parse `name` or `name, contact`.
pub fn parse_name_entry(entry: &str) -> Result<Participant> {
    let mut parts = entry.splitn(2, constants::ENTRY_DELIMITER);
    let name = parts.next().unwrap_or_default().trim();
    if name.is_empty() {
        return Err(SantaError::InvalidEntry {
            reason: format!("name entry {entry:?} has no name"),
        });
    }
    let contact = parts
        .next()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string);
    Ok(Participant::new(name, contact))
}

/// Parse `a, b` into an exclusion pair.
pub fn parse_exclusion_entry(entry: &str) -> Result<(ParticipantId, ParticipantId)> {
    let names: Vec<&str> = entry
        .split(constants::ENTRY_DELIMITER)
        .map(str::trim)
        .collect();
    match names.as_slice() {
        [a, b] if !a.is_empty() && !b.is_empty() => {
            Ok((ParticipantId::new(*a), ParticipantId::new(*b)))
        }
        _ => Err(SantaError::InvalidEntry {
            reason: format!("exclusion entry {entry:?} must name exactly two people"),
        }),
    }
}
