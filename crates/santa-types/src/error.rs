//! Error types for Secret Santa draws.
//!
//! All errors use the `SS_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Roster errors
//! - 5xx: Matching errors
//! - 6xx: Notification errors
//! - 9xx: General / internal errors

use thiserror::Error;

use crate::ParticipantId;

/// Central error enum for all Secret Santa operations.
#[derive(Debug, Error)]
pub enum SantaError {
    // =================================================================
    // Roster Errors (1xx)
    // =================================================================
    /// The same name appears twice on the list.
    #[error("SS_ERR_100: Duplicate participant: {0}")]
    DuplicateParticipant(ParticipantId),

    /// An exclusion or gift names someone who is not on the list.
    #[error("SS_ERR_101: Unknown participant: {0}")]
    UnknownParticipant(ParticipantId),

    /// A draw needs at least two people.
    #[error("SS_ERR_102: Too few participants: need at least {min}, have {count}")]
    TooFewParticipants { count: usize, min: usize },

    /// A names or exclusion entry could not be parsed.
    #[error("SS_ERR_103: Invalid entry: {reason}")]
    InvalidEntry { reason: String },

    // =================================================================
    // Matching Errors (5xx)
    // =================================================================
    /// No valid assignment was found within the attempt budget.
    #[error(
        "SS_ERR_500: Unable to find valid combination after {attempts} attempts. \
         Decrease number of exclusions or increase max_attempts."
    )]
    MatchingExhausted { attempts: u32 },

    /// An assignment broke one of the derangement invariants.
    #[error("SS_ERR_501: Invalid assignment: {reason}")]
    InvalidAssignment { reason: String },

    // =================================================================
    // Notification Errors (6xx)
    // =================================================================
    /// Some participants have no contact address, so nobody is emailed.
    #[error("SS_ERR_600: Not every participant has a contact address (missing: {})", .missing.join(", "))]
    IncompleteContactInfo { missing: Vec<String> },

    /// Delivery to a single recipient failed.
    #[error("SS_ERR_601: Delivery to {recipient} failed: {reason}")]
    DeliveryFailed { recipient: String, reason: String },

    /// Mail API credentials are missing or could not be refreshed.
    #[error("SS_ERR_602: Authentication error: {0}")]
    Auth(String),

    // =================================================================
    // General (9xx)
    // =================================================================
    /// Serialization / deserialization error.
    #[error("SS_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// Configuration error (invalid config file, missing fields, etc.).
    #[error("SS_ERR_902: Configuration error: {0}")]
    Configuration(String),

    /// I/O error (disk, network).
    #[error("SS_ERR_903: I/O error: {0}")]
    Io(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, SantaError>;

impl From<std::io::Error> for SantaError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SantaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for SantaError {
    fn from(err: toml::de::Error) -> Self {
        Self::Configuration(err.to_string())
    }
}
