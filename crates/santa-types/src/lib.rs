//! # santa-types
//!
//! Shared types, errors, and configuration for **Secret Santa** draws.
//!
//! This crate is the leaf dependency of the workspace; every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`ParticipantId`], [`AssignmentId`]
//! - **Roster model**: [`Participant`], [`Roster`]
//! - **Exclusions**: [`ExclusionRelation`], [`ExclusionMode`]
//! - **Draw output**: [`Gift`], [`Assignment`]
//! - **Configuration**: [`SantaConfig`], [`MatchParams`], [`LoggingConfig`]
//! - **Errors**: [`SantaError`] with `SS_ERR_` prefix codes
//! - **Constants**: defaults and limits

pub mod assignment;
pub mod config;
pub mod constants;
pub mod error;
pub mod exclusion;
pub mod ids;
pub mod participant;

pub use assignment::*;
pub use config::*;
pub use error::*;
pub use exclusion::*;
pub use ids::*;
pub use participant::*;

// Constants are accessed via `santa_types::constants::FOO`
// (not re-exported to avoid name collisions).
