//! # santa-matchcore
//!
//! **Constrained random matcher for Secret Santa draws.**
//!
//! MatchCore takes a roster (participants with exclusions resolved) and
//! produces a derangement that avoids every excluded pair. It has:
//!
//! - **Zero side effects**: no I/O, no prompting, no email
//! - **Bounded work**: a fixed attempt budget, and each attempt terminates
//! - **Reproducible output**: same seed + same roster order -> same draw
//! - **Defense in depth**: every completed draw is validated before use

pub mod determinism;
pub mod matcher;
pub mod validation;

pub use determinism::{compute_assignment_root, verify_assignment_root};
pub use matcher::{build_assignment, build_assignment_with_rng};
pub use validation::{is_assignment_valid, validate_assignment};
