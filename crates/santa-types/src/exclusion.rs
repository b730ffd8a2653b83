//! Exclusion relation: pairs of participants who must not be matched.

use serde::{Deserialize, Serialize};

use crate::ParticipantId;

/// Whether a declared pair forbids one direction or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ExclusionMode {
    /// `(a, b)` forbids both `a -> b` and `b -> a`.
    #[default]
    Symmetric,
    /// `(a, b)` forbids only `a -> b`.
    OneWay,
}

impl ExclusionMode {
    #[must_use]
    pub fn from_both_ways(both_ways: bool) -> Self {
        if both_ways { Self::Symmetric } else { Self::OneWay }
    }
}

/// Declared exclusion pairs plus the mode they are applied with.
///
/// The relation is only a declaration; [`crate::Roster::new`] resolves it
/// into per-participant exclusion sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionRelation {
    pairs: Vec<(ParticipantId, ParticipantId)>,
    mode: ExclusionMode,
}

impl ExclusionRelation {
    #[must_use]
    pub fn new(mode: ExclusionMode) -> Self {
        Self {
            pairs: Vec::new(),
            mode,
        }
    }

    #[must_use]
    pub fn symmetric() -> Self {
        Self::new(ExclusionMode::Symmetric)
    }

    #[must_use]
    pub fn one_way() -> Self {
        Self::new(ExclusionMode::OneWay)
    }

    /// Builder-style: declare that `from` must not give to `to`.
    #[must_use]
    pub fn with(mut self, from: impl Into<ParticipantId>, to: impl Into<ParticipantId>) -> Self {
        self.add(from, to);
        self
    }

    pub fn add(&mut self, from: impl Into<ParticipantId>, to: impl Into<ParticipantId>) {
        self.pairs.push((from.into(), to.into()));
    }

    /// Every forbidden `(giver, receiver)` direction implied by the
    /// declared pairs and the mode.
    pub fn directed_pairs(&self) -> impl Iterator<Item = (&ParticipantId, &ParticipantId)> {
        let symmetric = self.mode == ExclusionMode::Symmetric;
        self.pairs.iter().flat_map(move |(a, b)| {
            let reverse = symmetric.then_some((b, a));
            std::iter::once((a, b)).chain(reverse)
        })
    }
}
