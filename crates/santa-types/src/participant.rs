//! Participants and the roster they are drawn from.
//!
//! A [`Roster`] keeps participants in declaration order. That order is the
//! giver order used by the matcher, so it is part of what makes a seeded
//! draw reproducible.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{ExclusionRelation, ParticipantId, Result, SantaError};

/// One person on the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    /// Email address (or other contact), if known.
    pub contact: Option<String>,
    /// Participants this person must not give to.
    pub exclusions: BTreeSet<ParticipantId>,
}

impl Participant {
    #[must_use]
    pub fn new(id: impl Into<ParticipantId>, contact: Option<String>) -> Self {
        Self {
            id: id.into(),
            contact: contact.filter(|c| !c.trim().is_empty()),
            exclusions: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn excludes(&self, other: &ParticipantId) -> bool {
        self.exclusions.contains(other)
    }

    /// `Name <address>` when a contact is known, otherwise just the name.
    #[must_use]
    pub fn mailbox(&self) -> String {
        match &self.contact {
            Some(contact) => format!("{} <{contact}>", self.id),
            None => self.id.to_string(),
        }
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// Ordered participant list with exclusions resolved.
#[derive(Debug, Clone)]
pub struct Roster {
    participants: Vec<Participant>,
    index: HashMap<ParticipantId, usize>,
}

impl Roster {
    /// Build a roster and apply the exclusion relation to it.
    ///
    /// # Errors
    /// - [`SantaError::InvalidEntry`] for a blank name
    /// - [`SantaError::DuplicateParticipant`] if a name appears twice
    /// - [`SantaError::UnknownParticipant`] if an exclusion names someone
    ///   not on the list
    pub fn new(participants: Vec<Participant>, exclusions: &ExclusionRelation) -> Result<Self> {
        let mut index = HashMap::with_capacity(participants.len());
        for (pos, participant) in participants.iter().enumerate() {
            if participant.id.is_empty() {
                return Err(SantaError::InvalidEntry {
                    reason: format!("participant #{} has an empty name", pos + 1),
                });
            }
            if index.insert(participant.id.clone(), pos).is_some() {
                return Err(SantaError::DuplicateParticipant(participant.id.clone()));
            }
        }

        let mut roster = Self {
            participants,
            index,
        };
        for (giver, receiver) in exclusions.directed_pairs() {
            if !roster.contains(receiver) {
                return Err(SantaError::UnknownParticipant(receiver.clone()));
            }
            let pos = roster.position(giver)?;
            // Nobody can draw themselves anyway.
            if giver != receiver {
                roster.participants[pos].exclusions.insert(receiver.clone());
            }
        }
        Ok(roster)
    }

    fn position(&self, id: &ParticipantId) -> Result<usize> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| SantaError::UnknownParticipant(id.clone()))
    }

    #[must_use]
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Participant identifiers in roster order.
    pub fn ids(&self) -> impl Iterator<Item = &ParticipantId> {
        self.participants.iter().map(|p| &p.id)
    }

    #[must_use]
    pub fn get(&self, id: &ParticipantId) -> Option<&Participant> {
        self.index.get(id).map(|&pos| &self.participants[pos])
    }

    #[must_use]
    pub fn contains(&self, id: &ParticipantId) -> bool {
        self.index.contains_key(id)
    }

    /// Whether `giver` has `receiver` on their exclusion list.
    #[must_use]
    pub fn excludes(&self, giver: &ParticipantId, receiver: &ParticipantId) -> bool {
        self.get(giver).is_some_and(|p| p.excludes(receiver))
    }

    /// A pair is allowed when it is not a self-pair and not excluded.
    #[must_use]
    pub fn is_pair_allowed(&self, giver: &ParticipantId, receiver: &ParticipantId) -> bool {
        giver != receiver && !self.excludes(giver, receiver)
    }

    /// Participants without a contact address, in roster order.
    #[must_use]
    pub fn missing_contacts(&self) -> Vec<&ParticipantId> {
        self.participants
            .iter()
            .filter(|p| p.contact.is_none())
            .map(|p| &p.id)
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// A roster of `n` contactable participants named `P0`, `P1`, ...
    #[cfg(any(test, feature = "test-helpers"))]
    #[must_use]
    pub fn dummy(n: usize) -> Self {
        Self::dummy_with(n, &ExclusionRelation::default())
    }

    /// Like [`Roster::dummy`] but with exclusions applied.
    ///
    /// # Panics
    /// Panics if `exclusions` names someone outside `P0..P{n-1}`.
    #[cfg(any(test, feature = "test-helpers"))]
    #[must_use]
    pub fn dummy_with(n: usize, exclusions: &ExclusionRelation) -> Self {
        let participants = (0..n)
            .map(|i| Participant::new(format!("P{i}"), Some(format!("p{i}@example.com"))))
            .collect();
        Self::new(participants, exclusions).expect("dummy roster exclusions must be valid")
    }
}

impl fmt::Display for Roster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Santa has {} people on his list", self.participants.len())
    }
}
