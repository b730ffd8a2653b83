//! Gift pairs and the assignment produced by the matcher.
//!
//! An [`Assignment`] is immutable once built: the matcher constructs it
//! after validation and callers only read it (display, save, notify).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AssignmentId, ParticipantId};

/// One giver -> receiver pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Gift {
    pub giver: ParticipantId,
    pub receiver: ParticipantId,
}

impl Gift {
    #[must_use]
    pub fn new(giver: impl Into<ParticipantId>, receiver: impl Into<ParticipantId>) -> Self {
        Self {
            giver: giver.into(),
            receiver: receiver.into(),
        }
    }

    #[must_use]
    pub fn is_self_gift(&self) -> bool {
        self.giver == self.receiver
    }
}

impl std::fmt::Display for Gift {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ==> {}", self.giver, self.receiver)
    }
}

/// A complete giver -> receiver bijection for one draw.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    id: AssignmentId,
    /// Gifts in giver (roster) order.
    gifts: Vec<Gift>,
    /// Number of attempts the matcher used, including the successful one.
    attempts: u32,
    /// Seed the draw was made with, if any.
    seed: Option<u64>,
    /// Per-draw salt mixed into the digest.
    salt: [u8; 32],
    /// SHA-256 digest over the salt and the gift list.
    digest: [u8; 32],
    created_at: DateTime<Utc>,
}

impl Assignment {
    #[must_use]
    pub fn new(
        gifts: Vec<Gift>,
        attempts: u32,
        seed: Option<u64>,
        salt: [u8; 32],
        digest: [u8; 32],
    ) -> Self {
        Self {
            id: AssignmentId::new(),
            gifts,
            attempts,
            seed,
            salt,
            digest,
            created_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn id(&self) -> AssignmentId {
        self.id
    }

    #[must_use]
    pub fn gifts(&self) -> &[Gift] {
        &self.gifts
    }

    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    #[must_use]
    pub fn salt(&self) -> &[u8; 32] {
        &self.salt
    }

    #[must_use]
    pub fn digest(&self) -> &[u8; 32] {
        &self.digest
    }

    /// Short hex fingerprint of the digest. Shareable as long as the salt
    /// stays with the saved assignment.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        hex::encode(&self.digest[..8])
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The receiver assigned to `giver`, if `giver` is in the draw.
    #[must_use]
    pub fn receiver_of(&self, giver: &ParticipantId) -> Option<&ParticipantId> {
        self.gifts
            .iter()
            .find(|g| &g.giver == giver)
            .map(|g| &g.receiver)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.gifts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.gifts.is_empty()
    }
}

impl std::fmt::Display for Assignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Santa has assigned gifts to the {} people on his list",
            self.gifts.len()
        )
    }
}
