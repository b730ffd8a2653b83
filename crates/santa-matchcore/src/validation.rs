//! Assignment validation.
//!
//! Checked after every generated draw and again before anyone is emailed,
//! so a draw loaded from disk gets the same scrutiny as a fresh one.

use std::collections::HashSet;

use santa_types::{Gift, ParticipantId, Result, Roster, SantaError};

/// Validate a gift list against the roster.
///
/// Fails when:
/// - the list is empty
/// - a giver is assigned to themselves
/// - a receiver is on the giver's exclusion list
/// - a giver or receiver is not on the roster
/// - someone gives or receives twice, or a roster member is left out
///
/// # Errors
/// Returns [`SantaError::InvalidAssignment`] naming the offending pair.
pub fn validate_assignment(roster: &Roster, gifts: &[Gift]) -> Result<()> {
    if gifts.is_empty() {
        return Err(invalid("empty gift list".into()));
    }

    let mut givers: HashSet<&ParticipantId> = HashSet::with_capacity(gifts.len());
    let mut receivers: HashSet<&ParticipantId> = HashSet::with_capacity(gifts.len());

    for gift in gifts {
        if gift.is_self_gift() {
            return Err(invalid(format!("{} giving to themselves", gift.giver)));
        }
        if roster.excludes(&gift.giver, &gift.receiver) {
            return Err(invalid(format!(
                "{} in exclusion list of {}",
                gift.receiver, gift.giver
            )));
        }
        for id in [&gift.giver, &gift.receiver] {
            if !roster.contains(id) {
                return Err(invalid(format!("{id} is not on the list ({gift})")));
            }
        }
        if !givers.insert(&gift.giver) {
            return Err(invalid(format!("{} gives more than one gift", gift.giver)));
        }
        if !receivers.insert(&gift.receiver) {
            return Err(invalid(format!(
                "{} receives more than one gift",
                gift.receiver
            )));
        }
    }

    if let Some(missing) = roster.ids().find(|id| !givers.contains(id)) {
        return Err(invalid(format!("{missing} has no one to give to")));
    }
    if let Some(missing) = roster.ids().find(|id| !receivers.contains(id)) {
        return Err(invalid(format!("{missing} receives no gift")));
    }
    Ok(())
}

/// Boolean form of [`validate_assignment`]; logs the reason when invalid.
#[must_use]
pub fn is_assignment_valid(roster: &Roster, gifts: &[Gift]) -> bool {
    match validate_assignment(roster, gifts) {
        Ok(()) => true,
        Err(err) => {
            tracing::debug!(error = %err, "Assignment rejected");
            false
        }
    }
}

fn invalid(reason: String) -> SantaError {
    SantaError::InvalidAssignment { reason }
}
