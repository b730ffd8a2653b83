//! Constrained random derangement matcher.
//!
//! ```text
//! build_assignment(Roster, MatchParams) -> Assignment | MatchingExhausted
//! ```
//!
//! ## Algorithm
//!
//! Rejection sampling with a per-giver candidate pool:
//!
//! 1. Start an attempt with every participant available as a receiver
//! 2. For each giver in roster order, draw uniformly from a copy of the
//!    available receivers; an invalid draw (self or excluded) is removed
//!    from that copy and the draw repeats
//! 3. If the copy runs dry, no completion is reachable: abandon the attempt
//! 4. A complete draw is validated; if valid, a 32-byte salt is drawn from
//!    the same RNG and the salted digest seals the `Assignment`
//! 5. After `max_attempts` abandoned or rejected draws, fail
//!
//! Each giver costs at most one draw per available receiver, so an attempt
//! always terminates.
//!
//! ## Determinism Guarantee
//!
//! The RNG is seeded once before the first attempt and consumed one draw
//! per receiver-selection trial, then once for the salt. The same seed and
//! the same roster order produce the exact same `Assignment` (same gifts,
//! same salt, same digest).

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use santa_types::{
    Assignment, Gift, MatchParams, ParticipantId, Result, Roster, SantaError, constants,
};

use crate::{determinism::compute_assignment_root, validation::is_assignment_valid};

/// Draw a valid assignment for `roster`.
///
/// Uses a seeded [`StdRng`] when `params.seed` is set, entropy otherwise.
///
/// # Errors
/// - [`SantaError::TooFewParticipants`] for fewer than two participants
/// - [`SantaError::Configuration`] if `max_attempts` is zero
/// - [`SantaError::MatchingExhausted`] if no valid draw was found
pub fn build_assignment(roster: &Roster, params: &MatchParams) -> Result<Assignment> {
    let mut rng = match params.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    build_assignment_with_rng(roster, params.max_attempts, params.seed, &mut rng)
}

/// Same as [`build_assignment`] with a caller-supplied RNG.
///
/// `seed` is only recorded on the resulting assignment.
pub fn build_assignment_with_rng<R: Rng>(
    roster: &Roster,
    max_attempts: u32,
    seed: Option<u64>,
    rng: &mut R,
) -> Result<Assignment> {
    if roster.len() < constants::MIN_PARTICIPANTS {
        return Err(SantaError::TooFewParticipants {
            count: roster.len(),
            min: constants::MIN_PARTICIPANTS,
        });
    }
    if max_attempts == 0 {
        return Err(SantaError::Configuration(
            "max_attempts must be at least 1".into(),
        ));
    }

    for attempt in 1..=max_attempts {
        let Some(gifts) = draw_once(roster, rng) else {
            tracing::debug!(attempt, "Draw abandoned: only invalid receivers left");
            continue;
        };

        if !is_assignment_valid(roster, &gifts) {
            tracing::warn!(attempt, "Completed draw failed validation, retrying");
            continue;
        }

        let mut salt = [0u8; 32];
        rng.fill_bytes(&mut salt);
        let digest = compute_assignment_root(&salt, &gifts);
        tracing::info!(
            participants = gifts.len(),
            attempts = attempt,
            seeded = seed.is_some(),
            digest = hex::encode(&digest[..8]),
            "Assignment drawn"
        );
        return Ok(Assignment::new(gifts, attempt, seed, salt, digest));
    }

    tracing::warn!(max_attempts, "No valid assignment found");
    Err(SantaError::MatchingExhausted {
        attempts: max_attempts,
    })
}

/// One full attempt. `None` means some giver was left with no valid receiver.
fn draw_once<R: Rng>(roster: &Roster, rng: &mut R) -> Option<Vec<Gift>> {
    let mut remaining: Vec<&ParticipantId> = roster.ids().collect();
    let mut gifts = Vec::with_capacity(roster.len());

    for giver in roster.ids() {
        let receiver = select_receiver(roster, giver, &remaining, rng)?;
        remaining.retain(|id| *id != receiver);
        gifts.push(Gift {
            giver: giver.clone(),
            receiver: receiver.clone(),
        });
    }
    Some(gifts)
}

fn select_receiver<'a, R: Rng>(
    roster: &Roster,
    giver: &ParticipantId,
    remaining: &[&'a ParticipantId],
    rng: &mut R,
) -> Option<&'a ParticipantId> {
    let mut candidates = remaining.to_vec();
    while !candidates.is_empty() {
        let pick = rng.gen_range(0..candidates.len());
        let receiver = candidates[pick];
        if roster.is_pair_allowed(giver, receiver) {
            return Some(receiver);
        }
        candidates.remove(pick);
    }
    None
}
