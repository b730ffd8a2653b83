//! Property-based tests for draw invariants
//!
//! These tests verify the properties every draw must have for all
//! feasible inputs, not just hand-picked rosters.

use std::collections::HashSet;

use proptest::prelude::*;
use santa_matchcore::{build_assignment, is_assignment_valid};
use santa_types::*;

/// Couples `(P0, P1)`, `(P2, P3)`, ... excluded from each other.
fn couples(n: usize) -> ExclusionRelation {
    let mut rel = ExclusionRelation::symmetric();
    for i in (0..n.saturating_sub(1)).step_by(2) {
        rel.add(format!("P{i}").as_str(), format!("P{}", i + 1).as_str());
    }
    rel
}

fn assert_derangement(
    roster: &Roster,
    assignment: &Assignment,
) -> std::result::Result<(), TestCaseError> {
    prop_assert_eq!(assignment.len(), roster.len());

    let givers: HashSet<&ParticipantId> = assignment.gifts().iter().map(|g| &g.giver).collect();
    let receivers: HashSet<&ParticipantId> =
        assignment.gifts().iter().map(|g| &g.receiver).collect();
    prop_assert_eq!(givers.len(), roster.len(), "every giver exactly once");
    prop_assert_eq!(receivers.len(), roster.len(), "every receiver exactly once");

    for gift in assignment.gifts() {
        prop_assert_ne!(&gift.giver, &gift.receiver);
        prop_assert!(
            !roster.excludes(&gift.giver, &gift.receiver),
            "excluded pair drawn: {}",
            gift
        );
    }
    prop_assert!(is_assignment_valid(roster, assignment.gifts()));
    Ok(())
}

proptest! {
    /// Property: without exclusions every roster of 2+ people is drawn
    /// into a valid derangement within the default budget.
    #[test]
    fn unconstrained_draw_is_derangement(n in 2usize..40, seed in any::<u64>()) {
        let roster = Roster::dummy(n);
        let assignment = build_assignment(&roster, &MatchParams::seeded(seed)).unwrap();
        assert_derangement(&roster, &assignment)?;
    }

    /// Property: couples never draw each other.
    #[test]
    fn couples_never_matched(n in 6usize..30, seed in any::<u64>()) {
        let roster = Roster::dummy_with(n, &couples(n));
        let assignment = build_assignment(&roster, &MatchParams::seeded(seed)).unwrap();
        assert_derangement(&roster, &assignment)?;
    }

    /// Property: a fixed seed reproduces the draw exactly.
    #[test]
    fn seeded_draw_is_reproducible(n in 2usize..25, seed in any::<u64>()) {
        let roster = Roster::dummy_with(n, &couples(n.min(4)));
        let params = MatchParams::seeded(seed);
        match (build_assignment(&roster, &params), build_assignment(&roster, &params)) {
            (Ok(a), Ok(b)) => {
                prop_assert_eq!(a.gifts(), b.gifts());
                prop_assert_eq!(a.attempts(), b.attempts());
            }
            (Err(SantaError::MatchingExhausted { .. }), Err(SantaError::MatchingExhausted { .. })) => {}
            (a, b) => prop_assert!(false, "runs diverged: {:?} vs {:?}", a.is_ok(), b.is_ok()),
        }
    }

    /// Property: the attempt count never exceeds the budget.
    #[test]
    fn attempts_within_budget(n in 3usize..15, budget in 1u32..20, seed in any::<u64>()) {
        let roster = Roster::dummy(n);
        let params = MatchParams::seeded(seed).with_max_attempts(budget);
        match build_assignment(&roster, &params) {
            Ok(a) => prop_assert!(a.attempts() >= 1 && a.attempts() <= budget),
            Err(SantaError::MatchingExhausted { attempts }) => prop_assert_eq!(attempts, budget),
            Err(e) => prop_assert!(false, "unexpected error: {}", e),
        }
    }
}
