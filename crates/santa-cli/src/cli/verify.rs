//! `verify`: check a saved assignment against the configured list.

use std::fs;

use anyhow::{Context, bail};
use santa_matchcore::{validate_assignment, verify_assignment_root};
use santa_types::{Assignment, SantaConfig};

use super::VerifyArgs;
use super::draw::print_assignment;

pub fn run(config: &SantaConfig, args: &VerifyArgs) -> anyhow::Result<()> {
    let roster = config
        .build_roster()
        .context("building the participant list")?;
    let assignment = load(&args.assignment)?;

    validate_assignment(&roster, assignment.gifts())?;
    if !verify_assignment_root(assignment.salt(), assignment.gifts(), assignment.digest()) {
        bail!(
            "{} digest mismatch: the gift list was changed after the draw",
            args.assignment.display()
        );
    }

    println!(
        "{} is valid: {} gifts, fingerprint {}, drawn {} in {} attempt(s)",
        assignment.id(),
        assignment.len(),
        assignment.fingerprint(),
        assignment.created_at().format("%Y-%m-%d %H:%M UTC"),
        assignment.attempts(),
    );
    if args.show {
        print_assignment(&assignment);
    }
    Ok(())
}

fn load(path: &std::path::Path) -> anyhow::Result<Assignment> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("parsing {}", path.display()))
}
