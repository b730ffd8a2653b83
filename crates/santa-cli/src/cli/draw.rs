//! `draw`: build an assignment, then display, save and email it as asked.

use std::fs;

use anyhow::{Context, bail};
use santa_matchcore::build_assignment;
use santa_notify::{
    AutoConfirm, Confirm, DryRunMailer, GmailMailer, Mailer, MessageTemplate, Notifier,
    TerminalConfirm,
};
use santa_types::{Assignment, MatchParams, SantaConfig};

use super::DrawArgs;

pub fn run(config: &SantaConfig, args: &DrawArgs) -> anyhow::Result<()> {
    let roster = config
        .build_roster()
        .context("building the participant list")?;
    tracing::info!(participants = roster.len(), "{roster}");

    let assignment = build_assignment(&roster, &match_params(config, args))?;
    println!("{assignment} (fingerprint {})", assignment.fingerprint());

    if display_enabled(config, args) {
        print_assignment(&assignment);
    }

    if let Some(path) = &args.output {
        let json = serde_json::to_string_pretty(&assignment)?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        println!("Assignment saved to {}", path.display());
    }

    if !(config.send || args.send) {
        return Ok(());
    }

    let template = MessageTemplate::new(config.subject.clone(), config.message.clone());
    if template.body.trim().is_empty() {
        bail!("cannot send: the config has no message");
    }
    let notifier = Notifier::new(&roster, &assignment, &template);
    // Fail on missing contacts before touching credentials.
    notifier.preflight()?;

    let mailer: Box<dyn Mailer> = if args.dry_run {
        Box::new(DryRunMailer)
    } else {
        Box::new(
            GmailMailer::from_token_file(&args.token)
                .with_context(|| format!("loading credentials from {}", args.token.display()))?,
        )
    };
    let confirm: Box<dyn Confirm> = if args.yes {
        Box::new(AutoConfirm(true))
    } else {
        Box::new(TerminalConfirm)
    };

    let report = notifier.notify(mailer.as_ref(), confirm.as_ref())?;
    println!("{report}");
    if !report.failed.is_empty() {
        bail!("{} of {} emails failed", report.failed.len(), assignment.len());
    }
    Ok(())
}

pub(crate) fn print_assignment(assignment: &Assignment) {
    println!("Secret santa assignments:");
    for gift in assignment.gifts() {
        println!("{gift}");
    }
}

fn match_params(config: &SantaConfig, args: &DrawArgs) -> MatchParams {
    let mut params = config.match_params();
    if let Some(seed) = args.seed {
        params.seed = Some(seed);
    }
    if let Some(max_attempts) = args.max_attempts {
        params.max_attempts = max_attempts;
    }
    params
}

fn display_enabled(config: &SantaConfig, args: &DrawArgs) -> bool {
    if args.display {
        true
    } else if args.hide {
        false
    } else {
        config.display_result
    }
}
