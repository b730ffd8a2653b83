//! End-to-end integration tests: config file -> roster -> draw -> notify.
//!
//! These exercise the whole pipeline the binary runs, with a recording
//! mailer in place of the mail API.

use std::cell::RefCell;
use std::io::Write;

use santa_matchcore::{build_assignment, validate_assignment};
use santa_notify::{AutoConfirm, Envelope, Mailer, MessageTemplate, Notifier};
use santa_types::*;

const CONFIG: &str = r#"
names = [
    "Ann, ann@example.com",
    "Ben, ben@example.com",
    "Cat, cat@example.com",
    "Dan, dan@example.com",
    "Eve, eve@example.com",
]
exclude = ["Ann, Ben", "Cat, Dan"]
exclude_both_ways = true
subject = "Your Secret Santa"
message = """
Dear {name},

This year you are buying a gift for {gift_receiver}.
"""
send = true
display_result = false
rng_seed = 2512
"#;

#[derive(Default)]
struct RecordingMailer {
    sent: RefCell<Vec<Envelope>>,
}

impl Mailer for RecordingMailer {
    fn send(&self, envelope: &Envelope) -> santa_types::Result<()> {
        self.sent.borrow_mut().push(envelope.clone());
        Ok(())
    }
}

/// Helper: load config from a real file, like the binary does.
fn load_config(contents: &str) -> SantaConfig {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    SantaConfig::from_file(file.path()).unwrap()
}

#[test]
fn full_pipeline_emails_every_giver_their_receiver() {
    let cfg = load_config(CONFIG);
    let roster = cfg.build_roster().unwrap();
    let assignment = build_assignment(&roster, &cfg.match_params()).unwrap();
    validate_assignment(&roster, assignment.gifts()).unwrap();

    let template = MessageTemplate::new(cfg.subject.clone(), cfg.message.clone());
    let mailer = RecordingMailer::default();
    let report = Notifier::new(&roster, &assignment, &template)
        .notify(&mailer, &AutoConfirm(true))
        .unwrap();

    assert!(report.is_complete());
    assert_eq!(report.success_count(), 5);

    let sent = mailer.sent.borrow();
    assert_eq!(sent.len(), 5);
    for envelope in sent.iter() {
        let giver = ParticipantId::new(envelope.recipient_name.as_str());
        let receiver = assignment.receiver_of(&giver).unwrap();
        let participant = roster.get(&giver).unwrap();

        assert_eq!(Some(&envelope.address), participant.contact.as_ref());
        assert_eq!(envelope.subject, "Your Secret Santa");
        assert!(envelope.body.starts_with(&format!("Dear {giver},")));
        assert!(envelope.body.contains(&format!("buying a gift for {receiver}.")));
        assert!(!roster.excludes(&giver, receiver));
    }
}

#[test]
fn couples_are_never_emailed_each_other() {
    let cfg = load_config(CONFIG);
    let roster = cfg.build_roster().unwrap();
    for seed in 0..25 {
        let assignment = build_assignment(&roster, &MatchParams::seeded(seed)).unwrap();
        for gift in assignment.gifts() {
            let pair = (gift.giver.as_str(), gift.receiver.as_str());
            assert!(
                !matches!(pair, ("Ann", "Ben") | ("Ben", "Ann") | ("Cat", "Dan") | ("Dan", "Cat")),
                "seed {seed} drew excluded pair {gift}"
            );
        }
    }
}

#[test]
fn roster_without_contacts_is_refused_before_prompting() {
    let cfg = load_config(
        r#"
names = ["Ann, ann@example.com", "Ben", "Cat"]
message = "Dear {name}, you have {gift_receiver}."
"#,
    );
    let roster = cfg.build_roster().unwrap();
    let assignment = build_assignment(&roster, &cfg.match_params()).unwrap();
    let template = MessageTemplate::new(cfg.subject.clone(), cfg.message.clone());

    struct PanickingConfirm;
    impl santa_notify::Confirm for PanickingConfirm {
        fn confirm(&self, _summary: &str) -> santa_types::Result<bool> {
            panic!("must not prompt when contacts are missing");
        }
    }

    let mailer = RecordingMailer::default();
    let err = Notifier::new(&roster, &assignment, &template)
        .notify(&mailer, &PanickingConfirm)
        .unwrap_err();

    match err {
        SantaError::IncompleteContactInfo { missing } => assert_eq!(missing, vec!["Ben", "Cat"]),
        other => panic!("expected IncompleteContactInfo, got {other:?}"),
    }
    assert!(mailer.sent.borrow().is_empty());
}

#[test]
fn saved_assignment_can_be_notified_later() {
    let cfg = load_config(CONFIG);
    let roster = cfg.build_roster().unwrap();
    let assignment = build_assignment(&roster, &cfg.match_params()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("draw.json");
    std::fs::write(&path, serde_json::to_string_pretty(&assignment).unwrap()).unwrap();
    let reloaded: Assignment =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();

    let template = MessageTemplate::new(cfg.subject.clone(), cfg.message.clone());
    let mailer = RecordingMailer::default();
    let report = Notifier::new(&roster, &reloaded, &template)
        .notify(&mailer, &AutoConfirm(true))
        .unwrap();
    assert_eq!(report.success_count(), roster.len());
}
