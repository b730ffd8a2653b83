//! Tells every giver who they are buying for.
//!
//! ## Flow
//!
//! 1. Re-validate the assignment against the roster (fatal if invalid)
//! 2. Check every participant has a contact address (fatal, nothing sent)
//! 3. Show the template and recipient list, ask for confirmation
//! 4. Render and send one message per giver; a failed delivery is logged
//!    and recorded, and the rest still go out
//! 5. Return a [`DeliveryReport`]

use std::fmt;

use santa_matchcore::validate_assignment;
use santa_types::{Assignment, Result, Roster, SantaError};

use crate::{Confirm, Envelope, Mailer, MessageTemplate};

/// A recipient whose message could not be delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedDelivery {
    pub recipient: String,
    pub reason: String,
}

/// Outcome of a notification run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    /// Addresses that accepted a message.
    pub delivered: Vec<String>,
    pub failed: Vec<FailedDelivery>,
    /// The operator answered "no"; nothing was sent.
    pub declined: bool,
}

impl DeliveryReport {
    #[must_use]
    pub fn success_count(&self) -> usize {
        self.delivered.len()
    }

    /// Every giver was emailed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.declined && self.failed.is_empty()
    }
}

impl fmt::Display for DeliveryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.declined {
            return write!(f, "Emails not sent.");
        }
        write!(f, "{} emails sent.", self.delivered.len())?;
        if self.failed.is_empty() {
            write!(f, " Merry Christmas!")
        } else {
            write!(f, " {} failed:", self.failed.len())?;
            for failure in &self.failed {
                write!(f, "\n  {}: {}", failure.recipient, failure.reason)?;
            }
            Ok(())
        }
    }
}

/// Sends each giver their assignment.
pub struct Notifier<'a> {
    roster: &'a Roster,
    assignment: &'a Assignment,
    template: &'a MessageTemplate,
}

impl<'a> Notifier<'a> {
    #[must_use]
    pub fn new(
        roster: &'a Roster,
        assignment: &'a Assignment,
        template: &'a MessageTemplate,
    ) -> Self {
        Self {
            roster,
            assignment,
            template,
        }
    }

    /// Checks that must pass before anything is sent.
    ///
    /// # Errors
    /// - [`SantaError::InvalidAssignment`] if the assignment is not valid
    ///   for this roster
    /// - [`SantaError::IncompleteContactInfo`] if anyone lacks an address
    pub fn preflight(&self) -> Result<()> {
        validate_assignment(self.roster, self.assignment.gifts())?;

        let missing = self.roster.missing_contacts();
        if !missing.is_empty() {
            return Err(SantaError::IncompleteContactInfo {
                missing: missing.into_iter().map(ToString::to_string).collect(),
            });
        }
        if !self.template.mentions_receiver() {
            tracing::warn!("Message template never mentions {{gift_receiver}}");
        }
        Ok(())
    }

    /// Rendered messages, one per gift, addressed to the giver.
    pub fn envelopes(&self) -> Result<Vec<Envelope>> {
        self.assignment
            .gifts()
            .iter()
            .map(|gift| -> Result<Envelope> {
                let address = self
                    .roster
                    .get(&gift.giver)
                    .and_then(|p| p.contact.clone())
                    .ok_or_else(|| SantaError::IncompleteContactInfo {
                        missing: vec![gift.giver.to_string()],
                    })?;
                let message = self.template.render(&gift.giver, &gift.receiver);
                Ok(Envelope::new(gift.giver.as_str(), address, message))
            })
            .collect()
    }

    /// What the operator sees before confirming: the raw template and
    /// every recipient mailbox. Never any pairing.
    #[must_use]
    pub fn summary(&self) -> String {
        let recipients: Vec<String> = self
            .roster
            .participants()
            .iter()
            .map(santa_types::Participant::mailbox)
            .collect();
        format!(
            "{}\n\nTHIS MESSAGE WILL BE FORMATTED AND SENT TO:\n{}",
            self.template.preview(),
            recipients.join("\n")
        )
    }

    /// Run preflight, confirm, and deliver.
    pub fn notify(&self, mailer: &dyn Mailer, confirm: &dyn Confirm) -> Result<DeliveryReport> {
        self.preflight()?;
        let envelopes = self.envelopes()?;

        if !confirm.confirm(&self.summary())? {
            tracing::info!("Sending declined");
            return Ok(DeliveryReport {
                declined: true,
                ..DeliveryReport::default()
            });
        }

        let mut report = DeliveryReport::default();
        for envelope in &envelopes {
            match mailer.send(envelope) {
                Ok(()) => {
                    tracing::info!(to = %envelope.address, "Email sent");
                    report.delivered.push(envelope.address.clone());
                }
                Err(err) => {
                    tracing::warn!(to = %envelope.address, error = %err, "Email failed");
                    report.failed.push(FailedDelivery {
                        recipient: envelope.address.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            draw = %self.assignment.id(),
            sent = report.delivered.len(),
            failed = report.failed.len(),
            "Notification complete"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use santa_matchcore::{build_assignment, compute_assignment_root};
    use santa_types::{ExclusionRelation, Gift, MatchParams, Participant};

    use super::*;

    #[derive(Default)]
    struct RecordingMailer {
        sent: RefCell<Vec<Envelope>>,
        fail_for: Option<String>,
    }

    impl Mailer for RecordingMailer {
        fn send(&self, envelope: &Envelope) -> Result<()> {
            if self.fail_for.as_deref() == Some(envelope.address.as_str()) {
                return Err(SantaError::DeliveryFailed {
                    recipient: envelope.address.clone(),
                    reason: "mailbox full".into(),
                });
            }
            self.sent.borrow_mut().push(envelope.clone());
            Ok(())
        }
    }

    fn template() -> MessageTemplate {
        MessageTemplate::new("Secret Santa", "Dear {name}, you have {gift_receiver}.")
    }

    fn draw(roster: &Roster) -> Assignment {
        build_assignment(roster, &MatchParams::seeded(42)).unwrap()
    }

    #[test]
    fn sends_one_message_per_giver() {
        let roster = Roster::dummy(5);
        let assignment = draw(&roster);
        let template = template();
        let mailer = RecordingMailer::default();

        let report = Notifier::new(&roster, &assignment, &template)
            .notify(&mailer, &crate::AutoConfirm(true))
            .unwrap();

        assert!(report.is_complete());
        assert_eq!(report.success_count(), 5);
        let sent = mailer.sent.borrow();
        for gift in assignment.gifts() {
            let env = sent
                .iter()
                .find(|e| e.recipient_name == gift.giver.as_str())
                .unwrap();
            assert_eq!(
                env.body,
                format!("Dear {}, you have {}.", gift.giver, gift.receiver)
            );
        }
    }

    #[test]
    fn declined_sends_nothing() {
        let roster = Roster::dummy(3);
        let assignment = draw(&roster);
        let template = template();
        let mailer = RecordingMailer::default();

        let report = Notifier::new(&roster, &assignment, &template)
            .notify(&mailer, &crate::AutoConfirm(false))
            .unwrap();

        assert!(report.declined);
        assert!(mailer.sent.borrow().is_empty());
        assert_eq!(format!("{report}"), "Emails not sent.");
    }

    #[test]
    fn missing_contact_is_fatal() {
        let roster = Roster::new(
            vec![
                Participant::new("Ann", Some("ann@example.com".into())),
                Participant::new("Ben", None),
            ],
            &ExclusionRelation::default(),
        )
        .unwrap();
        let assignment = draw(&roster);
        let template = template();
        let mailer = RecordingMailer::default();

        let err = Notifier::new(&roster, &assignment, &template)
            .notify(&mailer, &crate::AutoConfirm(true))
            .unwrap_err();

        assert!(matches!(
            err,
            SantaError::IncompleteContactInfo { ref missing } if missing == &vec!["Ben".to_string()]
        ));
        assert!(mailer.sent.borrow().is_empty());
    }

    #[test]
    fn invalid_assignment_is_fatal() {
        let roster = Roster::dummy(2);
        let gifts = vec![Gift::new("P0", "P0"), Gift::new("P1", "P1")];
        let salt = [9u8; 32];
        let digest = compute_assignment_root(&salt, &gifts);
        let assignment = Assignment::new(gifts, 1, None, salt, digest);
        let template = template();

        let err = Notifier::new(&roster, &assignment, &template)
            .notify(&RecordingMailer::default(), &crate::AutoConfirm(true))
            .unwrap_err();
        assert!(matches!(err, SantaError::InvalidAssignment { .. }));
    }

    #[test]
    fn single_failure_does_not_stop_the_rest() {
        let roster = Roster::dummy(4);
        let assignment = draw(&roster);
        let template = template();
        let mailer = RecordingMailer {
            fail_for: Some("p1@example.com".into()),
            ..RecordingMailer::default()
        };

        let report = Notifier::new(&roster, &assignment, &template)
            .notify(&mailer, &crate::AutoConfirm(true))
            .unwrap();

        assert_eq!(report.success_count(), 3);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].recipient, "p1@example.com");
        assert!(!report.is_complete());
        assert!(format!("{report}").contains("mailbox full"));
    }

    #[test]
    fn summary_lists_mailboxes_but_no_pairs() {
        let roster = Roster::dummy(3);
        let assignment = draw(&roster);
        let template = template();
        let summary = Notifier::new(&roster, &assignment, &template).summary();

        assert!(summary.contains("P0 <p0@example.com>"));
        assert!(summary.contains("Dear {name}"));
        assert!(!summary.contains("==>"));
    }
}
