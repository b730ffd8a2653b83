//! Mail transport seam.

use santa_types::Result;

use crate::RenderedMessage;

/// One outgoing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub recipient_name: String,
    pub address: String,
    pub subject: String,
    pub body: String,
}

impl Envelope {
    #[must_use]
    pub fn new(
        recipient_name: impl Into<String>,
        address: impl Into<String>,
        message: RenderedMessage,
    ) -> Self {
        Self {
            recipient_name: recipient_name.into(),
            address: address.into(),
            subject: message.subject,
            body: message.body,
        }
    }

    /// `Name <address>` form used in the `To:` header.
    #[must_use]
    pub fn mailbox(&self) -> String {
        format!("{} <{}>", self.recipient_name, self.address)
    }
}

/// Delivers a single envelope.
///
/// Implementations report failure for this recipient only; the notifier
/// decides whether to carry on.
pub trait Mailer {
    fn send(&self, envelope: &Envelope) -> Result<()>;
}

/// Logs envelopes instead of sending them.
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunMailer;

impl Mailer for DryRunMailer {
    fn send(&self, envelope: &Envelope) -> Result<()> {
        tracing::info!(
            to = %envelope.mailbox(),
            subject = %envelope.subject,
            bytes = envelope.body.len(),
            "Dry run: email not sent"
        );
        Ok(())
    }
}
