//! Message templates with giver / receiver substitution.

use santa_types::constants::{GIVER_PLACEHOLDER, RECEIVER_PLACEHOLDER};
use santa_types::ParticipantId;
use serde::{Deserialize, Serialize};

/// Subject and body with `{name}` (giver) and `{gift_receiver}`
/// (receiver) placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageTemplate {
    pub subject: String,
    pub body: String,
}

/// A template rendered for one giver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    pub subject: String,
    pub body: String,
}

impl MessageTemplate {
    #[must_use]
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
        }
    }

    #[must_use]
    pub fn render(&self, giver: &ParticipantId, receiver: &ParticipantId) -> RenderedMessage {
        RenderedMessage {
            subject: substitute(&self.subject, giver, receiver),
            body: substitute(&self.body, giver, receiver),
        }
    }

    /// Whether the body names the receiver at all. A template without
    /// `{gift_receiver}` would send everyone an email that says nothing.
    #[must_use]
    pub fn mentions_receiver(&self) -> bool {
        self.body.contains(RECEIVER_PLACEHOLDER) || self.subject.contains(RECEIVER_PLACEHOLDER)
    }

    /// The unrendered template, framed for display before sending.
    #[must_use]
    pub fn preview(&self) -> String {
        format!(
            "PREVIEW OF MESSAGE:\n========\nSubject: {}\n\n{}\n========",
            self.subject, self.body
        )
    }
}

fn substitute(text: &str, giver: &ParticipantId, receiver: &ParticipantId) -> String {
    text.replace(GIVER_PLACEHOLDER, giver.as_str())
        .replace(RECEIVER_PLACEHOLDER, receiver.as_str())
}
