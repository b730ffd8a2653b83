//! # santa-notify
//!
//! **Notification plane**: tells each giver who they drew.
//!
//! ## Architecture
//!
//! 1. **MessageTemplate**: subject/body with `{name}` and `{gift_receiver}`
//! 2. **Mailer**: transport seam (`GmailMailer`, `DryRunMailer`)
//! 3. **Confirm**: operator confirmation (`TerminalConfirm`, `AutoConfirm`)
//! 4. **Notifier**: preflight checks, confirmation, per-recipient delivery
//!
//! ## Flow
//!
//! ```text
//! Assignment + Roster + MessageTemplate
//!     → Notifier.preflight() → Confirm.confirm() → Mailer.send() per giver
//!     → DeliveryReport
//! ```

pub mod confirm;
pub mod gmail;
pub mod mailer;
pub mod notifier;
pub mod template;

pub use confirm::{AutoConfirm, Confirm, TerminalConfirm};
pub use gmail::GmailMailer;
pub use mailer::{DryRunMailer, Envelope, Mailer};
pub use notifier::{DeliveryReport, FailedDelivery, Notifier};
pub use template::{MessageTemplate, RenderedMessage};
