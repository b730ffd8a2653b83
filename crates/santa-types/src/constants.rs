//! Defaults and limits shared across the workspace.

/// Default number of full draw attempts before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 100;

/// A derangement needs at least two people.
pub const MIN_PARTICIPANTS: usize = 2;

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "secretsanta.toml";

/// Default mail API token file.
pub const DEFAULT_TOKEN_FILE: &str = "token.json";

/// Default email subject when the config does not set one.
pub const DEFAULT_SUBJECT: &str = "Secret Santa";

/// Placeholder replaced by the giver's name in message templates.
pub const GIVER_PLACEHOLDER: &str = "{name}";

/// Placeholder replaced by the receiver's name in message templates.
pub const RECEIVER_PLACEHOLDER: &str = "{gift_receiver}";

/// Delimiter between a name and its contact, and between excluded names.
pub const ENTRY_DELIMITER: char = ',';

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
