//! Gmail API transport.
//!
//! Sends each envelope as a base64url-encoded RFC 822 message through
//! `users/me/messages/send`. Credentials come from an authorized-user
//! token file:
//!
//! ```json
//! {
//!   "token": "ya29...",
//!   "refresh_token": "1//0g...",
//!   "token_uri": "https://oauth2.googleapis.com/token",
//!   "client_id": "...apps.googleusercontent.com",
//!   "client_secret": "...",
//!   "expiry": "2025-12-01T10:00:00Z"
//! }
//! ```
//!
//! An expired access token is refreshed and the file rewritten. Creating
//! the file in the first place (the browser consent flow) happens outside
//! this tool.

use std::fs;
use std::path::{Path, PathBuf};

use base64::{
    Engine,
    engine::general_purpose::{STANDARD, URL_SAFE},
};
use chrono::{DateTime, Duration, Utc};
use reqwest::blocking::Client;
use santa_types::{Result, SantaError};
use serde::{Deserialize, Serialize};

use crate::{Envelope, Mailer};

/// Gmail send endpoint for the authorized user.
pub const GMAIL_SEND_URL: &str = "https://gmail.googleapis.com/gmail/v1/users/me/messages/send";

/// Google OAuth token endpoint, used when the file does not name one.
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Refresh tokens this close to expiry.
const EXPIRY_MARGIN_SECS: i64 = 60;

/// Text bytes per RFC 2047 encoded word, keeping each word under 75 chars.
const ENCODED_WORD_BYTES: usize = 45;

/// Authorized-user credentials as stored in the token file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorizedUser {
    /// Current access token.
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub token_uri: Option<String>,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub client_secret: Option<String>,
    #[serde(default)]
    pub expiry: Option<DateTime<Utc>>,
    /// Fields we do not interpret (scopes, account, ...) are written back as-is.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl AuthorizedUser {
    /// Whether the access token is missing or about to expire at `now`.
    #[must_use]
    pub fn needs_refresh(&self, now: DateTime<Utc>) -> bool {
        match (&self.token, self.expiry) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(_), Some(expiry)) => expiry <= now + Duration::seconds(EXPIRY_MARGIN_SECS),
        }
    }
}

#[derive(Serialize)]
struct RefreshRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    refresh_token: &'a str,
    grant_type: &'static str,
}

#[derive(Deserialize)]
struct RefreshResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

#[derive(Serialize)]
struct SendRequest {
    raw: String,
}

/// Mailer backed by the Gmail REST API.
pub struct GmailMailer {
    client: Client,
    access_token: String,
    send_url: String,
}

impl GmailMailer {
    /// Load credentials from `path`, refreshing (and saving) them if needed.
    pub fn from_token_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            SantaError::Auth(format!(
                "cannot read token file {}: {e}. Authorize the Gmail API \
                 (gmail.send scope) and save the authorized-user JSON there",
                path.display()
            ))
        })?;
        let mut user: AuthorizedUser = serde_json::from_str(&contents)?;
        let client = Client::new();

        if user.needs_refresh(Utc::now()) {
            refresh(&client, &mut user)?;
            save(path, &user)?;
            tracing::info!(path = %path.display(), "Access token refreshed");
        }

        let access_token = user
            .token
            .ok_or_else(|| SantaError::Auth("token file has no access token".into()))?;
        Ok(Self {
            client,
            access_token,
            send_url: GMAIL_SEND_URL.to_string(),
        })
    }

    /// Use an access token directly (no refresh handling).
    #[must_use]
    pub fn with_access_token(access_token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            access_token: access_token.into(),
            send_url: GMAIL_SEND_URL.to_string(),
        }
    }

    /// Point the mailer at a different send endpoint.
    #[must_use]
    pub fn with_send_url(mut self, url: impl Into<String>) -> Self {
        self.send_url = url.into();
        self
    }
}

impl Mailer for GmailMailer {
    fn send(&self, envelope: &Envelope) -> Result<()> {
        let failed = |reason: String| SantaError::DeliveryFailed {
            recipient: envelope.address.clone(),
            reason,
        };

        let request = SendRequest {
            raw: encode_raw(envelope),
        };
        let response = self
            .client
            .post(&self.send_url)
            .bearer_auth(&self.access_token)
            .json(&request)
            .send()
            .map_err(|e| failed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(failed(format!("HTTP {status}: {}", body.trim())));
        }
        Ok(())
    }
}

/// RFC 822 message text for an envelope.
///
/// Header values are folded onto one line (CR and LF become spaces) and
/// non-ASCII text is sent as RFC 2047 `=?UTF-8?B?...?=` words.
#[must_use]
pub fn compose_rfc822(envelope: &Envelope) -> String {
    format!(
        "To: {} <{}>\r\nSubject: {}\r\nMIME-Version: 1.0\r\nContent-Type: text/plain; charset=\"UTF-8\"\r\n\r\n{}",
        header_value(&envelope.recipient_name),
        single_line(&envelope.address),
        header_value(&envelope.subject),
        envelope.body
    )
}

fn single_line(value: &str) -> String {
    value
        .chars()
        .map(|c| if matches!(c, '\r' | '\n') { ' ' } else { c })
        .collect()
}

fn header_value(value: &str) -> String {
    let value = single_line(value);
    if value.is_ascii() {
        return value;
    }

    let mut words = Vec::new();
    let mut chunk = String::new();
    for c in value.chars() {
        if !chunk.is_empty() && chunk.len() + c.len_utf8() > ENCODED_WORD_BYTES {
            words.push(encoded_word(&chunk));
            chunk.clear();
        }
        chunk.push(c);
    }
    if !chunk.is_empty() {
        words.push(encoded_word(&chunk));
    }
    words.join("\r\n ")
}

fn encoded_word(text: &str) -> String {
    format!("=?UTF-8?B?{}?=", STANDARD.encode(text.as_bytes()))
}

/// Base64url (padded) encoding of the RFC 822 message, as the API expects.
#[must_use]
pub fn encode_raw(envelope: &Envelope) -> String {
    URL_SAFE.encode(compose_rfc822(envelope).as_bytes())
}

fn refresh(client: &Client, user: &mut AuthorizedUser) -> Result<()> {
    let (Some(refresh_token), Some(client_id), Some(client_secret)) = (
        user.refresh_token.as_deref(),
        user.client_id.as_deref(),
        user.client_secret.as_deref(),
    ) else {
        return Err(SantaError::Auth(
            "access token expired and token file lacks refresh credentials".into(),
        ));
    };

    let token_uri = user.token_uri.as_deref().unwrap_or(DEFAULT_TOKEN_URI);
    let response = client
        .post(token_uri)
        .json(&RefreshRequest {
            client_id,
            client_secret,
            refresh_token,
            grant_type: "refresh_token",
        })
        .send()
        .map_err(|e| SantaError::Auth(format!("token refresh failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(SantaError::Auth(format!(
            "token refresh rejected: HTTP {status}"
        )));
    }
    let refreshed: RefreshResponse = response
        .json()
        .map_err(|e| SantaError::Auth(format!("token refresh response: {e}")))?;

    user.token = Some(refreshed.access_token);
    user.expiry = refreshed
        .expires_in
        .map(|secs| Utc::now() + Duration::seconds(secs));
    Ok(())
}

fn save(path: &Path, user: &AuthorizedUser) -> Result<()> {
    let json = serde_json::to_string_pretty(user)?;
    let tmp = PathBuf::from(format!("{}.tmp", path.display()));
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
