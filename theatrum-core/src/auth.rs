//! Mock account flow backed by browser storage.
//!
//! There is no server and no real verification: every account verifies with
//! [`VERIFY_CODE`]. Passwords are kept as SHA-256 digests; records written by
//! older versions of the site with a plaintext password still log in and are
//! upgraded on success.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fmt::Write as _;
use thiserror::Error;

use crate::notice::Notice;
use crate::storage::{KeyValueStore, keys, write_json_or_log, write_or_log};

pub const VERIFY_CODE: &str = "000000";
pub const GUEST_EMAIL: &str = "guest@theatrum.local";
const DIGEST_PREFIX: &str = "sha256:";

static EMAIL_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Account already exists. Please log in.")]
    AccountExists,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("No verification target. Please sign up or log in again.")]
    NoVerifyTarget,
    #[error("Incorrect code. Try 000000 for demo.")]
    IncorrectCode,
    #[error("User not found.")]
    UserNotFound,
}

impl AuthError {
    /// Step the modal moves to after this error, if any.
    #[must_use]
    pub const fn redirect(&self) -> Option<AuthStep> {
        match self {
            Self::AccountExists => Some(AuthStep::Login),
            _ => None,
        }
    }

    #[must_use]
    pub fn notice(&self) -> Notice {
        Notice::error(self.to_string())
    }
}

/// Auth modal panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthStep {
    #[default]
    Choice,
    Login,
    Signup,
    Guest,
    Verify,
    Welcome,
}

impl AuthStep {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Choice => "choice",
            Self::Login => "login",
            Self::Signup => "signup",
            Self::Guest => "guest",
            Self::Verify => "verify",
            Self::Welcome => "welcome",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default)]
    pub name: String,
    pub email: String,
    /// `sha256:<hex>` digest, or a legacy plaintext password.
    pub password: String,
    #[serde(default)]
    pub verified: bool,
}

impl UserRecord {
    fn password_matches(&self, candidate: &str) -> bool {
        match self.password.strip_prefix(DIGEST_PREFIX) {
            Some(digest) => digest == hex_digest(candidate),
            None => self.password == candidate,
        }
    }

    fn display_name(&self) -> String {
        if self.name.is_empty() {
            "Guest".to_string()
        } else {
            self.name.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
    /// Milliseconds since the Unix epoch.
    pub ts: u64,
}

impl Session {
    #[must_use]
    pub fn is_guest(&self) -> bool {
        self.email.starts_with("guest")
    }
}

/// Where a successful action leaves the modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthProgress {
    Verify { email: String },
    Welcome { name: String },
}

impl AuthProgress {
    #[must_use]
    pub const fn step(&self) -> AuthStep {
        match self {
            Self::Verify { .. } => AuthStep::Verify,
            Self::Welcome { .. } => AuthStep::Welcome,
        }
    }

    /// The demo-code hint shown when verification is needed.
    #[must_use]
    pub fn notice(&self) -> Option<Notice> {
        match self {
            Self::Verify { .. } => Some(Notice::info(format!("Demo code: {VERIFY_CODE}"))),
            Self::Welcome { .. } => None,
        }
    }
}

#[must_use]
pub fn hex_digest(password: &str) -> String {
    Sha256::digest(password.as_bytes())
        .iter()
        .fold(String::with_capacity(64), |mut out, byte| {
            let _ = write!(out, "{byte:02x}");
            out
        })
}

#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email)
}

/// Account operations over the origin's durable store and the tab's session
/// store.
#[derive(Clone, Copy)]
pub struct AuthService<'a> {
    local: &'a dyn KeyValueStore,
    session: &'a dyn KeyValueStore,
}

impl<'a> AuthService<'a> {
    #[must_use]
    pub const fn new(local: &'a dyn KeyValueStore, session: &'a dyn KeyValueStore) -> Self {
        Self { local, session }
    }

    /// Stored users. Records that do not read as a user are skipped; an
    /// unreadable list is empty.
    #[must_use]
    pub fn users(&self) -> Vec<UserRecord> {
        self.stored_records()
            .into_iter()
            .filter_map(|record| match serde_json::from_value(record) {
                Ok(user) => Some(user),
                Err(err) => {
                    log::debug!("skipping unreadable user record: {err}");
                    None
                }
            })
            .collect()
    }

    fn stored_records(&self) -> Vec<Value> {
        self.local
            .get_item(keys::USERS)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    /// Write `users` back, keeping any stored records that were skipped on read.
    fn save_users(&self, users: &[UserRecord]) {
        let skipped = self
            .stored_records()
            .into_iter()
            .filter(|record| serde_json::from_value::<UserRecord>(record.clone()).is_err());
        let records: Vec<Value> = users
            .iter()
            .filter_map(|user| serde_json::to_value(user).ok())
            .chain(skipped)
            .collect();
        write_json_or_log(self.local, keys::USERS, &records);
    }

    /// # Errors
    ///
    /// [`AuthError::InvalidEmail`] or [`AuthError::AccountExists`].
    pub fn signup(&self, name: &str, email: &str, password: &str) -> Result<AuthProgress, AuthError> {
        let email = normalize_email(email);
        if !is_valid_email(&email) {
            return Err(AuthError::InvalidEmail);
        }
        let mut users = self.users();
        if users.iter().any(|u| u.email == email) {
            return Err(AuthError::AccountExists);
        }
        users.push(UserRecord {
            name: name.trim().to_string(),
            email: email.clone(),
            password: format!("{DIGEST_PREFIX}{}", hex_digest(password)),
            verified: false,
        });
        self.save_users(&users);
        Ok(self.await_verification(email))
    }

    /// # Errors
    ///
    /// [`AuthError::InvalidCredentials`] when no user matches.
    pub fn login(&self, email: &str, password: &str, now_ms: u64) -> Result<AuthProgress, AuthError> {
        let email = normalize_email(email);
        let mut users = self.users();
        let user = users
            .iter_mut()
            .find(|u| u.email == email && u.password_matches(password))
            .ok_or(AuthError::InvalidCredentials)?;
        let legacy = !user.password.starts_with(DIGEST_PREFIX);
        if legacy {
            user.password = format!("{DIGEST_PREFIX}{}", hex_digest(password));
        }
        let verified = user.verified;
        let name = user.display_name();
        if legacy {
            log::debug!("upgrading stored password for {email}");
            self.save_users(&users);
        }
        if !verified {
            return Ok(self.await_verification(email));
        }
        self.start_session(&email, now_ms);
        Ok(AuthProgress::Welcome { name })
    }

    /// # Errors
    ///
    /// [`AuthError::NoVerifyTarget`], [`AuthError::IncorrectCode`] or
    /// [`AuthError::UserNotFound`].
    pub fn verify(&self, code: &str, now_ms: u64) -> Result<AuthProgress, AuthError> {
        let target = self
            .session
            .get_item(keys::VERIFY_TARGET)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::NoVerifyTarget)?;
        if code.trim() != VERIFY_CODE {
            return Err(AuthError::IncorrectCode);
        }
        let mut users = self.users();
        let user = users
            .iter_mut()
            .find(|u| u.email == target)
            .ok_or(AuthError::UserNotFound)?;
        user.verified = true;
        let name = user.display_name();
        self.save_users(&users);
        self.start_session(&target, now_ms);
        Ok(AuthProgress::Welcome { name })
    }

    #[must_use]
    pub fn resend(&self) -> Notice {
        Notice::info(format!("Demo code resent: {VERIFY_CODE}"))
    }

    pub fn continue_as_guest(&self, now_ms: u64) -> AuthProgress {
        self.sign_out();
        self.start_session(GUEST_EMAIL, now_ms);
        AuthProgress::Welcome {
            name: "Guest".to_string(),
        }
    }

    pub fn sign_out(&self) {
        self.local.remove_item(keys::SESSION);
    }

    #[must_use]
    pub fn session(&self) -> Option<Session> {
        self.local
            .get_item(keys::SESSION)
            .and_then(|raw| serde_json::from_str(&raw).ok())
    }

    /// Header button text.
    #[must_use]
    pub fn account_label(&self) -> &'static str {
        match self.session() {
            Some(s) if s.is_guest() => "Guest",
            Some(_) => "Account",
            None => "Sign In",
        }
    }

    /// Email awaiting a code in this tab, if any.
    #[must_use]
    pub fn verify_target(&self) -> Option<String> {
        self.session.get_item(keys::VERIFY_TARGET)
    }

    fn await_verification(&self, email: String) -> AuthProgress {
        write_or_log(self.session, keys::VERIFY_TARGET, &email);
        AuthProgress::Verify { email }
    }

    fn start_session(&self, email: &str, now_ms: u64) {
        let session = Session {
            email: email.to_string(),
            ts: now_ms,
        };
        write_json_or_log(self.local, keys::SESSION, &session);
    }
}
