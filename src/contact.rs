//! Contact form: validation, captcha, and notification.
//!
//! A submission is accepted only when every field is filled in, the email
//! address is plausible, and the captcha answer matches exactly. Accepted
//! submissions become a [`Notification`] handed to a [`Notifier`]. The
//! shipped notifier drops `.eml` files into an outbox directory for a mail
//! relay to pick up; talking SMTP is left to that relay.

use crate::config::ContactConfig;
use rand::Rng;
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

pub const CAPTCHA_LEN: usize = 5;
const CAPTCHA_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

#[derive(Error, Debug)]
pub enum ContactError {
    #[error("Submission rejected: {}", describe(.0))]
    Rejected(Vec<Problem>),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why a submission was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Problem {
    Missing(&'static str),
    InvalidEmail,
    CaptchaMismatch,
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Problem::Missing(field) => write!(f, "{field} is required"),
            Problem::InvalidEmail => f.write_str("email address is invalid"),
            Problem::CaptchaMismatch => f.write_str("captcha does not match"),
        }
    }
}

fn describe(problems: &[Problem]) -> String {
    problems
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Fields submitted through the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl ContactForm {
    fn fields(&self) -> [(&'static str, &str); 5] {
        [
            ("Name", &self.name),
            ("Surname", &self.surname),
            ("Email", &self.email),
            ("Phone", &self.phone),
            ("Message", &self.message),
        ]
    }

    /// Every problem with the form, in field order. Empty when valid.
    pub fn validate(&self) -> Vec<Problem> {
        let mut problems: Vec<Problem> = self
            .fields()
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(label, _)| Problem::Missing(*label))
            .collect();
        if !self.email.trim().is_empty() && !looks_like_email(self.email.trim()) {
            problems.push(Problem::InvalidEmail);
        }
        problems
    }
}

/// `local@domain.tld` with no whitespace. Deliberately loose.
pub fn looks_like_email(address: &str) -> bool {
    if address.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = address.split_once('@') else {
        return false;
    };
    let labels: Vec<&str> = domain.split('.').collect();
    !local.is_empty() && labels.len() >= 2 && labels.iter().all(|l| !l.is_empty() && !l.contains('@'))
}

/// Short uppercase alphanumeric challenge shown next to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captcha(String);

impl Captcha {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(
            (0..CAPTCHA_LEN)
                .map(|_| CAPTCHA_ALPHABET[rng.random_range(0..CAPTCHA_ALPHABET.len())] as char)
                .collect(),
        )
    }

    pub fn code(&self) -> &str {
        &self.0
    }

    /// Exact, case-sensitive match.
    pub fn verify(&self, answer: &str) -> bool {
        answer == self.0
    }
}

/// Message announcing an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub subject: String,
    pub sender: String,
    pub recipients: Vec<String>,
    pub body: String,
}

impl Notification {
    /// Render as a plain-text RFC 5322 style message.
    pub fn to_eml(&self) -> String {
        format!(
            "From: {}\r\nTo: {}\r\nSubject: {}\r\nContent-Type: text/plain; charset=utf-8\r\n\r\n{}",
            self.sender,
            self.recipients.join(", "),
            self.subject,
            self.body.replace('\n', "\r\n"),
        )
    }
}

/// Build the notification for a form.
pub fn compose(form: &ContactForm, config: &ContactConfig) -> Notification {
    let body = form
        .fields()
        .iter()
        .map(|(label, value)| format!("{label}: {}", value.trim()))
        .collect::<Vec<_>>()
        .join("\n");
    Notification {
        subject: config.subject.clone(),
        sender: config.sender.clone(),
        recipients: config.recipients.clone(),
        body,
    }
}

/// Delivery seam for notifications.
pub trait Notifier {
    fn send(&self, notification: &Notification) -> Result<(), ContactError>;
}

/// Writes each notification as a new `.eml` file in a directory.
pub struct OutboxNotifier {
    dir: PathBuf,
}

impl OutboxNotifier {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl Notifier for OutboxNotifier {
    fn send(&self, notification: &Notification) -> Result<(), ContactError> {
        fs::create_dir_all(&self.dir)?;
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();

        let mut attempt = 0u32;
        loop {
            let path = self.dir.join(format!("message-{stamp}-{attempt}.eml"));
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    file.write_all(notification.to_eml().as_bytes())?;
                    return Ok(());
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => attempt += 1,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

/// Validate a submission against its captcha and send the notification.
///
/// Nothing is sent when any problem is found.
pub fn submit(
    form: &ContactForm,
    captcha: &Captcha,
    answer: &str,
    notifier: &impl Notifier,
    config: &ContactConfig,
) -> Result<Notification, ContactError> {
    let mut problems = form.validate();
    if !captcha.verify(answer) {
        problems.push(Problem::CaptchaMismatch);
    }
    if !problems.is_empty() {
        return Err(ContactError::Rejected(problems));
    }

    let notification = compose(form, config);
    notifier.send(&notification)?;
    Ok(notification)
}
