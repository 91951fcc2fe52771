use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::sanitize::sanitize;

pub const MIN_MESSAGE_CHARS: usize = 10;

pub type FieldErrors = BTreeMap<&'static str, &'static str>;

// Characters an unquoted local-part atom may not contain (besides whitespace)
const LOCAL_FORBIDDEN: &[char] = &['<', '>', '(', ')', '[', ']', '\\', '.', ',', ';', ':', '@', '"'];

/// RFC 5322-shaped email check: dot-atom or quoted local part, then either a
/// bracketed IPv4 literal or a hostname ending in an alphabetic TLD.
pub fn is_valid_email(email: &str) -> bool {
    // the domain never contains '@', a quoted local part might
    let Some((local, domain)) = email.rsplit_once('@') else {
        return false;
    };
    valid_local_part(local) && valid_domain(domain)
}

fn valid_local_part(local: &str) -> bool {
    if local.len() >= 3 && local.starts_with('"') && local.ends_with('"') {
        let inner = &local[1..local.len() - 1];
        return !inner.contains(|c: char| matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}'));
    }

    local.split('.').all(|atom| {
        !atom.is_empty()
            && !atom
                .chars()
                .any(|c| c.is_whitespace() || LOCAL_FORBIDDEN.contains(&c))
    })
}

fn valid_domain(domain: &str) -> bool {
    if let Some(literal) = domain.strip_prefix('[').and_then(|d| d.strip_suffix(']')) {
        let octets: Vec<&str> = literal.split('.').collect();
        return octets.len() == 4
            && octets
                .iter()
                .all(|o| (1..=3).contains(&o.len()) && o.chars().all(|c| c.is_ascii_digit()));
    }

    let Some((labels, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    let labels_ok = labels.split('.').all(|label| {
        !label.is_empty() && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });
    labels_ok && tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
}

// Contact form as posted by the page
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
    // anti-forgery marker; accepted but never verified
    #[serde(rename = "_csrf", default)]
    pub csrf: Option<String>,
}

// What is kept after validation: every field escaped
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    /// Checks every field and reports all failures at once.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.name.trim().is_empty() {
            errors.insert("name", "Name is required");
        }

        if self.email.trim().is_empty() {
            errors.insert("email", "Email is required");
        } else if !is_valid_email(&self.email) {
            errors.insert("email", "Please enter a valid email");
        }

        if self.subject.trim().is_empty() {
            errors.insert("subject", "Subject is required");
        }

        if self.message.trim().is_empty() {
            errors.insert("message", "Message is required");
        } else if self.message.chars().count() < MIN_MESSAGE_CHARS {
            errors.insert("message", "Message must be at least 10 characters");
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    pub fn sanitized(&self) -> ContactSubmission {
        ContactSubmission {
            name: sanitize(self.name.as_str()),
            email: sanitize(self.email.as_str()),
            subject: sanitize(self.subject.as_str()),
            message: sanitize(self.message.as_str()),
        }
    }
}
