//! Contact form models.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

use crate::errors::Error;

pub const MIN_MESSAGE_LENGTH: usize = 10;

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContactAccepted {
    pub success: bool,
    pub message: String,
}

/// `local@domain.tld` with no whitespace
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || email.chars().any(char::is_whitespace) || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

impl ContactRequest {
    /// Collect every failing field rather than stopping at the first
    pub fn validate(&self) -> Result<(), Error> {
        let mut fields = BTreeMap::new();

        if self.name.trim().is_empty() {
            fields.insert("name".to_string(), "Name is required.".to_string());
        }
        if !is_valid_email(self.email.trim()) {
            fields.insert("email".to_string(), "Enter a valid email address.".to_string());
        }
        if self.subject.trim().is_empty() {
            fields.insert("subject".to_string(), "Subject is required.".to_string());
        }
        if self.message.trim().chars().count() < MIN_MESSAGE_LENGTH {
            fields.insert(
                "message".to_string(),
                format!("Message must be at least {MIN_MESSAGE_LENGTH} characters."),
            );
        }

        if fields.is_empty() { Ok(()) } else { Err(Error::Validation { fields }) }
    }
}
