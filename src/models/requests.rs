//! Request DTOs for the user API
//!
//! Defines the structure of incoming HTTP request bodies and their
//! validation rules.

use serde::Deserialize;

use crate::error::Result;
use crate::password::hash_password;
use crate::records::{NewUser, UserChanges};

/// Maximum length of `name` and `email`.
pub const MAX_FIELD_LENGTH: usize = 255;

/// Minimum length of a plain-text password.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Request body for POST /api/users
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub password_confirmation: Option<String>,
}

impl CreateUserRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        let mut errors = Vec::new();

        if let Some(msg) = check_name(trimmed(&self.name)) {
            errors.push(msg);
        }
        match trimmed(&self.email) {
            None | Some("") => errors.push("The email field is required.".to_string()),
            Some(email) => errors.extend(check_email(email)),
        }
        match self.password.as_deref() {
            None | Some("") => errors.push("The password field is required.".to_string()),
            Some(password) if password.chars().count() < MIN_PASSWORD_LENGTH => errors.push(
                format!("The password must be at least {} characters.", MIN_PASSWORD_LENGTH),
            ),
            Some(password) if self.password_confirmation.as_deref() != Some(password) => {
                errors.push("The password confirmation does not match.".to_string())
            }
            Some(_) => {}
        }

        join(errors)
    }

    /// Converts a validated request into store attributes, hashing the password.
    ///
    /// `name` and `email` are stored trimmed; the password is taken verbatim.
    pub fn into_new_user(self) -> Result<NewUser> {
        let password_hash = hash_password(self.password.as_deref().unwrap_or_default())?;
        Ok(NewUser {
            name: trimmed(&self.name).unwrap_or_default().to_string(),
            email: trimmed(&self.email).unwrap_or_default().to_string(),
            password_hash,
        })
    }
}

/// Request body for PUT /api/users/:id
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl UpdateUserRequest {
    /// Validates the request data. `name` is required, `email` optional.
    pub fn validate(&self) -> Option<String> {
        let mut errors = Vec::new();

        if let Some(msg) = check_name(trimmed(&self.name)) {
            errors.push(msg);
        }
        if let Some(email) = trimmed(&self.email) {
            errors.extend(check_email(email));
        }

        join(errors)
    }

    pub fn into_changes(self) -> UserChanges {
        UserChanges {
            name: trimmed(&self.name).map(str::to_string),
            email: trimmed(&self.email).map(str::to_string),
            password_hash: None,
        }
    }
}

/// Field with surrounding whitespace removed; blank input reads as `""`.
fn trimmed(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim)
}

fn check_name(name: Option<&str>) -> Option<String> {
    match name {
        None | Some("") => Some("The name field is required.".to_string()),
        Some(name) if name.chars().count() > MAX_FIELD_LENGTH => Some(format!(
            "The name may not be greater than {} characters.",
            MAX_FIELD_LENGTH
        )),
        Some(_) => None,
    }
}

fn check_email(email: &str) -> Option<String> {
    if email.chars().count() > MAX_FIELD_LENGTH {
        return Some(format!(
            "The email may not be greater than {} characters.",
            MAX_FIELD_LENGTH
        ));
    }
    let well_formed = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if well_formed {
        None
    } else {
        Some("The email must be a valid email address.".to_string())
    }
}

fn join(errors: Vec<String>) -> Option<String> {
    if errors.is_empty() {
        None
    } else {
        Some(errors.join(" "))
    }
}
