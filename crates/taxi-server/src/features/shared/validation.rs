//! Shared validation utilities
//!
//! Field validators are pure functions returning a typed error per rule.
//! Forms run every validator they need and gather the failures in a
//! [`FieldErrors`] map, so a rejected form reports all of its problems at once.
//!
//! # Examples
//!
//! ```rust,ignore
//! use taxi_server::features::shared::validation::{validate_license_number, FieldErrors};
//!
//! let mut errors = FieldErrors::new();
//! errors.check("license_number", validate_license_number("AB12345"));
//! assert!(errors.contains("license_number"));
//! ```

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Key for errors that belong to the form rather than one field
pub const NON_FIELD_ERRORS: &str = "__all__";

pub const LICENSE_NUMBER_LENGTH: usize = 8;
const LICENSE_LETTERS: usize = 2;

pub const USERNAME_MAX_LENGTH: usize = 150;
pub const PERSON_NAME_MAX_LENGTH: usize = 150;
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Field name to messages, in field order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Record the outcome of a validator under `field`
    pub fn check<E: fmt::Display>(&mut self, field: &str, result: Result<(), E>) {
        if let Err(e) = result {
            self.add(field, e.to_string());
        }
    }

    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// `Ok(value)` when nothing was recorded
    pub fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{}: {}", field, message)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// Errors that can occur during license number validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LicenseNumberError {
    #[error("License number should consist of 8 characters")]
    WrongLength,

    #[error("First 2 characters should be uppercase letters")]
    LettersExpected,

    #[error("Last 6 characters should be digits")]
    DigitsExpected,
}

/// Errors that can occur during required text validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NameValidationError {
    #[error("This field is required.")]
    Required,

    #[error("Ensure this value has at most {max_length} characters (it has {length}).")]
    TooLong { max_length: usize, length: usize },
}

/// Errors that can occur during username validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UsernameValidationError {
    #[error("This field is required.")]
    Required,

    #[error("Ensure this value has at most {max_length} characters (it has {length}).")]
    TooLong { max_length: usize, length: usize },

    #[error(
        "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters."
    )]
    InvalidCharacters,
}

/// Errors that can occur during password validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PasswordValidationError {
    #[error("This field is required.")]
    Required,

    #[error("This password is too short. It must contain at least {min_length} characters.")]
    TooShort { min_length: usize },

    #[error("This password is entirely numeric.")]
    EntirelyNumeric,

    #[error("The two password fields didn't match.")]
    Mismatch,
}

/// Validate a driver's license number
///
/// # Rules
/// - Exactly 8 characters
/// - First 2 are ASCII uppercase letters
/// - Last 6 are ASCII digits
///
/// The value is checked as given; nothing is trimmed or upper-cased.
pub fn validate_license_number(license_number: &str) -> Result<(), LicenseNumberError> {
    let chars: Vec<char> = license_number.chars().collect();

    if chars.len() != LICENSE_NUMBER_LENGTH {
        return Err(LicenseNumberError::WrongLength);
    }

    let (letters, digits) = chars.split_at(LICENSE_LETTERS);

    if !letters.iter().all(char::is_ascii_uppercase) {
        return Err(LicenseNumberError::LettersExpected);
    }

    if !digits.iter().all(char::is_ascii_digit) {
        return Err(LicenseNumberError::DigitsExpected);
    }

    Ok(())
}

/// Validate a required text field
///
/// # Rules
/// - Must not be empty (after trimming whitespace)
/// - Must not exceed max_length characters once trimmed
pub fn validate_name(name: &str, max_length: usize) -> Result<(), NameValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(NameValidationError::Required);
    }

    validate_max_length(name, max_length)
}

/// Validate an optional text field; only the length is checked
pub fn validate_max_length(value: &str, max_length: usize) -> Result<(), NameValidationError> {
    let length = value.chars().count();
    if length > max_length {
        return Err(NameValidationError::TooLong { max_length, length });
    }
    Ok(())
}

/// Validate a username
///
/// # Rules
/// - Must not be empty
/// - At most 150 characters
/// - Letters, digits and `@ . + - _` only
pub fn validate_username(username: &str) -> Result<(), UsernameValidationError> {
    if username.is_empty() {
        return Err(UsernameValidationError::Required);
    }

    let length = username.chars().count();
    if length > USERNAME_MAX_LENGTH {
        return Err(UsernameValidationError::TooLong {
            max_length: USERNAME_MAX_LENGTH,
            length,
        });
    }

    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
    {
        return Err(UsernameValidationError::InvalidCharacters);
    }

    Ok(())
}

/// Validate a new password
///
/// # Rules
/// - At least 8 characters
/// - Not made of digits only
pub fn validate_password_strength(password: &str) -> Result<(), PasswordValidationError> {
    if password.is_empty() {
        return Err(PasswordValidationError::Required);
    }

    if password.chars().count() < PASSWORD_MIN_LENGTH {
        return Err(PasswordValidationError::TooShort {
            min_length: PASSWORD_MIN_LENGTH,
        });
    }

    if password.chars().all(|c| c.is_ascii_digit()) {
        return Err(PasswordValidationError::EntirelyNumeric);
    }

    Ok(())
}

/// Check a password/confirmation pair; errors are keyed `password1`/`password2`
pub fn validate_password_pair(errors: &mut FieldErrors, password1: &str, password2: &str) {
    if password1.is_empty() {
        errors.add("password1", PasswordValidationError::Required.to_string());
    }
    if password2.is_empty() {
        errors.add("password2", PasswordValidationError::Required.to_string());
    }
    if password1.is_empty() || password2.is_empty() {
        return;
    }

    if password1 != password2 {
        errors.add("password2", PasswordValidationError::Mismatch.to_string());
        return;
    }

    errors.check("password2", validate_password_strength(password2));
}
