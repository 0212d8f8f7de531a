//! Field validators.
//!
//! Validation runs on step advancement and submission, never on keystrokes.
//! Each pass returns a fresh key-to-error map; the wizard replaces its
//! previous error set wholesale instead of accumulating.
//!
//! Keys use the payload spelling of the field (`"fullName"`,
//! `"nominees[0].ifscCode"`) so server-side rejections merge into the same
//! map.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::registration::draft::{RegistrationDraft, ServiceDetails};

/// Minimum length for free-text name-like fields.
const MIN_TEXT_LEN: usize = 2;
/// Minimum length for a bank account number.
const MIN_ACCOUNT_LEN: usize = 8;
/// Inclusive age bounds derived from the date of birth.
const MIN_AGE: i32 = 18;
const MAX_AGE: i32 = 120;

static AADHAAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{12}$").expect("pattern compiles"));
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[6-9][0-9]{9}$").expect("pattern compiles"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("pattern compiles")
});
static IFSC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{4}0[A-Z0-9]{6}$").expect("pattern compiles"));

/// Why a single field was rejected.
///
/// The `Display` text is the built-in English fallback; surfaces resolve
/// [`message_key`](Self::message_key) through the localizer first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    #[error("This field is required")]
    Required,
    #[error("Must be at least {min} characters")]
    TooShort { min: usize },
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Aadhaar number must be exactly 12 digits")]
    InvalidAadhaar,
    #[error("Enter a valid 10 digit mobile number")]
    InvalidPhone,
    #[error("Enter a valid email address")]
    InvalidEmail,
    #[error("Enter a valid IFSC code")]
    InvalidIfsc,
    #[error("Age must be between {min} and {max} years")]
    AgeOutOfRange { min: i32, max: i32 },
    #[error("Account numbers do not match")]
    AccountMismatch,
    /// Carried over verbatim from a server-side rejection.
    #[error("{message}")]
    Server { message: String },
}

impl ValidationError {
    /// Catalog key for the localized message.
    pub fn message_key(&self) -> &'static str {
        match self {
            ValidationError::Required => "validation.required",
            ValidationError::TooShort { .. } => "validation.too_short",
            ValidationError::PasswordMismatch => "validation.password_mismatch",
            ValidationError::InvalidAadhaar => "validation.aadhaar",
            ValidationError::InvalidPhone => "validation.phone",
            ValidationError::InvalidEmail => "validation.email",
            ValidationError::InvalidIfsc => "validation.ifsc",
            ValidationError::AgeOutOfRange { .. } => "validation.age_range",
            ValidationError::AccountMismatch => "validation.account_mismatch",
            ValidationError::Server { .. } => "validation.server",
        }
    }
}

/// Field key to rejection, ordered by key for stable rendering.
pub type FieldErrors = BTreeMap<String, ValidationError>;

/// Uppercases and trims an IFSC code. Applied before storage and before
/// every pattern check, so input case never matters.
pub fn normalize_ifsc(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Whole years between `date_of_birth` (ISO `YYYY-MM-DD`) and `today`,
/// decremented when the birthday has not yet occurred this year. `None`
/// when the input does not parse as a date.
pub fn age_on(date_of_birth: &str, today: NaiveDate) -> Option<i32> {
    let dob = NaiveDate::parse_from_str(date_of_birth, "%Y-%m-%d").ok()?;
    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    Some(age)
}

/// Error key for a nominee field, e.g. `nominees[1].ifscCode`.
pub fn nominee_key(index: usize, field: &str) -> String {
    format!("nominees[{index}].{field}")
}

/// Account step: state, identifier and matching passwords are all required.
pub fn validate_account(draft: &RegistrationDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if draft.service.state_code().is_empty() {
        errors.insert("state".to_string(), ValidationError::Required);
    }
    if draft.credentials.identifier_code.is_empty() {
        errors.insert("identifierCode".to_string(), ValidationError::Required);
    }
    if draft.credentials.password.is_empty() {
        errors.insert("password".to_string(), ValidationError::Required);
    }
    if draft.credentials.password_confirmation.is_empty() {
        errors.insert("passwordConfirmation".to_string(), ValidationError::Required);
    } else if !draft.credentials.password.is_empty()
        && draft.credentials.password != draft.credentials.password_confirmation
    {
        errors.insert(
            "passwordConfirmation".to_string(),
            ValidationError::PasswordMismatch,
        );
    }

    errors
}

/// Personal step: every field is optional here and format-checked only when
/// filled in.
pub fn validate_personal(draft: &RegistrationDraft, today: NaiveDate) -> FieldErrors {
    let mut errors = FieldErrors::new();
    let personal = &draft.personal;

    if !personal.full_name.is_empty() && personal.full_name.chars().count() < MIN_TEXT_LEN {
        errors.insert(
            "fullName".to_string(),
            ValidationError::TooShort { min: MIN_TEXT_LEN },
        );
    }
    if !personal.date_of_birth.is_empty() {
        // An unparseable date yields no age and fails the range check the
        // same way an out-of-range one does.
        let in_range = age_on(&personal.date_of_birth, today)
            .map(|age| (MIN_AGE..=MAX_AGE).contains(&age))
            .unwrap_or(false);
        if !in_range {
            errors.insert(
                "dateOfBirth".to_string(),
                ValidationError::AgeOutOfRange {
                    min: MIN_AGE,
                    max: MAX_AGE,
                },
            );
        }
    }
    if !personal.aadhaar_number.is_empty() && !AADHAAR_RE.is_match(&personal.aadhaar_number) {
        errors.insert("aadhaarNumber".to_string(), ValidationError::InvalidAadhaar);
    }
    if !personal.phone.is_empty() && !PHONE_RE.is_match(&personal.phone) {
        errors.insert("phone".to_string(), ValidationError::InvalidPhone);
    }
    if !personal.email.is_empty() && !EMAIL_RE.is_match(&personal.email) {
        errors.insert("email".to_string(), ValidationError::InvalidEmail);
    }

    errors
}

/// Service step: employee fields are format-checked when present, the
/// pensioner's retirement date and proof are required, and the bank block
/// applies to both kinds.
pub fn validate_service(draft: &RegistrationDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();

    match &draft.service {
        ServiceDetails::Employee(employee) => {
            let fields = [
                ("district", &employee.district),
                ("department", &employee.department),
                ("organisation", &employee.organisation),
                ("designation", &employee.designation),
            ];
            for (key, value) in fields {
                if !value.is_empty() && value.chars().count() < MIN_TEXT_LEN {
                    errors.insert(
                        key.to_string(),
                        ValidationError::TooShort { min: MIN_TEXT_LEN },
                    );
                }
            }
        }
        ServiceDetails::Pensioner(pensioner) => {
            if pensioner.date_of_retirement.is_empty() {
                errors.insert("dateOfRetirement".to_string(), ValidationError::Required);
            }
            if pensioner.retirement_document.is_none() {
                errors.insert("retirementDocument".to_string(), ValidationError::Required);
            }
        }
    }

    let bank = &draft.bank;
    if !bank.account_number.is_empty() && bank.account_number.chars().count() < MIN_ACCOUNT_LEN {
        errors.insert(
            "accountNumber".to_string(),
            ValidationError::TooShort {
                min: MIN_ACCOUNT_LEN,
            },
        );
    }
    if !bank.account_number.is_empty()
        && !bank.account_number_confirmation.is_empty()
        && bank.account_number != bank.account_number_confirmation
    {
        errors.insert(
            "confirmAccountNumber".to_string(),
            ValidationError::AccountMismatch,
        );
    }
    if !bank.bank_name.is_empty() && bank.bank_name.chars().count() < MIN_TEXT_LEN {
        errors.insert(
            "bankName".to_string(),
            ValidationError::TooShort { min: MIN_TEXT_LEN },
        );
    }
    if !bank.ifsc_code.is_empty() && !IFSC_RE.is_match(&normalize_ifsc(&bank.ifsc_code)) {
        errors.insert("ifscCode".to_string(), ValidationError::InvalidIfsc);
    }

    errors
}

/// Nominees step: untouched slots are skipped entirely; slots with any
/// identifying data get the full required-field treatment.
///
/// The nominee IFSC is pattern-checked even when empty, unlike the
/// member's own. The asymmetry is long-standing server behavior and kept
/// on purpose.
pub fn validate_nominees(draft: &RegistrationDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();

    for (index, nominee) in draft.nominees.iter().enumerate() {
        if !nominee.is_dirty() {
            continue;
        }

        if nominee.name.is_empty() {
            errors.insert(nominee_key(index, "name"), ValidationError::Required);
        }
        if nominee.relation.is_none() {
            errors.insert(nominee_key(index, "relation"), ValidationError::Required);
        }
        if nominee.date_of_birth.is_empty() {
            errors.insert(nominee_key(index, "dateOfBirth"), ValidationError::Required);
        }
        if nominee.aadhaar_number.is_empty() {
            errors.insert(
                nominee_key(index, "aadhaarNumber"),
                ValidationError::Required,
            );
        } else if !AADHAAR_RE.is_match(&nominee.aadhaar_number) {
            errors.insert(
                nominee_key(index, "aadhaarNumber"),
                ValidationError::InvalidAadhaar,
            );
        }

        let bank = &nominee.bank;
        if bank.account_number.is_empty() {
            errors.insert(
                nominee_key(index, "accountNumber"),
                ValidationError::Required,
            );
        }
        if !bank.account_number.is_empty()
            && !bank.account_number_confirmation.is_empty()
            && bank.account_number != bank.account_number_confirmation
        {
            errors.insert(
                nominee_key(index, "confirmAccountNumber"),
                ValidationError::AccountMismatch,
            );
        }
        if bank.bank_name.is_empty() {
            errors.insert(nominee_key(index, "bankName"), ValidationError::Required);
        }
        if !IFSC_RE.is_match(&normalize_ifsc(&bank.ifsc_code)) {
            errors.insert(nominee_key(index, "ifscCode"), ValidationError::InvalidIfsc);
        }
    }

    errors
}

/// Final gate before assembly: the member's account number and its re-entry
/// must agree. A mismatch here stops the submission before any network
/// call.
pub fn validate_submission_gate(draft: &RegistrationDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();
    let bank = &draft.bank;
    if !bank.account_number.is_empty()
        && !bank.account_number_confirmation.is_empty()
        && bank.account_number != bank.account_number_confirmation
    {
        errors.insert(
            "confirmAccountNumber".to_string(),
            ValidationError::AccountMismatch,
        );
    }
    errors
}
