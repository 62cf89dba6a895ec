//! Fixed validation rules for the order form.
//!
//! Two entry points:
//!
//! - [`validate_field`] : per-field message for `fullName` / `size`, evaluated
//!   on trimmed input. Feeds [`FieldErrors`].
//! - [`validate_all`] : whole-draft predicate over the values as stored.
//!   The only input to the submit-enabled flag.
//!
//! Toppings carry no rules: any set of identifiers is accepted.

use pzo_schemas::{OrderDraft, Size};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const FULL_NAME_MIN_CHARS: usize = 3;
pub const FULL_NAME_MAX_CHARS: usize = 20;

pub const FULL_NAME_REQUIRED: &str = "Full name is required";
pub const FULL_NAME_TOO_SHORT: &str = "full name must be at least 3 characters";
pub const FULL_NAME_TOO_LONG: &str = "full name must be at most 20 characters";
pub const SIZE_REQUIRED: &str = "Size is required";
pub const SIZE_INCORRECT: &str = "size must be S or M or L";

// ---------------------------------------------------------------------------
// FieldName
// ---------------------------------------------------------------------------

/// The text/select fields of the form. Toppings are toggled, not set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldName {
    FullName,
    Size,
}

impl FieldName {
    /// Form-level name as used in the markup and the JSON body.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::FullName => "fullName",
            FieldName::Size => "size",
        }
    }

    pub fn parse(name: &str) -> Result<Self, UnknownField> {
        match name {
            "fullName" => Ok(FieldName::FullName),
            "size" => Ok(FieldName::Size),
            other => Err(UnknownField(other.to_string())),
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field name that is neither `fullName` nor `size`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownField(pub String);

impl fmt::Display for UnknownField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown form field '{}' (expected fullName | size)", self.0)
    }
}

impl std::error::Error for UnknownField {}

// ---------------------------------------------------------------------------
// FieldErrors
// ---------------------------------------------------------------------------

/// Inline error text per validated field. Empty string = no error.
///
/// Derived state only: the controller rewrites an entry whenever the
/// corresponding field changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldErrors {
    pub full_name: String,
    pub size: String,
}

impl FieldErrors {
    pub fn get(&self, field: FieldName) -> Option<&str> {
        let msg = match field {
            FieldName::FullName => &self.full_name,
            FieldName::Size => &self.size,
        };
        (!msg.is_empty()).then_some(msg.as_str())
    }

    pub(crate) fn set(&mut self, field: FieldName, msg: Option<&str>) {
        let slot = match field {
            FieldName::FullName => &mut self.full_name,
            FieldName::Size => &mut self.size,
        };
        slot.clear();
        if let Some(m) = msg {
            slot.push_str(m);
        }
    }

    pub fn is_clear(&self) -> bool {
        self.full_name.is_empty() && self.size.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// Message for `value` of `field`, or `None` when the value passes.
///
/// Input is trimmed before the rules run.
pub fn validate_field(field: FieldName, value: &str) -> Option<&'static str> {
    let v = value.trim();
    match field {
        FieldName::FullName => full_name_rule(v),
        FieldName::Size => size_rule(v),
    }
}

/// `true` iff every rule passes for the draft exactly as stored.
pub fn validate_all(draft: &OrderDraft) -> bool {
    full_name_rule(&draft.full_name).is_none() && size_rule(&draft.size).is_none()
}

// Required wins over the length checks; lengths count chars, not bytes.
fn full_name_rule(v: &str) -> Option<&'static str> {
    if v.is_empty() {
        return Some(FULL_NAME_REQUIRED);
    }
    let n = v.chars().count();
    if n < FULL_NAME_MIN_CHARS {
        Some(FULL_NAME_TOO_SHORT)
    } else if n > FULL_NAME_MAX_CHARS {
        Some(FULL_NAME_TOO_LONG)
    } else {
        None
    }
}

fn size_rule(v: &str) -> Option<&'static str> {
    if v.is_empty() {
        return Some(SIZE_REQUIRED);
    }
    match Size::parse(v) {
        Some(_) => None,
        None => Some(SIZE_INCORRECT),
    }
}
