//! Lead intake: inquiry statuses and the public submission schema.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationError};

use crate::error::CoreError;
use crate::validation::{validate_fields, FieldErrors};

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle of an inquiry as handled by the admin back office.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InquiryStatus {
    Pending,
    Contacted,
    Closed,
}

impl InquiryStatus {
    pub const ALL: [InquiryStatus; 3] = [Self::Pending, Self::Contacted, Self::Closed];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Contacted => "contacted",
            Self::Closed => "closed",
        }
    }

    /// Parse a status string, rejecting unknown values.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str() == value)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid inquiry status '{value}'. Must be one of: pending, contacted, closed"
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// Submission schema
// ---------------------------------------------------------------------------

// ASCII digits only: `\d` would also accept Devanagari or full-width digits.
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("valid regex"));
static PINCODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{6}$").expect("valid regex"));

/// Field declaration order, used to order validation errors.
const INQUIRY_FIELDS: &[&str] = &[
    "full_name",
    "email",
    "phone",
    "city",
    "state",
    "pincode",
    "service_type",
];

/// Public lead-capture form body.
///
/// Missing JSON fields deserialize as empty strings so they surface as
/// "required" field errors rather than a body rejection.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct InquirySubmission {
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,

    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Please enter a valid email")
    )]
    pub email: String,

    #[validate(
        length(min = 1, message = "Phone number is required"),
        custom(function = "validate_phone")
    )]
    pub phone: String,

    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,

    #[validate(length(min = 1, message = "State is required"))]
    pub state: String,

    #[validate(
        length(min = 1, message = "Pincode is required"),
        custom(function = "validate_pincode")
    )]
    pub pincode: String,

    #[validate(length(min = 1, message = "Service type is required"))]
    pub service_type: String,
}

/// Public names of the form fields, in form order.
const FORM_FIELDS: [&str; 7] = [
    "fullName",
    "email",
    "phone",
    "city",
    "state",
    "pincode",
    "serviceType",
];

impl InquirySubmission {
    /// Validate every field, returning all field errors at once.
    pub fn check(&self) -> Result<(), CoreError> {
        validate_fields(self, INQUIRY_FIELDS)
    }

    /// Read and validate a raw request body.
    ///
    /// A field that is present but not a string (a number, `null`) is a
    /// field error like any rule failure; it takes the place of that
    /// field's rule messages.
    pub fn from_json(body: &Value) -> Result<Self, CoreError> {
        let Some(object) = body.as_object() else {
            return Err(CoreError::Validation(format!(
                "Expected a JSON object, received {}",
                json_kind(body)
            )));
        };

        let mut type_errors = FieldErrors::new();
        let mut text = |field: &str| match object.get(field) {
            None => String::new(),
            Some(Value::String(value)) => value.clone(),
            Some(other) => {
                type_errors.insert(
                    field.to_string(),
                    vec![format!("Expected string, received {}", json_kind(other))],
                );
                String::new()
            }
        };
        let input = Self {
            full_name: text("fullName"),
            email: text("email"),
            phone: text("phone"),
            city: text("city"),
            state: text("state"),
            pincode: text("pincode"),
            service_type: text("serviceType"),
        };

        let rule_errors = match input.check() {
            Ok(()) => FieldErrors::new(),
            Err(CoreError::InvalidFields(errors)) => errors,
            Err(other) => return Err(other),
        };
        if type_errors.is_empty() && rule_errors.is_empty() {
            return Ok(input);
        }

        let merged = FORM_FIELDS
            .iter()
            .filter_map(|field| {
                type_errors
                    .get(*field)
                    .or_else(|| rule_errors.get(*field))
                    .map(|messages| (field.to_string(), messages.clone()))
            })
            .collect();
        Err(CoreError::InvalidFields(merged))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if PHONE_RE.is_match(phone) {
        Ok(())
    } else {
        Err(ValidationError::new("phone")
            .with_message("Please enter a valid 10-digit phone number".into()))
    }
}

fn validate_pincode(pincode: &str) -> Result<(), ValidationError> {
    if PINCODE_RE.is_match(pincode) {
        Ok(())
    } else {
        Err(ValidationError::new("pincode")
            .with_message("Please enter a valid 6-digit pincode".into()))
    }
}
