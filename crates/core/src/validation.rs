//! Helpers for turning `validator` results into public field error maps.
//!
//! Request DTOs derive [`validator::Validate`] with snake_case Rust field
//! names; clients see camelCase names, in declaration order, each with the
//! list of messages that applied.

use indexmap::IndexMap;
use validator::{Validate, ValidationErrors};

use crate::error::CoreError;

/// Field name → messages, in the order the fields are declared.
pub type FieldErrors = IndexMap<String, Vec<String>>;

/// Run `validate()` on a DTO and convert any failure into
/// [`CoreError::InvalidFields`].
///
/// `field_order` lists the snake_case field names in declaration order;
/// fields missing from it are appended afterwards in name order.
pub fn validate_fields<T: Validate>(input: &T, field_order: &[&str]) -> Result<(), CoreError> {
    input
        .validate()
        .map_err(|errors| CoreError::InvalidFields(collect_field_errors(&errors, field_order)))
}

/// Flatten `ValidationErrors` into a [`FieldErrors`] map.
pub fn collect_field_errors(errors: &ValidationErrors, field_order: &[&str]) -> FieldErrors {
    let mut unordered: Vec<(String, Vec<String>)> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("Invalid value ({})", e.code),
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect();

    unordered.sort_by(|(a, _), (b, _)| {
        let pos = |name: &str| field_order.iter().position(|f| *f == name).unwrap_or(usize::MAX);
        pos(a).cmp(&pos(b)).then_with(|| a.cmp(b))
    });

    unordered
        .into_iter()
        .map(|(field, messages)| (to_camel_case(&field), messages))
        .collect()
}

/// Convert a snake_case identifier to camelCase (`full_name` → `fullName`).
pub fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for ch in name.chars() {
        if ch == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// Returns `true` when the string is empty or only whitespace.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
