//! Variant validation: turns a caller-supplied raw variant into typed rules
//! and overrides, collecting every malformed entry before anything is resolved.

use serde_json::Value;
use uuid::Uuid;

use crate::models::variant::{Override, RawVariantSpec, Rule, VariantSpec};
use crate::variants::errors::{SpecError, SpecErrorKind, SpecErrors, SpecTarget};
use crate::variants::path::FieldPath;

/// Validates a raw variant. Returns all errors at once, never a partial spec.
pub fn validate_variant(raw: RawVariantSpec) -> Result<VariantSpec, SpecErrors> {
    let mut errors = Vec::new();
    let mut rules = Vec::with_capacity(raw.rules.len());
    let mut overrides = Vec::with_capacity(raw.overrides.len());

    for (index, value) in raw.rules.into_iter().enumerate() {
        match parse_rule(value) {
            Ok(rule) => rules.push(rule),
            Err(kind) => errors.push(SpecError {
                target: SpecTarget::Rule,
                index,
                kind,
            }),
        }
    }

    for (index, value) in raw.overrides.into_iter().enumerate() {
        match parse_override(value) {
            Ok(o) => overrides.push(o),
            Err(kind) => errors.push(SpecError {
                target: SpecTarget::Override,
                index,
                kind,
            }),
        }
    }

    if !errors.is_empty() {
        return Err(SpecErrors(errors));
    }

    Ok(VariantSpec {
        id: raw.id.unwrap_or_else(Uuid::new_v4),
        name: raw.name,
        description: raw.description,
        section_settings: raw.section_settings,
        rules,
        overrides,
    })
}

pub fn parse_rule(value: Value) -> Result<Rule, SpecErrorKind> {
    let Some(obj) = value.as_object() else {
        return Err(SpecErrorKind::NotAnObject);
    };
    let kind = match obj.get("type") {
        Some(Value::String(kind)) => kind.clone(),
        Some(other) => return Err(SpecErrorKind::UnknownRuleType(other.to_string())),
        None => return Err(SpecErrorKind::MissingType),
    };
    if !Rule::KINDS.contains(&kind.as_str()) {
        return Err(SpecErrorKind::UnknownRuleType(kind));
    }

    let rule: Rule = serde_json::from_value(value)
        .map_err(|e| SpecErrorKind::InvalidValue(format!("{kind}: {e}")))?;

    if let Rule::DateRange(range) = &rule {
        if range.start > range.end {
            return Err(SpecErrorKind::InvalidDateRange(format!(
                "start {} is after end {}",
                range.start, range.end
            )));
        }
    }
    Ok(rule)
}

pub fn parse_override(value: Value) -> Result<Override, SpecErrorKind> {
    let Some(obj) = value.as_object() else {
        return Err(SpecErrorKind::NotAnObject);
    };
    let operation = match obj.get("operation") {
        Some(Value::String(op)) => op.clone(),
        Some(other) => return Err(SpecErrorKind::UnknownOperation(other.to_string())),
        None => return Err(SpecErrorKind::MissingOperation),
    };
    if !Override::OPERATIONS.contains(&operation.as_str()) {
        return Err(SpecErrorKind::UnknownOperation(operation));
    }
    match obj.get("path") {
        Some(Value::String(path)) => {
            FieldPath::parse(path).map_err(|e| SpecErrorKind::InvalidPath(e.to_string()))?;
        }
        Some(_) => {
            return Err(SpecErrorKind::InvalidPath(
                "path must be a string".to_string(),
            ))
        }
        None => return Err(SpecErrorKind::MissingPath),
    }

    serde_json::from_value(value)
        .map_err(|e| SpecErrorKind::InvalidValue(format!("{operation}: {e}")))
}
