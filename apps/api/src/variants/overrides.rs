//! Override Applier: applies path-addressed set/add/remove mutations.
//!
//! Overrides run against the JSON form of the document. After every override the
//! document is checked against the `Resume` shape so a bad write fails at the index
//! that caused it instead of surfacing later. Entries written through JSON get
//! their tags de-duplicated before the typed document is handed back.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::models::resume::Resume;
use crate::models::variant::Override;
use crate::variants::errors::{OverrideError, ResolveError};
use crate::variants::path::{self, FieldPath, Lookup, Removal};

/// Applies one override to an owned JSON document.
pub fn apply_override(mut doc: Value, o: &Override) -> Result<Value, OverrideError> {
    let field = FieldPath::parse(o.path())?;
    match o {
        Override::Set { value, .. } => {
            path::set(&mut doc, &field, value.clone())?;
        }
        Override::Add { value, .. } => {
            if let Lookup::Found(existing) = path::get(&doc, &field) {
                if !existing.is_array() {
                    debug!("add on '{field}' replaces a non-array value with a list");
                }
            }
            path::push(&mut doc, &field, value.clone())?;
        }
        Override::Remove { value, .. } => match path::remove(&mut doc, &field, value) {
            Removal::Elements(n) => debug!("remove on '{field}' dropped {n} element(s)"),
            Removal::Field => debug!("remove on '{field}' deleted the field"),
            Removal::Nothing => debug!("remove on '{field}' found nothing to remove"),
        },
    }
    Ok(doc)
}

/// Folds every override over the document in list order. The first failure aborts
/// the whole stage and reports the override's index.
pub fn apply_overrides(doc: Resume, overrides: &[Override]) -> Result<Resume, ResolveError> {
    if overrides.is_empty() {
        return Ok(doc);
    }

    let mut json = serde_json::to_value(&doc)?;
    let mut typed = doc;
    for (index, o) in overrides.iter().enumerate() {
        let fail = |source: OverrideError| ResolveError::Override {
            index,
            operation: o.operation(),
            path: o.path().to_string(),
            source,
        };

        json = apply_override(json, o).map_err(&fail)?;
        typed = Resume::deserialize(&json).map_err(|e| {
            fail(OverrideError::ShapeMismatch {
                path: o.path().to_string(),
                reason: e.to_string(),
            })
        })?;
    }
    typed.normalize();
    Ok(typed)
}
