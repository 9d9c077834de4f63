//! Path Accessor: resolves dot-separated field paths against a JSON document.
//!
//! Paths address whole fields only: `skills.primary` names the list, never an element.
//! Writers refuse to walk through a non-object intermediate value and report where
//! the conflict happened instead of overwriting it.

use std::fmt;

use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("path is empty")]
    Empty,
    #[error("path '{0}' contains an empty segment")]
    EmptySegment(String),
}

/// A parsed, non-empty field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    pub fn parse(raw: &str) -> Result<Self, PathError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(PathError::Empty);
        }
        let segments: Vec<String> = raw.split('.').map(str::to_string).collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(PathError::EmptySegment(raw.to_string()));
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    fn split_last(&self) -> (&[String], &str) {
        // parse() guarantees at least one segment
        match self.segments.split_last() {
            Some((last, parents)) => (parents, last.as_str()),
            None => (&[], ""),
        }
    }

    fn prefix(&self, len: usize) -> String {
        self.segments[..len].join(".")
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

/// A write could not proceed because an intermediate value is not an object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("path '{path}' conflicts with non-object value at '{at}'")]
pub struct PathConflict {
    pub path: String,
    pub at: String,
}

/// Outcome of reading a path.
#[derive(Debug, PartialEq)]
pub enum Lookup<'a> {
    Found(&'a Value),
    NotFound,
    /// An intermediate segment holds a non-object value.
    Conflict { at: String },
}

pub fn get<'a>(doc: &'a Value, path: &FieldPath) -> Lookup<'a> {
    let mut current = doc;
    for (depth, segment) in path.segments.iter().enumerate() {
        let Value::Object(map) = current else {
            return Lookup::Conflict {
                at: if depth == 0 {
                    String::new()
                } else {
                    path.prefix(depth)
                },
            };
        };
        match map.get(segment) {
            Some(next) => current = next,
            None => return Lookup::NotFound,
        }
    }
    Lookup::Found(current)
}

/// Walks to the object that owns the final segment, creating empty objects for
/// missing intermediates.
fn parent_mut<'a>(
    doc: &'a mut Value,
    path: &FieldPath,
) -> Result<&'a mut Map<String, Value>, PathConflict> {
    let (parents, _) = path.split_last();
    let conflict = |depth: usize| PathConflict {
        path: path.to_string(),
        at: path.prefix(depth),
    };

    let mut current = doc;
    if !current.is_object() {
        return Err(conflict(0));
    }
    for (depth, segment) in parents.iter().enumerate() {
        let map = match current {
            Value::Object(map) => map,
            _ => return Err(conflict(depth)),
        };
        let next = map
            .entry(segment.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        if !next.is_object() {
            return Err(conflict(depth + 1));
        }
        current = next;
    }
    match current {
        Value::Object(map) => Ok(map),
        _ => Err(conflict(parents.len())),
    }
}

/// Writes `value` at `path`, replacing whatever was there (arrays included).
pub fn set(doc: &mut Value, path: &FieldPath, value: Value) -> Result<(), PathConflict> {
    let (_, last) = path.split_last();
    parent_mut(doc, path)?.insert(last.to_string(), value);
    Ok(())
}

/// Appends `value` to the array at `path`. A missing or non-array field becomes `[]` first.
pub fn push(doc: &mut Value, path: &FieldPath, value: Value) -> Result<(), PathConflict> {
    let (_, last) = path.split_last();
    let slot = parent_mut(doc, path)?
        .entry(last.to_string())
        .or_insert_with(|| Value::Array(Vec::new()));
    if !slot.is_array() {
        *slot = Value::Array(Vec::new());
    }
    if let Value::Array(items) = slot {
        items.push(value);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// Elements equal to the value were dropped from an array field.
    Elements(usize),
    /// A non-array field was deleted.
    Field,
    /// Nothing lives at the path.
    Nothing,
}

/// Removes matching elements from an array field, or deletes a non-array field.
/// Missing paths are not an error.
pub fn remove(doc: &mut Value, path: &FieldPath, value: &Value) -> Removal {
    let (parents, last) = path.split_last();
    let mut current = doc;
    for segment in parents {
        match current {
            Value::Object(map) => match map.get_mut(segment) {
                Some(next) => current = next,
                None => return Removal::Nothing,
            },
            _ => return Removal::Nothing,
        }
    }
    let Value::Object(map) = current else {
        return Removal::Nothing;
    };
    if let Some(Value::Array(items)) = map.get_mut(last) {
        let before = items.len();
        items.retain(|item| item != value);
        return Removal::Elements(before - items.len());
    }
    match map.remove(last) {
        Some(_) => Removal::Field,
        None => Removal::Nothing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path(raw: &str) -> FieldPath {
        FieldPath::parse(raw).unwrap()
    }

    #[test]
    fn test_parse_rejects_empty_segments() {
        assert_eq!(FieldPath::parse(""), Err(PathError::Empty));
        assert_eq!(FieldPath::parse("   "), Err(PathError::Empty));
        assert!(matches!(
            FieldPath::parse("skills..primary"),
            Err(PathError::EmptySegment(_))
        ));
        assert!(matches!(
            FieldPath::parse("summary."),
            Err(PathError::EmptySegment(_))
        ));
        assert_eq!(path("skills.primary").segments().len(), 2);
    }

    #[test]
    fn test_get_variants() {
        let doc = json!({ "skills": { "primary": ["Rust"] }, "headline": "Lead" });
        assert_eq!(
            get(&doc, &path("skills.primary")),
            Lookup::Found(&json!(["Rust"]))
        );
        assert_eq!(get(&doc, &path("skills.tertiary")), Lookup::NotFound);
        assert_eq!(
            get(&doc, &path("headline.text")),
            Lookup::Conflict {
                at: "headline".into()
            }
        );
    }

    #[test]
    fn test_set_creates_intermediate_objects() {
        let mut doc = json!({});
        set(&mut doc, &path("a.b.c"), json!(1)).unwrap();
        assert_eq!(doc, json!({ "a": { "b": { "c": 1 } } }));
    }

    #[test]
    fn test_set_replaces_array_wholesale() {
        let mut doc = json!({ "summary": ["one", "two", "three"] });
        set(&mut doc, &path("summary"), json!(["new"])).unwrap();
        assert_eq!(doc["summary"], json!(["new"]));
    }

    #[test]
    fn test_set_through_scalar_is_conflict() {
        let mut doc = json!({ "a": { "b": "text" } });
        let err = set(&mut doc, &path("a.b.c"), json!(1)).unwrap_err();
        assert_eq!(err.at, "a.b");
        assert_eq!(err.path, "a.b.c");
        // untouched
        assert_eq!(doc, json!({ "a": { "b": "text" } }));
    }

    #[test]
    fn test_set_on_non_object_root_is_conflict() {
        let mut doc = json!(["not", "an", "object"]);
        assert!(set(&mut doc, &path("a"), json!(1)).is_err());
    }

    #[test]
    fn test_push_appends_in_order() {
        let mut doc = json!({ "skills": { "primary": [] } });
        push(&mut doc, &path("skills.primary"), json!("X")).unwrap();
        push(&mut doc, &path("skills.primary"), json!("Y")).unwrap();
        assert_eq!(doc["skills"]["primary"], json!(["X", "Y"]));
    }

    #[test]
    fn test_push_replaces_non_array() {
        let mut doc = json!({ "headline": "Lead" });
        push(&mut doc, &path("headline"), json!("X")).unwrap();
        assert_eq!(doc["headline"], json!(["X"]));

        let mut empty = json!({});
        push(&mut empty, &path("custom.items"), json!(1)).unwrap();
        assert_eq!(empty, json!({ "custom": { "items": [1] } }));
    }

    #[test]
    fn test_push_through_array_is_conflict() {
        let mut doc = json!({ "summary": ["a"] });
        let err = push(&mut doc, &path("summary.extra"), json!("b")).unwrap_err();
        assert_eq!(err.at, "summary");
    }

    #[test]
    fn test_remove_matching_elements() {
        let mut doc = json!({ "tags": ["a", { "k": 1 }, "a", "b"] });
        assert_eq!(
            remove(&mut doc, &path("tags"), &json!("a")),
            Removal::Elements(2)
        );
        assert_eq!(
            remove(&mut doc, &path("tags"), &json!({ "k": 1 })),
            Removal::Elements(1)
        );
        assert_eq!(doc["tags"], json!(["b"]));
    }

    #[test]
    fn test_remove_scalar_deletes_field() {
        let mut doc = json!({ "contact": { "phone": "555", "email": "x@y" } });
        assert_eq!(
            remove(&mut doc, &path("contact.phone"), &json!("ignored")),
            Removal::Field
        );
        assert_eq!(doc, json!({ "contact": { "email": "x@y" } }));
    }

    #[test]
    fn test_remove_missing_is_nothing() {
        let mut doc = json!({ "headline": "Lead" });
        assert_eq!(
            remove(&mut doc, &path("contact.phone"), &Value::Null),
            Removal::Nothing
        );
        assert_eq!(
            remove(&mut doc, &path("headline.inner"), &Value::Null),
            Removal::Nothing
        );
        assert_eq!(doc, json!({ "headline": "Lead" }));
    }
}
