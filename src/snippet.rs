//! Snippet data model.
//!
//! A snippet file is a JSON object: name -> { prefix, body, description, ... }.
//! Collections stay as raw JSON maps so unknown keys survive a merge untouched;
//! `Snippet` is the typed shape used when we author an entry ourselves.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Name -> snippet value. Insertion ordered (serde_json `preserve_order`).
pub type SnippetCollection = Map<String, Value>;

/// Trigger text: one string or several.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Prefix {
    One(String),
    Many(Vec<String>),
}

impl From<&str> for Prefix {
    fn from(s: &str) -> Self {
        Prefix::One(s.to_string())
    }
}

impl From<String> for Prefix {
    fn from(s: String) -> Self {
        Prefix::One(s)
    }
}

/// A single snippet. Field order here is the serialized key order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snippet {
    pub prefix: Prefix,
    pub body: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Keys we do not model (scope, isFileTemplate, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Snippet {
    pub fn new(prefix: impl Into<Prefix>, body: Vec<String>) -> Self {
        Self {
            prefix: prefix.into(),
            body,
            description: None,
            extra: Map::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

/// Builds a one-entry collection `{ name: snippet }`.
pub fn single_entry(name: &str, snippet: &Snippet) -> serde_json::Result<SnippetCollection> {
    let mut map = SnippetCollection::new();
    map.insert(name.to_string(), snippet.to_value()?);
    Ok(map)
}

/// Normalizes a raw `prefix` value into a set of trigger strings.
///
/// - string      -> {s}
/// - array       -> every element, see `prefix_text`
/// - anything else (missing included) -> {}
pub fn prefix_set(prefix: Option<&Value>) -> BTreeSet<String> {
    match prefix {
        Some(Value::String(s)) => BTreeSet::from([s.clone()]),
        Some(Value::Array(items)) => items.iter().map(prefix_text).collect(),
        _ => BTreeSet::new(),
    }
}

/// Text of one array element: strings as-is, `true`/`false`/`null` as
/// `True`/`False`/`None` (so `"True"` and `[true]` collide), numbers as written
/// in the file, nested containers as compact JSON.
fn prefix_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Null => "None".to_string(),
        other => other.to_string(),
    }
}

/// Prefix set of an entry value; non-object entries have none.
pub fn entry_prefixes(entry: &Value) -> BTreeSet<String> {
    match entry {
        Value::Object(obj) => prefix_set(obj.get("prefix")),
        _ => BTreeSet::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn prefix_set_shapes() {
        assert_eq!(prefix_set(Some(&json!("for"))), BTreeSet::from(["for".to_string()]));
        assert_eq!(
            prefix_set(Some(&json!(["a", "b", "a"]))),
            BTreeSet::from(["a".to_string(), "b".to_string()])
        );
        assert_eq!(
            prefix_set(Some(&json!([1, true, false, null, "x"]))),
            BTreeSet::from(["1", "True", "False", "None", "x"].map(String::from))
        );
        assert!(prefix_set(Some(&json!(42))).is_empty());
        assert!(prefix_set(Some(&json!({"k": "v"}))).is_empty());
        assert!(prefix_set(None).is_empty());
    }

    #[test]
    fn non_object_entry_has_no_prefixes() {
        assert!(entry_prefixes(&json!("just a string")).is_empty());
        assert!(entry_prefixes(&json!(["a"])).is_empty());
    }

    #[test]
    fn snippet_serializes_in_field_order() {
        let s = Snippet::new("dsu", vec!["struct Dsu {};".into()]).with_description("union-find");
        let text = serde_json::to_string(&s).unwrap();
        assert_eq!(
            text,
            r#"{"prefix":"dsu","body":["struct Dsu {};"],"description":"union-find"}"#
        );
    }

    #[test]
    fn snippet_keeps_unknown_keys() {
        let raw = json!({"prefix": ["a", "b"], "body": [], "scope": "cpp"});
        let s: Snippet = serde_json::from_value(raw).unwrap();
        assert_eq!(s.prefix, Prefix::Many(vec!["a".into(), "b".into()]));
        assert_eq!(s.description, None);
        assert_eq!(s.extra.get("scope"), Some(&json!("cpp")));
        assert_eq!(s.to_value().unwrap()["scope"], json!("cpp"));
    }
}
