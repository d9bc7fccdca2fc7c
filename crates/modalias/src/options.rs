//! Alias options and their accepted shapes.
//!
//! Hosts hand options over in one of three shapes, all normalized into
//! [`AliasOptions`]:
//!
//! ```json
//! { "expose": "utils", "src": "./src/utils" }
//! [{ "expose": "utils", "src": "./src/utils" }, { "expose": "abstract", "src": "npm:concrete" }]
//! { "root": "./", "react": true, "map": [{ "expose": "utils", "src": "./src/utils" }] }
//! ```
//!
//! Partial configs are tolerated: an entry whose `expose` is missing or empty,
//! or whose `src` is not a string, is dropped instead of failing the load.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// One `{expose, src}` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasMapping {
    /// Name importers use, e.g. `utils` or `awesome/components`.
    pub expose: String,
    /// Target path, `npm:<package>`, or `""` for the root itself.
    pub src: String,
}

impl AliasMapping {
    pub fn new(expose: impl Into<String>, src: impl Into<String>) -> Self {
        Self {
            expose: expose.into(),
            src: src.into(),
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        let expose = match value.get("expose") {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            _ => return None,
        };
        let src = value.get("src")?.as_str()?.to_string();
        Some(Self { expose, src })
    }
}

/// Normalized alias options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct AliasOptions {
    /// Base for absolute mode; `None` or `""` selects relative mode.
    pub root: Option<String>,
    /// Resolve platform file variants for rewritten paths.
    pub react: bool,
    /// Alias table, in priority order.
    pub map: Vec<AliasMapping>,
}

impl AliasOptions {
    pub fn new(map: Vec<AliasMapping>) -> Self {
        Self {
            map,
            ..Self::default()
        }
    }

    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root = Some(root.into());
        self
    }

    pub fn with_react(mut self, react: bool) -> Self {
        self.react = react;
        self
    }

    /// Normalize any accepted shape.
    ///
    /// # Example
    ///
    /// ```
    /// use modalias::AliasOptions;
    /// use serde_json::json;
    ///
    /// let options = AliasOptions::from_value(json!([
    ///     { "expose": "utils", "src": "./src/utils" },
    ///     { "expose": "", "src": "./ignored" }
    /// ]))
    /// .unwrap();
    ///
    /// assert_eq!(options.map.len(), 1);
    /// assert_eq!(options.root, None);
    /// ```
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Array(entries) => Ok(Self::new(collect_mappings(&entries))),
            Value::Object(object) => Ok(Self::from_object(&object)),
            other => Err(Error::InvalidOptions(format!(
                "expected an {{expose, src}} pair, a list of pairs or an object with `map`, found {}",
                kind_of(&other)
            ))),
        }
    }

    fn from_object(object: &Map<String, Value>) -> Self {
        let is_single_pair =
            !object.contains_key("map") && (object.contains_key("expose") || object.contains_key("src"));
        if is_single_pair {
            let map = AliasMapping::from_value(&Value::Object(object.clone()))
                .into_iter()
                .collect();
            return Self::new(map);
        }

        let map = match object.get("map") {
            Some(Value::Array(entries)) => collect_mappings(entries),
            Some(single @ Value::Object(_)) => AliasMapping::from_value(single).into_iter().collect(),
            _ => Vec::new(),
        };
        let root = object.get("root").and_then(Value::as_str).map(str::to_string);
        let react = object.get("react").and_then(Value::as_bool).unwrap_or(false);

        Self { root, react, map }
    }
}

impl TryFrom<Value> for AliasOptions {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_value(value)
    }
}

fn collect_mappings(entries: &[Value]) -> Vec<AliasMapping> {
    entries
        .iter()
        .filter_map(|entry| {
            let mapping = AliasMapping::from_value(entry);
            if mapping.is_none() {
                tracing::debug!(%entry, "skipping malformed alias entry");
            }
            mapping
        })
        .collect()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn single_pair_shape() {
        let options = AliasOptions::from_value(json!({ "expose": "utils", "src": "./src/utils" })).unwrap();
        assert_eq!(options.map, vec![AliasMapping::new("utils", "./src/utils")]);
        assert_eq!(options.root, None);
        assert!(!options.react);
    }

    #[test]
    fn list_shape_keeps_order() {
        let options = AliasOptions::from_value(json!([
            { "expose": "utils", "src": "./src/mylib/subfolder/utils" },
            { "expose": "awesome/components", "src": "./src/components" },
            { "expose": "abstract", "src": "npm:concrete" }
        ]))
        .unwrap();

        let names: Vec<_> = options.map.iter().map(|m| m.expose.as_str()).collect();
        assert_eq!(names, vec!["utils", "awesome/components", "abstract"]);
    }

    #[test]
    fn object_shape_with_root_and_react() {
        let options = AliasOptions::from_value(json!({
            "root": "/project",
            "react": true,
            "map": [{ "expose": "mock", "src": "./test/mock" }]
        }))
        .unwrap();

        assert_eq!(options.root.as_deref(), Some("/project"));
        assert!(options.react);
        assert_eq!(options.map.len(), 1);
    }

    #[test]
    fn malformed_entries_are_skipped() {
        let options = AliasOptions::from_value(json!([
            { "expose": "", "src": "./a" },
            { "expose": null, "src": "./b" },
            { "src": "./c" },
            { "expose": "d", "src": 42 },
            { "expose": "e" },
            "not an entry",
            { "expose": "root", "src": "" }
        ]))
        .unwrap();

        assert_eq!(options.map, vec![AliasMapping::new("root", "")]);
    }

    #[test]
    fn null_is_empty() {
        assert_eq!(AliasOptions::from_value(Value::Null).unwrap(), AliasOptions::default());
    }

    #[test]
    fn scalar_is_rejected() {
        let err = AliasOptions::from_value(json!("utils")).unwrap_err();
        assert!(matches!(err, Error::InvalidOptions(msg) if msg.contains("a string")));
    }

    #[test]
    fn deserializes_through_serde() {
        let options: AliasOptions =
            serde_json::from_str(r#"{ "root": "./", "map": [{ "expose": "utils", "src": "./u" }] }"#).unwrap();
        assert_eq!(options.root.as_deref(), Some("./"));
        assert_eq!(options.map, vec![AliasMapping::new("utils", "./u")]);
    }
}
