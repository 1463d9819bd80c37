//! Typed accessors over a job's JSON parameter tree
//!
//! Every accessor reports failures with the dotted path of the offending field, so
//! a render error can point at the exact spot in the job description. Numbers
//! sent as numeric strings (`"25000"`) are accepted the same way as JSON numbers.

use crate::{PrintError, Result};
use serde_json::{Map, Value};

/// An object node of the parameter tree
#[derive(Debug, Clone)]
pub struct JsonNode<'a> {
    object: &'a Map<String, Value>,
    path: String,
}

impl<'a> JsonNode<'a> {
    /// Wraps the root of a job description, which must be a JSON object.
    pub fn root(value: &'a Value) -> Result<Self> {
        Self::from_value(value, String::new())
    }

    fn from_value(value: &'a Value, path: String) -> Result<Self> {
        match value {
            Value::Object(object) => Ok(Self { object, path }),
            _ => Err(PrintError::WrongType {
                path: display_path(&path),
                expected: "object",
            }),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    fn child_path(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.path, key)
        }
    }

    /// Raw access; an explicit `null` counts as absent.
    pub fn raw(&self, key: &str) -> Option<&'a Value> {
        self.object.get(key).filter(|value| !value.is_null())
    }

    pub fn has(&self, key: &str) -> bool {
        self.raw(key).is_some()
    }

    fn require(&self, key: &str) -> Result<&'a Value> {
        self.raw(key).ok_or_else(|| PrintError::MissingField {
            path: self.child_path(key),
        })
    }

    pub fn get_int(&self, key: &str) -> Result<i64> {
        as_int(self.require(key)?, || self.child_path(key))
    }

    pub fn opt_int(&self, key: &str) -> Result<Option<i64>> {
        self.raw(key)
            .map(|value| as_int(value, || self.child_path(key)))
            .transpose()
    }

    pub fn get_float(&self, key: &str) -> Result<f64> {
        as_float(self.require(key)?, || self.child_path(key))
    }

    pub fn opt_float(&self, key: &str, default: f64) -> Result<f64> {
        match self.raw(key) {
            Some(value) => as_float(value, || self.child_path(key)),
            None => Ok(default),
        }
    }

    pub fn get_string(&self, key: &str) -> Result<&'a str> {
        as_str(self.require(key)?, || self.child_path(key))
    }

    pub fn opt_string(&self, key: &str) -> Result<Option<&'a str>> {
        self.raw(key)
            .map(|value| as_str(value, || self.child_path(key)))
            .transpose()
    }

    pub fn get_array(&self, key: &str) -> Result<JsonArray<'a>> {
        JsonArray::from_value(self.require(key)?, self.child_path(key))
    }

    pub fn opt_array(&self, key: &str) -> Result<Option<JsonArray<'a>>> {
        self.raw(key)
            .map(|value| JsonArray::from_value(value, self.child_path(key)))
            .transpose()
    }

    pub fn get_object(&self, key: &str) -> Result<JsonNode<'a>> {
        JsonNode::from_value(self.require(key)?, self.child_path(key))
    }
}

/// An array node of the parameter tree
#[derive(Debug, Clone)]
pub struct JsonArray<'a> {
    items: &'a [Value],
    path: String,
}

impl<'a> JsonArray<'a> {
    fn from_value(value: &'a Value, path: String) -> Result<Self> {
        match value {
            Value::Array(items) => Ok(Self { items, path }),
            _ => Err(PrintError::WrongType {
                path: display_path(&path),
                expected: "array",
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn item_path(&self, index: usize) -> String {
        format!("{}[{}]", self.path, index)
    }

    fn require(&self, index: usize) -> Result<&'a Value> {
        self.items
            .get(index)
            .filter(|value| !value.is_null())
            .ok_or_else(|| PrintError::MissingField {
                path: self.item_path(index),
            })
    }

    pub fn get_float(&self, index: usize) -> Result<f64> {
        as_float(self.require(index)?, || self.item_path(index))
    }

    pub fn get_int(&self, index: usize) -> Result<i64> {
        as_int(self.require(index)?, || self.item_path(index))
    }

    pub fn get_string(&self, index: usize) -> Result<&'a str> {
        as_str(self.require(index)?, || self.item_path(index))
    }

    pub fn get_object(&self, index: usize) -> Result<JsonNode<'a>> {
        JsonNode::from_value(self.require(index)?, self.item_path(index))
    }

    /// Reads every element as a float
    pub fn to_floats(&self) -> Result<Vec<f64>> {
        (0..self.len()).map(|i| self.get_float(i)).collect()
    }

    pub fn objects(&self) -> impl Iterator<Item = Result<JsonNode<'a>>> + '_ {
        (0..self.len()).map(move |i| self.get_object(i))
    }
}

fn display_path(path: &str) -> String {
    if path.is_empty() {
        "<root>".to_string()
    } else {
        path.to_string()
    }
}

fn as_float(value: &Value, path: impl FnOnce() -> String) -> Result<f64> {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| PrintError::WrongType {
        path: path(),
        expected: "number",
    })
}

fn as_int(value: &Value, path: impl FnOnce() -> String) -> Result<i64> {
    let parsed = match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| PrintError::WrongType {
        path: path(),
        expected: "integer",
    })
}

fn as_str<'v>(value: &'v Value, path: impl FnOnce() -> String) -> Result<&'v str> {
    value.as_str().ok_or_else(|| PrintError::WrongType {
        path: path(),
        expected: "string",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_typed_access() {
        let job = json!({
            "dpi": 300,
            "scale": "25000",
            "units": "m",
            "pages": [{ "center": [600000.5, 200000.25], "rotation": null }]
        });
        let root = JsonNode::root(&job).unwrap();
        assert_eq!(root.get_int("dpi").unwrap(), 300);
        assert_eq!(root.get_int("scale").unwrap(), 25000);
        assert_eq!(root.get_string("units").unwrap(), "m");
        assert_eq!(root.opt_int("missing").unwrap(), None);

        let page = root.get_array("pages").unwrap().get_object(0).unwrap();
        assert_eq!(page.path(), "pages[0]");
        assert_eq!(page.opt_float("rotation", 0.0).unwrap(), 0.0);
        let center = page.get_array("center").unwrap();
        assert_eq!(center.to_floats().unwrap(), vec![600000.5, 200000.25]);
    }

    #[test]
    fn test_missing_field_reports_path() {
        let job = json!({ "pages": [{}] });
        let page = JsonNode::root(&job)
            .unwrap()
            .get_array("pages")
            .unwrap()
            .get_object(0)
            .unwrap();
        match page.get_array("center") {
            Err(PrintError::MissingField { path }) => assert_eq!(path, "pages[0].center"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_wrong_type_reports_expectation() {
        let job = json!({ "dpi": "high", "center": 5, "ratio": 1.5 });
        let root = JsonNode::root(&job).unwrap();
        assert!(matches!(
            root.opt_int("dpi"),
            Err(PrintError::WrongType { expected: "integer", .. })
        ));
        assert!(matches!(
            root.get_array("center"),
            Err(PrintError::WrongType { expected: "array", .. })
        ));
        assert!(root.get_int("ratio").is_err());
        assert!(JsonNode::root(&json!([1, 2])).is_err());
    }
}
