//! Structural schemas for tool input and output.
//!
//! A tool declares its input and output as Rust types deriving
//! [`JsonSchema`]. The same declaration produces the JSON Schema shown at
//! discovery time and the validator applied to untyped input, so the schema
//! is never written twice.

use std::fmt;

use jsonschema::Validator;
use schemars::JsonSchema;
use serde_json::Value;

use super::value_objects::InputViolation;

/// JSON Schema document generated for `T`
pub fn schema_of<T: JsonSchema>() -> Value {
    schemars::schema_for!(T).to_value()
}

/// Input schema document plus its compiled validator.
pub struct InputSchema {
    document: Value,
    validator: Result<Validator, String>,
}

impl InputSchema {
    pub fn for_type<T: JsonSchema>() -> Self {
        Self::from_document(schema_of::<T>())
    }

    pub fn from_document(document: Value) -> Self {
        let validator = jsonschema::validator_for(&document).map_err(|e| e.to_string());
        Self {
            document,
            validator,
        }
    }

    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Every constraint `input` violates; empty when it conforms
    pub fn violations(&self, input: &Value) -> Vec<InputViolation> {
        match &self.validator {
            Ok(validator) => validator
                .iter_errors(input)
                .map(|error| {
                    InputViolation::new(field_path(&error.instance_path.to_string()), error.to_string())
                })
                .collect(),
            Err(reason) => vec![InputViolation::new(
                "schema",
                format!("input schema failed to compile: {reason}"),
            )],
        }
    }
}

impl InputSchema {
    /// Convert loosely typed scalars to the types the schema declares.
    ///
    /// Numeric strings and integral floats become integers, numeric strings
    /// become numbers and boolean words become booleans. Values that do not
    /// convert are left for [`violations`](Self::violations) to report.
    pub fn coerce(&self, input: Value) -> Value {
        coerce_value(&self.document, input)
    }
}

fn coerce_value(schema: &Value, value: Value) -> Value {
    match value {
        Value::Object(map) => match schema.get("properties").and_then(Value::as_object) {
            Some(properties) => Value::Object(
                map.into_iter()
                    .map(|(key, value)| {
                        let value = match properties.get(&key) {
                            Some(property) => coerce_value(property, value),
                            None => value,
                        };
                        (key, value)
                    })
                    .collect(),
            ),
            None => Value::Object(map),
        },
        Value::Array(items) => match schema.get("items") {
            Some(item) => Value::Array(items.into_iter().map(|v| coerce_value(item, v)).collect()),
            None => Value::Array(items),
        },
        scalar => coerce_scalar(&declared_types(schema), scalar),
    }
}

fn declared_types(schema: &Value) -> Vec<&str> {
    match schema.get("type") {
        Some(Value::String(ty)) => vec![ty.as_str()],
        Some(Value::Array(types)) => types.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    }
}

fn coerce_scalar(types: &[&str], value: Value) -> Value {
    let declares = |ty: &str| types.iter().any(|declared| *declared == ty);
    let already = match &value {
        Value::Null => declares("null"),
        Value::Bool(_) => declares("boolean"),
        Value::Number(n) => declares("number") || (declares("integer") && !n.is_f64()),
        Value::String(_) => declares("string"),
        _ => true,
    };
    if already || types.is_empty() {
        return value;
    }

    let conversions: [(&str, fn(&Value) -> Option<Value>); 3] = [
        ("integer", to_integer),
        ("number", to_number),
        ("boolean", to_boolean),
    ];
    conversions
        .iter()
        .filter(|(ty, _)| declares(*ty))
        .find_map(|(_, convert)| convert(&value))
        .unwrap_or(value)
}

fn to_integer(value: &Value) -> Option<Value> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .map(Value::from)
                .or_else(|_| s.parse::<u64>().map(Value::from))
                .ok()
        }
        Value::Number(n) => {
            let f = n.as_f64()?;
            // Bounds keep the cast exact
            (f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64).then(|| Value::from(f as i64))
        }
        _ => None,
    }
}

fn to_number(value: &Value) -> Option<Value> {
    let Value::String(s) = value else {
        return None;
    };
    let s = s.trim();
    if let Ok(n) = s.parse::<i64>() {
        return Some(Value::from(n));
    }
    s.parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
}

fn to_boolean(value: &Value) -> Option<Value> {
    let flag = match value {
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "t" | "yes" | "y" | "on" | "1" => true,
            "false" | "f" | "no" | "n" | "off" | "0" => false,
            _ => return None,
        },
        Value::Number(n) => match n.as_u64() {
            Some(1) => true,
            Some(0) => false,
            _ => return None,
        },
        _ => return None,
    };
    Some(Value::Bool(flag))
}

impl fmt::Debug for InputSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputSchema")
            .field("document", &self.document)
            .field("compiled", &self.validator.is_ok())
            .finish()
    }
}

/// `/fields/0/name` -> `fields.0.name`; the root pointer maps to `input`
fn field_path(pointer: &str) -> String {
    let trimmed = pointer.trim_start_matches('/');
    if trimmed.is_empty() {
        "input".to_string()
    } else {
        trimmed.replace('/', ".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, JsonSchema)]
    #[allow(dead_code)]
    struct SampleInput {
        /// Issue key
        #[schemars(length(min = 1))]
        issue_key: String,
        #[serde(default = "default_limit")]
        #[schemars(range(min = 0, max = 100))]
        comment_limit: i64,
        #[serde(default)]
        expand: Option<String>,
    }

    fn default_limit() -> i64 {
        10
    }

    #[test]
    fn test_schema_document_is_object_schema() {
        let schema = InputSchema::for_type::<SampleInput>();
        let doc = schema.document();

        assert_eq!(doc["type"], "object");
        assert_eq!(doc["properties"]["issue_key"]["description"], "Issue key");
        assert_eq!(doc["properties"]["comment_limit"]["maximum"], 100);
        let required = doc["required"].as_array().unwrap();
        assert_eq!(required, &vec![json!("issue_key")]);
    }

    #[test]
    fn test_valid_input_has_no_violations() {
        let schema = InputSchema::for_type::<SampleInput>();
        assert!(schema.violations(&json!({"issue_key": "PROJ-1"})).is_empty());
        assert!(
            schema
                .violations(&json!({"issue_key": "PROJ-1", "comment_limit": 0, "expand": null}))
                .is_empty()
        );
    }

    #[test]
    fn test_reports_every_violation() {
        let schema = InputSchema::for_type::<SampleInput>();
        let violations = schema.violations(&json!({"comment_limit": -1}));

        assert_eq!(violations.len(), 2);
        let rendered: Vec<String> = violations.iter().map(|v| v.to_string()).collect();
        assert!(rendered.iter().any(|v| v.contains("issue_key")));
        assert!(rendered.iter().any(|v| v.starts_with("comment_limit")));
    }

    #[test]
    fn test_length_and_type_constraints() {
        let schema = InputSchema::for_type::<SampleInput>();

        let empty_key = schema.violations(&json!({"issue_key": ""}));
        assert_eq!(empty_key.len(), 1);
        assert_eq!(empty_key[0].path, "issue_key");

        let wrong_type = schema.violations(&json!({"issue_key": 42}));
        assert_eq!(wrong_type.len(), 1);

        let not_object = schema.violations(&json!("PROJ-1"));
        assert_eq!(not_object[0].path, "input");
    }

    #[derive(Debug, Deserialize, JsonSchema)]
    #[allow(dead_code)]
    struct FlagsInput {
        #[serde(default)]
        delete_subtasks: bool,
        #[serde(default)]
        ratio: Option<f64>,
        #[serde(default)]
        ids: Vec<u32>,
    }

    #[test]
    fn test_coerce_loose_scalars() {
        let schema = InputSchema::for_type::<SampleInput>();
        let coerced = schema.coerce(json!({"issue_key": "PROJ-1", "comment_limit": " 5 "}));
        assert_eq!(coerced, json!({"issue_key": "PROJ-1", "comment_limit": 5}));
        assert!(schema.violations(&coerced).is_empty());

        assert_eq!(schema.coerce(json!({"comment_limit": 7.0}))["comment_limit"], json!(7));

        let flags = InputSchema::for_type::<FlagsInput>();
        let coerced = flags.coerce(json!({"delete_subtasks": "TRUE", "ratio": "0.5", "ids": ["1", 2.0]}));
        assert_eq!(coerced, json!({"delete_subtasks": true, "ratio": 0.5, "ids": [1, 2]}));
        assert_eq!(flags.coerce(json!({"delete_subtasks": 0}))["delete_subtasks"], json!(false));
    }

    #[test]
    fn test_coerce_leaves_unconvertible_values() {
        let schema = InputSchema::for_type::<SampleInput>();

        let input = json!({"issue_key": 42, "comment_limit": "ten", "expand": null});
        assert_eq!(schema.coerce(input.clone()), input);

        let fractional = schema.coerce(json!({"issue_key": "PROJ-1", "comment_limit": 2.5}));
        assert_eq!(fractional["comment_limit"], json!(2.5));
        assert_eq!(schema.violations(&fractional)[0].path, "comment_limit");

        assert_eq!(schema.coerce(json!("PROJ-1")), json!("PROJ-1"));
    }

    #[test]
    fn test_field_path() {
        assert_eq!(field_path(""), "input");
        assert_eq!(field_path("/issue_key"), "issue_key");
        assert_eq!(field_path("/labels/2"), "labels.2");
    }
}
