//! Helpers for reshaping loosely structured REST payloads

use serde_json::Value;

/// String at a JSON pointer, if present and a string
pub fn str_at(value: &Value, pointer: &str) -> Option<String> {
    value.pointer(pointer).and_then(Value::as_str).map(str::to_string)
}

/// Non-null value at a JSON pointer
pub fn value_at(value: &Value, pointer: &str) -> Option<Value> {
    value.pointer(pointer).filter(|v| !v.is_null()).cloned()
}

/// Array at `key`, or an empty slice
pub fn items<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// The value itself when it is an array, else an empty slice
pub fn as_items(value: &Value) -> &[Value] {
    value.as_array().map(Vec::as_slice).unwrap_or(&[])
}

/// Declares a tool output record: `success`, the listed payload fields
/// (all optional, set only on success) and `error`.
macro_rules! tool_output {
    (
        $(#[$meta:meta])*
        $name:ident { $( $(#[$field_meta:meta])* $field:ident : $ty:ty ),* $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, serde::Serialize, schemars::JsonSchema)]
        pub struct $name {
            /// Whether the operation succeeded
            pub success: bool,
            $( $(#[$field_meta])* pub $field: Option<$ty>, )*
            /// Error message when the operation failed
            pub error: Option<String>,
        }

        impl $name {
            pub fn ok($($field: $ty),*) -> Self {
                Self {
                    success: true,
                    $( $field: Some($field), )*
                    error: None,
                }
            }

            pub fn failed(error: impl Into<String>) -> Self {
                Self {
                    success: false,
                    error: Some(error.into()),
                    ..Self::default()
                }
            }
        }
    };
}

pub(crate) use tool_output;
