//! Atlassian Document Format helpers
//!
//! Jira Cloud v3 takes and returns rich text as ADF trees. Tools accept and
//! return plain text, so writes wrap text in a one-paragraph document and
//! reads concatenate every text node.

use serde_json::{Value, json};

/// Single-paragraph ADF document holding `text`
pub fn text_document(text: &str) -> Value {
    json!({
        "type": "doc",
        "version": 1,
        "content": [
            {
                "type": "paragraph",
                "content": [{"type": "text", "text": text}],
            }
        ],
    })
}

/// Concatenated text of every `text` node, depth first.
///
/// Plain strings pass through unchanged; anything else yields `""`.
pub fn extract_text(adf: &Value) -> String {
    match adf {
        Value::String(s) => s.clone(),
        Value::Object(_) => {
            let mut out = String::new();
            collect(adf, &mut out);
            out
        }
        _ => String::new(),
    }
}

fn collect(node: &Value, out: &mut String) {
    if node.get("type").and_then(Value::as_str) == Some("text") {
        if let Some(text) = node.get("text").and_then(Value::as_str) {
            out.push_str(text);
        }
    }
    if let Some(children) = node.get("content").and_then(Value::as_array) {
        for child in children.iter().filter(|c| c.is_object()) {
            collect(child, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_document_round_trip() {
        let doc = text_document("Hello, world");
        assert_eq!(doc["type"], "doc");
        assert_eq!(doc["content"][0]["content"][0]["text"], "Hello, world");
        assert_eq!(extract_text(&doc), "Hello, world");
    }

    #[test]
    fn test_extract_nested_text() {
        let doc = json!({
            "type": "doc",
            "content": [
                {"type": "paragraph", "content": [
                    {"type": "text", "text": "Steps: "},
                    {"type": "mention", "attrs": {"id": "1"}},
                ]},
                {"type": "bulletList", "content": [
                    {"type": "listItem", "content": [
                        {"type": "paragraph", "content": [{"type": "text", "text": "reboot"}]}
                    ]}
                ]},
            ]
        });
        assert_eq!(extract_text(&doc), "Steps: reboot");
    }

    #[test]
    fn test_extract_non_documents() {
        assert_eq!(extract_text(&Value::Null), "");
        assert_eq!(extract_text(&json!(42)), "");
        assert_eq!(extract_text(&json!("legacy plain text")), "legacy plain text");
    }
}
