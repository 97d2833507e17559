//! Recursive merge of JSON trees

use serde_json::{Map, Value};

/// Merges `patch` into `target` key by key
///
/// When both sides hold an object under the same key the two objects are
/// merged recursively. Any other incoming value replaces the current one
/// outright, including an object replacing a scalar and the reverse. Keys are
/// never removed.
pub fn deep_merge(target: &mut Map<String, Value>, patch: Map<String, Value>) {
    for (key, incoming) in patch {
        match incoming {
            Value::Object(nested) => {
                if let Some(Value::Object(existing)) = target.get_mut(&key) {
                    deep_merge(existing, nested);
                    continue;
                }
                target.insert(key, Value::Object(nested));
            }
            other => {
                target.insert(key, other);
            }
        }
    }
}
