//! Key search over arbitrary JSON documents.

use serde_json::Value;

/// Every value stored under `key`, at any depth, in document order.
///
/// Matches are collected before their own contents are searched, so a
/// matched object that contains the key again yields the outer value first.
/// The walk uses an explicit stack and never recurses.
///
/// # Examples
///
/// ```
/// use cardforged::lists::json_walk::find_key_values;
/// use serde_json::json;
///
/// let doc = json!({"a": {"card": 1}, "b": [{"card": 2}]});
/// assert_eq!(find_key_values(&doc, "card"), vec![&json!(1), &json!(2)]);
/// ```
pub fn find_key_values<'v>(root: &'v Value, key: &str) -> Vec<&'v Value> {
    let mut found = Vec::new();
    // (value, stored under the searched key)
    let mut stack: Vec<(&'v Value, bool)> = vec![(root, false)];

    while let Some((value, matched)) = stack.pop() {
        if matched {
            found.push(value);
        }
        match value {
            Value::Object(map) => {
                stack.extend(map.iter().rev().map(|(k, v)| (v, k == key)));
            }
            Value::Array(items) => {
                stack.extend(items.iter().rev().map(|v| (v, false)));
            }
            _ => {}
        }
    }

    found
}
