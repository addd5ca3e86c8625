// Serialization half of the wire codec.
// Wrapping is unconditional and recursive: every value at every depth gets
// its tag fence, so nested composites are fully delimited inside the flat
// body of their parent.

use super::value::{Tag, Value};
use super::{KEY_VALUE_SEPARATOR, VALUE_SEPARATOR};

/// Serialize a value to its wrapped wire form.
pub fn encode(value: &Value) -> String {
    wrap(value.tag(), &encode_body(value))
}

fn wrap(tag: Tag, body: &str) -> String {
    let code = tag.wire();
    format!("{code}/{body}{code}\\")
}

fn encode_body(value: &Value) -> String {
    match value {
        Value::Bool(b) => String::from(if *b { "True" } else { "False" }),
        Value::Text(s) => s.clone(),
        Value::Int(n) => n.to_string(),
        Value::Float(x) => x.to_string(),
        Value::Seq(items) => items
            .iter()
            .map(encode)
            .collect::<Vec<_>>()
            .join(VALUE_SEPARATOR),
        Value::Map(entries) => entries
            .iter()
            .map(|(key, val)| format!("{}{KEY_VALUE_SEPARATOR}{}", encode(key), encode(val)))
            .collect::<Vec<_>>()
            .join(VALUE_SEPARATOR),
    }
}
