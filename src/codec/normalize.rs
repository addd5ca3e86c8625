// Normalization ("disorder") of store contents before encoding.
// Converts an ordered string-keyed mapping into the plain Map value the
// codec knows, recursively, so the codec never depends on the mapping type.

use super::value::Value;

/// Rebuild a value with every nested ordered representation converted to the
/// plain `Map` variant. Scalars pass through unchanged; applying this twice
/// yields the same result as applying it once.
pub fn disorder_value(value: &Value) -> Value {
    match value {
        Value::Bool(_) | Value::Text(_) | Value::Int(_) | Value::Float(_) => value.clone(),
        Value::Seq(items) => Value::Seq(items.iter().map(disorder_value).collect()),
        Value::Map(entries) => Value::Map(
            entries
                .iter()
                .map(|(key, val)| (disorder_value(key), disorder_value(val)))
                .collect(),
        ),
    }
}

/// Convert ordered string-keyed entries into a `Map` value, normalizing each
/// value on the way.
pub fn disorder_entries<'a, I>(entries: I) -> Value
where
    I: IntoIterator<Item = (&'a str, &'a Value)>,
{
    Value::Map(
        entries
            .into_iter()
            .map(|(key, val)| (Value::Text(key.to_owned()), disorder_value(val)))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disorder_is_idempotent() {
        let value = Value::Map(vec![
            (
                Value::from("cur"),
                Value::Seq(vec![Value::from("123"), Value::from("321")]),
            ),
            (
                Value::from("flags"),
                Value::Map(vec![(Value::from("on"), Value::Bool(true))]),
            ),
        ]);

        let once = disorder_value(&value);
        let twice = disorder_value(&once);
        assert_eq!(once, twice);
        assert_eq!(once, value);
    }

    #[test]
    fn test_disorder_entries_builds_text_keyed_map() {
        let inner = Value::Int(7);
        let entries = vec![("a".to_owned(), Value::Bool(true)), ("b".to_owned(), inner)];
        let map = disorder_entries(entries.iter().map(|(k, v)| (k.as_str(), v)));

        assert_eq!(
            map,
            Value::Map(vec![
                (Value::from("a"), Value::Bool(true)),
                (Value::from("b"), Value::Int(7)),
            ])
        );
    }
}
