// Value model for the wire codec.
// A closed tagged union; the set of representable kinds is exactly the set
// of wire tags, checked exhaustively by match.

use serde::{Deserialize, Serialize};

/// A value representable in the wire format.
///
/// `Map` is an ordered list of key/value pairs; keys may be any `Value`.
/// Insertion order is kept through encode but is not semantically guaranteed
/// across a round trip of the top-level store map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Bool(bool),
    Text(String),
    Int(i64),
    Float(f64),
    Seq(Vec<Value>),
    Map(Vec<(Value, Value)>),
}

impl Value {
    /// The wire tag for this value's kind.
    pub fn tag(&self) -> Tag {
        match self {
            Value::Bool(_) => Tag::Bool,
            Value::Text(_) => Tag::Text,
            Value::Int(_) => Tag::Int,
            Value::Float(_) => Tag::Float,
            Value::Seq(_) => Tag::Seq,
            Value::Map(_) => Tag::Map,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::Seq(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&[(Value, Value)]> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Look up a map entry by text key.
    pub fn entry(&self, key: &str) -> Option<&Value> {
        self.as_map()?
            .iter()
            .find(|(k, _)| k.as_text() == Some(key))
            .map(|(_, v)| v)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Seq(items)
    }
}

/// Fixed 4-character wire codes identifying a value's kind.
///
/// `Seq` is shared by every ordered-sequence kind of the original data, so a
/// round trip cannot distinguish which sequence kind produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Bool,
    Text,
    Int,
    Float,
    Seq,
    Map,
}

impl Tag {
    /// Length in bytes of every wire code.
    pub const LEN: usize = 4;

    /// The 4-character wire code.
    pub fn wire(self) -> &'static str {
        match self {
            Tag::Bool => "[12]",
            Tag::Text => "[SG]",
            Tag::Int => "[IR]",
            Tag::Float => "[FT]",
            Tag::Seq => "[SE]",
            Tag::Map => "[DY]",
        }
    }

    /// Parse a 4-character wire code.
    pub fn from_wire(code: &str) -> Option<Self> {
        match code {
            "[12]" => Some(Tag::Bool),
            "[SG]" => Some(Tag::Text),
            "[IR]" => Some(Tag::Int),
            "[FT]" => Some(Tag::Float),
            "[SE]" => Some(Tag::Seq),
            "[DY]" => Some(Tag::Map),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_wire_round_trip() {
        for tag in [Tag::Bool, Tag::Text, Tag::Int, Tag::Float, Tag::Seq, Tag::Map] {
            assert_eq!(tag.wire().len(), Tag::LEN);
            assert_eq!(Tag::from_wire(tag.wire()), Some(tag));
        }
        assert_eq!(Tag::from_wire("[XX]"), None);
    }

    #[test]
    fn test_entry_lookup() {
        let map = Value::Map(vec![
            (Value::from("name"), Value::from("arena")),
            (Value::from("players"), Value::from(12i64)),
        ]);

        assert_eq!(map.entry("players").and_then(Value::as_int), Some(12));
        assert!(map.entry("missing").is_none());
        assert!(Value::from(1i64).entry("name").is_none());
    }
}
