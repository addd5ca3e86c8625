// Parsing half of the wire codec.
//
// The structural parsers work on a flat body string. Before splitting on
// separators, a single left-to-right scan locates every range spanned by a
// nested wrapped composite (an "excluded range"); separator candidates that
// land inside one are skipped past the range's end so inner separators never
// split an outer body.

use std::ops::Range;

use thiserror::Error;

use super::value::{Tag, Value};
use super::{KEY_VALUE_SEPARATOR, VALUE_SEPARATOR};

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("input too short for a wrapped value: {0:?}")]
    Truncated(String),

    #[error("unknown type tag {0:?}")]
    UnknownTag(String),

    #[error("malformed wrapper around {0:?}")]
    MalformedWrapper(String),

    #[error("end marker before matching start marker in {0:?}")]
    UnbalancedMarkers(String),

    #[error("cannot parse {body:?} as {kind}")]
    BadScalar { kind: &'static str, body: String },
}

/// Parse a wrapped wire string back into a value.
pub fn decode(text: &str) -> Result<Value, DecodeError> {
    let (tag, body) = unwrap_value(text)?;
    match tag {
        Tag::Bool => Ok(Value::Bool(body == "True")),
        Tag::Text => Ok(Value::Text(body.to_owned())),
        Tag::Int => body
            .parse()
            .map(Value::Int)
            .map_err(|_| DecodeError::BadScalar {
                kind: "integer",
                body: body.to_owned(),
            }),
        Tag::Float => body
            .parse()
            .map(Value::Float)
            .map_err(|_| DecodeError::BadScalar {
                kind: "float",
                body: body.to_owned(),
            }),
        Tag::Seq => decode_seq_body(body),
        Tag::Map => decode_map_body(body),
    }
}

/// Split a wrapped string into its tag and body, checking both fences.
fn unwrap_value(text: &str) -> Result<(Tag, &str), DecodeError> {
    if text.len() < 2 * Tag::LEN + 2 {
        return Err(DecodeError::Truncated(text.to_owned()));
    }
    let code = text
        .get(..Tag::LEN)
        .ok_or_else(|| DecodeError::MalformedWrapper(text.to_owned()))?;
    let tag = Tag::from_wire(code).ok_or_else(|| DecodeError::UnknownTag(code.to_owned()))?;

    let prefix_ok = text[Tag::LEN..].starts_with('/');
    let suffix_ok = text.ends_with('\\')
        && text.get(text.len() - Tag::LEN - 1..text.len() - 1) == Some(code);
    if !prefix_ok || !suffix_ok {
        return Err(DecodeError::MalformedWrapper(text.to_owned()));
    }

    Ok((tag, &text[Tag::LEN + 1..text.len() - Tag::LEN - 1]))
}

/// Find the byte ranges spanned by every top-level wrapped composite of the
/// given tag inside `body`.
///
/// Nested same-tag wraps are tracked with a depth counter so an inner end
/// fence does not close the outer range early. An end fence with no open
/// start fence means the input is malformed.
fn find_excluded_ranges(body: &str, tag: Tag) -> Result<Vec<Range<usize>>, DecodeError> {
    let start_pat = format!("{}/", tag.wire());
    let end_pat = format!("{}\\", tag.wire());
    let start_pat = start_pat.as_bytes();
    let end_pat = end_pat.as_bytes();

    let mut ranges = Vec::new();
    let mut open_at: Option<usize> = None;
    let mut depth = 0usize;

    for (i, window) in body.as_bytes().windows(start_pat.len()).enumerate() {
        match open_at {
            None if window == start_pat => open_at = Some(i),
            None if window == end_pat => {
                return Err(DecodeError::UnbalancedMarkers(body.to_owned()));
            }
            Some(_) if window == start_pat => depth += 1,
            Some(start) if window == end_pat => {
                if depth > 0 {
                    depth -= 1;
                } else {
                    ranges.push(start..i + end_pat.len());
                    open_at = None;
                }
            }
            _ => {}
        }
    }

    Ok(ranges)
}

/// Excluded ranges for both composite tags, in scan order per tag.
fn composite_ranges(body: &str) -> Result<Vec<Range<usize>>, DecodeError> {
    let mut ranges = find_excluded_ranges(body, Tag::Map)?;
    ranges.extend(find_excluded_ranges(body, Tag::Seq)?);
    Ok(ranges)
}

/// Find the next occurrence of `token` at or after `from` that is not inside
/// an excluded range.
fn find_top_level(
    body: &str,
    token: &str,
    mut from: usize,
    excluded: &[Range<usize>],
) -> Option<usize> {
    loop {
        let i = body[from..].find(token)? + from;
        match excluded.iter().find(|range| range.contains(&i)) {
            Some(range) => from = range.end,
            None => return Some(i),
        }
    }
}

fn decode_seq_body(body: &str) -> Result<Value, DecodeError> {
    if body.is_empty() {
        return Ok(Value::Seq(Vec::new()));
    }

    let excluded = composite_ranges(body)?;
    let mut items = Vec::new();
    let mut start = 0;
    loop {
        match find_top_level(body, VALUE_SEPARATOR, start, &excluded) {
            Some(sep) => {
                items.push(decode(&body[start..sep])?);
                start = sep + VALUE_SEPARATOR.len();
            }
            None => {
                // Last element runs to end-of-string.
                items.push(decode(&body[start..])?);
                return Ok(Value::Seq(items));
            }
        }
    }
}

fn decode_map_body(body: &str) -> Result<Value, DecodeError> {
    let excluded = composite_ranges(body)?;
    let mut entries: Vec<(Value, Value)> = Vec::new();
    let mut start = 0;

    // No key-value separator left means no entries left.
    while let Some(kv_sep) = find_top_level(body, KEY_VALUE_SEPARATOR, start, &excluded) {
        let key = decode(&body[start..kv_sep])?;
        let val_start = kv_sep + KEY_VALUE_SEPARATOR.len();
        let val_end = find_top_level(body, VALUE_SEPARATOR, val_start, &excluded)
            .unwrap_or(body.len());
        let value = decode(&body[val_start..val_end])?;
        map_insert(&mut entries, key, value);

        if val_end == body.len() {
            break;
        }
        start = val_end + VALUE_SEPARATOR.len();
    }

    Ok(Value::Map(entries))
}

// Duplicate keys keep the last value, like repeated assignment.
fn map_insert(entries: &mut Vec<(Value, Value)>, key: Value, value: Value) {
    if let Some(slot) = entries.iter_mut().find(|(k, _)| *k == key) {
        slot.1 = value;
    } else {
        entries.push((key, value));
    }
}
