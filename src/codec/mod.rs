// Text wire codec: self-describing single-line encoding of tagged values.
//
// Every value is wrapped as `TAG/body` + `TAG\` with a fixed 4-character tag,
// recursively at every nesting level. Sibling values are joined by `,__,` and
// map keys are joined to their values by `:__:`.
//
// The format has no escaping. Text values must not contain the separator
// tokens `,__,` or `:__:`, nor a 4-character tag immediately followed by `/`
// or `\` — such values corrupt structural parsing. This is a documented
// limitation of the format, not something the codec detects.

pub mod decode;
pub mod encode;
pub mod normalize;
pub mod value;

pub use decode::{DecodeError, decode};
pub use encode::encode;
pub use normalize::{disorder_entries, disorder_value};
pub use value::{Tag, Value};

/// Token separating sibling elements and map entries at one nesting level.
pub const VALUE_SEPARATOR: &str = ",__,";

/// Token separating a map entry's key from its value.
pub const KEY_VALUE_SEPARATOR: &str = ":__:";
