//! Classification of flat property keys.
//!
//! The property format encodes lists and list-of-maps through key suffixes:
//!
//! - `base` — plain scalar
//! - `base[2]` — list element (the bracket index does not order the list;
//!   elements accumulate in the order their keys are visited)
//! - `base[2].field` — field of an indexed map entry
//!
//! `base` and `field` are drawn from letters, digits, `.` and `-`; `base`
//! may be empty. Anything that does not match an indexed form is a plain
//! key, so classification is total and never fails. Index digits are kept
//! as text; the numeric parse happens in the tree builder.

/// Classification of one property key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPath<'a> {
    /// A plain scalar key, used verbatim
    Plain,
    /// `base[index]`: appends to the list bound at `base`
    ListEntry { base: &'a str, index: &'a str },
    /// `base[index].field`: sets a field of the map entry at `index`
    MapEntry {
        base: &'a str,
        index: &'a str,
        field: &'a str,
    },
}

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '.' || c == '-'
}

/// Classify a single property key.
pub fn classify(key: &str) -> KeyPath<'_> {
    let Some(open) = key.find('[') else {
        return KeyPath::Plain;
    };

    let base = &key[..open];
    if !base.chars().all(is_key_char) {
        return KeyPath::Plain;
    }

    let Some(close) = key[open + 1..].find(']') else {
        return KeyPath::Plain;
    };
    let index = &key[open + 1..open + 1 + close];
    if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
        return KeyPath::Plain;
    }

    let rest = &key[open + 1 + close + 1..];
    if rest.is_empty() {
        return KeyPath::ListEntry { base, index };
    }

    let Some(field_part) = rest.strip_prefix('.') else {
        return KeyPath::Plain;
    };
    if field_part.is_empty() || !field_part.chars().all(is_key_char) {
        return KeyPath::Plain;
    }

    // Only the first dotted segment names the field; `base[1].ttl.extra`
    // addresses the field `ttl`.
    let field = field_part
        .split('.')
        .next()
        .expect("split yields at least one segment");
    if field.is_empty() {
        return KeyPath::Plain;
    }

    KeyPath::MapEntry { base, index, field }
}
