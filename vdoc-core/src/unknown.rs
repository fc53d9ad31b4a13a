//! Detection of input fields that the schema doesn't know about.
//!
//! Serde silently drops fields it has no place for. To surface them, a
//! document is decoded from a generic tree, re-encoded into a second generic
//! tree, and the key sets of the two trees are compared level by level.
//! Whatever the input has and the re-encoded document lacks was ignored.
//!
//! For this to work, schema types must not skip fields when serializing
//! (no `skip_serializing_if`): an absent optional field has to come back as
//! `null`, or a present-but-null input key would be reported as unknown.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::error::Error;

/// Decode `input` into `T`, returning the dotted paths of all input keys that
/// `T` doesn't consume.
///
/// A field of the wrong type fails with [`Error::Decode`], naming the field.
pub fn decode_tracked<T>(input: &Value) -> Result<(T, Vec<String>), Error>
where
    T: Serialize + DeserializeOwned,
{
    let typed: T = serde_path_to_error::deserialize(input).map_err(|e| Error::Decode {
        path: e.path().to_string(),
        source: e.into_inner(),
    })?;
    let known = serde_json::to_value(&typed).map_err(Error::Encode)?;
    let unused = unknown_fields(input, &known);
    Ok((typed, unused))
}

/// The dotted paths of keys present in `input` but not in `known`.
///
/// At each object, keys shared by both trees are visited first, in `known`'s
/// order; then the object's own unknown keys follow in `input` order. Array
/// elements are compared pairwise and addressed by index.
pub fn unknown_fields(input: &Value, known: &Value) -> Vec<String> {
    let mut out = Vec::new();
    walk(input, known, "", &mut out);
    out
}

fn walk(input: &Value, known: &Value, prefix: &str, out: &mut Vec<String>) {
    match (input, known) {
        (Value::Object(input), Value::Object(known)) => {
            for (key, known_child) in known {
                if let Some(input_child) = input.get(key) {
                    walk(input_child, known_child, &join(prefix, key), out);
                }
            }
            out.extend(
                input
                    .keys()
                    .filter(|key| !known.contains_key(*key))
                    .map(|key| join(prefix, key)),
            );
        }
        (Value::Array(input), Value::Array(known)) => {
            for (i, (input_item, known_item)) in input.iter().zip(known).enumerate() {
                walk(input_item, known_item, &join(prefix, &i.to_string()), out);
            }
        }
        _ => {}
    }
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}
