//! User preference map primitives: recursive deep merge and allow-list
//! filtering of request parameters.
//!
//! A preference map is an open-ended JSON object persisted alongside the
//! user. Updates are always merged into it, never written over it, so keys a
//! request does not mention survive at every nesting level.

use serde_json::{Map, Value};

/// Maximum serialized size of a user's preference map (64 KiB).
pub const MAX_PREFERENCES_BYTES: usize = 65_536;

// ---------------------------------------------------------------------------
// Deep merge
// ---------------------------------------------------------------------------

/// Merge `patch` into `target` in place.
///
/// - Keys that hold objects on both sides are merged recursively.
/// - Any other value in `patch` (scalar, array, `null`, or an object facing a
///   non-object) replaces the value in `target`.
/// - Keys present on only one side are kept.
pub fn deep_merge(target: &mut Value, patch: Value) {
    match (target, patch) {
        (Value::Object(target), Value::Object(patch)) => {
            for (key, value) in patch {
                match target.get_mut(&key) {
                    Some(existing) => deep_merge(existing, value),
                    None => {
                        target.insert(key, value);
                    }
                }
            }
        }
        (target, patch) => *target = patch,
    }
}

/// Follow `path` through nested objects.
pub fn get_path<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |current, key| current.get(*key))
}

// ---------------------------------------------------------------------------
// Strong parameters
// ---------------------------------------------------------------------------

/// Shape a permitted key is allowed to take.
#[derive(Debug, Clone, Copy)]
pub enum Permit {
    /// A string, number, boolean or `null`.
    Scalar,
    /// An array whose elements are all scalars.
    ScalarArray,
    /// An object whose own keys are filtered by the nested list.
    Hash(&'static [(&'static str, Permit)]),
}

/// Keep only the keys of `params` listed in `allowed`, with values of the
/// listed shape.
///
/// Anything else is dropped silently: unknown keys, a scalar key holding an
/// object, an array containing non-scalars. A permitted hash key whose value
/// is an object is always kept, even when none of its own keys survive.
pub fn permit(params: &Value, allowed: &[(&str, Permit)]) -> Map<String, Value> {
    let mut permitted = Map::new();
    let Some(params) = params.as_object() else {
        return permitted;
    };

    for (key, shape) in allowed {
        let Some(value) = params.get(*key) else {
            continue;
        };
        let kept = match shape {
            Permit::Scalar if is_scalar(value) => Some(value.clone()),
            Permit::ScalarArray => match value {
                Value::Array(items) if items.iter().all(is_scalar) => Some(value.clone()),
                _ => None,
            },
            Permit::Hash(nested) if value.is_object() => {
                Some(Value::Object(permit(value, nested)))
            }
            _ => None,
        };
        if let Some(kept) = kept {
            permitted.insert((*key).to_string(), kept);
        }
    }

    permitted
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}
