//! Deep merge of a parsed document over a tree of defaults.

use crate::value::{Mapping, Value};

/// Merge `next` into `base`.
///
/// When both sides are mappings they are merged key by key; anything else
/// is replaced by `next`.
pub fn merge(base: Value, next: Value) -> Value {
    match (base, next) {
        (Value::Mapping(base), Value::Mapping(next)) => Value::Mapping(merge_mappings(base, next)),
        // Anything else overwrites.
        (_, next) => next,
    }
}

/// Merge the entries of `next` into `base`.
///
/// Keys already in `base` keep their position; keys only in `next` are
/// appended in `next`'s order.
pub fn merge_mappings(mut base: Mapping, next: Mapping) -> Mapping {
    for (key, value) in next {
        match base.get_mut(&key) {
            Some(existing) => {
                let old = std::mem::replace(existing, Value::Null);
                *existing = merge(old, value);
            }
            None => {
                base.insert(key, value);
            }
        }
    }
    base
}
