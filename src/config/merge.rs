//! Deep merge for layered attribute trees.
//!
//! Used both for resolver config tiers and for node attribute layers
//! (e.g. role defaults under environment overrides). Mappings merge key by
//! key; sequences and scalars from the higher layer replace the lower one.

use serde_json::Value;

/// Merge `overlay` into `base` in place, with `overlay` taking precedence.
///
/// - Objects are merged recursively; new keys keep overlay order after base keys
/// - Arrays, strings, numbers and booleans are replaced entirely
/// - A null overlay leaves the base untouched (null means "not specified")
///
/// # Example
/// ```
/// use serde_json::json;
/// use openstack_resolver::config::deep_merge;
///
/// let mut base = json!({"db": {"compute": {"host": "127.0.0.1", "port": "3306"}}});
/// deep_merge(&mut base, json!({"db": {"compute": {"host": "10.0.0.5"}}}));
/// assert_eq!(base, json!({"db": {"compute": {"host": "10.0.0.5", "port": "3306"}}}));
/// ```
pub fn deep_merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(base_value) => deep_merge(base_value, overlay_value),
                    None => {
                        base_map.insert(key, overlay_value);
                    }
                }
            }
        }
        (_, Value::Null) => {}
        (base, overlay) => *base = overlay,
    }
}

/// Merge layers in order, later layers taking precedence.
pub fn deep_merge_all(layers: impl IntoIterator<Item = Value>) -> Value {
    layers.into_iter().fold(Value::Null, |mut acc, layer| {
        if acc.is_null() {
            layer
        } else {
            deep_merge(&mut acc, layer);
            acc
        }
    })
}
