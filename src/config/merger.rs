//! Merging configuration layers.
//!
//! # Merge Rules
//!
//! Between YAML files (`config.yml` then `config.local.yml`):
//! - Mappings are merged recursively
//! - Arrays are replaced entirely
//! - `null` in the overlay deletes the key
//! - Scalars in the overlay replace the base
//!
//! Between dependency lists (preset parents, then the preset, then the
//! project config), entries are keyed by `name`: an overlay entry replaces
//! the base entry in place, new names are appended.

use serde_yaml::Value;

use crate::config::schema::DependencyConfig;

/// Deep merge two YAML values, `overlay` taking precedence.
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            let mut merged = base_map.clone();
            for (key, value) in overlay_map {
                if value.is_null() {
                    merged.remove(key);
                    continue;
                }
                let next = match base_map.get(key) {
                    Some(existing) => deep_merge(existing, value),
                    None => value.clone(),
                };
                merged.insert(key.clone(), next);
            }
            Value::Mapping(merged)
        }
        (_, overlay) => overlay.clone(),
    }
}

/// Merge YAML layers in order (later overrides earlier).
pub fn merge_configs(configs: &[Value]) -> Value {
    configs
        .iter()
        .fold(Value::Mapping(Default::default()), |acc, config| {
            deep_merge(&acc, config)
        })
}

/// Merge dependency lists by name, keeping declaration order.
pub fn merge_dependencies(
    base: Vec<DependencyConfig>,
    overlay: &[DependencyConfig],
) -> Vec<DependencyConfig> {
    let mut merged = base;
    for dep in overlay {
        match merged.iter_mut().find(|existing| existing.name == dep.name) {
            Some(existing) => *existing = dep.clone(),
            None => merged.push(dep.clone()),
        }
    }
    merged
}
