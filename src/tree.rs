//! The caller-owned node attribute tree.
//!
//! A tree is a JSON-shaped mapping, usually produced by merging several
//! attribute layers (role defaults, environment overrides, node overrides).
//! Resolvers only ever read from it.

use crate::config::deep_merge;
use crate::error::{ResolveError, ResolveResult};
use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::debug;

/// Immutable view over merged node attributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigTree {
    root: Map<String, Value>,
}

impl ConfigTree {
    /// Wrap an already-merged attribute value. `null` is an empty tree.
    pub fn from_value(value: Value) -> ResolveResult<Self> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            Value::Null => Ok(Self::default()),
            other => Err(ResolveError::malformed(
                "(root)",
                format!("expected a mapping, found {}", kind(&other)),
            )),
        }
    }

    /// Merge attribute layers, lowest precedence first.
    pub fn from_layers(layers: impl IntoIterator<Item = Value>) -> ResolveResult<Self> {
        let mut merged = Value::Object(Map::new());
        for (idx, layer) in layers.into_iter().enumerate() {
            if !(layer.is_object() || layer.is_null()) {
                return Err(ResolveError::malformed(
                    format!("(layer {})", idx),
                    format!("expected a mapping, found {}", kind(&layer)),
                ));
            }
            deep_merge(&mut merged, layer);
        }
        Self::from_value(merged)
    }

    /// Read attribute files and merge them in order, later files overriding.
    ///
    /// `.json` files are parsed as JSON, everything else as YAML.
    pub fn load_files<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut layers = Vec::with_capacity(paths.len());
        for path in paths {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read attributes {}", path.display()))?;
            let value: Value = if path.extension().is_some_and(|ext| ext == "json") {
                serde_json::from_str(&content)
                    .with_context(|| format!("invalid JSON in {}", path.display()))?
            } else {
                serde_yaml::from_str(&content)
                    .with_context(|| format!("invalid YAML in {}", path.display()))?
            };
            if !(value.is_object() || value.is_null()) {
                bail!("{} must contain a mapping at its root", path.display());
            }
            debug!(path = %path.display(), "loaded attribute layer");
            layers.push(value);
        }
        Ok(Self::from_layers(layers)?)
    }

    /// Look up a value by key path. Missing keys and `null` are both absent.
    ///
    /// Traversal stops at the first non-mapping value.
    pub fn get(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        let mut current = self.root.get(*first)?;
        for key in rest {
            current = current.as_object()?.get(*key)?;
        }
        (!current.is_null()).then_some(current)
    }

    /// Look up a value by dotted path such as `mysql.server_root_password`.
    pub fn get_dotted(&self, path: &str) -> Option<&Value> {
        let keys: Vec<&str> = path.split('.').filter(|k| !k.is_empty()).collect();
        self.get(&keys)
    }

    /// Look up a mapping section.
    ///
    /// Returns `Ok(None)` when any key along the path is missing or `null`,
    /// and an error when a node along the path exists but is not a mapping.
    pub fn section(&self, path: &[&str]) -> ResolveResult<Option<&Map<String, Value>>> {
        let mut current = &self.root;
        for (depth, key) in path.iter().enumerate() {
            match current.get(*key) {
                None | Some(Value::Null) => return Ok(None),
                Some(Value::Object(map)) => current = map,
                Some(other) => {
                    return Err(ResolveError::malformed(
                        path[..=depth].join("."),
                        format!("expected a mapping, found {}", kind(other)),
                    ));
                }
            }
        }
        Ok(Some(current))
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }
}

/// Short name of a JSON value's type for error messages.
pub(crate) fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
