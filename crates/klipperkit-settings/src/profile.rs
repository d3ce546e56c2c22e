//! Machine profile and per-extruder property lookup
//!
//! Stands in for the host application's container stacks: each configured
//! extruder carries material metadata and a named property tree the
//! transform queries for descriptive values (nozzle size, layer height,
//! standby temperature). Properties are either leaves with a value and an
//! enable flag, or categories whose children are themselves property keys.

use crate::error::{SettingsError, SettingsResult};
use klipperkit_core::format_float;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Categories can nest, but a property tree is shallow in practice.
/// The guard only has to stop a miswritten profile from recursing forever.
const MAX_LOOKUP_DEPTH: usize = 8;

/// A typed property value as stored in a profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Boolean flag
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Free-form string
    Str(String),
}

impl PropertyValue {
    /// Render the value the way it appears in a macro argument. Floats are
    /// trimmed of trailing zeros; everything else renders plainly.
    pub fn render(&self) -> String {
        match self {
            Self::Bool(v) => v.to_string(),
            Self::Int(v) => v.to_string(),
            Self::Float(v) => format_float(*v),
            Self::Str(v) => v.clone(),
        }
    }
}

/// A named property in an extruder stack: either a concrete value or a
/// grouping node that only points at further keys.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Property {
    /// A grouping node whose children are property keys to descend into.
    Category {
        /// Keys of the child properties, in definition order.
        children: Vec<String>,
    },
    /// A concrete value with its enable state.
    Leaf {
        /// The stored value.
        value: PropertyValue,
        /// Disabled leaves resolve to "no value" rather than their content.
        #[serde(default = "default_enabled")]
        enabled: bool,
    },
}

fn default_enabled() -> bool {
    true
}

/// Query surface the transform uses to read per-extruder values.
///
/// Implemented by [`MachineProfile`] and by in-memory fixtures in tests.
pub trait ExtruderQuery {
    /// Number of configured extruder stacks, in stable index order.
    fn stack_count(&self) -> usize;

    /// Fetch a named property from one stack.
    fn property(&self, stack: usize, key: &str) -> Option<Property>;

    /// Fetch material metadata from one stack by key (e.g. `material`).
    fn material(&self, stack: usize, key: &str) -> Option<String>;
}

/// Resolve a property key on a stack to a rendered value.
///
/// Categories are descended depth-first, returning the first value a child
/// produces. Disabled leaves, unknown keys, and exhausted depth all resolve
/// to `None`; a failed lookup is absence, never an error.
pub fn lookup_value(query: &dyn ExtruderQuery, stack: usize, key: &str) -> Option<String> {
    lookup_at_depth(query, stack, key, MAX_LOOKUP_DEPTH)
}

fn lookup_at_depth(
    query: &dyn ExtruderQuery,
    stack: usize,
    key: &str,
    depth: usize,
) -> Option<String> {
    if depth == 0 {
        tracing::debug!(key, "property lookup depth exhausted");
        return None;
    }
    match query.property(stack, key)? {
        Property::Leaf { value, enabled } => enabled.then(|| value.render()),
        Property::Category { children } => children
            .iter()
            .find_map(|child| lookup_at_depth(query, stack, child, depth - 1)),
    }
}

/// One configured extruder: material metadata plus its property tree.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ExtruderStack {
    /// Material metadata, keyed the way the host exposes it
    /// (`material`, `brand`, ...).
    #[serde(default)]
    pub material: HashMap<String, String>,
    /// Named properties, leaves and categories alike.
    #[serde(default)]
    pub properties: HashMap<String, Property>,
}

/// The machine as the transform sees it: extruder stacks in index order.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct MachineProfile {
    /// Extruder stacks; index 0 is the first tool.
    #[serde(default)]
    pub extruders: Vec<ExtruderStack>,
}

impl MachineProfile {
    /// A single-extruder profile with common defaults, used when no profile
    /// file is supplied.
    pub fn single_extruder() -> Self {
        let mut material = HashMap::new();
        material.insert("material".to_string(), "PLA".to_string());

        let mut properties = HashMap::new();
        properties.insert(
            "machine_nozzle_size".to_string(),
            Property::Leaf {
                value: PropertyValue::Float(0.4),
                enabled: true,
            },
        );
        properties.insert(
            "layer_height".to_string(),
            Property::Leaf {
                value: PropertyValue::Float(0.2),
                enabled: true,
            },
        );
        properties.insert(
            "material_standby_temperature".to_string(),
            Property::Leaf {
                value: PropertyValue::Float(175.0),
                enabled: true,
            },
        );

        Self {
            extruders: vec![ExtruderStack {
                material,
                properties,
            }],
        }
    }

    /// Load a profile from file (JSON or TOML).
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        if path.extension().is_some_and(|ext| ext == "json") {
            Ok(serde_json::from_str(&content)?)
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            Ok(toml::from_str(&content)?)
        } else {
            Err(SettingsError::UnsupportedFormat(
                path.display().to_string(),
            ))
        }
    }
}

impl ExtruderQuery for MachineProfile {
    fn stack_count(&self) -> usize {
        self.extruders.len()
    }

    fn property(&self, stack: usize, key: &str) -> Option<Property> {
        self.extruders.get(stack)?.properties.get(key).cloned()
    }

    fn material(&self, stack: usize, key: &str) -> Option<String> {
        self.extruders.get(stack)?.material.get(key).cloned()
    }
}
