//! Reduction of schema trees to include structures.

use indexmap::IndexMap;
use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smol_str::SmolStr;

use crate::schema::{INCLUDE_KEY, SchemaNode, SchemaTree};

/// The minimal include configuration of a query: which relations to fetch
/// and, per relation, its own nested configuration.
///
/// Serialises as a JSON object whose values are `true` or `{ "include": {...} }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IncludeStructure {
    fields: IndexMap<SmolStr, IncludeValue>,
}

/// A value of an [`IncludeStructure`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncludeValue {
    /// Fetch the relation with its default fields.
    Enabled,
    /// Fetch the relation with a nested include configuration.
    Nested(IncludeStructure),
}

impl IncludeStructure {
    /// Create an empty structure.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry.
    pub fn insert(&mut self, key: impl Into<SmolStr>, value: IncludeValue) {
        self.fields.insert(key.into(), value);
    }

    /// Get an entry.
    pub fn get(&self, key: &str) -> Option<&IncludeValue> {
        self.fields.get(key)
    }

    /// Iterate over entries in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &IncludeValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Entry names in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(SmolStr::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The JSON form of this structure.
    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .fields
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_json()))
            .collect();
        serde_json::Value::Object(map)
    }
}

impl<K: Into<SmolStr>> FromIterator<(K, IncludeValue)> for IncludeStructure {
    fn from_iter<I: IntoIterator<Item = (K, IncludeValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl IncludeValue {
    /// The JSON form of this value.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Enabled => serde_json::Value::Bool(true),
            Self::Nested(inner) => serde_json::json!({ INCLUDE_KEY: inner.to_json() }),
        }
    }

    /// The nested structure, if any.
    pub fn nested(&self) -> Option<&IncludeStructure> {
        match self {
            Self::Nested(inner) => Some(inner),
            Self::Enabled => None,
        }
    }
}

impl Serialize for IncludeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Enabled => serializer.serialize_bool(true),
            Self::Nested(inner) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(INCLUDE_KEY, inner)?;
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for IncludeValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match ValueRepr::deserialize(deserializer)? {
            ValueRepr::Flag(true) => Ok(Self::Enabled),
            ValueRepr::Flag(false) => Err(D::Error::custom(
                "include flags must be `true`; omit the relation instead",
            )),
            ValueRepr::Nested(NestedRepr { include }) => Ok(Self::Nested(include)),
        }
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct NestedRepr {
    include: IncludeStructure,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ValueRepr {
    Flag(bool),
    Nested(NestedRepr),
}

impl From<&IncludeStructure> for SchemaTree {
    /// The schema tree that filters back to `structure`.
    fn from(structure: &IncludeStructure) -> Self {
        structure
            .iter()
            .map(|(key, value)| {
                let node = match value {
                    IncludeValue::Enabled => SchemaNode::Leaf,
                    IncludeValue::Nested(inner) => SchemaNode::Tree(
                        [(INCLUDE_KEY, SchemaNode::Tree(SchemaTree::from(inner)))]
                            .into_iter()
                            .collect(),
                    ),
                };
                (key, node)
            })
            .collect()
    }
}

/// Reduce `schema` to the include configuration it describes.
///
/// A field becomes `{ include: ... }` only when its tree has an `include`
/// tree that filters to something non-empty; every other field becomes `true`.
pub fn filter_schema(schema: &SchemaTree) -> IncludeStructure {
    schema
        .iter()
        .map(|(key, node)| (key, filter_node(node)))
        .collect()
}

/// Reduce a single field value.
pub fn filter_node(node: &SchemaNode) -> IncludeValue {
    let Some(include) = node.as_tree().and_then(SchemaTree::include) else {
        return IncludeValue::Enabled;
    };

    let nested = filter_schema(include);
    if nested.is_empty() {
        IncludeValue::Enabled
    } else {
        IncludeValue::Nested(nested)
    }
}
