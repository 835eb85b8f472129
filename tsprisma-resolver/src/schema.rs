//! Intermediate schema trees produced by the builder.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use smol_str::SmolStr;

/// The member name that marks a field as carrying its own include configuration.
pub const INCLUDE_KEY: &str = "include";

/// A resolved, possibly nested view of the selectable fields of a type.
///
/// Field order follows the member order of the declaration it was built from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SchemaTree {
    fields: IndexMap<SmolStr, SchemaNode>,
}

/// A field value inside a [`SchemaTree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaNode {
    /// No further structure.
    Leaf,
    /// Nested fields.
    Tree(SchemaTree),
}

impl SchemaTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field, keeping the position of an existing key.
    pub fn insert(&mut self, key: impl Into<SmolStr>, node: SchemaNode) {
        self.fields.insert(key.into(), node);
    }

    /// Insert a nested tree.
    pub fn insert_tree(&mut self, key: impl Into<SmolStr>, tree: SchemaTree) {
        self.insert(key, SchemaNode::Tree(tree));
    }

    /// Get a field by exact name.
    pub fn get(&self, key: &str) -> Option<&SchemaNode> {
        self.fields.get(key)
    }

    /// Get a nested tree by exact name.
    pub fn get_tree(&self, key: &str) -> Option<&SchemaTree> {
        self.get(key).and_then(SchemaNode::as_tree)
    }

    /// The nested `include` tree, if this tree wraps one.
    pub fn include(&self) -> Option<&SchemaTree> {
        self.get_tree(INCLUDE_KEY)
    }

    /// Check if a field exists.
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Iterate over fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaNode)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Field names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(SmolStr::as_str)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the tree has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Deepest nesting level below this tree (an empty tree has depth 0).
    pub fn depth(&self) -> usize {
        self.fields
            .values()
            .map(|node| match node {
                SchemaNode::Leaf => 1,
                SchemaNode::Tree(tree) => 1 + tree.depth(),
            })
            .max()
            .unwrap_or(0)
    }
}

impl<K: Into<SmolStr>> FromIterator<(K, SchemaNode)> for SchemaTree {
    fn from_iter<I: IntoIterator<Item = (K, SchemaNode)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl SchemaNode {
    /// The nested tree, if this node is one.
    pub fn as_tree(&self) -> Option<&SchemaTree> {
        match self {
            Self::Tree(tree) => Some(tree),
            Self::Leaf => None,
        }
    }

    /// Check if this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf)
    }
}

impl Serialize for SchemaNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Leaf => serializer.serialize_bool(true),
            Self::Tree(tree) => tree.serialize(serializer),
        }
    }
}

/// Lower-cased field names seen on the current recursion path.
///
/// A field whose lower-cased name is already on the path is not descended
/// into again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ParentPath {
    keys: Vec<SmolStr>,
}

impl ParentPath {
    /// Create an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if `lower_key` was already seen on this path.
    pub fn contains(&self, lower_key: &str) -> bool {
        self.keys.iter().any(|k| k == lower_key)
    }

    /// A copy of this path extended with `lower_key`.
    pub fn with(&self, lower_key: impl Into<SmolStr>) -> Self {
        let mut keys = self.keys.clone();
        keys.push(lower_key.into());
        Self { keys }
    }

    /// Number of keys on the path.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Check if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Keys from root to leaf.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(SmolStr::as_str)
    }
}

impl std::fmt::Display for ParentPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.keys().collect::<Vec<_>>().join("."))
    }
}
