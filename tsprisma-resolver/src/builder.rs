//! Schema construction from object shapes and alias references.
//!
//! The builder walks an object shape member by member and descends into
//! nested shapes, registered aliases and arrays of shapes. Two heuristics
//! bound the walk:
//!
//! - a field whose lower-cased name already occurs on the path from the root
//!   is skipped;
//! - a node at an even depth greater than one that has no `include` member is
//!   returned empty, unless it was reached through an `include` field.
//!
//! Fields named `include` (in any case) are resolved without extending the
//! path, and end the processing of their node.
//!
//! In addition, an alias that is re-entered with the same path while it is
//! still being expanded resolves to an empty tree, so include-only cycles
//! terminate.

use smol_str::SmolStr;
use tracing::trace;
use tsprisma_decl::{ObjectType, PropertySignature, TypeNode};

use crate::registry::AliasRegistry;
use crate::schema::{INCLUDE_KEY, ParentPath, SchemaNode, SchemaTree};

/// How a node was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Via {
    /// Through an ordinary field, or as a root.
    Field,
    /// Through an `include` field.
    Include,
}

/// Builds [`SchemaTree`]s against one alias registry.
#[derive(Debug)]
pub struct SchemaBuilder<'r, 'a> {
    registry: &'r AliasRegistry<'a>,
    expanding: Vec<(SmolStr, ParentPath)>,
}

impl<'r, 'a> SchemaBuilder<'r, 'a> {
    /// Create a builder over `registry`.
    pub fn new(registry: &'r AliasRegistry<'a>) -> Self {
        Self {
            registry,
            expanding: Vec::new(),
        }
    }

    /// Build the schema of `node` at `depth` below the root.
    pub fn build(&mut self, node: &ObjectType, path: &ParentPath, depth: usize) -> SchemaTree {
        self.build_node(node, path, depth, Via::Field)
    }

    /// Build the schema of the alias registered as `name`.
    ///
    /// Unknown names resolve to an empty tree.
    pub fn resolve(&mut self, name: &str, path: &ParentPath, depth: usize) -> SchemaTree {
        self.resolve_node(name, path, depth, Via::Field)
    }

    fn resolve_node(&mut self, name: &str, path: &ParentPath, depth: usize, via: Via) -> SchemaTree {
        let Some(node) = self.registry.get(name) else {
            trace!(reference = name, %path, depth, "Unresolved reference");
            return SchemaTree::new();
        };

        if self
            .expanding
            .iter()
            .any(|(alias, seen)| alias == name && seen == path)
        {
            trace!(alias = name, %path, depth, "Alias already expanding on this path");
            return SchemaTree::new();
        }

        self.expanding.push((SmolStr::new(name), path.clone()));
        let tree = self.build_node(node, path, depth, via);
        self.expanding.pop();
        tree
    }

    fn build_node(&mut self, node: &ObjectType, path: &ParentPath, depth: usize, via: Via) -> SchemaTree {
        let mut schema = SchemaTree::new();

        if via == Via::Field && depth > 1 && depth % 2 == 0 && !node.has_member(INCLUDE_KEY) {
            trace!(%path, depth, "Depth cut-off");
            return schema;
        }

        for member in &node.members {
            let key = member.name();
            let lower = key.to_lowercase();

            if lower == INCLUDE_KEY {
                if let Some(tree) = self.resolve_member(member, path, depth + 1, Via::Include) {
                    schema.insert_tree(key, tree);
                }
                break;
            }

            if path.contains(&lower) {
                trace!(field = key, %path, "Field already on path");
                continue;
            }

            let child_path = path.with(lower);
            if let Some(tree) = self.resolve_member(member, &child_path, depth + 1, Via::Field) {
                schema.insert(key, SchemaNode::Tree(tree));
            }
        }

        schema
    }

    /// Resolve the annotation of `member`; `None` means the field gets no entry.
    fn resolve_member(
        &mut self,
        member: &PropertySignature,
        path: &ParentPath,
        depth: usize,
        via: Via,
    ) -> Option<SchemaTree> {
        match &member.ty {
            TypeNode::Union(types) => {
                let mut candidates = types.iter().filter(|ty| !ty.is_nullable_marker());
                match (candidates.next(), candidates.next()) {
                    (Some(only), None) => self.resolve_shape(only, path, depth, via),
                    _ => {
                        trace!(field = member.name(), %path, "Union does not reduce to one type");
                        None
                    }
                }
            }
            TypeNode::Array(element) => match element.as_ref() {
                TypeNode::Object(object) => Some(self.build_node(object, path, depth, via)),
                _ => None,
            },
            other => self.resolve_shape(other, path, depth, via),
        }
    }

    fn resolve_shape(
        &mut self,
        ty: &TypeNode,
        path: &ParentPath,
        depth: usize,
        via: Via,
    ) -> Option<SchemaTree> {
        match ty {
            TypeNode::Object(object) => Some(self.build_node(object, path, depth, via)),
            TypeNode::Reference(reference) => {
                Some(self.resolve_node(reference.lookup_name(), path, depth, via))
            }
            _ => None,
        }
    }
}
