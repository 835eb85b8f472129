//! Top-level declarations: namespaces and type aliases.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use super::{Ident, ObjectType, Span, TypeNode};

/// A parsed declaration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceFile {
    /// Top-level items in source order.
    pub items: Vec<Item>,
}

impl SourceFile {
    /// Create an empty source file.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item.
    pub fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Top-level namespaces.
    pub fn namespaces(&self) -> impl Iterator<Item = &Namespace> {
        self.items.iter().filter_map(Item::as_namespace)
    }

    /// Top-level type aliases (outside any namespace).
    pub fn type_aliases(&self) -> impl Iterator<Item = &TypeAlias> {
        self.items.iter().filter_map(Item::as_type_alias)
    }

    /// Number of items that were skipped because they fall outside the
    /// declaration vocabulary, counted at every nesting level.
    pub fn skipped_count(&self) -> usize {
        fn count(items: &[Item]) -> usize {
            items
                .iter()
                .map(|item| match item {
                    Item::Other(_) => 1,
                    Item::Namespace(ns) => count(&ns.items),
                    Item::TypeAlias(_) => 0,
                })
                .sum()
        }
        count(&self.items)
    }

    /// Get statistics about the file.
    pub fn stats(&self) -> DeclarationStats {
        let mut stats = DeclarationStats::default();
        collect_stats(&self.items, &mut stats);
        stats
    }
}

fn collect_stats(items: &[Item], stats: &mut DeclarationStats) {
    for item in items {
        match item {
            Item::Namespace(ns) => {
                stats.namespace_count += 1;
                collect_stats(&ns.items, stats);
            }
            Item::TypeAlias(alias) => {
                stats.alias_count += 1;
                if alias.object().is_some() {
                    stats.object_alias_count += 1;
                }
            }
            Item::Other(_) => stats.skipped_count += 1,
        }
    }
}

/// Declaration statistics for debugging/info.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarationStats {
    /// Namespaces at every nesting level.
    pub namespace_count: usize,
    /// Type aliases at every nesting level.
    pub alias_count: usize,
    /// Type aliases whose right-hand side is an object literal.
    pub object_alias_count: usize,
    /// Statements outside the vocabulary.
    pub skipped_count: usize,
}

impl std::fmt::Display for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stats = self.stats();
        write!(
            f,
            "SourceFile({} namespaces, {} aliases, {} object aliases, {} skipped)",
            stats.namespace_count, stats.alias_count, stats.object_alias_count, stats.skipped_count
        )
    }
}

/// A declaration item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Item {
    /// A `namespace`/`module` block.
    Namespace(Namespace),
    /// A `type Name = ...` alias.
    TypeAlias(TypeAlias),
    /// A statement outside the vocabulary, kept only as its location.
    Other(Span),
}

impl Item {
    /// The namespace, if this item is one.
    pub fn as_namespace(&self) -> Option<&Namespace> {
        match self {
            Self::Namespace(ns) => Some(ns),
            _ => None,
        }
    }

    /// The type alias, if this item is one.
    pub fn as_type_alias(&self) -> Option<&TypeAlias> {
        match self {
            Self::TypeAlias(alias) => Some(alias),
            _ => None,
        }
    }
}

/// A namespace block.
///
/// `namespace A.B { }` keeps both segments in `path`; `declare module "x" { }`
/// keeps the unquoted module string as its single segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Namespace {
    /// Name segments.
    pub path: Vec<Ident>,
    /// Whether the name was a string literal (`declare module "x"`).
    pub is_module_string: bool,
    /// Nested items.
    pub items: Vec<Item>,
    /// Source location.
    pub span: Span,
}

impl Namespace {
    /// Create a new namespace.
    pub fn new(path: Vec<Ident>, span: Span) -> Self {
        Self {
            path,
            is_module_string: false,
            items: Vec::new(),
            span,
        }
    }

    /// The full dotted name.
    pub fn name(&self) -> SmolStr {
        let joined = self
            .path
            .iter()
            .map(Ident::as_str)
            .collect::<Vec<_>>()
            .join(".");
        SmolStr::new(joined)
    }

    /// Check if any identifier segment of the name equals `name`.
    ///
    /// `namespace A.B { }` opens `A` and then `B` nested inside it, so the
    /// block counts as both. Module strings never match.
    pub fn is_named(&self, name: &str) -> bool {
        !self.is_module_string && self.path.iter().any(|seg| seg.as_str() == name)
    }

    /// Add an item.
    pub fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Directly nested namespaces.
    pub fn namespaces(&self) -> impl Iterator<Item = &Namespace> {
        self.items.iter().filter_map(Item::as_namespace)
    }

    /// Directly nested type aliases.
    pub fn type_aliases(&self) -> impl Iterator<Item = &TypeAlias> {
        self.items.iter().filter_map(Item::as_type_alias)
    }
}

/// A `type` alias declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeAlias {
    /// Alias name.
    pub name: Ident,
    /// Generic parameters.
    pub type_params: Vec<TypeParam>,
    /// Right-hand side.
    pub ty: TypeNode,
    /// Source location.
    pub span: Span,
}

impl TypeAlias {
    /// Get the alias name as a string.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// The right-hand side as an object shape, if it is one.
    pub fn object(&self) -> Option<&ObjectType> {
        self.ty.as_object()
    }
}

/// A generic parameter of a type alias.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeParam {
    /// Parameter name.
    pub name: Ident,
    /// `extends` constraint.
    pub constraint: Option<TypeNode>,
    /// Default type.
    pub default: Option<TypeNode>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Keyword, ObjectType};

    fn ident(name: &str) -> Ident {
        Ident::new(name, Span::default())
    }

    fn alias(name: &str, ty: TypeNode) -> TypeAlias {
        TypeAlias {
            name: ident(name),
            type_params: vec![],
            ty,
            span: Span::default(),
        }
    }

    #[test]
    fn test_namespace_dotted_name_matches_each_segment() {
        let ns = Namespace::new(vec![ident("Outer"), ident("TSPrisma")], Span::default());
        assert_eq!(ns.name(), "Outer.TSPrisma");
        assert!(ns.is_named("Outer"));
        assert!(ns.is_named("TSPrisma"));
        assert!(!ns.is_named("Prisma"));
    }

    #[test]
    fn test_module_string_never_matches() {
        let mut ns = Namespace::new(vec![ident("Prisma")], Span::default());
        ns.is_module_string = true;
        assert!(!ns.is_named("Prisma"));
    }

    #[test]
    fn test_stats_count_nested_items() {
        let mut inner = Namespace::new(vec![ident("Inner")], Span::default());
        inner.add_item(Item::TypeAlias(alias(
            "A",
            TypeNode::Object(ObjectType::new(vec![], Span::default())),
        )));
        inner.add_item(Item::Other(Span::new(0, 3)));

        let mut file = SourceFile::new();
        file.add_item(Item::Namespace(inner));
        file.add_item(Item::TypeAlias(alias("B", TypeNode::Keyword(Keyword::String))));

        let stats = file.stats();
        assert_eq!(stats.namespace_count, 1);
        assert_eq!(stats.alias_count, 2);
        assert_eq!(stats.object_alias_count, 1);
        assert_eq!(stats.skipped_count, 1);
        assert_eq!(file.skipped_count(), 1);
        assert_eq!(file.type_aliases().count(), 1);
        assert_eq!(file.namespaces().count(), 1);
    }
}
