//! Collection of the aliases reference resolution can see.

use indexmap::IndexMap;
use indexmap::map::Entry;
use smol_str::SmolStr;
use tracing::{debug, trace};
use tsprisma_decl::{Item, Namespace, ObjectType, SourceFile, TypeAlias};

use crate::config::ResolverConfig;

/// Object-shaped aliases declared inside the designated namespaces.
///
/// Built once per resolution run and borrowed from the parsed file.
#[derive(Debug, Clone, Default)]
pub struct AliasRegistry<'a> {
    aliases: IndexMap<SmolStr, RegisteredAlias<'a>>,
}

/// A registered alias and the namespace it was found in.
#[derive(Debug, Clone, Copy)]
pub struct RegisteredAlias<'a> {
    /// The declaration.
    pub alias: &'a TypeAlias,
    /// The innermost enclosing namespace.
    pub namespace: &'a Namespace,
}

impl<'a> RegisteredAlias<'a> {
    /// The object shape of the alias.
    pub fn object(&self) -> Option<&'a ObjectType> {
        self.alias.object()
    }
}

impl<'a> AliasRegistry<'a> {
    /// Walk `file` and register every object-shaped alias of a designated namespace.
    ///
    /// A namespace is designated when any segment of its dotted name is one of
    /// `config.namespaces`; all aliases in its subtree are registered, nested
    /// namespaces included. The first declaration of a name wins.
    pub fn register(file: &'a SourceFile, config: &ResolverConfig) -> Self {
        let mut registry = Self::default();
        let mut skipped = 0usize;

        for ns in file.namespaces() {
            registry.walk(ns, false, config, &mut skipped);
        }

        debug!(
            aliases = registry.len(),
            skipped,
            namespaces = ?config.namespaces,
            "Alias registry built"
        );
        registry
    }

    fn walk(
        &mut self,
        ns: &'a Namespace,
        inside_designated: bool,
        config: &ResolverConfig,
        skipped: &mut usize,
    ) {
        let designated =
            inside_designated || config.namespaces.iter().any(|name| ns.is_named(name));

        for item in &ns.items {
            match item {
                Item::Namespace(inner) => self.walk(inner, designated, config, skipped),
                Item::TypeAlias(alias) if designated => {
                    if alias.object().is_none() {
                        trace!(alias = alias.name(), "Skipping non-object alias");
                        *skipped += 1;
                        continue;
                    }
                    match self.aliases.entry(alias.name.name.clone()) {
                        Entry::Vacant(slot) => {
                            slot.insert(RegisteredAlias {
                                alias,
                                namespace: ns,
                            });
                        }
                        Entry::Occupied(_) => {
                            trace!(alias = alias.name(), "Duplicate alias ignored");
                            *skipped += 1;
                        }
                    }
                }
                _ => {}
            }
        }
    }

    /// The object shape registered under `name`.
    pub fn get(&self, name: &str) -> Option<&'a ObjectType> {
        self.aliases.get(name).and_then(RegisteredAlias::object)
    }

    /// The full registration for `name`.
    pub fn entry(&self, name: &str) -> Option<&RegisteredAlias<'a>> {
        self.aliases.get(name)
    }

    /// Check if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.aliases.contains_key(name)
    }

    /// Registered names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.aliases.keys().map(SmolStr::as_str)
    }

    /// Registrations in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RegisteredAlias<'a>)> {
        self.aliases.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of registered aliases.
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    /// Check if nothing was registered.
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tsprisma_decl::parse_declarations;

    fn names(registry: &AliasRegistry<'_>) -> Vec<String> {
        registry.names().map(str::to_string).collect()
    }

    #[test]
    fn test_registers_designated_namespaces_only() {
        let file = parse_declarations(
            r#"
            type Outside = { a: boolean };
            declare namespace Other { type Hidden = { b: boolean } }
            export namespace TSPrisma { type Visible = { c: boolean } }
            export namespace Prisma { type AlsoVisible = { d: boolean } }
            "#,
        )
        .unwrap();

        let registry = AliasRegistry::register(&file, &ResolverConfig::default());
        assert_eq!(names(&registry), vec!["Visible", "AlsoVisible"]);
        assert!(registry.get("Hidden").is_none());
        assert!(registry.get("Outside").is_none());
    }

    #[test]
    fn test_nested_namespaces() {
        let file = parse_declarations(
            r#"
            declare namespace Outer {
                namespace Prisma {
                    type Direct = { a: boolean };
                    namespace Deeper { type Inner = { b: boolean } }
                }
            }
            declare namespace Models.TSPrisma { type Dotted = { c: boolean } }
            "#,
        )
        .unwrap();

        let registry = AliasRegistry::register(&file, &ResolverConfig::default());
        assert_eq!(names(&registry), vec!["Direct", "Inner", "Dotted"]);
        assert_eq!(
            registry.entry("Inner").unwrap().namespace.name().as_str(),
            "Deeper"
        );
    }

    #[test]
    fn test_first_declaration_wins() {
        let file = parse_declarations(
            r#"
            namespace TSPrisma { type Args = { first: boolean } }
            namespace Prisma { type Args = { second: boolean } }
            "#,
        )
        .unwrap();

        let registry = AliasRegistry::register(&file, &ResolverConfig::default());
        assert_eq!(registry.len(), 1);
        let object = registry.get("Args").unwrap();
        assert!(object.has_member("first"));
        assert!(!object.has_member("second"));
    }

    #[test]
    fn test_non_object_aliases_not_registered() {
        let file = parse_declarations(
            r#"
            namespace Prisma {
                type Name = string;
                type Ref = Other;
                type Both = { a: boolean } | null;
                type Obj = { a: boolean };
            }
            "#,
        )
        .unwrap();

        let registry = AliasRegistry::register(&file, &ResolverConfig::default());
        assert_eq!(names(&registry), vec!["Obj"]);
    }

    #[test]
    fn test_module_strings_are_not_designated() {
        let file = parse_declarations(
            r#"declare module "Prisma" { type Args = { a: boolean } }"#,
        )
        .unwrap();

        let registry = AliasRegistry::register(&file, &ResolverConfig::default());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_custom_namespaces() {
        let file = parse_declarations(
            r#"
            namespace Prisma { type A = { a: boolean } }
            namespace Db { type B = { b: boolean } }
            "#,
        )
        .unwrap();

        let config = ResolverConfig::default().with_namespaces(["Db"]);
        let registry = AliasRegistry::register(&file, &config);
        assert_eq!(names(&registry), vec!["B"]);
        assert!(registry.contains("B"));
    }
}
