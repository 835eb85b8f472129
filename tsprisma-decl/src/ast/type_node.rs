//! Type annotation nodes.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use super::{Ident, Span};

/// A type annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeNode {
    /// An object literal type: `{ a: A; b?: B }`.
    Object(ObjectType),
    /// A named reference, possibly qualified and generic: `Prisma.UserArgs<T>`.
    Reference(TypeReference),
    /// A union of two or more members: `A | B`.
    Union(Vec<TypeNode>),
    /// An intersection of two or more members: `A & B`.
    Intersection(Vec<TypeNode>),
    /// An array type: `T[]`.
    Array(Box<TypeNode>),
    /// A tuple type: `[A, B]`.
    Tuple(Vec<TypeNode>),
    /// An indexed access type: `T["key"]`.
    IndexedAccess {
        /// The indexed type.
        object: Box<TypeNode>,
        /// The index type.
        index: Box<TypeNode>,
    },
    /// A prefix type operator: `keyof T`, `readonly T[]`.
    Operator {
        /// The operator.
        op: TypeOperator,
        /// The operand.
        ty: Box<TypeNode>,
    },
    /// A keyword type such as `boolean` or `null`.
    Keyword(Keyword),
    /// A literal type.
    Literal(Literal),
}

impl TypeNode {
    /// The object shape, if this node is one.
    pub fn as_object(&self) -> Option<&ObjectType> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    /// The reference, if this node is one.
    pub fn as_reference(&self) -> Option<&TypeReference> {
        match self {
            Self::Reference(reference) => Some(reference),
            _ => None,
        }
    }

    /// Check if this node is the given keyword.
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        matches!(self, Self::Keyword(k) if *k == keyword)
    }

    /// Check if this node is `null` or `boolean`, the markers Prisma unions
    /// put next to a relation's argument type.
    pub fn is_nullable_marker(&self) -> bool {
        self.is_keyword(Keyword::Null) || self.is_keyword(Keyword::Boolean)
    }
}

/// An object literal type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectType {
    /// Property members in source order.
    pub members: Vec<PropertySignature>,
    /// Source location.
    pub span: Span,
}

impl ObjectType {
    /// Create a new object type.
    pub fn new(members: Vec<PropertySignature>, span: Span) -> Self {
        Self { members, span }
    }

    /// Get a member by exact name.
    pub fn get_member(&self, name: &str) -> Option<&PropertySignature> {
        self.members.iter().find(|m| m.name() == name)
    }

    /// Check if a member with the exact name exists.
    pub fn has_member(&self, name: &str) -> bool {
        self.get_member(name).is_some()
    }

    /// Member names in source order.
    pub fn member_names(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|m| m.name())
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check if the shape has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// A property member of an object type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySignature {
    /// Property name (quotes removed for string keys).
    pub name: Ident,
    /// Whether the property carries the `?` modifier.
    pub optional: bool,
    /// Whether the property carries the `readonly` modifier.
    pub readonly: bool,
    /// The annotated type.
    pub ty: TypeNode,
    /// Source location.
    pub span: Span,
}

impl PropertySignature {
    /// Get the property name as a string.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

/// A reference to a named type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeReference {
    /// The referenced name.
    pub name: QualifiedName,
    /// Generic arguments, if any.
    pub type_args: Vec<TypeNode>,
}

impl TypeReference {
    /// The simple name used for lookups (the rightmost segment).
    pub fn lookup_name(&self) -> &str {
        self.name.rightmost()
    }
}

/// A possibly dotted name: `User`, `Prisma.UserArgs`, `A.B.C`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualifiedName {
    /// Name segments, left to right. Never empty.
    pub segments: Vec<Ident>,
    /// Source location.
    pub span: Span,
}

impl QualifiedName {
    /// Create a qualified name from its segments.
    pub fn new(segments: Vec<Ident>, span: Span) -> Self {
        Self { segments, span }
    }

    /// The rightmost simple identifier.
    pub fn rightmost(&self) -> &str {
        self.segments.last().map(Ident::as_str).unwrap_or_default()
    }

    /// Check if the name has more than one segment.
    pub fn is_qualified(&self) -> bool {
        self.segments.len() > 1
    }
}

impl std::fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .segments
            .iter()
            .map(Ident::as_str)
            .collect::<Vec<_>>()
            .join(".");
        write!(f, "{}", joined)
    }
}

/// Keyword types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Keyword {
    Boolean,
    Null,
    Undefined,
    String,
    Number,
    BigInt,
    Symbol,
    Object,
    Any,
    Unknown,
    Never,
    Void,
}

impl Keyword {
    /// Parse a keyword from its source spelling.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "boolean" => Some(Self::Boolean),
            "null" => Some(Self::Null),
            "undefined" => Some(Self::Undefined),
            "string" => Some(Self::String),
            "number" => Some(Self::Number),
            "bigint" => Some(Self::BigInt),
            "symbol" => Some(Self::Symbol),
            "object" => Some(Self::Object),
            "any" => Some(Self::Any),
            "unknown" => Some(Self::Unknown),
            "never" => Some(Self::Never),
            "void" => Some(Self::Void),
            _ => None,
        }
    }

    /// Get the source spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Null => "null",
            Self::Undefined => "undefined",
            Self::String => "string",
            Self::Number => "number",
            Self::BigInt => "bigint",
            Self::Symbol => "symbol",
            Self::Object => "object",
            Self::Any => "any",
            Self::Unknown => "unknown",
            Self::Never => "never",
            Self::Void => "void",
        }
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Literal types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    /// A string literal (quotes removed).
    String(SmolStr),
    /// A numeric literal, kept as written.
    Number(SmolStr),
    /// `true` or `false`.
    Boolean(bool),
}

/// Prefix type operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeOperator {
    KeyOf,
    TypeOf,
    Readonly,
    Unique,
}

impl TypeOperator {
    /// Parse an operator from its source spelling.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "keyof" => Some(Self::KeyOf),
            "typeof" => Some(Self::TypeOf),
            "readonly" => Some(Self::Readonly),
            "unique" => Some(Self::Unique),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Ident {
        Ident::new(name, Span::default())
    }

    #[test]
    fn test_qualified_name_rightmost() {
        let name = QualifiedName::new(
            vec![ident("Prisma"), ident("Inner"), ident("UserArgs")],
            Span::default(),
        );
        assert_eq!(name.rightmost(), "UserArgs");
        assert!(name.is_qualified());
        assert_eq!(name.to_string(), "Prisma.Inner.UserArgs");
    }

    #[test]
    fn test_simple_name_not_qualified() {
        let name = QualifiedName::new(vec![ident("User")], Span::default());
        assert_eq!(name.rightmost(), "User");
        assert!(!name.is_qualified());
    }

    #[test]
    fn test_nullable_markers() {
        assert!(TypeNode::Keyword(Keyword::Null).is_nullable_marker());
        assert!(TypeNode::Keyword(Keyword::Boolean).is_nullable_marker());
        assert!(!TypeNode::Keyword(Keyword::Undefined).is_nullable_marker());
        // Literal `true` is not the boolean keyword.
        assert!(!TypeNode::Literal(Literal::Boolean(true)).is_nullable_marker());
    }

    #[test]
    fn test_keyword_round_trip_spelling() {
        for kw in ["boolean", "null", "string", "never", "bigint"] {
            assert_eq!(Keyword::from_str(kw).map(|k| k.as_str()), Some(kw));
        }
        assert_eq!(Keyword::from_str("Boolean"), None);
    }

    #[test]
    fn test_object_member_lookup() {
        let object = ObjectType::new(
            vec![PropertySignature {
                name: ident("include"),
                optional: true,
                readonly: false,
                ty: TypeNode::Keyword(Keyword::Null),
                span: Span::default(),
            }],
            Span::default(),
        );
        assert!(object.has_member("include"));
        assert!(!object.has_member("Include"));
        assert_eq!(object.member_names().collect::<Vec<_>>(), vec!["include"]);
        assert_eq!(object.len(), 1);
    }
}
