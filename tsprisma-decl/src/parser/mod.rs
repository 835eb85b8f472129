//! Declaration parser for `.d.ts`-style text.

mod grammar;

use std::path::Path;

use pest::Parser;
use smol_str::SmolStr;
use tracing::{debug, trace};

use crate::ast::*;
use crate::error::{DeclError, DeclResult};

pub use grammar::{DeclarationParser, Rule};

type Pair<'i> = pest::iterators::Pair<'i, Rule>;
type Pairs<'i> = pest::iterators::Pairs<'i, Rule>;

/// Parse declarations from a string.
pub fn parse_declarations(input: &str) -> DeclResult<SourceFile> {
    let mut pairs = DeclarationParser::parse(Rule::declarations, input)
        .map_err(|e| DeclError::from_pest(input, e))?;

    let mut file = SourceFile::new();

    // The top-level parse result contains a single "declarations" rule - get its inner pairs
    let Some(root) = pairs.next() else {
        return Ok(file);
    };

    for pair in root.into_inner() {
        if let Some(item) = parse_item(pair)? {
            file.add_item(item);
        }
    }

    debug!(
        items = file.items.len(),
        skipped = file.skipped_count(),
        "Parsed declarations"
    );

    Ok(file)
}

/// Parse declarations from a file.
pub fn parse_declarations_file(path: impl AsRef<Path>) -> DeclResult<SourceFile> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| DeclError::IoError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_declarations(&content)
}

/// Take the next child pair or report which one was missing.
fn next_child<'i>(inner: &mut Pairs<'i>, parent: Span, expected: &str) -> DeclResult<Pair<'i>> {
    inner
        .next()
        .ok_or_else(|| DeclError::malformed(expected, parent))
}

fn ident(pair: &Pair<'_>) -> Ident {
    Ident::new(pair.as_str(), Span::from(pair.as_span()))
}

/// Strip the surrounding quotes of a string literal.
fn unquote(literal: &str) -> &str {
    literal
        .get(1..literal.len().saturating_sub(1))
        .unwrap_or_default()
}

/// Parse a top-level or namespace-level item.
fn parse_item(pair: Pair<'_>) -> DeclResult<Option<Item>> {
    match pair.as_rule() {
        Rule::namespace_decl => Ok(Some(Item::Namespace(parse_namespace(pair)?))),
        Rule::type_alias => Ok(Some(Item::TypeAlias(parse_type_alias(pair)?))),
        Rule::other_statement => {
            let span = Span::from(pair.as_span());
            trace!(start = span.start, end = span.end, "Skipping statement");
            Ok(Some(Item::Other(span)))
        }
        _ => Ok(None),
    }
}

/// Parse a namespace or module block.
fn parse_namespace(pair: Pair<'_>) -> DeclResult<Namespace> {
    let span = Span::from(pair.as_span());
    let mut ns = Namespace::new(Vec::new(), span);

    for item in pair.into_inner() {
        match item.as_rule() {
            Rule::namespace_name => {
                for segment in item.into_inner() {
                    match segment.as_rule() {
                        Rule::string_literal => {
                            ns.is_module_string = true;
                            ns.path.push(Ident::new(
                                unquote(segment.as_str()),
                                Span::from(segment.as_span()),
                            ));
                        }
                        Rule::identifier => ns.path.push(ident(&segment)),
                        _ => {}
                    }
                }
            }
            Rule::modifier | Rule::namespace_kw => {}
            _ => {
                if let Some(nested) = parse_item(item)? {
                    ns.add_item(nested);
                }
            }
        }
    }

    if ns.path.is_empty() {
        return Err(DeclError::malformed("namespace name", span));
    }

    Ok(ns)
}

/// Parse a type alias declaration.
fn parse_type_alias(pair: Pair<'_>) -> DeclResult<TypeAlias> {
    let span = Span::from(pair.as_span());
    let mut name = None;
    let mut type_params = Vec::new();
    let mut ty = None;

    for item in pair.into_inner() {
        match item.as_rule() {
            Rule::identifier => name = Some(ident(&item)),
            Rule::type_params => type_params = parse_type_params(item)?,
            Rule::type_expr => ty = Some(parse_type(item)?),
            _ => {}
        }
    }

    let name = name.ok_or_else(|| DeclError::malformed("alias name", span))?;
    let ty = ty.ok_or_else(|| DeclError::malformed("alias type", span))?;

    Ok(TypeAlias {
        name,
        type_params,
        ty,
        span,
    })
}

/// Parse generic parameters of an alias.
fn parse_type_params(pair: Pair<'_>) -> DeclResult<Vec<TypeParam>> {
    let mut params = vec![];

    for param in pair.into_inner() {
        if param.as_rule() != Rule::type_param {
            continue;
        }

        let span = Span::from(param.as_span());
        let mut name = None;
        let mut constraint = None;
        let mut default = None;

        for item in param.into_inner() {
            match item.as_rule() {
                Rule::identifier => name = Some(ident(&item)),
                Rule::type_constraint => constraint = Some(parse_wrapped_type(item)?),
                Rule::type_default => default = Some(parse_wrapped_type(item)?),
                _ => {}
            }
        }

        params.push(TypeParam {
            name: name.ok_or_else(|| DeclError::malformed("type parameter name", span))?,
            constraint,
            default,
        });
    }

    Ok(params)
}

/// Parse the single `type_expr` nested in a wrapper rule.
fn parse_wrapped_type(pair: Pair<'_>) -> DeclResult<TypeNode> {
    let span = Span::from(pair.as_span());
    let inner = pair
        .into_inner()
        .find(|p| p.as_rule() == Rule::type_expr)
        .ok_or_else(|| DeclError::malformed("type", span))?;
    parse_type(inner)
}

/// Collapse a list of members: one member stands for itself.
fn collapse(mut members: Vec<TypeNode>, wrap: fn(Vec<TypeNode>) -> TypeNode) -> TypeNode {
    if members.len() == 1 {
        members.remove(0)
    } else {
        wrap(members)
    }
}

/// Parse a type annotation.
fn parse_type(pair: Pair<'_>) -> DeclResult<TypeNode> {
    let span = Span::from(pair.as_span());

    match pair.as_rule() {
        Rule::type_expr => {
            let members = pair
                .into_inner()
                .map(parse_type)
                .collect::<DeclResult<Vec<_>>>()?;
            Ok(collapse(members, TypeNode::Union))
        }
        Rule::intersection_type => {
            let members = pair
                .into_inner()
                .map(parse_type)
                .collect::<DeclResult<Vec<_>>>()?;
            Ok(collapse(members, TypeNode::Intersection))
        }
        Rule::operator_type => {
            let mut inner = pair.into_inner();
            let first = next_child(&mut inner, span, "type")?;
            if first.as_rule() != Rule::type_operator {
                return parse_type(first);
            }
            let op = TypeOperator::from_str(first.as_str())
                .ok_or_else(|| DeclError::malformed("type operator", span))?;
            let operand = next_child(&mut inner, span, "operand type")?;
            Ok(TypeNode::Operator {
                op,
                ty: Box::new(parse_type(operand)?),
            })
        }
        Rule::postfix_type => {
            let mut inner = pair.into_inner();
            let mut ty = parse_type(next_child(&mut inner, span, "type")?)?;
            for suffix in inner {
                ty = match suffix.as_rule() {
                    Rule::array_suffix => TypeNode::Array(Box::new(ty)),
                    Rule::index_suffix => TypeNode::IndexedAccess {
                        object: Box::new(ty),
                        index: Box::new(parse_wrapped_type(suffix)?),
                    },
                    _ => ty,
                };
            }
            Ok(ty)
        }
        Rule::object_type => Ok(TypeNode::Object(parse_object_type(pair)?)),
        Rule::tuple_type => {
            let elements = pair
                .into_inner()
                .filter(|p| p.as_rule() == Rule::tuple_element)
                .map(parse_wrapped_type)
                .collect::<DeclResult<Vec<_>>>()?;
            Ok(TypeNode::Tuple(elements))
        }
        Rule::literal_type => {
            let literal = next_child(&mut pair.into_inner(), span, "literal")?;
            let value = match literal.as_rule() {
                Rule::string_literal => Literal::String(SmolStr::new(unquote(literal.as_str()))),
                Rule::number_literal => Literal::Number(SmolStr::new(literal.as_str())),
                Rule::boolean_literal => Literal::Boolean(literal.as_str() == "true"),
                _ => return Err(DeclError::malformed("literal", span)),
            };
            Ok(TypeNode::Literal(value))
        }
        Rule::keyword_type => Keyword::from_str(pair.as_str())
            .map(TypeNode::Keyword)
            .ok_or_else(|| DeclError::malformed("keyword", span)),
        Rule::type_reference => Ok(TypeNode::Reference(parse_type_reference(pair)?)),
        _ => Err(DeclError::malformed("type", span)),
    }
}

/// Parse a named type reference with optional type arguments.
fn parse_type_reference(pair: Pair<'_>) -> DeclResult<TypeReference> {
    let span = Span::from(pair.as_span());
    let mut inner = pair.into_inner();

    let name_pair = next_child(&mut inner, span, "type name")?;
    let segments: Vec<Ident> = name_pair
        .clone()
        .into_inner()
        .filter(|p| p.as_rule() == Rule::identifier)
        .map(|p| ident(&p))
        .collect();
    if segments.is_empty() {
        return Err(DeclError::malformed("type name", span));
    }
    let name = QualifiedName::new(segments, Span::from(name_pair.as_span()));

    let mut type_args = vec![];
    if let Some(args) = inner.next() {
        for arg in args.into_inner() {
            type_args.push(parse_type(arg)?);
        }
    }

    Ok(TypeReference { name, type_args })
}

/// Parse an object literal type.
fn parse_object_type(pair: Pair<'_>) -> DeclResult<ObjectType> {
    let span = Span::from(pair.as_span());
    let mut members = vec![];

    for item in pair.into_inner() {
        match item.as_rule() {
            Rule::property_signature => members.push(parse_property_signature(item)?),
            Rule::skipped_member => {
                trace!(member = item.as_str(), "Skipping object member");
            }
            _ => {}
        }
    }

    Ok(ObjectType::new(members, span))
}

/// Parse a property member.
fn parse_property_signature(pair: Pair<'_>) -> DeclResult<PropertySignature> {
    let span = Span::from(pair.as_span());
    let mut name = None;
    let mut optional = false;
    let mut readonly = false;
    let mut ty = None;

    for item in pair.into_inner() {
        match item.as_rule() {
            Rule::readonly_kw => readonly = true,
            Rule::property_name => {
                let key = next_child(&mut item.into_inner(), span, "property name")?;
                name = Some(match key.as_rule() {
                    Rule::string_literal => {
                        Ident::new(unquote(key.as_str()), Span::from(key.as_span()))
                    }
                    _ => ident(&key),
                });
            }
            Rule::optional_marker => optional = true,
            Rule::type_expr => ty = Some(parse_type(item)?),
            _ => {}
        }
    }

    Ok(PropertySignature {
        name: name.ok_or_else(|| DeclError::malformed("property name", span))?,
        optional,
        readonly,
        ty: ty.ok_or_else(|| DeclError::malformed("property type", span))?,
        span,
    })
}
