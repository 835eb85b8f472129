//! Structured fuzzing for include resolution over alias graphs.
//!
//! This target generates namespaces of `*Args`/`*Include` aliases whose
//! relations point at arbitrary other models, so cycles of every shape reach
//! the builder.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_alias_graph
//! ```

#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use libfuzzer_sys::fuzz_target;
use tsprisma_resolver::generate_includes;

/// How a relation member refers to its target.
#[derive(Debug, Arbitrary)]
enum FuzzRelationShape {
    /// `boolean | TargetArgs`
    Optional,
    /// `TargetArgs | null`
    Nullable,
    /// `TargetArgs[]`
    List,
    /// `Prisma.TargetArgs<ExtArgs>`
    Qualified,
    /// `{ include?: TargetInclude }`
    Inline,
    /// `boolean | Missing`
    Unresolved,
}

/// A generated relation from one model to another.
#[derive(Debug, Arbitrary)]
struct FuzzRelation {
    name: String,
    target: u8,
    shape: FuzzRelationShape,
}

impl FuzzRelation {
    fn to_string(&self, model_count: usize) -> String {
        let name = sanitize_identifier(&self.name);
        let target = format!("M{}", self.target as usize % model_count);
        let ty = match self.shape {
            FuzzRelationShape::Optional => format!("boolean | {target}Args"),
            FuzzRelationShape::Nullable => format!("{target}Args | null"),
            FuzzRelationShape::List => format!("{target}Args[]"),
            FuzzRelationShape::Qualified => format!("Prisma.{target}Args<ExtArgs>"),
            FuzzRelationShape::Inline => format!("{{ include?: {target}Include }}"),
            FuzzRelationShape::Unresolved => "boolean | Missing".to_string(),
        };
        format!("        {name}?: {ty}")
    }
}

/// A generated model with its include relations.
#[derive(Debug, Arbitrary)]
struct FuzzModel {
    relations: Vec<FuzzRelation>,
    self_include: bool,
}

impl FuzzModel {
    fn to_string(&self, index: usize, model_count: usize) -> String {
        let relations: Vec<String> = self
            .relations
            .iter()
            .take(8)
            .map(|r| r.to_string(model_count))
            .collect();
        let include = if self.self_include {
            format!("M{index}Include & {{ include?: M{index}Include }}")
        } else {
            format!("M{index}Include | null")
        };
        format!(
            "    export type M{index}Args = {{ include?: {include}; select?: {{ id?: boolean }} }};\n    export type M{index}Include = {{\n{}\n    }};",
            relations.join("\n")
        )
    }
}

/// A generated declaration file.
#[derive(Debug, Arbitrary)]
struct FuzzDeclarations {
    models: Vec<FuzzModel>,
}

impl FuzzDeclarations {
    fn to_string(&self) -> String {
        let models: Vec<&FuzzModel> = self.models.iter().take(16).collect();
        let count = models.len().max(1);

        let mut parts = vec!["export namespace TSPrisma {".to_string()];
        for (i, model) in models.iter().enumerate() {
            parts.push(model.to_string(i, count));
        }

        let entries: Vec<String> = (0..models.len())
            .map(|i| format!("M{i}: {{ FindMany: M{i}Args }}"))
            .collect();
        parts.push(format!(
            "    export type TSPrismaModels = {{ {} }};",
            entries.join("; ")
        ));
        parts.push("}".to_string());

        parts.join("\n")
    }
}

/// Sanitize a string to be a valid identifier.
fn sanitize_identifier(s: &str) -> String {
    let mut result = String::new();
    for (i, c) in s.chars().take(24).enumerate() {
        if i == 0 {
            if c.is_ascii_alphabetic() {
                result.push(c);
            } else {
                result.push('x');
            }
        } else if c.is_ascii_alphanumeric() || c == '_' {
            result.push(c);
        }
    }
    if result.is_empty() {
        "rel".to_string()
    } else {
        result
    }
}

fuzz_target!(|data: &[u8]| {
    let mut unstructured = Unstructured::new(data);

    if let Ok(declarations) = FuzzDeclarations::arbitrary(&mut unstructured) {
        let text = declarations.to_string();

        // Every generated graph has an entry point and must resolve
        let table = generate_includes(&text);
        assert!(table.is_ok(), "failed to resolve:\n{text}");
    }
});
