//! Entry point: declaration text to per-model, per-operation include table.

use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use tracing::{debug, info_span};
use tsprisma_decl::{SourceFile, parse_declarations};

use crate::builder::SchemaBuilder;
use crate::config::ResolverConfig;
use crate::error::{ResolveError, ResolveResult};
use crate::filter::{IncludeStructure, IncludeValue, filter_node};
use crate::registry::AliasRegistry;
use crate::schema::{INCLUDE_KEY, ParentPath, SchemaNode};

/// Default include configuration per model and operation.
///
/// ```json
/// { "User": { "FindFirst": { "posts": true } } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IncludeTable {
    models: IndexMap<SmolStr, IndexMap<SmolStr, IncludeStructure>>,
}

impl IncludeTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the structure for `model` and `operation`.
    pub fn insert(
        &mut self,
        model: impl Into<SmolStr>,
        operation: impl Into<SmolStr>,
        structure: IncludeStructure,
    ) {
        self.models
            .entry(model.into())
            .or_default()
            .insert(operation.into(), structure);
    }

    /// Register `model` without operations.
    pub fn insert_model(&mut self, model: impl Into<SmolStr>) {
        self.models.entry(model.into()).or_default();
    }

    /// Look up the structure for `model` and `operation`.
    ///
    /// The first character of either name may differ in case from the
    /// declared key, so `("user", "findFirst")` finds `User` / `FindFirst`.
    pub fn get(&self, model: &str, operation: &str) -> Option<&IncludeStructure> {
        let operations = lookup(&self.models, model)?;
        lookup(operations, operation)
    }

    /// The default query arguments for `model` and `operation`:
    /// `{ "include": ... }`, or `{}` when nothing is included.
    pub fn include_args(&self, model: &str, operation: &str) -> Option<serde_json::Value> {
        let structure = self.get(model, operation)?;
        let mut args = serde_json::Map::new();
        if !structure.is_empty() {
            args.insert(INCLUDE_KEY.to_string(), structure.to_json());
        }
        Some(serde_json::Value::Object(args))
    }

    /// Model names in declaration order.
    pub fn models(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(SmolStr::as_str)
    }

    /// Operation names of `model` in declaration order.
    pub fn operations(&self, model: &str) -> impl Iterator<Item = &str> {
        lookup(&self.models, model)
            .into_iter()
            .flat_map(|ops| ops.keys().map(SmolStr::as_str))
    }

    /// Iterate over `(model, operation, structure)` entries.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &IncludeStructure)> {
        self.models.iter().flat_map(|(model, ops)| {
            ops.iter()
                .map(move |(op, structure)| (model.as_str(), op.as_str(), structure))
        })
    }

    /// Number of models.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Check if the table has no models.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Lower-case the first character of model and/or operation names.
    ///
    /// When two keys normalise to the same name the first one is kept.
    pub fn with_lowercase_keys(self, models: bool, operations: bool) -> Self {
        if !models && !operations {
            return self;
        }

        let mut out: IndexMap<SmolStr, IndexMap<SmolStr, IncludeStructure>> = IndexMap::new();
        for (model, ops) in self.models {
            let model = if models { lower_first(&model) } else { model };
            let target = match out.entry(model) {
                Entry::Occupied(_) => continue,
                Entry::Vacant(slot) => slot.insert(IndexMap::new()),
            };
            for (op, structure) in ops {
                let op = if operations { lower_first(&op) } else { op };
                target.entry(op).or_insert(structure);
            }
        }

        Self { models: out }
    }

    /// The JSON form of the table.
    pub fn to_json(&self) -> serde_json::Value {
        let models = self
            .models
            .iter()
            .map(|(model, ops)| {
                let ops = ops
                    .iter()
                    .map(|(op, structure)| (op.to_string(), structure.to_json()))
                    .collect();
                (model.to_string(), serde_json::Value::Object(ops))
            })
            .collect();
        serde_json::Value::Object(models)
    }
}

fn lookup<'m, V>(map: &'m IndexMap<SmolStr, V>, key: &str) -> Option<&'m V> {
    map.get(key).or_else(|| {
        let wanted = lower_first(key);
        map.iter()
            .find(|(candidate, _)| lower_first(candidate) == wanted)
            .map(|(_, value)| value)
    })
}

fn lower_first(s: &str) -> SmolStr {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() => {
            let mut out: String = first.to_lowercase().collect();
            out.push_str(chars.as_str());
            SmolStr::new(out)
        }
        _ => SmolStr::new(s),
    }
}

/// Resolve the include table of `text` with the default configuration.
///
/// # Errors
///
/// Fails if `text` cannot be parsed or declares no `TSPrismaModels` alias
/// inside a `TSPrisma` or `Prisma` namespace.
pub fn generate_includes(text: &str) -> ResolveResult<IncludeTable> {
    generate_includes_with(text, &ResolverConfig::default())
}

/// Resolve the include table of `text`.
pub fn generate_includes_with(text: &str, config: &ResolverConfig) -> ResolveResult<IncludeTable> {
    let file = parse_declarations(text)?;
    generate_includes_from_ast(&file, config)
}

/// Resolve the include table of an already parsed file.
pub fn generate_includes_from_ast(
    file: &SourceFile,
    config: &ResolverConfig,
) -> ResolveResult<IncludeTable> {
    config.validate()?;

    let _span = info_span!("generate_includes", entry_point = %config.entry_point).entered();

    let registry = AliasRegistry::register(file, config);
    if !registry.contains(&config.entry_point) {
        return Err(ResolveError::missing_entry_point(
            config.entry_point.as_str(),
            &config.namespaces,
        ));
    }

    let mut builder = SchemaBuilder::new(&registry);
    let schema = builder.resolve(&config.entry_point, &ParentPath::new(), 0);

    let mut table = IncludeTable::new();
    for (model, node) in schema.iter() {
        table.insert_model(model);
        let Some(operations) = node.as_tree() else {
            continue;
        };
        for (operation, args) in operations.iter() {
            table.insert(model, operation, operation_includes(args));
        }
    }

    debug!(
        models = table.len(),
        entries = table.iter().count(),
        "Include table resolved"
    );

    Ok(table.with_lowercase_keys(
        config.output.lowercase_models,
        config.output.lowercase_operations,
    ))
}

fn operation_includes(args: &SchemaNode) -> IncludeStructure {
    match filter_node(args) {
        IncludeValue::Nested(structure) => structure,
        IncludeValue::Enabled => IncludeStructure::new(),
    }
}
