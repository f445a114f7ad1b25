//! Usage accumulation.
//!
//! One walk per aggregate: every declaration and every assembly-level
//! attribute list is walked (in parallel when enabled), per-walker results
//! are merged into a [`UsageBuilder`], and the builder is frozen into the
//! immutable [`UsageSummary`] the aggregate caches.

use rayon::prelude::*;
use rustc_hash::FxHashSet;
use tracing::{debug, info};

use super::walker::UsageWalker;
use crate::compilation::Compilation;
use crate::model::{AssemblyAttributes, Declaration, ImportId, ImportKind, ReferenceId};

/// Mutable accumulation of one or more walks.
#[derive(Debug, Default)]
pub(crate) struct UsageBuilder {
    references: FxHashSet<ReferenceId>,
    imports: FxHashSet<ImportId>,
    symbols_visited: usize,
}

impl UsageBuilder {
    pub(crate) fn mark_reference(&mut self, reference: ReferenceId) {
        self.references.insert(reference);
    }

    /// Returns `true` the first time `import` is marked.
    pub(crate) fn mark_import(&mut self, import: ImportId) -> bool {
        self.imports.insert(import)
    }

    pub(crate) fn record_visited(&mut self, count: usize) {
        self.symbols_visited += count;
    }

    pub(crate) fn merge(mut self, other: UsageBuilder) -> UsageBuilder {
        self.references.extend(other.references);
        self.imports.extend(other.imports);
        self.symbols_visited += other.symbols_visited;
        self
    }
}

/// The frozen result of the walk over one aggregate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UsageSummary {
    used: Vec<ReferenceId>,
    missing: Vec<ReferenceId>,
    used_imports: FxHashSet<ImportId>,
}

impl UsageSummary {
    /// Used handles in reference-list order, core library first.
    pub fn used_references(&self) -> &[ReferenceId] {
        &self.used
    }

    /// Attributed handles absent from the reference list, by id.
    pub fn missing_references(&self) -> &[ReferenceId] {
        &self.missing
    }

    pub fn is_import_used(&self, import: ImportId) -> bool {
        self.used_imports.contains(&import)
    }

    pub fn used_import_count(&self) -> usize {
        self.used_imports.len()
    }
}

#[derive(Clone, Copy)]
enum Unit<'a> {
    Declaration(&'a Declaration),
    AssemblyAttributes(&'a AssemblyAttributes),
}

impl Unit<'_> {
    fn walk(self, walker: &mut UsageWalker<'_>) {
        match self {
            Unit::Declaration(declaration) => walker.walk_declaration(declaration),
            Unit::AssemblyAttributes(list) => walker.walk_attributes(&list.attributes),
        }
    }
}

/// Run the walk over `compilation` and freeze the result.
pub(crate) fn compute_usage(compilation: &Compilation) -> UsageSummary {
    let units: Vec<Unit<'_>> = compilation
        .declarations()
        .iter()
        .map(Unit::Declaration)
        .chain(
            compilation
                .assembly_attributes()
                .iter()
                .map(Unit::AssemblyAttributes),
        )
        .collect();

    let parallel = compilation.options().parallel;
    debug!(
        "[USAGE] walking {} units of '{}' ({})",
        units.len(),
        compilation.name(),
        if parallel { "parallel" } else { "serial" }
    );

    let mut builder = if parallel {
        units
            .par_iter()
            .fold(
                || UsageWalker::new(compilation),
                |mut walker, unit| {
                    unit.walk(&mut walker);
                    walker
                },
            )
            .map(UsageWalker::finish)
            .reduce(UsageBuilder::default, UsageBuilder::merge)
    } else {
        let mut walker = UsageWalker::new(compilation);
        for unit in &units {
            unit.walk(&mut walker);
        }
        walker.finish()
    };

    let targets = walk_used_import_targets(compilation, &builder);
    builder = builder.merge(targets);

    if let Some(core) = compilation.core_library() {
        builder.mark_reference(core);
    }

    debug!(
        "[USAGE] visited {} symbols, {} handles attributed, {} imports used",
        builder.symbols_visited,
        builder.references.len(),
        builder.imports.len()
    );

    freeze(compilation, builder)
}

/// Targets of directives that facilitated a lookup. Targets of unused
/// directives contribute nothing.
fn walk_used_import_targets(compilation: &Compilation, builder: &UsageBuilder) -> UsageBuilder {
    let mut walker = UsageWalker::new(compilation);
    for (id, directive) in compilation.imports() {
        if !builder.imports.contains(&id) {
            continue;
        }
        if let ImportKind::StaticType { .. } | ImportKind::TypeAlias { .. } = directive.kind {
            for target in directive.kind.targets() {
                walker.visit_symbol(target);
            }
        }
    }
    walker.finish()
}

fn freeze(compilation: &Compilation, builder: UsageBuilder) -> UsageSummary {
    let mut used: Vec<ReferenceId> = builder
        .references
        .iter()
        .copied()
        .filter(|id| compilation.reference(*id).is_some_and(|h| !h.is_module()))
        .collect();
    let core = compilation.core_library();
    used.sort_by_key(|id| (Some(*id) != core, compilation.reference_position(*id)));

    let mut missing: Vec<ReferenceId> = builder
        .references
        .iter()
        .copied()
        .filter(|id| compilation.reference(*id).is_none())
        .collect();
    missing.sort();

    info!(
        "[USAGE] '{}': {} of {} references used, {} missing",
        compilation.name(),
        used.len(),
        compilation.references().count(),
        missing.len()
    );

    UsageSummary {
        used,
        missing,
        used_imports: builder.imports,
    }
}
