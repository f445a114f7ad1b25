//! The compilation-unit aggregate.
//!
//! A [`Compilation`] is an immutable value: the ordered reference list, the
//! bound program, and the caches derived from them. Any change to references
//! or source produces a new `Compilation` with empty caches.
//!
//! ## Caches
//!
//! ```text
//! symbol_usage(symbol)   ← memoized per symbol (RwLock'd map)
//!     │
//!     ▼
//! usage()                ← one walk per aggregate (single-assignment cell)
//!     │
//!     ├── used_references()
//!     ├── missing_references()
//!     └── unused_import_diagnostics()
//! ```

mod builder;
mod options;

pub use builder::CompilationBuilder;
pub use options::AnalysisOptions;

use std::sync::Arc;

use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::base::{FileId, Name};
use crate::diagnostics::{Diagnostic, DiagnosticCollector};
use crate::model::{
    AssemblyAttributes, AssemblyId, AssemblySymbol, Declaration, ExternalReference,
    ImportDirective, ImportId, ModelError, ModelResult, ReferenceId, SourceFile, SpecialType,
    SymbolData, SymbolId, SymbolTable,
};
use crate::usage::{
    self, Canonicalizer, ImportDirectiveRecord, SymbolUsageRecord, UsageSummary,
};

/// The bound program. Shared between aggregates that differ only in their
/// reference lists.
#[derive(Debug)]
pub(crate) struct Program {
    pub(crate) assemblies: Vec<AssemblySymbol>,
    pub(crate) symbols: SymbolTable,
    pub(crate) special_types: FxHashMap<SpecialType, SymbolId>,
    pub(crate) files: Vec<SourceFile>,
    pub(crate) imports: Vec<ImportDirective>,
    pub(crate) declarations: Vec<Declaration>,
    pub(crate) assembly_attributes: Vec<AssemblyAttributes>,
    pub(crate) binder_diagnostics: Vec<Diagnostic>,
}

/// An immutable compilation-unit aggregate.
///
/// `Compilation` is `Send + Sync`; every query may be called from any
/// number of threads.
#[derive(Debug)]
pub struct Compilation {
    name: Name,
    references: Vec<(ReferenceId, ExternalReference)>,
    reference_positions: FxHashMap<ReferenceId, usize>,
    program: Arc<Program>,
    options: AnalysisOptions,
    usage_records: RwLock<FxHashMap<SymbolId, SymbolUsageRecord>>,
    usage: OnceCell<UsageSummary>,
}

impl Compilation {
    /// Start building a compilation named `name`.
    pub fn builder(name: impl Into<Name>) -> CompilationBuilder {
        CompilationBuilder::new(name)
    }

    pub(crate) fn from_parts(
        name: Name,
        references: Vec<(ReferenceId, ExternalReference)>,
        program: Arc<Program>,
        options: AnalysisOptions,
    ) -> Self {
        let reference_positions = references
            .iter()
            .enumerate()
            .map(|(pos, (id, _))| (*id, pos))
            .collect();
        Self {
            name,
            references,
            reference_positions,
            program,
            options,
            usage_records: RwLock::new(FxHashMap::default()),
            usage: OnceCell::new(),
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    /// The reference list, in order.
    pub fn references(&self) -> impl Iterator<Item = (ReferenceId, &ExternalReference)> {
        self.references.iter().map(|(id, r)| (*id, r))
    }

    pub fn reference(&self, id: ReferenceId) -> Option<&ExternalReference> {
        self.reference_positions
            .get(&id)
            .map(|&pos| &self.references[pos].1)
    }

    /// Position of a handle in the reference list.
    pub fn reference_position(&self, id: ReferenceId) -> Option<usize> {
        self.reference_positions.get(&id).copied()
    }

    pub fn assembly(&self, id: AssemblyId) -> Option<&AssemblySymbol> {
        self.program.assemblies.get(id.index())
    }

    pub fn assemblies(&self) -> &[AssemblySymbol] {
        &self.program.assemblies
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.program.symbols
    }

    pub fn special_type(&self, special: SpecialType) -> Option<SymbolId> {
        self.program.special_types.get(&special).copied()
    }

    pub fn files(&self) -> &[SourceFile] {
        &self.program.files
    }

    pub fn file(&self, id: FileId) -> Option<&SourceFile> {
        self.program.files.get(id.index())
    }

    pub fn imports(&self) -> impl Iterator<Item = (ImportId, &ImportDirective)> {
        self.program
            .imports
            .iter()
            .enumerate()
            .map(|(i, d)| (ImportId::new(i as u32), d))
    }

    pub fn import(&self, id: ImportId) -> Option<&ImportDirective> {
        self.program.imports.get(id.index())
    }

    pub fn declarations(&self) -> &[Declaration] {
        &self.program.declarations
    }

    pub fn assembly_attributes(&self) -> &[AssemblyAttributes] {
        &self.program.assembly_attributes
    }

    /// Diagnostics reported by the binder for this program.
    pub fn binder_diagnostics(&self) -> &[Diagnostic] {
        &self.program.binder_diagnostics
    }

    /// The handle supplying the core library, if a valid one resolved.
    ///
    /// The core library is the assembly defining [`SpecialType::Object`].
    /// It is absent when `Object` is missing, failed to resolve, is defined
    /// in source, or resolved to a handle no longer in the reference list.
    pub fn core_library(&self) -> Option<ReferenceId> {
        let object = self.special_type(SpecialType::Object)?;
        if !matches!(self.symbols().get(object), Some(SymbolData::Named(_))) {
            return None;
        }
        let reference = self.symbol_usage(object).reference()?;
        match self.reference(reference) {
            Some(handle) if !handle.is_module() => Some(reference),
            _ => None,
        }
    }

    // ========================================================================
    // USAGE QUERIES
    // ========================================================================

    /// Memoized attribution of one symbol.
    pub fn symbol_usage(&self, symbol: SymbolId) -> SymbolUsageRecord {
        self.canonicalizer().attribute(symbol)
    }

    pub(crate) fn canonicalizer(&self) -> Canonicalizer<'_> {
        Canonicalizer::new(
            self.symbols(),
            &self.program.assemblies,
            &self.usage_records,
        )
    }

    /// The frozen result of the single walk over this aggregate.
    pub fn usage(&self) -> &UsageSummary {
        self.usage.get_or_init(|| usage::compute_usage(self))
    }

    /// The references this program needs, in reference-list order with the
    /// core library first.
    pub fn used_references(&self) -> &[ReferenceId] {
        self.usage().used_references()
    }

    /// Same as [`used_references`](Self::used_references), as handles.
    pub fn used_reference_handles(&self) -> Vec<&ExternalReference> {
        self.used_references()
            .iter()
            .filter_map(|id| self.reference(*id))
            .collect()
    }

    /// Handles that reachable symbols need but this reference list lacks.
    pub fn missing_references(&self) -> &[ReferenceId] {
        self.usage().missing_references()
    }

    /// Whether any successful lookup went through `import`.
    pub fn is_import_used(&self, import: ImportId) -> bool {
        self.usage().is_import_used(import)
    }

    /// One record per import directive, in declaration order.
    pub fn import_records(&self) -> Vec<ImportDirectiveRecord> {
        usage::import_records(self, self.usage())
    }

    /// Hidden diagnostics for import directives no lookup went through.
    pub fn unused_import_diagnostics(&self) -> Vec<Diagnostic> {
        usage::unused_import_diagnostics(self, self.usage())
    }

    /// Binder diagnostics merged with the unused-import diagnostics, sorted
    /// by location.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut collector = DiagnosticCollector::new();
        collector.extend(self.binder_diagnostics().iter().cloned());
        if self.options.report_unused_imports {
            collector.extend(self.unused_import_diagnostics());
        }
        collector.take_sorted()
    }

    // ========================================================================
    // DERIVED AGGREGATES
    // ========================================================================

    /// A new aggregate over the same program with only `keep` (plus every
    /// module handle) in its reference list. Order follows this aggregate.
    pub fn retain_references(&self, keep: &[ReferenceId]) -> ModelResult<Compilation> {
        if let Some(unknown) = keep.iter().find(|id| self.reference(**id).is_none()) {
            return Err(ModelError::UnknownReference(unknown.raw()));
        }
        let references = self
            .references
            .iter()
            .filter(|(id, handle)| handle.is_module() || keep.contains(id))
            .cloned()
            .collect();
        Ok(Compilation::from_parts(
            self.name.clone(),
            references,
            Arc::clone(&self.program),
            self.options.clone(),
        ))
    }

    /// A new aggregate over the same program and references with different
    /// options.
    pub fn with_options(&self, options: AnalysisOptions) -> Compilation {
        Compilation::from_parts(
            self.name.clone(),
            self.references.clone(),
            Arc::clone(&self.program),
            options,
        )
    }
}
