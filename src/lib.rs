//! # refscope-base
//!
//! Used-reference analysis for a bound, multi-assembly program: which of the
//! externally supplied references a program actually needs, and which of its
//! import directives never contributed a resolved symbol.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! compilation → Immutable aggregate, builder, cached queries
//!   ↓
//! usage       → Walker, generic closure, canonicalizer, import projection
//!   ↓
//! diagnostics → Severity, Diagnostic, DiagnosticCollector
//!   ↓
//! model       → References, assemblies, symbols, bound program
//!   ↓
//! base        → Primitives (FileId, Name, TextRange)
//! ```
//!
//! ## Example
//!
//! ```
//! use refscope::{AssemblyIdentity, Compilation, ExternalReference, Version};
//!
//! let mut builder = Compilation::builder("App");
//! let lib = builder.add_reference(ExternalReference::assembly(AssemblyIdentity::new(
//!     "Lib",
//!     Version::new(1, 0, 0, 0),
//! )));
//! builder.add_image_assembly(lib).unwrap();
//! let compilation = builder.build().unwrap();
//!
//! // Nothing in the program touches `Lib`.
//! assert!(compilation.used_references().is_empty());
//! ```

// ============================================================================
// MODULES (dependency order: base → model → diagnostics → usage → compilation)
// ============================================================================

/// Foundation types: FileId, Name, TextRange
pub mod base;

/// Input model: references, assemblies, symbols, bound declarations
pub mod model;

/// Diagnostics: hidden unused-import reports, binder diagnostics
pub mod diagnostics;

/// Usage analysis: walker, closure, canonicalizer
pub mod usage;

/// The compilation aggregate and its builder
pub mod compilation;

// Re-export the aggregate
pub use compilation::{AnalysisOptions, Compilation, CompilationBuilder};

// Re-export foundation and model types
pub use base::{FileId, Name, TextRange, TextSize};
pub use diagnostics::{Diagnostic, DiagnosticCollector, Severity};
pub use model::{
    AssemblyAttributes, AssemblyId, AssemblyIdentity, AssemblySymbol, AssemblyVariant,
    BoundAttribute, BoundNode, Declaration, DocumentationMode, ExternalReference, ImportDirective,
    ImportId, ImportKind, Member, MemberKind, ModelError, ModelResult, NameOfTarget, NamedType,
    Occurrence, ReferenceId, ReferenceKind, SourceFile, SpecialType, SymbolData, SymbolId,
    SymbolTable, Version,
};
pub use usage::{ImportDirectiveRecord, SymbolUsageRecord, UsageSummary};
