//! Input model: what the binder hands over.
//!
//! Building the bound program is outside this crate; these types describe it
//! at the boundary:
//!
//! - [`ExternalReference`] / [`ReferenceId`]: the ordered reference list
//! - [`AssemblySymbol`] / [`AssemblyVariant`]: assemblies as bound
//! - [`SymbolTable`] / [`SymbolData`]: hash-consed symbols
//! - [`Declaration`] / [`BoundNode`]: bound declarations and bodies
//! - [`SourceFile`] / [`ImportDirective`]: files and their imports

mod assembly;
mod bound;
mod error;
mod reference;
mod source;
mod symbols;

pub use assembly::{AssemblyId, AssemblySymbol, AssemblyVariant};
pub use bound::{
    AssemblyAttributes, BoundAttribute, BoundNode, Declaration, NameOfTarget, Occurrence,
};
pub use error::{ModelError, ModelResult};
pub use reference::{AssemblyIdentity, ExternalReference, ReferenceId, ReferenceKind, Version};
pub use source::{DocumentationMode, ImportDirective, ImportId, ImportKind, SourceFile};
pub use symbols::{Member, MemberKind, NamedType, SpecialType, SymbolData, SymbolId, SymbolTable};
