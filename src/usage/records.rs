//! Per-symbol and per-directive usage records.

use crate::base::{FileId, TextRange};
use crate::model::{ImportId, ImportKind, ReferenceId, SymbolId};

/// Which handle, if any, must be present for a symbol to be valid.
///
/// Computed once per symbol per aggregate and cached by the
/// [`Canonicalizer`](super::Canonicalizer).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymbolUsageRecord {
    /// Defined in source, an error, a namespace, a type parameter, or a
    /// construction whose parts are attributed separately.
    Unattributed,
    Reference(ReferenceId),
}

impl SymbolUsageRecord {
    pub fn reference(self) -> Option<ReferenceId> {
        match self {
            SymbolUsageRecord::Unattributed => None,
            SymbolUsageRecord::Reference(reference) => Some(reference),
        }
    }
}

impl From<Option<ReferenceId>> for SymbolUsageRecord {
    fn from(reference: Option<ReferenceId>) -> Self {
        match reference {
            Some(reference) => SymbolUsageRecord::Reference(reference),
            None => SymbolUsageRecord::Unattributed,
        }
    }
}

/// Verdict for one import directive after the walk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportDirectiveRecord {
    pub import: ImportId,
    pub file: FileId,
    pub range: TextRange,
    pub kind: ImportKind,
    /// Symbols the directive introduces into lookup.
    pub targets: Vec<SymbolId>,
    /// Whether at least one successful lookup went through this directive.
    pub used: bool,
}
