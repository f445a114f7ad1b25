//! Generic instantiation closure.
//!
//! Expands constructed types and methods, arrays, pointers and tuples down to
//! the definitions and leaf types they are built from. Symbols are hash-consed
//! (see [`SymbolTable`]), so the visited set keyed by [`SymbolId`] is keyed by
//! structural identity and each distinct construction is expanded once, no
//! matter how often or how deeply it is nested.

use rustc_hash::FxHashSet;

use crate::model::{SymbolData, SymbolId, SymbolTable};

/// Worklist-driven expansion with a visited set that persists across calls.
#[derive(Debug, Default)]
pub(crate) struct GenericClosure {
    visited: FxHashSet<SymbolId>,
    worklist: Vec<SymbolId>,
}

impl GenericClosure {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Expand `root` to its fixed point.
    ///
    /// `leaf` receives every newly discovered non-composite component
    /// (definitions, type arguments, element types, ...). Components already
    /// discovered by an earlier call are not reported again.
    pub(crate) fn expand(
        &mut self,
        symbols: &SymbolTable,
        root: SymbolId,
        mut leaf: impl FnMut(SymbolId),
    ) {
        self.worklist.push(root);
        while let Some(id) = self.worklist.pop() {
            if !self.visited.insert(id) {
                continue;
            }
            match symbols.data(id) {
                SymbolData::Constructed {
                    definition,
                    container,
                    arguments,
                } => {
                    self.worklist.push(*definition);
                    self.worklist.extend(container.iter().copied());
                    self.worklist.extend(arguments.iter().copied());
                }
                SymbolData::ConstructedMethod {
                    definition,
                    arguments,
                } => {
                    self.worklist.push(*definition);
                    self.worklist.extend(arguments.iter().copied());
                }
                SymbolData::Array { element, .. } => self.worklist.push(*element),
                SymbolData::Pointer { pointee } => self.worklist.push(*pointee),
                SymbolData::Tuple { elements } => self.worklist.extend(elements.iter().copied()),
                // Open type parameters contribute nothing by themselves.
                SymbolData::TypeParameter { .. } => {}
                _ => leaf(id),
            }
        }
    }

    /// Number of distinct symbols expanded so far.
    pub(crate) fn visited_count(&self) -> usize {
        self.visited.len()
    }
}
