//! Assembly/reference canonicalization.
//!
//! Maps a resolved symbol to the one handle whose presence justifies it.
//! This is the only place that looks at [`AssemblyVariant`]; the rest of the
//! pipeline is agnostic of how an assembly was bound.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::trace;

use super::records::SymbolUsageRecord;
use crate::model::{AssemblySymbol, AssemblyVariant, NamedType, SymbolData, SymbolId, SymbolTable};

/// Attributes symbols to reference handles, memoizing per symbol.
#[derive(Clone, Copy)]
pub struct Canonicalizer<'c> {
    symbols: &'c SymbolTable,
    assemblies: &'c [AssemblySymbol],
    records: &'c RwLock<FxHashMap<SymbolId, SymbolUsageRecord>>,
}

impl<'c> Canonicalizer<'c> {
    pub(crate) fn new(
        symbols: &'c SymbolTable,
        assemblies: &'c [AssemblySymbol],
        records: &'c RwLock<FxHashMap<SymbolId, SymbolUsageRecord>>,
    ) -> Self {
        Self {
            symbols,
            assemblies,
            records,
        }
    }

    /// The handle to mark used for `symbol`, if any.
    pub fn attribute(&self, symbol: SymbolId) -> SymbolUsageRecord {
        if let Some(record) = self.records.read().get(&symbol) {
            return *record;
        }
        let record = self.compute(symbol);
        // Racing threads compute the same value; first insert wins.
        *self.records.write().entry(symbol).or_insert(record)
    }

    fn compute(&self, symbol: SymbolId) -> SymbolUsageRecord {
        let record = match self.defining_type(symbol) {
            Some(named) => self.attribute_named(named),
            None => SymbolUsageRecord::Unattributed,
        };
        trace!(
            "[USAGE] attribute {} -> {:?}",
            self.symbols.display(symbol),
            record
        );
        record
    }

    /// The type definition whose assembly decides attribution.
    ///
    /// Members defer to their containing type; members of constructed types
    /// defer to the generic definition. Everything else has no defining type
    /// of its own.
    fn defining_type(&self, symbol: SymbolId) -> Option<&'c NamedType> {
        let mut current = symbol;
        loop {
            match self.symbols.get(current)? {
                SymbolData::Named(named) => return Some(named),
                SymbolData::Member(member) => current = member.container,
                SymbolData::Constructed { definition, .. } => {
                    // Only reached through a member's container; a
                    // construction visited on its own goes to the closure.
                    if !matches!(self.symbols.get(symbol), Some(SymbolData::Member(_))) {
                        return None;
                    }
                    current = *definition;
                }
                _ => return None,
            }
        }
    }

    fn attribute_named(&self, named: &NamedType) -> SymbolUsageRecord {
        if let Some(embedding) = named.embedded_from {
            return SymbolUsageRecord::Reference(embedding);
        }
        let Some(assembly) = self.assemblies.get(named.assembly.index()) else {
            return SymbolUsageRecord::Unattributed;
        };
        match &assembly.variant {
            AssemblyVariant::Source => SymbolUsageRecord::Unattributed,
            AssemblyVariant::CompiledImage { reference }
            | AssemblyVariant::SourceCompiled { reference } => {
                SymbolUsageRecord::Reference(*reference)
            }
            // The handle supplied here, never the one the symbols were
            // originally produced against.
            AssemblyVariant::Retargeted { reference, .. } => {
                SymbolUsageRecord::Reference(*reference)
            }
        }
    }
}
