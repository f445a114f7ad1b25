//! Assembly symbols as observed by the binder.
//!
//! Every external assembly the binder saw is recorded together with the shape
//! it was bound in. The shape decides attribution: see
//! [`Canonicalizer`](crate::usage::Canonicalizer).

use super::reference::{AssemblyIdentity, ReferenceId};

/// Identifier of an assembly symbol within one compilation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AssemblyId(u32);

impl AssemblyId {
    /// The assembly currently being compiled. Always registered first.
    pub const SOURCE: AssemblyId = AssemblyId(0);

    pub(crate) const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// The shape an assembly was bound in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssemblyVariant {
    /// The assembly being compiled (including any added modules).
    Source,
    /// Bound directly from a binary image supplied by `reference`.
    CompiledImage { reference: ReferenceId },
    /// Bound directly from another in-process compilation supplied by
    /// `reference`.
    SourceCompiled { reference: ReferenceId },
    /// Substituted so that symbols of a compilation built against other
    /// versions line up with this aggregate.
    ///
    /// `reference` is the handle supplied to this aggregate. `underlying` is
    /// the identity the symbols were originally produced under, and
    /// `underlying_reference` the handle carrying that identity if the
    /// aggregate happens to contain one too. Neither of the latter is ever
    /// attributed.
    Retargeted {
        reference: ReferenceId,
        underlying: AssemblyIdentity,
        underlying_reference: Option<ReferenceId>,
    },
}

impl AssemblyVariant {
    /// The handle this assembly was bound against in the current aggregate.
    pub fn bound_reference(&self) -> Option<ReferenceId> {
        match self {
            AssemblyVariant::Source => None,
            AssemblyVariant::CompiledImage { reference }
            | AssemblyVariant::SourceCompiled { reference }
            | AssemblyVariant::Retargeted { reference, .. } => Some(*reference),
        }
    }

    pub fn is_retargeted(&self) -> bool {
        matches!(self, AssemblyVariant::Retargeted { .. })
    }
}

/// An assembly as the symbol table sees it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssemblySymbol {
    pub identity: AssemblyIdentity,
    pub variant: AssemblyVariant,
}

impl AssemblySymbol {
    pub fn new(identity: AssemblyIdentity, variant: AssemblyVariant) -> Self {
        Self { identity, variant }
    }
}
