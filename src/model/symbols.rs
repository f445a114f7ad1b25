//! Symbol table: hash-consed symbol storage.
//!
//! Every symbol is stored once in an [`IndexSet`] keyed by its structural
//! data, and a [`SymbolId`] is the position in that set. Two constructions
//! with equal structure (`List<int>` built twice) therefore share one id, which
//! is what lets the generic closure key its visited set by plain ids.
//!
//! Base types live beside the interned data rather than inside it, so a type
//! may name a construction over itself (`Int32 : IEquatable<Int32>`).

use indexmap::IndexSet;
use rustc_hash::{FxBuildHasher, FxHashMap};

use super::assembly::AssemblyId;
use super::reference::ReferenceId;
use crate::base::Name;

/// Identifier of a symbol in a [`SymbolTable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SymbolId(u32);

impl SymbolId {
    pub(crate) const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Kind of a type member.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Field,
    Method,
    Constructor,
    Property,
    Event,
}

/// A type definition as declared in some assembly.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NamedType {
    pub name: Name,
    pub assembly: AssemblyId,
    /// Containing namespace or type.
    pub container: Option<SymbolId>,
    pub arity: u32,
    /// Set when this is a local copy produced by interop-type embedding;
    /// names the embedding handle.
    pub embedded_from: Option<ReferenceId>,
}

/// A type member (field, method, property, ...).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Member {
    pub kind: MemberKind,
    pub name: Name,
    /// A named or constructed type.
    pub container: SymbolId,
    /// Return/field type followed by parameter types.
    pub signature: Vec<SymbolId>,
    pub arity: u32,
}

/// Structural symbol data. Equal data means the same symbol.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SymbolData {
    /// Binder-produced placeholder for anything that failed to resolve.
    Error { name: Name },
    /// Namespaces merge across assemblies and are never attributed.
    Namespace { name: Name, parent: Option<SymbolId> },
    Named(NamedType),
    /// A generic type instantiation. `container` is the constructed
    /// containing type for nested types such as `Outer<int>.Inner`.
    Constructed {
        definition: SymbolId,
        container: Option<SymbolId>,
        arguments: Vec<SymbolId>,
    },
    Array { element: SymbolId, rank: u32 },
    Pointer { pointee: SymbolId },
    Tuple { elements: Vec<SymbolId> },
    TypeParameter { name: Name, ordinal: u32, owner: Option<SymbolId> },
    Member(Member),
    /// A generic method instantiation.
    ConstructedMethod {
        definition: SymbolId,
        arguments: Vec<SymbolId>,
    },
    /// A local variable or parameter; only its type matters.
    Local { name: Name, ty: SymbolId },
}

impl SymbolData {
    /// Constructed symbols are expanded by the generic closure instead of
    /// being attributed directly.
    pub fn is_composite(&self) -> bool {
        matches!(
            self,
            SymbolData::Constructed { .. }
                | SymbolData::Array { .. }
                | SymbolData::Pointer { .. }
                | SymbolData::Tuple { .. }
                | SymbolData::ConstructedMethod { .. }
        )
    }

    pub fn is_error(&self) -> bool {
        matches!(self, SymbolData::Error { .. })
    }

    /// True for anything usable in type position.
    pub fn is_type(&self) -> bool {
        matches!(
            self,
            SymbolData::Error { .. }
                | SymbolData::Named(_)
                | SymbolData::Constructed { .. }
                | SymbolData::Array { .. }
                | SymbolData::Pointer { .. }
                | SymbolData::Tuple { .. }
                | SymbolData::TypeParameter { .. }
        )
    }

    /// Every symbol id this data points at.
    pub(crate) fn referenced_ids(&self) -> Vec<SymbolId> {
        match self {
            SymbolData::Error { .. } => Vec::new(),
            SymbolData::Namespace { parent, .. } => parent.iter().copied().collect(),
            SymbolData::Named(named) => named.container.iter().copied().collect(),
            SymbolData::Constructed {
                definition,
                container,
                arguments,
            } => std::iter::once(*definition)
                .chain(container.iter().copied())
                .chain(arguments.iter().copied())
                .collect(),
            SymbolData::Array { element, .. } => vec![*element],
            SymbolData::Pointer { pointee } => vec![*pointee],
            SymbolData::Tuple { elements } => elements.clone(),
            SymbolData::TypeParameter { owner, .. } => owner.iter().copied().collect(),
            SymbolData::Member(member) => std::iter::once(member.container)
                .chain(member.signature.iter().copied())
                .collect(),
            SymbolData::ConstructedMethod {
                definition,
                arguments,
            } => std::iter::once(*definition)
                .chain(arguments.iter().copied())
                .collect(),
            SymbolData::Local { ty, .. } => vec![*ty],
        }
    }
}

/// Types the language depends on intrinsically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpecialType {
    /// The root type. Its defining assembly is the core library.
    Object,
    ValueType,
    Void,
    Boolean,
    Int32,
    String,
    Attribute,
}

/// Rendered symbols longer than this are cut and end in `...`.
const DISPLAY_LIMIT: usize = 256;

/// Hash-consed storage for all symbols of one compilation.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    symbols: IndexSet<SymbolData, FxBuildHasher>,
    /// Base type and implemented interfaces per named type.
    bases: FxHashMap<SymbolId, Vec<SymbolId>>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern symbol data, returning the existing id for equal data.
    pub fn intern(&mut self, data: SymbolData) -> SymbolId {
        let (index, _) = self.symbols.insert_full(data);
        SymbolId::new(index as u32)
    }

    pub fn get(&self, id: SymbolId) -> Option<&SymbolData> {
        self.symbols.get_index(id.index())
    }

    /// Look up data for an id known to belong to this table.
    ///
    /// Ids are validated when the compilation is built, so lookups made by
    /// the analysis never miss.
    pub(crate) fn data(&self, id: SymbolId) -> &SymbolData {
        &self.symbols[id.index()]
    }

    pub fn contains(&self, id: SymbolId) -> bool {
        id.index() < self.symbols.len()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &SymbolData)> {
        self.symbols
            .iter()
            .enumerate()
            .map(|(i, data)| (SymbolId::new(i as u32), data))
    }

    /// Record the base type and interfaces of an interned named type,
    /// replacing any earlier list.
    pub fn set_bases(&mut self, ty: SymbolId, bases: Vec<SymbolId>) {
        if bases.is_empty() {
            self.bases.remove(&ty);
        } else {
            self.bases.insert(ty, bases);
        }
    }

    pub fn bases(&self, ty: SymbolId) -> &[SymbolId] {
        self.bases.get(&ty).map_or(&[], Vec::as_slice)
    }

    pub(crate) fn base_entries(&self) -> impl Iterator<Item = (SymbolId, &[SymbolId])> {
        self.bases.iter().map(|(ty, bases)| (*ty, bases.as_slice()))
    }

    // ------------------------------------------------------------------------
    // Convenience constructors
    // ------------------------------------------------------------------------

    pub fn error(&mut self, name: impl Into<Name>) -> SymbolId {
        self.intern(SymbolData::Error { name: name.into() })
    }

    pub fn namespace(&mut self, name: impl Into<Name>, parent: Option<SymbolId>) -> SymbolId {
        self.intern(SymbolData::Namespace {
            name: name.into(),
            parent,
        })
    }

    pub fn named_type(&mut self, named: NamedType) -> SymbolId {
        self.intern(SymbolData::Named(named))
    }

    pub fn construct(&mut self, definition: SymbolId, arguments: Vec<SymbolId>) -> SymbolId {
        self.intern(SymbolData::Constructed {
            definition,
            container: None,
            arguments,
        })
    }

    /// A nested type of a constructed containing type, e.g. `C3<C0>.C4`.
    pub fn construct_nested(
        &mut self,
        definition: SymbolId,
        container: SymbolId,
        arguments: Vec<SymbolId>,
    ) -> SymbolId {
        self.intern(SymbolData::Constructed {
            definition,
            container: Some(container),
            arguments,
        })
    }

    pub fn array(&mut self, element: SymbolId, rank: u32) -> SymbolId {
        self.intern(SymbolData::Array { element, rank })
    }

    pub fn pointer(&mut self, pointee: SymbolId) -> SymbolId {
        self.intern(SymbolData::Pointer { pointee })
    }

    pub fn tuple(&mut self, elements: Vec<SymbolId>) -> SymbolId {
        self.intern(SymbolData::Tuple { elements })
    }

    pub fn type_parameter(
        &mut self,
        name: impl Into<Name>,
        ordinal: u32,
        owner: Option<SymbolId>,
    ) -> SymbolId {
        self.intern(SymbolData::TypeParameter {
            name: name.into(),
            ordinal,
            owner,
        })
    }

    pub fn member(&mut self, member: Member) -> SymbolId {
        self.intern(SymbolData::Member(member))
    }

    pub fn construct_method(&mut self, definition: SymbolId, arguments: Vec<SymbolId>) -> SymbolId {
        self.intern(SymbolData::ConstructedMethod {
            definition,
            arguments,
        })
    }

    pub fn local(&mut self, name: impl Into<Name>, ty: SymbolId) -> SymbolId {
        self.intern(SymbolData::Local {
            name: name.into(),
            ty,
        })
    }

    /// Render a symbol for logs and diagnostics, cut after a fixed length.
    pub fn display(&self, id: SymbolId) -> String {
        let mut out = String::new();
        self.write_symbol(id, &mut out);
        if out.len() > DISPLAY_LIMIT {
            let mut end = DISPLAY_LIMIT;
            while !out.is_char_boundary(end) {
                end -= 1;
            }
            out.truncate(end);
            out.push_str("...");
        }
        out
    }

    /// Stops descending once `out` is past the limit, so shared
    /// constructions cost at most the limit rather than their unfolded size.
    fn write_symbol(&self, id: SymbolId, out: &mut String) {
        if out.len() > DISPLAY_LIMIT {
            return;
        }
        let Some(data) = self.get(id) else {
            out.push_str(&format!("<unknown #{}>", id.index()));
            return;
        };
        match data {
            SymbolData::Error { name } => {
                out.push('?');
                out.push_str(name);
            }
            SymbolData::Namespace { name, parent } => {
                if let Some(p) = parent {
                    self.write_symbol(*p, out);
                    out.push('.');
                }
                out.push_str(name);
            }
            SymbolData::Named(named) => {
                if let Some(c) = named.container {
                    self.write_symbol(c, out);
                    out.push('.');
                }
                out.push_str(&named.name);
            }
            SymbolData::Constructed {
                definition,
                container,
                arguments,
            } => {
                match (container, self.get(*definition)) {
                    (Some(c), Some(SymbolData::Named(named))) => {
                        self.write_symbol(*c, out);
                        out.push('.');
                        out.push_str(&named.name);
                    }
                    _ => self.write_symbol(*definition, out),
                }
                if !arguments.is_empty() {
                    out.push('<');
                    self.write_list(arguments, out);
                    out.push('>');
                }
            }
            SymbolData::Array { element, rank } => {
                self.write_symbol(*element, out);
                out.push('[');
                out.push_str(&",".repeat(rank.saturating_sub(1) as usize));
                out.push(']');
            }
            SymbolData::Pointer { pointee } => {
                self.write_symbol(*pointee, out);
                out.push('*');
            }
            SymbolData::Tuple { elements } => {
                out.push('(');
                self.write_list(elements, out);
                out.push(')');
            }
            SymbolData::TypeParameter { name, .. } | SymbolData::Local { name, .. } => {
                out.push_str(name);
            }
            SymbolData::Member(member) => {
                self.write_symbol(member.container, out);
                out.push('.');
                out.push_str(&member.name);
            }
            SymbolData::ConstructedMethod {
                definition,
                arguments,
            } => {
                self.write_symbol(*definition, out);
                out.push('<');
                self.write_list(arguments, out);
                out.push('>');
            }
        }
    }

    fn write_list(&self, ids: &[SymbolId], out: &mut String) {
        for (i, id) in ids.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.write_symbol(*id, out);
        }
    }
}
