//! Source files and the import directives declared in them.

use crate::base::{FileId, Name, TextRange};

use super::reference::ReferenceId;
use super::symbols::SymbolId;

/// How documentation comments of a file are processed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DocumentationMode {
    /// Comments are trivia; cross-references are never bound.
    None,
    /// Comments are parsed and cross-references bound.
    #[default]
    Parse,
    /// Like `Parse`, and documentation problems are reported.
    Diagnose,
}

impl DocumentationMode {
    /// Whether documentation cross-references take part in lookups.
    pub fn binds_cross_references(self) -> bool {
        match self {
            DocumentationMode::None => false,
            DocumentationMode::Parse | DocumentationMode::Diagnose => true,
        }
    }
}

/// A source file of the compilation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceFile {
    pub id: FileId,
    pub path: Name,
    pub documentation_mode: DocumentationMode,
}

/// Identifier of an import directive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ImportId(u32);

impl ImportId {
    pub(crate) const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// What an import directive brings into scope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImportKind {
    /// `import N;`: a namespace's members.
    Namespace { namespace: SymbolId },
    /// `import static T;`: a type's static members and nested types.
    StaticType { ty: SymbolId },
    /// `import A = N;`: an alias for a namespace.
    NamespaceAlias { alias: Name, namespace: SymbolId },
    /// `import A = T;`: an alias for a type.
    TypeAlias { alias: Name, ty: SymbolId },
    /// `extern alias A;`: the root namespace of the handles bound to `A`.
    ExternAlias {
        alias: Name,
        references: Vec<ReferenceId>,
    },
}

impl ImportKind {
    /// The symbols this directive introduces into lookup.
    pub fn targets(&self) -> Vec<SymbolId> {
        match self {
            ImportKind::Namespace { namespace } | ImportKind::NamespaceAlias { namespace, .. } => {
                vec![*namespace]
            }
            ImportKind::StaticType { ty } | ImportKind::TypeAlias { ty, .. } => vec![*ty],
            ImportKind::ExternAlias { .. } => Vec::new(),
        }
    }

    /// Short label used in diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            ImportKind::Namespace { .. } => "import directive",
            ImportKind::StaticType { .. } => "static import directive",
            ImportKind::NamespaceAlias { .. } | ImportKind::TypeAlias { .. } => "alias directive",
            ImportKind::ExternAlias { .. } => "extern alias",
        }
    }

    pub fn is_extern_alias(&self) -> bool {
        matches!(self, ImportKind::ExternAlias { .. })
    }
}

/// One import directive as written in source.
///
/// Two syntactically identical directives are still two directives, each with
/// its own id and its own verdict.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportDirective {
    pub file: FileId,
    pub range: TextRange,
    pub kind: ImportKind,
}
