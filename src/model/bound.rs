//! The bound program handed over by the binder.
//!
//! Only the parts that matter for reference usage are modelled: which symbol
//! every bound construct resolved to, and which import directive (if any) the
//! lookup went through.

use crate::base::FileId;

use super::source::ImportId;
use super::symbols::SymbolId;

/// One resolved occurrence of a symbol in source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Occurrence {
    pub symbol: SymbolId,
    /// The import directive that made the name visible to lookup, if any.
    pub via: Option<ImportId>,
}

impl Occurrence {
    /// An occurrence found without the help of an import directive.
    pub fn direct(symbol: SymbolId) -> Self {
        Self { symbol, via: None }
    }

    /// An occurrence found through `import`.
    pub fn via(symbol: SymbolId, import: ImportId) -> Self {
        Self {
            symbol,
            via: Some(import),
        }
    }
}

impl From<SymbolId> for Occurrence {
    fn from(symbol: SymbolId) -> Self {
        Self::direct(symbol)
    }
}

/// Target of a name-introspection (`nameof`) expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NameOfTarget {
    Resolved(Occurrence),
    /// A method group the binder could not narrow down. Reported by the
    /// binder; carries no usage.
    Ambiguous(Vec<SymbolId>),
}

/// A bound executable-code node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BoundNode {
    Literal,
    /// A simple name bound to a local, field, type or namespace.
    Identifier(Occurrence),
    MemberAccess {
        receiver: Option<Box<BoundNode>>,
        member: Occurrence,
    },
    Invocation {
        receiver: Option<Box<BoundNode>>,
        method: Occurrence,
        arguments: Vec<BoundNode>,
    },
    ObjectCreation {
        constructor: Occurrence,
        arguments: Vec<BoundNode>,
    },
    /// A type used as an expression or in a type-test/cast position.
    TypeExpression(Occurrence),
    Conversion {
        operand: Box<BoundNode>,
        target: Occurrence,
    },
    NameOf(NameOfTarget),
    /// A dependency introduced by lowering, such as a well-known helper
    /// member required by a language feature.
    Synthesized(SymbolId),
    LocalDeclaration {
        ty: Occurrence,
        initializer: Option<Box<BoundNode>>,
    },
    Lambda {
        parameters: Vec<Occurrence>,
        body: Box<BoundNode>,
    },
    Block(Vec<BoundNode>),
    /// An `unsafe` region. Whatever the binder reported about it, the
    /// contained symbols are still used.
    Unsafe(Box<BoundNode>),
    /// An expression the binder flagged as erroneous. Children that did
    /// resolve are still walked.
    Bad(Vec<BoundNode>),
}

impl BoundNode {
    pub fn identifier(occurrence: impl Into<Occurrence>) -> Self {
        BoundNode::Identifier(occurrence.into())
    }

    pub fn member_access(receiver: Option<BoundNode>, member: impl Into<Occurrence>) -> Self {
        BoundNode::MemberAccess {
            receiver: receiver.map(Box::new),
            member: member.into(),
        }
    }

    pub fn invocation(
        receiver: Option<BoundNode>,
        method: impl Into<Occurrence>,
        arguments: Vec<BoundNode>,
    ) -> Self {
        BoundNode::Invocation {
            receiver: receiver.map(Box::new),
            method: method.into(),
            arguments,
        }
    }

    pub fn object_creation(constructor: impl Into<Occurrence>, arguments: Vec<BoundNode>) -> Self {
        BoundNode::ObjectCreation {
            constructor: constructor.into(),
            arguments,
        }
    }

    pub fn type_expression(ty: impl Into<Occurrence>) -> Self {
        BoundNode::TypeExpression(ty.into())
    }

    pub fn local(ty: impl Into<Occurrence>, initializer: Option<BoundNode>) -> Self {
        BoundNode::LocalDeclaration {
            ty: ty.into(),
            initializer: initializer.map(Box::new),
        }
    }
}

/// An attribute application.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoundAttribute {
    pub constructor: Occurrence,
    pub arguments: Vec<BoundNode>,
}

impl BoundAttribute {
    pub fn new(constructor: impl Into<Occurrence>) -> Self {
        Self {
            constructor: constructor.into(),
            arguments: Vec::new(),
        }
    }

    pub fn with_argument(mut self, argument: BoundNode) -> Self {
        self.arguments.push(argument);
        self
    }
}

/// A source declaration together with everything that ends up in metadata
/// and its executable body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    /// The declared symbol (defined in the source assembly).
    pub symbol: SymbolId,
    pub file: FileId,
    /// Types named by the declaration: member signature, base list, generic
    /// constraints.
    pub signature: Vec<Occurrence>,
    /// Parameter default values and constant initializers.
    pub default_values: Vec<BoundNode>,
    pub attributes: Vec<BoundAttribute>,
    pub body: Option<BoundNode>,
    /// Documentation cross-reference targets (`cref`s).
    pub doc_references: Vec<Occurrence>,
}

impl Declaration {
    pub fn new(symbol: SymbolId, file: FileId) -> Self {
        Self {
            symbol,
            file,
            signature: Vec::new(),
            default_values: Vec::new(),
            attributes: Vec::new(),
            body: None,
            doc_references: Vec::new(),
        }
    }

    pub fn with_signature(mut self, occurrence: impl Into<Occurrence>) -> Self {
        self.signature.push(occurrence.into());
        self
    }

    pub fn with_default_value(mut self, value: BoundNode) -> Self {
        self.default_values.push(value);
        self
    }

    pub fn with_attribute(mut self, attribute: BoundAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_body(mut self, body: BoundNode) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_doc_reference(mut self, occurrence: impl Into<Occurrence>) -> Self {
        self.doc_references.push(occurrence.into());
        self
    }
}

/// An assembly-level attribute list in one file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssemblyAttributes {
    pub file: FileId,
    pub attributes: Vec<BoundAttribute>,
}
