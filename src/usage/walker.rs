//! Symbol reachability walker.
//!
//! Visits every symbol reachable from declarations (signatures, attributes,
//! default values), bodies, and documentation cross-references, and records
//! which handles and import directives those symbols required.
//!
//! Symbols found in the program are queued; [`UsageWalker::drain`] then
//! works the queue to a fixed point: composites go to the
//! [`GenericClosure`], everything else is attributed by the
//! [`Canonicalizer`] and expanded to the symbols binding it depends on
//! (containing types, base types, member signatures).

use rustc_hash::FxHashSet;
use tracing::trace;

use super::accumulator::UsageBuilder;
use super::canonicalize::Canonicalizer;
use super::closure::GenericClosure;
use crate::compilation::Compilation;
use crate::model::{
    BoundAttribute, BoundNode, Declaration, NameOfTarget, Occurrence, SymbolData, SymbolId,
};

pub(crate) struct UsageWalker<'c> {
    compilation: &'c Compilation,
    canonicalizer: Canonicalizer<'c>,
    closure: GenericClosure,
    visited: FxHashSet<SymbolId>,
    pending: Vec<SymbolId>,
    usage: UsageBuilder,
}

impl<'c> UsageWalker<'c> {
    pub(crate) fn new(compilation: &'c Compilation) -> Self {
        Self {
            compilation,
            canonicalizer: compilation.canonicalizer(),
            closure: GenericClosure::new(),
            visited: FxHashSet::default(),
            pending: Vec::new(),
            usage: UsageBuilder::default(),
        }
    }

    /// Walk everything a declaration contributes to metadata and code.
    pub(crate) fn walk_declaration(&mut self, declaration: &Declaration) {
        for occurrence in &declaration.signature {
            self.visit_occurrence(occurrence);
        }
        for value in &declaration.default_values {
            self.walk_node(value);
        }
        self.walk_attributes(&declaration.attributes);
        if let Some(body) = &declaration.body {
            self.walk_node(body);
        }
        if self.binds_doc_references(declaration) {
            for occurrence in &declaration.doc_references {
                self.visit_occurrence(occurrence);
            }
        }
        self.drain();
    }

    fn binds_doc_references(&self, declaration: &Declaration) -> bool {
        self.compilation
            .file(declaration.file)
            .is_some_and(|file| file.documentation_mode.binds_cross_references())
    }

    pub(crate) fn walk_attributes(&mut self, attributes: &[BoundAttribute]) {
        for attribute in attributes {
            self.visit_occurrence(&attribute.constructor);
            for argument in &attribute.arguments {
                self.walk_node(argument);
            }
        }
        self.drain();
    }

    fn walk_node(&mut self, node: &BoundNode) {
        match node {
            BoundNode::Literal => {}
            BoundNode::Identifier(occurrence) | BoundNode::TypeExpression(occurrence) => {
                self.visit_occurrence(occurrence)
            }
            BoundNode::MemberAccess { receiver, member } => {
                if let Some(receiver) = receiver {
                    self.walk_node(receiver);
                }
                self.visit_occurrence(member);
            }
            BoundNode::Invocation {
                receiver,
                method,
                arguments,
            } => {
                if let Some(receiver) = receiver {
                    self.walk_node(receiver);
                }
                self.visit_occurrence(method);
                self.walk_nodes(arguments);
            }
            BoundNode::ObjectCreation {
                constructor,
                arguments,
            } => {
                self.visit_occurrence(constructor);
                self.walk_nodes(arguments);
            }
            BoundNode::Conversion { operand, target } => {
                self.walk_node(operand);
                self.visit_occurrence(target);
            }
            BoundNode::NameOf(NameOfTarget::Resolved(occurrence)) => {
                self.visit_occurrence(occurrence)
            }
            // Binder error, not a use.
            BoundNode::NameOf(NameOfTarget::Ambiguous(_)) => {}
            BoundNode::Synthesized(symbol) => self.visit_symbol(*symbol),
            BoundNode::LocalDeclaration { ty, initializer } => {
                self.visit_occurrence(ty);
                if let Some(initializer) = initializer {
                    self.walk_node(initializer);
                }
            }
            BoundNode::Lambda { parameters, body } => {
                for parameter in parameters {
                    self.visit_occurrence(parameter);
                }
                self.walk_node(body);
            }
            BoundNode::Block(nodes) | BoundNode::Bad(nodes) => self.walk_nodes(nodes),
            BoundNode::Unsafe(inner) => self.walk_node(inner),
        }
    }

    fn walk_nodes(&mut self, nodes: &[BoundNode]) {
        for node in nodes {
            self.walk_node(node);
        }
    }

    /// Record a resolved occurrence. Error symbols are skipped entirely,
    /// including the import they were looked up through.
    pub(crate) fn visit_occurrence(&mut self, occurrence: &Occurrence) {
        if self.compilation.symbols().data(occurrence.symbol).is_error() {
            return;
        }
        if let Some(import) = occurrence.via {
            if self.usage.mark_import(import) {
                trace!(
                    "[USAGE] import #{} used by {}",
                    import.index(),
                    self.compilation.symbols().display(occurrence.symbol)
                );
            }
        }
        self.visit_symbol(occurrence.symbol);
    }

    /// Queue a symbol. Visiting the same symbol again is a no-op.
    pub(crate) fn visit_symbol(&mut self, symbol: SymbolId) {
        if !self.visited.contains(&symbol) {
            self.pending.push(symbol);
        }
    }

    /// Work the queue until no new symbols turn up.
    pub(crate) fn drain(&mut self) {
        let compilation = self.compilation;
        let symbols = compilation.symbols();
        while let Some(id) = self.pending.pop() {
            if !self.visited.insert(id) {
                continue;
            }
            let data = symbols.data(id);
            if data.is_composite() {
                let pending = &mut self.pending;
                self.closure.expand(symbols, id, |leaf| pending.push(leaf));
                continue;
            }
            if let Some(reference) = self.canonicalizer.attribute(id).reference() {
                self.usage.mark_reference(reference);
            }
            match data {
                SymbolData::Named(named) => {
                    self.pending.extend(named.container);
                    self.pending.extend(symbols.bases(id).iter().copied());
                }
                SymbolData::Member(member) => {
                    self.pending.push(member.container);
                    self.pending.extend(member.signature.iter().copied());
                }
                SymbolData::Local { ty, .. } => self.pending.push(*ty),
                _ => {}
            }
        }
    }

    pub(crate) fn finish(mut self) -> UsageBuilder {
        self.drain();
        trace!(
            "[USAGE] walker finished: {} symbols, {} constructions expanded",
            self.visited.len(),
            self.closure.visited_count()
        );
        self.usage.record_visited(self.visited.len());
        self.usage
    }
}
