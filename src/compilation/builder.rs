//! Builder for [`Compilation`].
//!
//! The binder feeds its results in through this builder; `build` validates
//! every cross-reference once so the analysis can index without checks.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::{AnalysisOptions, Compilation, Program};
use crate::base::{FileId, Name, TextRange};
use crate::diagnostics::Diagnostic;
use crate::model::{
    AssemblyAttributes, AssemblyId, AssemblyIdentity, AssemblySymbol, AssemblyVariant,
    BoundAttribute, BoundNode, Declaration, DocumentationMode, ExternalReference, ImportDirective,
    ImportId, ImportKind, ModelError, ModelResult, NameOfTarget, Occurrence, ReferenceId,
    SourceFile, SpecialType, SymbolData, SymbolId, SymbolTable, Version,
};

/// Accumulates the inputs of a [`Compilation`].
#[derive(Debug)]
pub struct CompilationBuilder {
    name: Name,
    options: AnalysisOptions,
    references: Vec<(ReferenceId, ExternalReference)>,
    assemblies: Vec<AssemblySymbol>,
    symbols: SymbolTable,
    special_types: FxHashMap<SpecialType, SymbolId>,
    files: Vec<SourceFile>,
    imports: Vec<ImportDirective>,
    declarations: Vec<Declaration>,
    assembly_attributes: Vec<AssemblyAttributes>,
    diagnostics: Vec<Diagnostic>,
}

impl CompilationBuilder {
    /// Create a builder. The assembly being compiled is registered as
    /// [`AssemblyId::SOURCE`].
    pub fn new(name: impl Into<Name>) -> Self {
        let name = name.into();
        let source = AssemblySymbol::new(
            AssemblyIdentity::new(name.clone(), Version::default()),
            AssemblyVariant::Source,
        );
        Self {
            name,
            options: AnalysisOptions::default(),
            references: Vec::new(),
            assemblies: vec![source],
            symbols: SymbolTable::new(),
            special_types: FxHashMap::default(),
            files: Vec::new(),
            imports: Vec::new(),
            declarations: Vec::new(),
            assembly_attributes: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn options(mut self, options: AnalysisOptions) -> Self {
        self.options = options;
        self
    }

    /// Append a handle to the reference list.
    pub fn add_reference(&mut self, reference: ExternalReference) -> ReferenceId {
        let id = ReferenceId::new(self.references.len() as u32);
        self.references.push((id, reference));
        id
    }

    /// Register an assembly as the binder observed it.
    pub fn add_assembly(&mut self, identity: AssemblyIdentity, variant: AssemblyVariant) -> AssemblyId {
        let id = AssemblyId::new(self.assemblies.len() as u32);
        self.assemblies.push(AssemblySymbol::new(identity, variant));
        id
    }

    /// Register a compiled-image assembly for `reference`, reusing the
    /// handle's identity.
    pub fn add_image_assembly(&mut self, reference: ReferenceId) -> ModelResult<AssemblyId> {
        let identity = self.reference_identity(reference)?;
        Ok(self.add_assembly(identity, AssemblyVariant::CompiledImage { reference }))
    }

    fn reference_identity(&self, reference: ReferenceId) -> ModelResult<AssemblyIdentity> {
        self.references
            .get(reference.raw() as usize)
            .map(|(_, r)| r.identity.clone())
            .ok_or(ModelError::UnknownReference(reference.raw()))
    }

    pub fn symbols(&mut self) -> &mut SymbolTable {
        &mut self.symbols
    }

    pub fn set_special_type(&mut self, special: SpecialType, symbol: SymbolId) {
        self.special_types.insert(special, symbol);
    }

    /// Add a source file with the default documentation mode.
    pub fn add_file(&mut self, path: impl Into<Name>) -> FileId {
        let mode = self.options.default_documentation_mode;
        self.add_file_with_mode(path, mode)
    }

    pub fn add_file_with_mode(&mut self, path: impl Into<Name>, mode: DocumentationMode) -> FileId {
        let id = FileId::new(self.files.len() as u32);
        self.files.push(SourceFile {
            id,
            path: path.into(),
            documentation_mode: mode,
        });
        id
    }

    pub fn add_import(&mut self, file: FileId, range: TextRange, kind: ImportKind) -> ImportId {
        let id = ImportId::new(self.imports.len() as u32);
        self.imports.push(ImportDirective { file, range, kind });
        id
    }

    pub fn add_declaration(&mut self, declaration: Declaration) {
        self.declarations.push(declaration);
    }

    pub fn add_assembly_attributes(&mut self, file: FileId, attributes: Vec<BoundAttribute>) {
        self.assembly_attributes
            .push(AssemblyAttributes { file, attributes });
    }

    /// Record a diagnostic the binder reported.
    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Validate all cross-references and freeze the aggregate.
    pub fn build(self) -> ModelResult<Compilation> {
        let validator = Validator { builder: &self };
        validator.validate()?;

        let program = Program {
            assemblies: self.assemblies,
            symbols: self.symbols,
            special_types: self.special_types,
            files: self.files,
            imports: self.imports,
            declarations: self.declarations,
            assembly_attributes: self.assembly_attributes,
            binder_diagnostics: self.diagnostics,
        };
        Ok(Compilation::from_parts(
            self.name,
            self.references,
            Arc::new(program),
            self.options,
        ))
    }
}

// ============================================================================
// VALIDATION
// ============================================================================

struct Validator<'a> {
    builder: &'a CompilationBuilder,
}

impl Validator<'_> {
    fn validate(&self) -> ModelResult<()> {
        for assembly in &self.builder.assemblies {
            self.check_variant(&assembly.variant)?;
        }
        for (_, data) in self.builder.symbols.iter() {
            self.check_symbol_data(data)?;
        }
        for (ty, bases) in self.builder.symbols.base_entries() {
            self.check_bases(ty, bases)?;
        }
        for (special, symbol) in &self.builder.special_types {
            self.check_symbol(*symbol)?;
            let data = &self.builder.symbols.data(*symbol);
            if !matches!(data, SymbolData::Named(_) | SymbolData::Error { .. }) {
                return Err(ModelError::invalid_symbol(format!(
                    "special type {:?} must be a named type",
                    special
                )));
            }
        }
        for import in &self.builder.imports {
            self.check_file(import.file)?;
            self.check_import_kind(&import.kind)?;
        }
        for declaration in &self.builder.declarations {
            self.check_declaration(declaration)?;
        }
        for list in &self.builder.assembly_attributes {
            self.check_file(list.file)?;
            for attribute in &list.attributes {
                self.check_attribute(attribute)?;
            }
        }
        Ok(())
    }

    fn check_reference(&self, reference: ReferenceId) -> ModelResult<&ExternalReference> {
        self.builder
            .references
            .get(reference.raw() as usize)
            .map(|(_, r)| r)
            .ok_or(ModelError::UnknownReference(reference.raw()))
    }

    fn check_variant(&self, variant: &AssemblyVariant) -> ModelResult<()> {
        if let AssemblyVariant::Retargeted {
            underlying_reference: Some(underlying),
            ..
        } = variant
        {
            self.check_reference(*underlying)?;
        }
        if let Some(reference) = variant.bound_reference() {
            let handle = self.check_reference(reference)?;
            if handle.is_module() {
                return Err(ModelError::invalid_assembly(format!(
                    "'{}' is a module and cannot back an assembly symbol",
                    handle.display
                )));
            }
        }
        Ok(())
    }

    fn check_symbol(&self, symbol: SymbolId) -> ModelResult<()> {
        if self.builder.symbols.contains(symbol) {
            Ok(())
        } else {
            Err(ModelError::UnknownSymbol(symbol.index() as u32))
        }
    }

    fn check_symbol_data(&self, data: &SymbolData) -> ModelResult<()> {
        for id in data.referenced_ids() {
            self.check_symbol(id)?;
        }
        match data {
            SymbolData::Named(named) => {
                if named.assembly.index() >= self.builder.assemblies.len() {
                    return Err(ModelError::UnknownAssembly(named.assembly.index() as u32));
                }
                if let Some(embedding) = named.embedded_from {
                    let handle = self.check_reference(embedding)?;
                    if !handle.embed_interop_types || handle.is_module() {
                        return Err(ModelError::invalid_assembly(format!(
                            "'{}' does not embed interop types",
                            handle.display
                        )));
                    }
                }
            }
            SymbolData::Member(member) => {
                if !self.builder.symbols.data(member.container).is_type() {
                    return Err(ModelError::invalid_symbol(format!(
                        "container of member '{}' is not a type",
                        member.name
                    )));
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn check_bases(&self, ty: SymbolId, bases: &[SymbolId]) -> ModelResult<()> {
        self.check_symbol(ty)?;
        if !matches!(self.builder.symbols.data(ty), SymbolData::Named(_)) {
            return Err(ModelError::invalid_symbol(format!(
                "bases given for '{}', which is not a named type",
                self.builder.symbols.display(ty)
            )));
        }
        for base in bases {
            self.check_symbol(*base)?;
            if !self.builder.symbols.data(*base).is_type() {
                return Err(ModelError::invalid_symbol(format!(
                    "base of '{}' is not a type",
                    self.builder.symbols.display(ty)
                )));
            }
        }
        Ok(())
    }

    fn check_file(&self, file: FileId) -> ModelResult<()> {
        if file.index() < self.builder.files.len() {
            Ok(())
        } else {
            Err(ModelError::UnknownFile(file.index() as u32))
        }
    }

    fn check_import_kind(&self, kind: &ImportKind) -> ModelResult<()> {
        if let ImportKind::ExternAlias { alias, references } = kind {
            for reference in references {
                let handle = self.check_reference(*reference)?;
                if !handle.aliases.contains(alias) {
                    return Err(ModelError::invalid_import(format!(
                        "'{}' is not bound to extern alias '{}'",
                        handle.display, alias
                    )));
                }
            }
        }
        for target in kind.targets() {
            self.check_symbol(target)?;
        }
        Ok(())
    }

    fn check_occurrence(&self, occurrence: &Occurrence) -> ModelResult<()> {
        self.check_symbol(occurrence.symbol)?;
        match occurrence.via {
            Some(import) if import.index() >= self.builder.imports.len() => {
                Err(ModelError::UnknownImport(import.index() as u32))
            }
            _ => Ok(()),
        }
    }

    fn check_declaration(&self, declaration: &Declaration) -> ModelResult<()> {
        self.check_symbol(declaration.symbol)?;
        self.check_file(declaration.file)?;
        for occurrence in declaration
            .signature
            .iter()
            .chain(declaration.doc_references.iter())
        {
            self.check_occurrence(occurrence)?;
        }
        for value in &declaration.default_values {
            self.check_node(value)?;
        }
        for attribute in &declaration.attributes {
            self.check_attribute(attribute)?;
        }
        if let Some(body) = &declaration.body {
            self.check_node(body)?;
        }
        Ok(())
    }

    fn check_attribute(&self, attribute: &BoundAttribute) -> ModelResult<()> {
        self.check_occurrence(&attribute.constructor)?;
        attribute
            .arguments
            .iter()
            .try_for_each(|argument| self.check_node(argument))
    }

    fn check_node(&self, node: &BoundNode) -> ModelResult<()> {
        match node {
            BoundNode::Literal => Ok(()),
            BoundNode::Identifier(occurrence) | BoundNode::TypeExpression(occurrence) => {
                self.check_occurrence(occurrence)
            }
            BoundNode::MemberAccess { receiver, member } => {
                if let Some(receiver) = receiver {
                    self.check_node(receiver)?;
                }
                self.check_occurrence(member)
            }
            BoundNode::Invocation {
                receiver,
                method,
                arguments,
            } => {
                if let Some(receiver) = receiver {
                    self.check_node(receiver)?;
                }
                self.check_occurrence(method)?;
                arguments.iter().try_for_each(|a| self.check_node(a))
            }
            BoundNode::ObjectCreation {
                constructor,
                arguments,
            } => {
                self.check_occurrence(constructor)?;
                arguments.iter().try_for_each(|a| self.check_node(a))
            }
            BoundNode::Conversion { operand, target } => {
                self.check_node(operand)?;
                self.check_occurrence(target)
            }
            BoundNode::NameOf(NameOfTarget::Resolved(occurrence)) => {
                self.check_occurrence(occurrence)
            }
            BoundNode::NameOf(NameOfTarget::Ambiguous(candidates)) => candidates
                .iter()
                .try_for_each(|c| self.check_symbol(*c)),
            BoundNode::Synthesized(symbol) => self.check_symbol(*symbol),
            BoundNode::LocalDeclaration { ty, initializer } => {
                self.check_occurrence(ty)?;
                match initializer {
                    Some(initializer) => self.check_node(initializer),
                    None => Ok(()),
                }
            }
            BoundNode::Lambda { parameters, body } => {
                for parameter in parameters {
                    self.check_occurrence(parameter)?;
                }
                self.check_node(body)
            }
            BoundNode::Block(nodes) | BoundNode::Bad(nodes) => {
                nodes.iter().try_for_each(|n| self.check_node(n))
            }
            BoundNode::Unsafe(inner) => self.check_node(inner),
        }
    }
}
