//! Compilation fixtures: a thin layer over `CompilationBuilder` that sets up
//! the usual shapes (core library, image libraries, classes, members) and a
//! source `Program.Main` whose body the test supplies.

use refscope::{
    AnalysisOptions, AssemblyId, AssemblyIdentity, BoundNode, Compilation, CompilationBuilder,
    Declaration, ExternalReference, FileId, ImportId, ImportKind, Member, MemberKind, NamedType,
    ReferenceId, SpecialType, SymbolId, TextRange, TextSize, Version,
};

/// Byte range helper.
pub fn span(start: u32, end: u32) -> TextRange {
    TextRange::new(TextSize::from(start), TextSize::from(end))
}

pub fn identity(name: &str) -> AssemblyIdentity {
    AssemblyIdentity::new(name, Version::new(1, 0, 0, 0))
}

/// The core library handle and the special types it defines.
#[derive(Clone, Copy, Debug)]
pub struct Corlib {
    pub reference: ReferenceId,
    pub assembly: AssemblyId,
    pub object: SymbolId,
    pub int32: SymbolId,
}

pub struct Fixture {
    pub builder: CompilationBuilder,
    pub file: FileId,
    /// `class Program` in the source assembly.
    pub program: SymbolId,
    next_import_offset: u32,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_options(AnalysisOptions::default())
    }

    pub fn with_options(options: AnalysisOptions) -> Self {
        let mut builder = Compilation::builder("App").options(options);
        let file = builder.add_file("Program.cs");
        let program = builder.symbols().named_type(NamedType {
            name: "Program".into(),
            assembly: AssemblyId::SOURCE,
            container: None,
            arity: 0,
            embedded_from: None,
        });
        Self {
            builder,
            file,
            program,
            next_import_offset: 0,
        }
    }

    /// Add `mscorlib` defining `System.Object` and `System.Int32`.
    pub fn corlib(&mut self) -> Corlib {
        let (reference, assembly) = self.library("mscorlib");
        let object = self.class("Object", assembly);
        let int32 = self.class("Int32", assembly);
        self.builder.set_special_type(SpecialType::Object, object);
        self.builder.set_special_type(SpecialType::Int32, int32);
        Corlib {
            reference,
            assembly,
            object,
            int32,
        }
    }

    /// Add a plain assembly handle and its compiled-image assembly.
    pub fn library(&mut self, name: &str) -> (ReferenceId, AssemblyId) {
        self.handle(ExternalReference::assembly(identity(name)))
    }

    /// Add `reference` and a compiled-image assembly bound to it.
    pub fn handle(&mut self, reference: ExternalReference) -> (ReferenceId, AssemblyId) {
        let reference = self.builder.add_reference(reference);
        let assembly = self
            .builder
            .add_image_assembly(reference)
            .expect("reference was just added");
        (reference, assembly)
    }

    pub fn class(&mut self, name: &str, assembly: AssemblyId) -> SymbolId {
        self.generic_class(name, assembly, 0)
    }

    pub fn generic_class(&mut self, name: &str, assembly: AssemblyId, arity: u32) -> SymbolId {
        self.builder.symbols().named_type(NamedType {
            name: name.into(),
            assembly,
            container: None,
            arity,
            embedded_from: None,
        })
    }

    pub fn nested_class(&mut self, name: &str, container: SymbolId, assembly: AssemblyId) -> SymbolId {
        self.builder.symbols().named_type(NamedType {
            name: name.into(),
            assembly,
            container: Some(container),
            arity: 0,
            embedded_from: None,
        })
    }

    pub fn derived_class(&mut self, name: &str, assembly: AssemblyId, base: SymbolId) -> SymbolId {
        let class = self.class(name, assembly);
        self.builder.symbols().set_bases(class, vec![base]);
        class
    }

    pub fn field(&mut self, container: SymbolId, name: &str, ty: SymbolId) -> SymbolId {
        self.builder.symbols().member(Member {
            kind: MemberKind::Field,
            name: name.into(),
            container,
            signature: vec![ty],
            arity: 0,
        })
    }

    pub fn method(
        &mut self,
        container: SymbolId,
        name: &str,
        arity: u32,
        signature: Vec<SymbolId>,
    ) -> SymbolId {
        self.builder.symbols().member(Member {
            kind: MemberKind::Method,
            name: name.into(),
            container,
            signature,
            arity,
        })
    }

    pub fn namespace(&mut self, name: &str) -> SymbolId {
        self.builder.symbols().namespace(name, None)
    }

    /// Add an import directive to `Program.cs`. Each directive gets its own
    /// line-sized span, in order.
    pub fn import(&mut self, kind: ImportKind) -> ImportId {
        let start = self.next_import_offset;
        self.next_import_offset += 20;
        self.builder.add_import(self.file, span(start, start + 10), kind)
    }

    /// `void Program.Main() { <body> }`
    pub fn main(&mut self, body: BoundNode) -> SymbolId {
        let main = self.method(self.program, "Main", 0, Vec::new());
        self.builder
            .add_declaration(Declaration::new(main, self.file).with_body(body));
        main
    }

    pub fn declare(&mut self, declaration: Declaration) {
        self.builder.add_declaration(declaration);
    }

    pub fn build(self) -> Compilation {
        self.builder.build().expect("fixture should build")
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
