//! External reference handles and logical assembly identities.
//!
//! A compilation carries an ordered list of [`ExternalReference`]s. Each entry
//! is a distinct handle even when two entries describe the same
//! [`AssemblyIdentity`]; usage is always tracked per handle.

use std::fmt;

use crate::base::Name;

/// Four-part assembly version (`major.minor.build.revision`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u16,
    pub minor: u16,
    pub build: u16,
    pub revision: u16,
}

impl Version {
    pub const fn new(major: u16, minor: u16, build: u16, revision: u16) -> Self {
        Self {
            major,
            minor,
            build,
            revision,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.build, self.revision
        )
    }
}

/// Logical identity of an assembly, independent of the handle that supplied it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AssemblyIdentity {
    pub name: Name,
    pub version: Version,
    /// Empty for culture-neutral assemblies.
    pub culture: Name,
    pub public_key_token: Option<[u8; 8]>,
}

impl AssemblyIdentity {
    /// A culture-neutral, unsigned identity.
    pub fn new(name: impl Into<Name>, version: Version) -> Self {
        Self {
            name: name.into(),
            version,
            culture: Name::default(),
            public_key_token: None,
        }
    }

    pub fn with_culture(mut self, culture: impl Into<Name>) -> Self {
        self.culture = culture.into();
        self
    }

    pub fn with_public_key_token(mut self, token: [u8; 8]) -> Self {
        self.public_key_token = Some(token);
        self
    }
}

impl fmt::Display for AssemblyIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let culture = if self.culture.is_empty() {
            "neutral"
        } else {
            self.culture.as_str()
        };
        write!(
            f,
            "{}, Version={}, Culture={}, PublicKeyToken=",
            self.name, self.version, culture
        )?;
        match self.public_key_token {
            Some(token) => token.iter().try_for_each(|b| write!(f, "{:02x}", b)),
            None => f.write_str("null"),
        }
    }
}

/// Identifier of one handle in a compilation's reference list.
///
/// Ids are stable across [`Compilation::retain_references`](crate::Compilation::retain_references),
/// so a used set computed on one aggregate can be compared with another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReferenceId(u32);

impl ReferenceId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Whether a handle contributes a separate assembly or a module merged into
/// the assembly being compiled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    Assembly,
    /// Modules are linked into the output and never reported as used.
    Module,
}

/// One entry in the compilation's ordered reference list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExternalReference {
    pub identity: AssemblyIdentity,
    pub kind: ReferenceKind,
    /// Extern alias names bound to this handle. Empty means the handle is
    /// visible through the global namespace.
    pub aliases: Vec<Name>,
    pub embed_interop_types: bool,
    /// Display string for diagnostics and logs (usually a file name).
    pub display: Name,
}

impl ExternalReference {
    /// An assembly handle visible through the global namespace.
    pub fn assembly(identity: AssemblyIdentity) -> Self {
        let display = identity.name.clone();
        Self {
            identity,
            kind: ReferenceKind::Assembly,
            aliases: Vec::new(),
            embed_interop_types: false,
            display,
        }
    }

    /// A module handle.
    pub fn module(identity: AssemblyIdentity) -> Self {
        Self {
            kind: ReferenceKind::Module,
            ..Self::assembly(identity)
        }
    }

    pub fn with_alias(mut self, alias: impl Into<Name>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn with_embedded_interop_types(mut self) -> Self {
        self.embed_interop_types = true;
        self
    }

    pub fn with_display(mut self, display: impl Into<Name>) -> Self {
        self.display = display.into();
        self
    }

    pub fn is_module(&self) -> bool {
        self.kind == ReferenceKind::Module
    }
}
