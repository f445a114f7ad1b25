/// Identifier for a source file within one compilation.
///
/// File ids are handed out densely by the compilation builder in the order
/// files are added, so they double as indexes into the file list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileId(u32);

impl FileId {
    /// Create a file id from a raw index.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw index of this file.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}
