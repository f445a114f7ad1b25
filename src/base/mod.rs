//! Foundation types for the refscope analysis.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`FileId`] - Interned source file identifiers
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`Name`] - Cheap-to-clone identifier text
//!
//! This module has NO dependencies on other refscope modules.

mod file_id;

pub use file_id::FileId;
pub use smol_str::SmolStr as Name;
pub use text_size::{TextRange, TextSize};

// Re-export text-size types for convenience
pub use text_size;
