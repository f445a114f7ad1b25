//! Used-reference analysis.
//!
//! ## Pipeline
//!
//! ```text
//! Compilation::usage()
//!     │
//!     ▼
//! accumulator   → one walk per aggregate, merged and frozen
//!     │
//!     ▼
//! walker        → declarations, bodies, attributes, doc references
//!     │  ├── closure       → constructed types/methods, arrays, pointers, tuples
//!     │  └── canonicalize  → symbol → reference handle (memoized)
//!     ▼
//! imports       → per-directive records, hidden diagnostics
//! ```

mod accumulator;
mod canonicalize;
mod closure;
mod imports;
mod records;
mod walker;

pub use accumulator::UsageSummary;
pub use canonicalize::Canonicalizer;
pub use records::{ImportDirectiveRecord, SymbolUsageRecord};

pub(crate) use accumulator::compute_usage;
pub(crate) use imports::{import_records, unused_import_diagnostics};
