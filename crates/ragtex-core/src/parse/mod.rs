//! Document parsing pipeline
//!
//! Bibliography loading, LaTeX structural parsing, and flattening of the
//! parse tree back into linear text.

mod bibliography;
mod flatten;
mod latex;
mod types;

pub use bibliography::{citation_hash, Bibliography};
pub use flatten::flatten_documents;
pub use latex::LatexParser;
pub use types::{
    Chapter, Citation, Document, Figure, Paragraph, Section, Subsection, Subsubsection, Table,
};
