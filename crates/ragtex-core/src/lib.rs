//! Ragtex Core Library
//!
//! Core functionality for ragtex: turning long-form technical documents
//! (primarily LaTeX) into retrieval-ready text chunks with structural and
//! citation metadata.
//!
//! # Features
//! - Hierarchical LaTeX structural parsing (chapters, sections, paragraphs,
//!   tables, figures)
//! - BibTeX-subset bibliography loading with inline citation resolution
//! - Deterministic flattening of the parse tree into linear text
//! - Strategy-dispatched sliding-window chunking with overlap
//! - Email message chunking for the alternate ingestion path
//!
//! Embedding and vector storage are external collaborators; this crate
//! only produces the ordered chunk sequence they consume.

pub mod chunk;
pub mod email;
pub mod error;
pub mod parse;
pub mod preprocess;

pub use chunk::{
    sliding_window, ChunkKind, ChunkMetadata, ChunkingContext, ChunkingContextBuilder,
    ChunkingStrategy, DataChunk, DataChunker, DocumentStrategy, EmailStrategy, TextStrategy,
};
pub use email::{EmailAddress, EmailMessage, EmailPreprocessor};
pub use error::{Error, RagtexError, Result};
pub use parse::{
    citation_hash, flatten_documents, Bibliography, Chapter, Citation, Document, Figure,
    LatexParser, Paragraph, Section, Subsection, Subsubsection, Table,
};
pub use preprocess::{DocumentPreprocessor, DEFAULT_DOCUMENT_PATTERN};
