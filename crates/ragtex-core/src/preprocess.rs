//! Document preprocessing pipeline
//!
//! Wires bibliography loading, structural parsing, flattening and chunking
//! into one call producing ready-to-index chunks.

use chrono::Utc;
use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::chunk::{ChunkingContextBuilder, DataChunk, DataChunker};
use crate::error::Result;
use crate::parse::{flatten_documents, Bibliography, Document, LatexParser};

/// Default glob for folder ingestion
pub const DEFAULT_DOCUMENT_PATTERN: &str = "**/*.tex";

/// Orchestrates parse -> flatten -> chunk for LaTeX documents
pub struct DocumentPreprocessor {
    parser: LatexParser,
    chunker: DataChunker,
}

impl DocumentPreprocessor {
    /// Create a preprocessor with no bibliography and default chunking
    pub fn new() -> Self {
        Self {
            parser: LatexParser::new(),
            chunker: DataChunker::new(),
        }
    }

    /// Resolve citations against the given bibliography
    pub fn with_bibliography(mut self, bibliography: Bibliography) -> Self {
        self.parser = LatexParser::with_bibliography(bibliography);
        self
    }

    /// Replace the chunking engine
    pub fn with_chunker(mut self, chunker: DataChunker) -> Self {
        self.chunker = chunker;
        self
    }

    /// Preprocess a single document file into chunks
    pub fn preprocess_document(&self, path: &Path) -> Result<Vec<DataChunk>> {
        self.preprocess_documents(&[path.to_path_buf()])
    }

    /// Preprocess several document files into one chunk sequence
    ///
    /// All documents are flattened together and chunked in one call, so
    /// chunk ids run contiguously across the whole set. A parse failure
    /// for any file propagates; an empty path list yields an empty
    /// sequence, never an error.
    pub fn preprocess_documents(&self, paths: &[PathBuf]) -> Result<Vec<DataChunk>> {
        let mut documents = Vec::with_capacity(paths.len());
        for path in paths {
            documents.push(self.parser.parse_file(path)?);
        }
        Ok(self.chunk_documents(&documents))
    }

    /// Preprocess every matching file under a folder, in batch mode
    ///
    /// Files are matched against [`DEFAULT_DOCUMENT_PATTERN`]. Unlike
    /// [`preprocess_documents`](Self::preprocess_documents), a file that
    /// fails to parse is logged and skipped so one bad input cannot sink
    /// the batch.
    pub fn preprocess_folder(&self, folder: &Path) -> Result<Vec<DataChunk>> {
        self.preprocess_folder_matching(folder, DEFAULT_DOCUMENT_PATTERN)
    }

    /// Batch-mode folder preprocessing with a custom glob pattern
    pub fn preprocess_folder_matching(
        &self,
        folder: &Path,
        pattern: &str,
    ) -> Result<Vec<DataChunk>> {
        let pattern = Pattern::new(pattern)?;
        let mut documents = Vec::new();

        for entry in WalkDir::new(folder).follow_links(true) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let relative = path
                .strip_prefix(folder)
                .map(|p| p.to_string_lossy().to_string())
                .unwrap_or_else(|_| path.to_string_lossy().to_string());
            if !pattern.matches(&relative) {
                continue;
            }

            match self.parser.parse_file(path) {
                Ok(document) => documents.push(document),
                Err(e) => {
                    tracing::error!("Skipping document {:?}: {}", path, e);
                }
            }
        }

        tracing::debug!("Parsed {} documents from {:?}", documents.len(), folder);
        Ok(self.chunk_documents(&documents))
    }

    /// Flatten the collected documents and chunk the result once
    fn chunk_documents(&self, documents: &[Document]) -> Vec<DataChunk> {
        let text = flatten_documents(documents);

        let mut builder = ChunkingContextBuilder::new()
            .for_document()
            .with_created_at(Utc::now().to_rfc3339());
        if let [document] = documents {
            builder = builder.with_source(document.source_document.clone());
        }

        self.chunker.chunk(&text, &builder.build())
    }
}

impl Default for DocumentPreprocessor {
    fn default() -> Self {
        Self::new()
    }
}
