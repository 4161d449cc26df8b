//! Chunking engine
//!
//! Strategy-dispatched segmentation of linear text into overlapping,
//! metadata-carrying chunks with deterministic sequential ids.

mod context;
mod strategy;
mod types;

pub use context::{ChunkingContext, ChunkingContextBuilder};
pub use strategy::{
    sliding_window, ChunkingStrategy, DocumentStrategy, EmailStrategy, TextStrategy,
    DEFAULT_CHUNK_SIZE, DEFAULT_OVERLAP_SIZE, EMAIL_CHUNK_SIZE, EMAIL_OVERLAP_SIZE,
};
pub use types::{ChunkKind, ChunkMetadata, DataChunk};

use std::collections::HashMap;
use std::sync::Arc;

/// Registry dispatching chunking calls to strategies by content-type tag
///
/// The builtin text/document/email strategies are pre-registered. New
/// strategies may be registered under new tags at setup time; dispatch on
/// an unregistered tag falls back to the default strategy. Registration
/// requires `&mut self`, so a shared instance stays immutable and can
/// serve concurrent `chunk` calls.
pub struct DataChunker {
    default_strategy: Arc<dyn ChunkingStrategy>,
    strategies: HashMap<String, Arc<dyn ChunkingStrategy>>,
}

impl DataChunker {
    /// Create a chunker with the builtin strategies and a text default
    pub fn new() -> Self {
        Self::with_default_strategy(Arc::new(TextStrategy::default()))
    }

    /// Create a chunker with the builtin strategies and a custom fallback
    pub fn with_default_strategy(default_strategy: Arc<dyn ChunkingStrategy>) -> Self {
        let mut chunker = Self {
            default_strategy,
            strategies: HashMap::new(),
        };
        chunker.register_strategy(ChunkKind::Text.as_str(), Arc::new(TextStrategy::default()));
        chunker.register_strategy(
            ChunkKind::Document.as_str(),
            Arc::new(DocumentStrategy::default()),
        );
        chunker.register_strategy(ChunkKind::Email.as_str(), Arc::new(EmailStrategy::default()));
        chunker
    }

    /// Register a strategy under a tag, replacing any previous registration
    pub fn register_strategy(&mut self, tag: impl Into<String>, strategy: Arc<dyn ChunkingStrategy>) {
        self.strategies.insert(tag.into(), strategy);
    }

    /// Chunk text using the strategy selected by `context.chunk_type`
    pub fn chunk(&self, text: &str, context: &ChunkingContext) -> Vec<DataChunk> {
        let strategy = self
            .strategies
            .get(&context.chunk_type)
            .unwrap_or(&self.default_strategy);
        strategy.chunk(text, context)
    }
}

impl Default for DataChunker {
    fn default() -> Self {
        Self::new()
    }
}
