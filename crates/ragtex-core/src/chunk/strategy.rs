//! Chunking strategies and the shared sliding-window core
//!
//! Every builtin strategy uses the same character-offset sliding window
//! and differs only in its default sizes; `ChunkingStrategy::chunk` is the
//! extension point for future content-aware splitting.

use super::context::ChunkingContext;
use super::types::{ChunkMetadata, DataChunk};

/// Default chunk size in characters for text and document content
pub const DEFAULT_CHUNK_SIZE: usize = 768;
/// Default overlap in characters for text and document content
pub const DEFAULT_OVERLAP_SIZE: usize = 100;
/// Default chunk size in characters for email content
pub const EMAIL_CHUNK_SIZE: usize = 512;
/// Default overlap in characters for email content
pub const EMAIL_OVERLAP_SIZE: usize = 50;

/// An interchangeable chunking algorithm, selected by content-type tag
///
/// Strategies hold no per-call state, so one instance can serve many
/// concurrent `chunk` calls.
pub trait ChunkingStrategy: Send + Sync {
    /// Target chunk size in characters
    fn chunk_size(&self) -> usize;

    /// Characters shared between consecutive chunks
    fn overlap_size(&self) -> usize;

    /// Chunk text; the default implementation is the shared sliding window
    fn chunk(&self, text: &str, context: &ChunkingContext) -> Vec<DataChunk> {
        sliding_window(text, context, self.chunk_size(), self.overlap_size())
    }
}

/// Standard strategy for plain text
pub struct TextStrategy {
    chunk_size: usize,
    overlap_size: usize,
}

impl TextStrategy {
    pub fn new(chunk_size: usize, overlap_size: usize) -> Self {
        Self {
            chunk_size,
            overlap_size,
        }
    }
}

impl Default for TextStrategy {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE, DEFAULT_OVERLAP_SIZE)
    }
}

impl ChunkingStrategy for TextStrategy {
    fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    fn overlap_size(&self) -> usize {
        self.overlap_size
    }
}

/// Strategy for flattened documents
pub struct DocumentStrategy {
    chunk_size: usize,
    overlap_size: usize,
}

impl DocumentStrategy {
    pub fn new(chunk_size: usize, overlap_size: usize) -> Self {
        Self {
            chunk_size,
            overlap_size,
        }
    }
}

impl Default for DocumentStrategy {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE, DEFAULT_OVERLAP_SIZE)
    }
}

impl ChunkingStrategy for DocumentStrategy {
    fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    fn overlap_size(&self) -> usize {
        self.overlap_size
    }
}

/// Strategy for email bodies, sized for shorter messages
pub struct EmailStrategy {
    chunk_size: usize,
    overlap_size: usize,
}

impl EmailStrategy {
    pub fn new(chunk_size: usize, overlap_size: usize) -> Self {
        Self {
            chunk_size,
            overlap_size,
        }
    }
}

impl Default for EmailStrategy {
    fn default() -> Self {
        Self::new(EMAIL_CHUNK_SIZE, EMAIL_OVERLAP_SIZE)
    }
}

impl ChunkingStrategy for EmailStrategy {
    fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    fn overlap_size(&self) -> usize {
        self.overlap_size
    }
}

/// Slice text into overlapping fixed-size chunks with context metadata
///
/// Offsets are character offsets, so multi-byte text never splits inside a
/// scalar value. Empty or whitespace-only input yields an empty sequence.
/// The cursor advances by `max(start + 1, end - overlap)`, which keeps
/// progress strictly positive even when `overlap >= chunk_size`; the
/// realized overlap can therefore be smaller than configured. After the
/// loop a second pass backfills `total_chunks` on every produced chunk.
pub fn sliding_window(
    text: &str,
    context: &ChunkingContext,
    chunk_size: usize,
    overlap_size: usize,
) -> Vec<DataChunk> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let chunk_size = chunk_size.max(1);
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();

    let mut chunks = Vec::new();
    let mut start = 0;
    let mut chunk_id = context.start_chunk_id;

    loop {
        let end = (start + chunk_size).min(len);
        let chunk_text: String = chars[start..end].iter().collect();

        chunks.push(DataChunk {
            text: chunk_text,
            start_idx: start,
            end_idx: end,
            metadata: ChunkMetadata {
                chunk_id,
                chunk_size: end - start,
                total_chunks: 0,
                source_document: context.source_document.clone(),
                page_number: context.page_number,
                section_title: context.section_title.clone(),
                chunk_type: Some(context.chunk_type.clone()),
                created_at: context.created_at.clone(),
                email_subject: context.email_subject.clone(),
                email_sender: context.email_sender.clone(),
                email_recipient: context.email_recipient.clone(),
                email_date: context.email_date.clone(),
                email_id: context.email_id.clone(),
                email_folder: context.email_folder.clone(),
                custom: context.custom_metadata.clone(),
            },
            chunk_type: Some(context.chunk_type.clone()),
            source_document: context.source_document.clone(),
        });
        chunk_id += 1;

        if end >= len {
            break;
        }
        start = (start + 1).max(end.saturating_sub(overlap_size));
    }

    let total = chunks.len();
    for chunk in &mut chunks {
        chunk.metadata.total_chunks = total;
    }

    chunks
}
