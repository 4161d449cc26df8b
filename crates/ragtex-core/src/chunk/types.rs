//! Core types for chunked output

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Kind of content a builtin strategy is registered for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChunkKind {
    Text,
    Document,
    Email,
}

impl ChunkKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Document => "document",
            Self::Email => "email",
        }
    }
}

/// Metadata attached to every chunk
///
/// `total_chunks` is backfilled in a second pass once the whole sequence
/// for a call has been produced; it is only meaningful after the chunking
/// call returns. All other fields are valid immediately.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// Sequential id, starting from the context's `start_chunk_id`
    pub chunk_id: usize,
    /// Size of the chunk in characters
    pub chunk_size: usize,
    /// Number of chunks produced by the same call, backfilled post-loop
    pub total_chunks: usize,
    pub source_document: Option<String>,
    pub page_number: Option<u32>,
    pub section_title: Option<String>,
    pub chunk_type: Option<String>,
    pub created_at: Option<String>,
    // Email-specific fields for the alternate ingestion path
    pub email_subject: Option<String>,
    pub email_sender: Option<String>,
    pub email_recipient: Option<String>,
    pub email_date: Option<String>,
    pub email_id: Option<String>,
    pub email_folder: Option<String>,
    /// Caller-supplied extension fields, copied through untouched
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub custom: HashMap<String, serde_json::Value>,
}

/// A contiguous slice of source text with attached metadata
///
/// Created only by the chunking engine and read-only afterwards; offsets
/// are half-open character offsets into the chunked text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataChunk {
    pub text: String,
    pub start_idx: usize,
    pub end_idx: usize,
    pub metadata: ChunkMetadata,
    /// Denormalized from metadata for convenience
    pub chunk_type: Option<String>,
    /// Denormalized from metadata for convenience
    pub source_document: Option<String>,
}
