//! Chunking context and its fluent builder
//!
//! A [`ChunkingContext`] bundles the configuration and metadata for one
//! chunking invocation; it is not persisted and every produced chunk
//! copies the relevant fields into its own metadata.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::types::ChunkKind;

/// Configuration and metadata bundle passed into every chunking call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkingContext {
    /// Strategy selector tag; unregistered tags fall back to the default strategy
    pub chunk_type: String,
    pub source_document: Option<String>,
    pub page_number: Option<u32>,
    pub section_title: Option<String>,
    pub created_at: Option<String>,
    // Email-specific fields
    pub email_subject: Option<String>,
    pub email_sender: Option<String>,
    pub email_recipient: Option<String>,
    pub email_date: Option<String>,
    pub email_id: Option<String>,
    pub email_folder: Option<String>,
    /// First chunk id handed out by this call
    pub start_chunk_id: usize,
    /// Extension fields copied into every chunk's metadata
    pub custom_metadata: HashMap<String, serde_json::Value>,
}

impl Default for ChunkingContext {
    fn default() -> Self {
        Self {
            chunk_type: ChunkKind::Text.as_str().to_string(),
            source_document: None,
            page_number: None,
            section_title: None,
            created_at: None,
            email_subject: None,
            email_sender: None,
            email_recipient: None,
            email_date: None,
            email_id: None,
            email_folder: None,
            start_chunk_id: 0,
            custom_metadata: HashMap::new(),
        }
    }
}

/// Fluent builder for [`ChunkingContext`]
#[derive(Debug, Default)]
pub struct ChunkingContextBuilder {
    context: ChunkingContext,
}

impl ChunkingContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the text strategy
    pub fn for_text(mut self) -> Self {
        self.context.chunk_type = ChunkKind::Text.as_str().to_string();
        self
    }

    /// Select the document strategy
    pub fn for_document(mut self) -> Self {
        self.context.chunk_type = ChunkKind::Document.as_str().to_string();
        self
    }

    /// Select the email strategy
    pub fn for_email(mut self) -> Self {
        self.context.chunk_type = ChunkKind::Email.as_str().to_string();
        self
    }

    /// Select a custom strategy tag
    pub fn for_kind(mut self, tag: impl Into<String>) -> Self {
        self.context.chunk_type = tag.into();
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.context.source_document = Some(source.into());
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.context.page_number = Some(page);
        self
    }

    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.context.section_title = Some(section.into());
        self
    }

    pub fn with_created_at(mut self, created_at: impl Into<String>) -> Self {
        self.context.created_at = Some(created_at.into());
        self
    }

    /// Set the subject and sender common to every email chunk
    pub fn with_email_info(
        mut self,
        subject: impl Into<String>,
        sender: impl Into<String>,
    ) -> Self {
        self.context.email_subject = Some(subject.into());
        self.context.email_sender = Some(sender.into());
        self
    }

    pub fn with_email_recipient(mut self, recipient: impl Into<String>) -> Self {
        self.context.email_recipient = Some(recipient.into());
        self
    }

    pub fn with_email_id(mut self, email_id: impl Into<String>) -> Self {
        self.context.email_id = Some(email_id.into());
        self
    }

    pub fn with_email_date(mut self, email_date: impl Into<String>) -> Self {
        self.context.email_date = Some(email_date.into());
        self
    }

    pub fn with_email_folder(mut self, folder: impl Into<String>) -> Self {
        self.context.email_folder = Some(folder.into());
        self
    }

    pub fn with_start_chunk_id(mut self, chunk_id: usize) -> Self {
        self.context.start_chunk_id = chunk_id;
        self
    }

    pub fn with_custom_metadata(
        mut self,
        metadata: HashMap<String, serde_json::Value>,
    ) -> Self {
        self.context.custom_metadata = metadata;
        self
    }

    pub fn build(self) -> ChunkingContext {
        self.context
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_context_is_text() {
        let context = ChunkingContext::default();
        assert_eq!(context.chunk_type, "text");
        assert_eq!(context.start_chunk_id, 0);
    }

    #[test]
    fn test_builder_document_context() {
        let context = ChunkingContextBuilder::new()
            .for_document()
            .with_source("paper.tex")
            .with_page(5)
            .with_section("Methodology")
            .with_start_chunk_id(100)
            .build();

        assert_eq!(context.chunk_type, "document");
        assert_eq!(context.source_document.as_deref(), Some("paper.tex"));
        assert_eq!(context.page_number, Some(5));
        assert_eq!(context.section_title.as_deref(), Some("Methodology"));
        assert_eq!(context.start_chunk_id, 100);
    }

    #[test]
    fn test_builder_email_context() {
        let context = ChunkingContextBuilder::new()
            .for_email()
            .with_email_info("Meeting Notes", "john@example.com")
            .with_email_recipient("team@example.com")
            .with_email_id("msg_123")
            .build();

        assert_eq!(context.chunk_type, "email");
        assert_eq!(context.email_subject.as_deref(), Some("Meeting Notes"));
        assert_eq!(context.email_sender.as_deref(), Some("john@example.com"));
        assert_eq!(context.email_recipient.as_deref(), Some("team@example.com"));
        assert_eq!(context.email_id.as_deref(), Some("msg_123"));
    }

    #[test]
    fn test_builder_custom_metadata() {
        let mut custom = HashMap::new();
        custom.insert("language".to_string(), serde_json::json!("en"));

        let context = ChunkingContextBuilder::new()
            .for_kind("code")
            .with_custom_metadata(custom)
            .build();

        assert_eq!(context.chunk_type, "code");
        assert_eq!(
            context.custom_metadata.get("language"),
            Some(&serde_json::json!("en"))
        );
    }
}
