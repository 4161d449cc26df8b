//! Email ingestion path
//!
//! Converts email messages into the same chunk shape the document pipeline
//! produces, carrying sender/recipient metadata on every chunk.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::chunk::{ChunkingContextBuilder, DataChunk, DataChunker};

/// An address with an optional display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAddress {
    pub address: String,
    pub name: Option<String>,
}

impl EmailAddress {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            name: None,
        }
    }

    pub fn with_name(address: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            name: Some(name.into()),
        }
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} <{}>", name, self.address),
            None => write!(f, "{}", self.address),
        }
    }
}

/// One email message ready for chunking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub message_id: String,
    pub subject: String,
    pub sender: EmailAddress,
    pub recipients: Vec<EmailAddress>,
    pub body_text: String,
    pub body_html: Option<String>,
    pub date_sent: Option<DateTime<Utc>>,
    pub folder: Option<String>,
}

impl EmailMessage {
    /// Plain-text body used for chunking
    pub fn body(&self) -> &str {
        &self.body_text
    }
}

/// Converts email messages into data chunks
///
/// Mirrors the document preprocessor so both ingestion paths hand the
/// storage collaborator the same chunk shape.
pub struct EmailPreprocessor {
    chunker: DataChunker,
}

impl EmailPreprocessor {
    pub fn new() -> Self {
        Self {
            chunker: DataChunker::new(),
        }
    }

    pub fn with_chunker(chunker: DataChunker) -> Self {
        Self { chunker }
    }

    /// Chunk a single email, numbering chunks from `start_chunk_id`
    pub fn preprocess_email(&self, email: &EmailMessage, start_chunk_id: usize) -> Vec<DataChunk> {
        let recipients = email
            .recipients
            .iter()
            .map(|addr| addr.to_string())
            .collect::<Vec<_>>()
            .join(", ");

        let mut builder = ChunkingContextBuilder::new()
            .for_email()
            .with_email_info(email.subject.clone(), email.sender.to_string())
            .with_email_id(email.message_id.clone())
            .with_start_chunk_id(start_chunk_id);

        if !recipients.is_empty() {
            builder = builder.with_email_recipient(recipients);
        }
        if let Some(date) = &email.date_sent {
            builder = builder.with_email_date(date.to_rfc3339());
        }
        if let Some(folder) = &email.folder {
            builder = builder.with_email_folder(folder.clone());
        }

        self.chunker.chunk(email.body(), &builder.build())
    }

    /// Chunk several emails, keeping chunk ids contiguous across messages
    pub fn preprocess_emails(
        &self,
        emails: &[EmailMessage],
        start_chunk_id: usize,
    ) -> Vec<DataChunk> {
        let mut all_chunks = Vec::new();
        let mut next_id = start_chunk_id;

        for email in emails {
            let chunks = self.preprocess_email(email, next_id);
            next_id += chunks.len();
            all_chunks.extend(chunks);
        }

        all_chunks
    }
}

impl Default for EmailPreprocessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_email(body: &str) -> EmailMessage {
        EmailMessage {
            message_id: "msg_123".to_string(),
            subject: "Project Update".to_string(),
            sender: EmailAddress::with_name("manager@company.com", "The Manager"),
            recipients: vec![EmailAddress::new("team@company.com")],
            body_text: body.to_string(),
            body_html: None,
            date_sent: Some(Utc.with_ymd_and_hms(2024, 1, 15, 14, 30, 0).unwrap()),
            folder: Some("INBOX".to_string()),
        }
    }

    #[test]
    fn test_email_address_display() {
        assert_eq!(
            EmailAddress::with_name("a@b.com", "Ann").to_string(),
            "Ann <a@b.com>"
        );
        assert_eq!(EmailAddress::new("a@b.com").to_string(), "a@b.com");
    }

    #[test]
    fn test_preprocess_email_carries_metadata() {
        let preprocessor = EmailPreprocessor::new();
        let chunks = preprocessor.preprocess_email(&sample_email("Short body."), 0);

        assert_eq!(chunks.len(), 1);
        let metadata = &chunks[0].metadata;
        assert_eq!(metadata.email_subject.as_deref(), Some("Project Update"));
        assert_eq!(
            metadata.email_sender.as_deref(),
            Some("The Manager <manager@company.com>")
        );
        assert_eq!(metadata.email_recipient.as_deref(), Some("team@company.com"));
        assert_eq!(metadata.email_id.as_deref(), Some("msg_123"));
        assert_eq!(metadata.email_folder.as_deref(), Some("INBOX"));
        assert_eq!(metadata.chunk_type.as_deref(), Some("email"));
        assert!(metadata.email_date.as_deref().unwrap().starts_with("2024-01-15"));
    }

    #[test]
    fn test_preprocess_emails_contiguous_ids() {
        let preprocessor = EmailPreprocessor::new();
        let long_body = "word ".repeat(300);
        let emails = vec![sample_email(&long_body), sample_email("Second body.")];

        let chunks = preprocessor.preprocess_emails(&emails, 10);
        assert!(chunks.len() > 2);
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.metadata.chunk_id, 10 + i);
        }
    }

    #[test]
    fn test_empty_body_yields_no_chunks() {
        let preprocessor = EmailPreprocessor::new();
        assert!(preprocessor.preprocess_email(&sample_email("   "), 0).is_empty());
    }
}
