//! Document flattening
//!
//! Serializes parsed document trees back into one linear text stream with
//! heading markers, the input handed to the chunking engine. This is a
//! pure serialization pass: output order exactly mirrors input order and
//! re-flattening the same documents yields byte-identical text.

use crate::parse::types::{Document, Section};

/// Flatten an ordered sequence of documents into a single text stream
///
/// Per document: chapters first (level-1 heading, chapter paragraphs, then
/// nested sections as level-2 headings), then standalone sections, then
/// standalone paragraphs, then tables in their plain-text rendering. All
/// blocks are joined with a double line break; an empty document
/// contributes nothing.
pub fn flatten_documents(documents: &[Document]) -> String {
    let mut parts: Vec<String> = Vec::new();

    for document in documents {
        for chapter in &document.chapters {
            parts.push(format!("# {}", chapter.title));
            for paragraph in &chapter.paragraphs {
                parts.push(paragraph.content.clone());
            }
            for section in &chapter.sections {
                push_section(&mut parts, section);
            }
        }

        for section in &document.sections {
            push_section(&mut parts, section);
        }

        for paragraph in &document.paragraphs {
            parts.push(paragraph.content.clone());
        }

        for table in &document.tables {
            parts.push(table.to_plain_text());
        }
    }

    parts.join("\n\n")
}

fn push_section(parts: &mut Vec<String>, section: &Section) {
    parts.push(format!("## {}", section.title));
    for paragraph in &section.paragraphs {
        parts.push(paragraph.content.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::types::{Chapter, Paragraph, Table};

    fn doc_with_sections() -> Document {
        Document {
            sections: vec![
                Section {
                    title: "Intro".to_string(),
                    paragraphs: vec![Paragraph::new("Hello world.")],
                    ordinal: 1,
                    ..Section::default()
                },
                Section {
                    title: "Next".to_string(),
                    paragraphs: vec![Paragraph::new("More text here.")],
                    ordinal: 2,
                    ..Section::default()
                },
            ],
            ..Document::default()
        }
    }

    #[test]
    fn test_flatten_sections_in_order() {
        let text = flatten_documents(&[doc_with_sections()]);
        assert_eq!(
            text,
            "## Intro\n\nHello world.\n\n## Next\n\nMore text here."
        );
    }

    #[test]
    fn test_flatten_chapters_before_sections() {
        let doc = Document {
            chapters: vec![Chapter {
                title: "One".to_string(),
                paragraphs: vec![Paragraph::new("Chapter prose.")],
                sections: vec![Section {
                    title: "A".to_string(),
                    paragraphs: vec![Paragraph::new("Alpha.")],
                    ..Section::default()
                }],
                ..Chapter::default()
            }],
            sections: vec![Section {
                title: "Standalone".to_string(),
                ..Section::default()
            }],
            ..Document::default()
        };

        let text = flatten_documents(&[doc]);
        assert_eq!(
            text,
            "# One\n\nChapter prose.\n\n## A\n\nAlpha.\n\n## Standalone"
        );
    }

    #[test]
    fn test_flatten_tables_last() {
        let doc = Document {
            paragraphs: vec![Paragraph::new("Body.")],
            tables: vec![Table {
                caption: "T".to_string(),
                headers: vec!["H".to_string()],
                rows: vec![vec!["v".to_string()]],
                ..Table::default()
            }],
            ..Document::default()
        };

        let text = flatten_documents(&[doc]);
        assert!(text.starts_with("Body.\n\nTable: T"));
    }

    #[test]
    fn test_flatten_empty_document_contributes_nothing() {
        assert_eq!(flatten_documents(&[Document::default()]), "");

        let text = flatten_documents(&[Document::default(), doc_with_sections()]);
        assert!(text.starts_with("## Intro"));
    }

    #[test]
    fn test_flatten_concatenates_documents_in_order() {
        let a = doc_with_sections();
        let b = Document {
            paragraphs: vec![Paragraph::new("Tail.")],
            ..Document::default()
        };
        let text = flatten_documents(&[a, b]);
        assert!(text.ends_with("More text here.\n\nTail."));
    }

    #[test]
    fn test_flatten_idempotent() {
        let docs = vec![doc_with_sections()];
        assert_eq!(flatten_documents(&docs), flatten_documents(&docs));
    }
}
