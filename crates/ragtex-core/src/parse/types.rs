//! Value types for the parsed document tree
//!
//! Everything here is produced once by the parser and never mutated
//! afterwards, so instances are safe to share across threads.

use serde::{Deserialize, Serialize};

/// A resolved (or placeholder) bibliographic reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub author: String,
    pub year: String,
    pub title: String,
    pub doi: String,
    /// File the citation was loaded from (or the citing document for placeholders)
    pub source_document: String,
    pub page_reference: String,
    /// Cross-reference key as written in the markup
    pub citation_label: String,
    /// Deterministic identity derived from the key, used for dedup
    pub citation_hash: String,
}

/// A prose paragraph with the citations discovered inside it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    pub content: String,
    pub citations: Vec<Citation>,
}

impl Paragraph {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            citations: Vec::new(),
        }
    }
}

/// A parsed table environment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub caption: String,
    pub label: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub footnotes: Vec<String>,
}

impl Table {
    /// Render the table as a Markdown table
    pub fn to_markdown(&self) -> String {
        if self.headers.is_empty() && self.rows.is_empty() {
            return format!("**Table: {}**\n\n", self.caption);
        }

        let mut lines = Vec::new();
        if !self.caption.is_empty() {
            lines.push(format!("**Table: {}**\n", self.caption));
        }

        if !self.headers.is_empty() {
            lines.push(format!("| {} |", self.headers.join(" | ")));
            lines.push(format!(
                "|{}|",
                vec!["---"; self.headers.len()].join("|")
            ));
        }

        for row in &self.rows {
            lines.push(format!("| {} |", row.join(" | ")));
        }

        format!("{}\n", lines.join("\n"))
    }

    /// Render the table as plain text, starting with `Table: <caption>`
    pub fn to_plain_text(&self) -> String {
        if self.headers.is_empty() && self.rows.is_empty() {
            return format!("Table: {}\n\n", self.caption);
        }

        let mut lines = Vec::new();
        if !self.caption.is_empty() {
            lines.push(format!("Table: {}", self.caption));
        }

        if !self.headers.is_empty() {
            lines.push(self.headers.join(" | "));
            lines.push(
                self.headers
                    .iter()
                    .map(|h| "-".repeat(h.len()))
                    .collect::<Vec<_>>()
                    .join(" | "),
            );
        }

        for row in &self.rows {
            lines.push(row.join(" | "));
        }

        format!("{}\n", lines.join("\n"))
    }
}

/// A parsed figure environment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub caption: String,
    pub label: String,
    pub image_path: String,
}

/// Third-level heading unit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Subsubsection {
    pub title: String,
    pub label: String,
    pub ordinal: usize,
    pub paragraphs: Vec<Paragraph>,
}

/// Second-level heading unit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Subsection {
    pub title: String,
    pub label: String,
    pub ordinal: usize,
    pub paragraphs: Vec<Paragraph>,
    pub subsubsections: Vec<Subsubsection>,
}

/// First-level heading unit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub label: String,
    pub ordinal: usize,
    pub paragraphs: Vec<Paragraph>,
    pub subsections: Vec<Subsection>,
}

/// Chapter unit layered above sections
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub title: String,
    pub label: String,
    pub ordinal: usize,
    pub paragraphs: Vec<Paragraph>,
    pub sections: Vec<Section>,
}

/// Root of the parse tree for one input file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    pub author: String,
    pub year: String,
    pub doi: String,
    pub source_document: String,
    pub page_reference: String,
    pub chapters: Vec<Chapter>,
    pub sections: Vec<Section>,
    pub paragraphs: Vec<Paragraph>,
    pub tables: Vec<Table>,
    pub figures: Vec<Figure>,
}

impl Document {
    /// True when the document carries no renderable content
    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
            && self.sections.is_empty()
            && self.paragraphs.is_empty()
            && self.tables.is_empty()
    }
}
