//! Hierarchical LaTeX structural parser
//!
//! Recovers chapters, sections, paragraphs, tables, figures and citations
//! from a flat markup stream. Parsing is regex-driven over a pragmatic
//! subset of LaTeX: structural commands delimit the hierarchy, table and
//! figure environments are lifted out before prose extraction, and
//! citation commands are resolved inline against a [`Bibliography`].
//!
//! Malformed substructures (a table with no rows, a block without a
//! recognizable heading) are dropped rather than failing the parse, so
//! ingestion stays resilient to partially well-formed input.

use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;

use crate::error::{RagtexError, Result};
use crate::parse::bibliography::{citation_hash, Bibliography};
use crate::parse::types::{Chapter, Citation, Document, Figure, Paragraph, Section, Table};

lazy_static! {
    static ref TITLE_RE: Regex = Regex::new(r"\\title\{([^}]+)\}").unwrap();
    static ref AUTHOR_RE: Regex = Regex::new(r"\\author\{([^}]+)\}").unwrap();
    static ref DATE_RE: Regex = Regex::new(r"\\date\{([^}]+)\}").unwrap();
    static ref YEAR_RE: Regex = Regex::new(r"\b(\d{4})\b").unwrap();
    static ref DOI_RE: Regex = Regex::new(r"\\doi\{([^}]+)\}").unwrap();
    static ref TABLE_ENV_RE: Regex =
        Regex::new(r"(?s)\\begin\{table\}.*?\\end\{table\}").unwrap();
    static ref FIGURE_ENV_RE: Regex =
        Regex::new(r"(?s)\\begin\{figure\}.*?\\end\{figure\}").unwrap();
    static ref TABULAR_ENV_RE: Regex =
        Regex::new(r"(?s)\\begin\{tabular\}(.*?)\\end\{tabular\}").unwrap();
    static ref DOCUMENT_ENV_RE: Regex =
        Regex::new(r"(?s)\\begin\{document\}.*?\\end\{document\}").unwrap();
    static ref CAPTION_RE: Regex = Regex::new(r"\\caption\{([^}]+)\}").unwrap();
    static ref LABEL_RE: Regex = Regex::new(r"\\label\{([^}]+)\}").unwrap();
    static ref GRAPHICS_RE: Regex = Regex::new(r"\\includegraphics\{([^}]+)\}").unwrap();
    static ref CAPTION_TAG_RE: Regex = Regex::new(r"\\caption\{[^}]*\}").unwrap();
    static ref LABEL_TAG_RE: Regex = Regex::new(r"\\label\{[^}]*\}").unwrap();
    static ref GRAPHICS_TAG_RE: Regex = Regex::new(r"\\includegraphics\{[^}]*\}").unwrap();
    static ref COLUMN_SPEC_RE: Regex = Regex::new(r"^\s*\{[^}]*\}").unwrap();
    static ref EXTRA_BLANK_RE: Regex = Regex::new(r"\n\s*\n\s*\n").unwrap();
    static ref HEADING_RE: Regex =
        Regex::new(r"\\(chapter|subsubsection|subsection|section)\*?\{([^}]+)\}").unwrap();
    static ref CHAPTER_CMD_RE: Regex = Regex::new(r"\\chapter\*?\{[^}]+\}").unwrap();
    static ref SECTION_HEADING_RE: Regex =
        Regex::new(r"\\(subsubsection|subsection|section)\*?\{([^}]+)\}").unwrap();
    static ref PAR_SPLIT_RE: Regex = Regex::new(r"\n\s*\n|\s*\\par\s*").unwrap();
    static ref CITE_RE: Regex =
        Regex::new(r"\\(citeauthor|citeyear|citep|citet|cite)\{([^}]+)\}").unwrap();
}

/// Hierarchy level named by a structural command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeadingLevel {
    Chapter,
    Section,
    Subsection,
    Subsubsection,
}

impl HeadingLevel {
    fn from_command(command: &str) -> Self {
        match command {
            "chapter" => Self::Chapter,
            "section" => Self::Section,
            "subsection" => Self::Subsection,
            _ => Self::Subsubsection,
        }
    }
}

/// One structural command paired with the content that follows it
#[derive(Debug)]
struct HeadingBlock<'a> {
    level: HeadingLevel,
    title: &'a str,
    /// Byte offset of the command itself
    start: usize,
    /// Text between this command and the next heading of any scanned level
    content: &'a str,
}

/// Scan for heading commands, yielding (heading, following-content) pairs
fn tokenize_headings<'a>(text: &'a str, re: &Regex) -> Vec<HeadingBlock<'a>> {
    let matches: Vec<regex::Captures> = re.captures_iter(text).collect();
    let mut blocks = Vec::new();

    for (i, caps) in matches.iter().enumerate() {
        let (Some(whole), Some(command), Some(title)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            continue;
        };

        let content_end = matches
            .get(i + 1)
            .and_then(|next| next.get(0))
            .map(|m| m.start())
            .unwrap_or(text.len());

        blocks.push(HeadingBlock {
            level: HeadingLevel::from_command(command.as_str()),
            title: title.as_str(),
            start: whole.start(),
            content: &text[whole.end()..content_end],
        });
    }

    blocks
}

/// Text preceding the first heading command (the whole text if there is none)
fn leading_content<'a>(text: &'a str, re: &Regex) -> &'a str {
    match re.find(text) {
        Some(m) => &text[..m.start()],
        None => text,
    }
}

/// Parser for LaTeX-like markup, holding the bibliography used for
/// citation resolution
#[derive(Debug, Clone, Default)]
pub struct LatexParser {
    bibliography: Bibliography,
}

impl LatexParser {
    /// Create a parser with no bibliography; every citation becomes a placeholder
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser resolving citations against the given bibliography
    pub fn with_bibliography(bibliography: Bibliography) -> Self {
        Self { bibliography }
    }

    /// The bibliography used for citation resolution
    pub fn bibliography(&self) -> &Bibliography {
        &self.bibliography
    }

    /// Parse a file into a [`Document`]
    ///
    /// An unreadable file surfaces as a document-scoped error carrying the
    /// failing path; it is never silently turned into an empty document.
    pub fn parse_file(&self, path: &Path) -> Result<Document> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| RagtexError::document_parse(path.to_string_lossy(), e))?;
        Ok(self.parse_text(&text, &path.to_string_lossy()))
    }

    /// Parse markup text into a [`Document`]
    ///
    /// `source` identifies the originating file and is recorded on the
    /// document and on every placeholder citation synthesized for it.
    pub fn parse_text(&self, text: &str, source: &str) -> Document {
        let title = capture_or(&TITLE_RE, text, "Untitled");
        let author = capture_or(&AUTHOR_RE, text, "Unknown Author");
        let year = extract_year(text);
        let doi = capture_or(&DOI_RE, text, "");

        // Tables and figures come out of the raw text; the next step
        // removes their environments entirely.
        let tables = parse_tables(text);
        let figures = parse_figures(text);

        let cleaned = remove_environments(text);

        let chapters = self.parse_chapters(&cleaned, source);
        let sections = if chapters.is_empty() {
            self.parse_sections(&cleaned, source)
        } else {
            // With chapters present, only pre-chapter text still holds
            // document-level sections; everything after belongs to a chapter.
            self.parse_sections(leading_content(&cleaned, &CHAPTER_CMD_RE), source)
        };
        let paragraphs = self.parse_paragraphs(leading_content(&cleaned, &HEADING_RE), source);

        Document {
            title,
            author,
            year,
            doi,
            source_document: source.to_string(),
            page_reference: "1".to_string(),
            chapters,
            sections,
            paragraphs,
            tables,
            figures,
        }
    }

    /// Extract chapter blocks and their contents
    ///
    /// Chapters are a flat construct layered on top of section text: a
    /// chapter spans from its command to the next chapter command.
    /// Chapter-level paragraphs are the prose between the chapter tag and
    /// its first section boundary; sections are re-derived from the full
    /// chapter span.
    fn parse_chapters(&self, text: &str, source: &str) -> Vec<Chapter> {
        let blocks = tokenize_headings(text, &HEADING_RE);
        let chapter_indices: Vec<usize> = blocks
            .iter()
            .enumerate()
            .filter(|(_, b)| b.level == HeadingLevel::Chapter)
            .map(|(i, _)| i)
            .collect();

        let mut chapters = Vec::new();
        for (n, &i) in chapter_indices.iter().enumerate() {
            let span_end = chapter_indices
                .get(n + 1)
                .map(|&j| blocks[j].start)
                .unwrap_or(text.len());
            let span = &text[blocks[i].start..span_end];

            chapters.push(Chapter {
                title: blocks[i].title.to_string(),
                label: String::new(),
                ordinal: n + 1,
                paragraphs: self.parse_paragraphs(blocks[i].content, source),
                sections: self.parse_sections(span, source),
            });
        }

        chapters
    }

    /// Extract section blocks from text
    ///
    /// A `\begin{document}...\end{document}` wrapper is replaced by just
    /// the closing marker first. Blocks opened by a subsection-level
    /// command carry no `\section` title and are discarded.
    fn parse_sections(&self, text: &str, source: &str) -> Vec<Section> {
        let text = DOCUMENT_ENV_RE.replace_all(text, r"\end{document}");

        let mut sections = Vec::new();
        for block in tokenize_headings(text.as_ref(), &SECTION_HEADING_RE) {
            if block.level != HeadingLevel::Section {
                continue;
            }
            sections.push(Section {
                title: block.title.to_string(),
                label: String::new(),
                ordinal: sections.len() + 1,
                paragraphs: self.parse_paragraphs(block.content, source),
                subsections: Vec::new(),
            });
        }

        sections
    }

    /// Split block text into paragraphs, resolving citations in each
    ///
    /// Blocks are delimited by blank lines or an explicit `\par`. A block
    /// that is empty after trimming, or that still begins with a command
    /// token, is treated as non-prose and dropped.
    fn parse_paragraphs(&self, text: &str, source: &str) -> Vec<Paragraph> {
        let mut paragraphs = Vec::new();

        for block in PAR_SPLIT_RE.split(text) {
            let block = block.trim();
            if block.is_empty() || block.starts_with('\\') {
                continue;
            }

            let (content, citations) = self.resolve_citations(block, source);
            if content.trim().is_empty() {
                continue;
            }

            paragraphs.push(Paragraph { content, citations });
        }

        paragraphs
    }

    /// Replace citation commands with readable text, collecting citations
    ///
    /// A single forward pass builds a new buffer, so earlier replacements
    /// can never invalidate later match offsets.
    fn resolve_citations(&self, text: &str, source: &str) -> (String, Vec<Citation>) {
        let mut output = String::with_capacity(text.len());
        let mut citations = Vec::new();
        let mut last_end = 0;

        for caps in CITE_RE.captures_iter(text) {
            let (Some(whole), Some(command), Some(key)) =
                (caps.get(0), caps.get(1), caps.get(2))
            else {
                continue;
            };

            let citation = self.lookup_or_placeholder(key.as_str(), source);
            output.push_str(&text[last_end..whole.start()]);
            output.push_str(&render_citation(&citation, command.as_str()));
            citations.push(citation);
            last_end = whole.end();
        }

        output.push_str(&text[last_end..]);
        (output, citations)
    }

    /// Resolve a key against the bibliography or synthesize a placeholder
    fn lookup_or_placeholder(&self, key: &str, source: &str) -> Citation {
        if let Some(citation) = self.bibliography.get(key) {
            return citation.clone();
        }

        Citation {
            author: "Unknown".to_string(),
            year: "Unknown".to_string(),
            title: "Unknown".to_string(),
            doi: String::new(),
            source_document: source.to_string(),
            page_reference: String::new(),
            citation_label: key.to_string(),
            citation_hash: citation_hash(key),
        }
    }
}

/// Render a citation according to the command variant that referenced it
fn render_citation(citation: &Citation, command: &str) -> String {
    match command {
        "citeauthor" => citation.author.clone(),
        "citeyear" => citation.year.clone(),
        _ => format!(
            "[{}, {}, {}]",
            citation.author, citation.year, citation.citation_label
        ),
    }
}

/// First capture of `re` in `text`, or `default`
fn capture_or(re: &Regex, text: &str, default: &str) -> String {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| default.to_string())
}

/// Narrow the `\date` tag down to an embedded 4-digit year
fn extract_year(text: &str) -> String {
    match DATE_RE.captures(text).and_then(|caps| caps.get(1)) {
        Some(date) => YEAR_RE
            .captures(date.as_str())
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| date.as_str().to_string()),
        None => "Unknown Year".to_string(),
    }
}

/// Parse all table environments in the raw text
fn parse_tables(text: &str) -> Vec<Table> {
    TABLE_ENV_RE
        .find_iter(text)
        .filter_map(|m| parse_single_table(m.as_str()))
        .collect()
}

/// Parse one table environment; a table with neither headers nor rows is dropped
fn parse_single_table(table_text: &str) -> Option<Table> {
    let caption = capture_or(&CAPTION_RE, table_text, "");
    let label = capture_or(&LABEL_RE, table_text, "");
    let (headers, rows) = parse_tabular_content(table_text);

    if headers.is_empty() && rows.is_empty() {
        return None;
    }

    Some(Table {
        caption,
        label,
        headers,
        rows,
        footnotes: Vec::new(),
    })
}

/// Extract header and data rows from the inner tabular environment
fn parse_tabular_content(table_text: &str) -> (Vec<String>, Vec<Vec<String>>) {
    let inner = match TABULAR_ENV_RE.captures(table_text).and_then(|caps| caps.get(1)) {
        Some(m) => m.as_str().trim(),
        None => return (Vec::new(), Vec::new()),
    };

    // Column spec like {|c|c|} sits at the head of the tabular body.
    let inner = COLUMN_SPEC_RE.replace(inner, "");
    let inner = inner.trim();

    let mut parsed_rows: Vec<Vec<String>> = Vec::new();
    for line in inner.split(r"\\") {
        if !line.contains('&') {
            continue;
        }
        let cells: Vec<String> = line
            .split('&')
            .map(|cell| cell.replace(r"\hline", "").trim().to_string())
            .filter(|cell| !cell.is_empty())
            .collect();
        if !cells.is_empty() {
            parsed_rows.push(cells);
        }
    }

    let mut row_iter = parsed_rows.into_iter();
    let headers = row_iter.next().unwrap_or_default();
    (headers, row_iter.collect())
}

/// Parse all figure environments in the raw text
///
/// Unlike tables, a found figure environment always materializes a record,
/// even when every tag inside it is missing.
fn parse_figures(text: &str) -> Vec<Figure> {
    FIGURE_ENV_RE
        .find_iter(text)
        .map(|m| {
            let figure_text = m.as_str();
            Figure {
                caption: capture_or(&CAPTION_RE, figure_text, ""),
                label: capture_or(&LABEL_RE, figure_text, ""),
                image_path: capture_or(&GRAPHICS_RE, figure_text, ""),
            }
        })
        .collect()
}

/// Remove table/figure environments and orphaned tags, collapsing the
/// blank-line runs left behind
fn remove_environments(text: &str) -> String {
    let text = TABLE_ENV_RE.replace_all(text, "");
    let text = FIGURE_ENV_RE.replace_all(&text, "");
    let text = CAPTION_TAG_RE.replace_all(&text, "");
    let text = LABEL_TAG_RE.replace_all(&text, "");
    let text = GRAPHICS_TAG_RE.replace_all(&text, "");
    EXTRA_BLANK_RE.replace_all(&text, "\n\n").to_string()
}
