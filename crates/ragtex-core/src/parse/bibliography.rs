//! BibTeX-subset bibliography loading
//!
//! Parses `@type{key, field = {value}, ...}` entry blocks into [`Citation`]
//! records keyed by their cross-reference key. Only a small set of entry
//! types is retained; everything else is skipped silently.

use lazy_static::lazy_static;
use regex::Regex;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::Path;

use crate::parse::types::Citation;

lazy_static! {
    static ref ENTRY_HEADER_RE: Regex = Regex::new(r"@(\w+)\{([^,]+),").unwrap();
    static ref ENTRY_SPLIT_RE: Regex = Regex::new(r"\n\s*\n").unwrap();
}

/// Entry types retained when loading a bibliography
const RETAINED_TYPES: &[&str] = &["article", "book", "inproceedings", "conference", "techreport"];

/// Deterministic identity hash for a citation key
pub fn citation_hash(key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Read-only mapping from citation key to [`Citation`]
///
/// Construction is the only mutating phase; a loaded bibliography can be
/// shared freely across concurrent parses.
#[derive(Debug, Clone, Default)]
pub struct Bibliography {
    entries: HashMap<String, Citation>,
}

impl Bibliography {
    /// Create an empty bibliography
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a bibliography file
    ///
    /// An unreadable file is non-fatal: a warning is logged and an empty
    /// bibliography is returned, leaving every reference unresolved.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse(&content, &path.to_string_lossy()),
            Err(e) => {
                tracing::warn!("Could not load bibliography file {:?}: {}", path, e);
                Self::new()
            }
        }
    }

    /// Parse bibliography text into a keyed citation map
    ///
    /// `source` identifies where the entries came from and is recorded on
    /// every produced citation.
    pub fn parse(content: &str, source: &str) -> Self {
        let mut entries = HashMap::new();

        for block in ENTRY_SPLIT_RE.split(content) {
            if block.trim().is_empty() {
                continue;
            }

            let (entry_type, entry_key) = match ENTRY_HEADER_RE.captures(block) {
                Some(caps) => (
                    caps[1].to_lowercase(),
                    caps[2].trim().to_string(),
                ),
                None => continue,
            };

            if !RETAINED_TYPES.contains(&entry_type.as_str()) {
                continue;
            }

            let citation = Citation {
                author: extract_field(block, "author", "Unknown"),
                year: extract_field(block, "year", "Unknown"),
                title: extract_field(block, "title", "Unknown"),
                doi: extract_field(block, "doi", ""),
                source_document: source.to_string(),
                page_reference: String::new(),
                citation_label: entry_key.clone(),
                citation_hash: citation_hash(&entry_key),
            };

            entries.insert(entry_key, citation);
        }

        Self { entries }
    }

    /// Look up a citation by its key
    pub fn get(&self, key: &str) -> Option<&Citation> {
        self.entries.get(key)
    }

    /// Number of loaded entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no entries were loaded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Extract a `field = {value}` assignment from an entry block
///
/// Field keywords match case-insensitively; the value is brace-delimited.
fn extract_field(entry: &str, field: &str, default: &str) -> String {
    let pattern = format!(r"(?i){}\s*=\s*\{{([^}}]+)\}}", field);
    let re = Regex::new(&pattern).expect("Invalid field regex");
    re.captures(entry)
        .map(|caps| caps[1].trim().to_string())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_BIB: &str = r#"@article{smith2020,
    author = {Smith, J.},
    title = {A Study of Things},
    year = {2020},
    doi = {10.1000/xyz}
}

@book{doe2019,
    Author = {Doe, A.},
    title = {The Big Book},
    year = {2019}
}

@misc{web2021,
    author = {Nobody},
    title = {Skipped Entry},
    year = {2021}
}
"#;

    #[test]
    fn test_parse_retains_known_types() {
        let bib = Bibliography::parse(SAMPLE_BIB, "refs.bib");
        assert_eq!(bib.len(), 2);
        assert!(bib.get("smith2020").is_some());
        assert!(bib.get("doe2019").is_some());
        assert!(bib.get("web2021").is_none());
    }

    #[test]
    fn test_parse_extracts_fields() {
        let bib = Bibliography::parse(SAMPLE_BIB, "refs.bib");
        let smith = bib.get("smith2020").unwrap();
        assert_eq!(smith.author, "Smith, J.");
        assert_eq!(smith.year, "2020");
        assert_eq!(smith.title, "A Study of Things");
        assert_eq!(smith.doi, "10.1000/xyz");
        assert_eq!(smith.citation_label, "smith2020");
        assert_eq!(smith.source_document, "refs.bib");
    }

    #[test]
    fn test_parse_field_keyword_case_insensitive() {
        let bib = Bibliography::parse(SAMPLE_BIB, "refs.bib");
        assert_eq!(bib.get("doe2019").unwrap().author, "Doe, A.");
    }

    #[test]
    fn test_missing_fields_default() {
        let bib = Bibliography::parse(SAMPLE_BIB, "refs.bib");
        let doe = bib.get("doe2019").unwrap();
        assert_eq!(doe.doi, "");

        let entry = "@article{bare2000,\n    year = {2000}\n}";
        let bib = Bibliography::parse(entry, "refs.bib");
        let bare = bib.get("bare2000").unwrap();
        assert_eq!(bare.author, "Unknown");
        assert_eq!(bare.title, "Unknown");
    }

    #[test]
    fn test_citation_hash_deterministic() {
        assert_eq!(citation_hash("smith2020"), citation_hash("smith2020"));
        assert_ne!(citation_hash("smith2020"), citation_hash("doe2019"));
    }

    #[test]
    fn test_load_missing_file_returns_empty() {
        let bib = Bibliography::load(Path::new("/nonexistent/refs.bib"));
        assert!(bib.is_empty());
    }

    #[test]
    fn test_load_reads_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("refs.bib");
        std::fs::write(&path, SAMPLE_BIB).unwrap();

        let bib = Bibliography::load(&path);
        assert_eq!(bib.len(), 2);
    }
}
