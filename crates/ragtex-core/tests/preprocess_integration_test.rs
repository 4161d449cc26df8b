//! End-to-end integration test for the preprocessing pipeline
//!
//! Tests:
//! 1. Parse -> flatten -> chunk over real files on disk
//! 2. Citation resolution against a bibliography file
//! 3. Overlap behavior of the produced chunk sequence
//! 4. Batch-mode resilience to a bad input file

use std::fs;
use std::path::Path;
use std::sync::Arc;

use ragtex_core::{
    Bibliography, ChunkingContextBuilder, DataChunker, DocumentPreprocessor, DocumentStrategy,
    LatexParser,
};
use tempfile::TempDir;

const PAPER: &str = "\\title{T}\\author{A}\\section{Intro}\nHello world.\n\n\\section{Next}\nMore text here.";

const BIB: &str = "@article{smith2020,\n    author = {Smith},\n    title = {Things},\n    year = {2020}\n}";

#[test]
fn test_pipeline_produces_overlapping_chunks() {
    // Small windows so the two-section document spans several chunks.
    let mut chunker = DataChunker::new();
    chunker.register_strategy("document", Arc::new(DocumentStrategy::new(30, 10)));

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("paper.tex");
    fs::write(&path, PAPER).unwrap();

    let chunks = DocumentPreprocessor::new()
        .with_chunker(chunker)
        .preprocess_document(&path)
        .unwrap();

    assert!(chunks.len() >= 2);
    // Overlap: the second chunk starts inside the first one.
    assert!(chunks[1].start_idx > chunks[0].start_idx);
    assert!(chunks[1].start_idx < chunks[0].end_idx);

    let flattened = chunks.iter().fold(String::new(), |acc, c| {
        // Rebuild the stream from non-overlapping tails.
        let tail_from = acc.chars().count().saturating_sub(c.start_idx);
        acc + &c.text.chars().skip(tail_from).collect::<String>()
    });
    assert!(flattened.contains("## Intro"));
    assert!(flattened.contains("Hello world."));
    assert!(flattened.contains("## Next"));
    assert!(flattened.contains("More text here."));

    for chunk in &chunks {
        assert_eq!(chunk.metadata.total_chunks, chunks.len());
        assert!(chunk.start_idx < chunk.end_idx);
    }
}

#[test]
fn test_pipeline_resolves_citations_from_bibliography() {
    let dir = TempDir::new().unwrap();
    let bib_path = dir.path().join("refs.bib");
    let tex_path = dir.path().join("paper.tex");
    fs::write(&bib_path, BIB).unwrap();
    fs::write(
        &tex_path,
        "\\section{Related}\nShown by \\cite{smith2020} and \\citep{ghost1999}.",
    )
    .unwrap();

    let bibliography = Bibliography::load(&bib_path);
    assert_eq!(bibliography.len(), 1);

    let chunks = DocumentPreprocessor::new()
        .with_bibliography(bibliography)
        .preprocess_document(&tex_path)
        .unwrap();

    let text: String = chunks.iter().map(|c| c.text.clone()).collect();
    assert!(text.contains("[Smith, 2020, smith2020]"));
    assert!(text.contains("[Unknown, Unknown, ghost1999]"));
    assert!(!text.contains("\\cite"));
}

#[test]
fn test_empty_input_paths_yield_empty_sequence() {
    let chunks = DocumentPreprocessor::new().preprocess_documents(&[]).unwrap();
    assert!(chunks.is_empty());
}

#[test]
fn test_missing_document_propagates_with_path() {
    let err = DocumentPreprocessor::new()
        .preprocess_document(Path::new("/nonexistent/gone.tex"))
        .unwrap_err();
    assert!(err.to_string().contains("gone.tex"));
}

#[test]
fn test_folder_batch_survives_bad_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("ok.tex"), PAPER).unwrap();
    fs::write(dir.path().join("broken.tex"), [0xff_u8, 0x00, 0xfe]).unwrap();

    let chunks = DocumentPreprocessor::new()
        .preprocess_folder(dir.path())
        .unwrap();
    let text: String = chunks.iter().map(|c| c.text.clone()).collect();
    assert!(text.contains("Hello world."));
}

#[test]
fn test_flatten_matches_direct_parse() {
    // The preprocessor output equals chunking the flattened parse directly.
    let parser = LatexParser::new();
    let document = parser.parse_text(PAPER, "paper.tex");
    let flattened = ragtex_core::flatten_documents(&[document]);

    let chunker = DataChunker::new();
    let context = ChunkingContextBuilder::new().for_document().build();
    let direct = chunker.chunk(&flattened, &context);

    assert_eq!(direct.len(), 1);
    assert_eq!(
        direct[0].text,
        "## Intro\n\nHello world.\n\n## Next\n\nMore text here."
    );
}
