//! # lettercorpus
//!
//! Structured letter-corpus assembly from annotated hOCR scans of
//! historical correspondence.
//!
//! The input is a directory of hOCR page documents whose lines have been
//! through layout review: each line carries an annotation tag (`BODY`,
//! `SIGN-OFF`, `DATELINE`, ...) and, where the reviewers corrected the OCR,
//! a corrected reading. This library walks those pages in reading order,
//! reconstructs one record per letter, and finalizes the records into a
//! JSON corpus ready for downstream metadata and concordance tooling.
//!
//! ## Quick Start
//!
//! ```no_run
//! use lettercorpus::{build_corpus, render, Collection};
//!
//! fn main() -> lettercorpus::Result<()> {
//!     let corpus = build_corpus("corpus/master_jeake", Collection::Jeake)?;
//!     println!("{} letters assembled", corpus.records.len());
//!
//!     render::write_json(
//!         &corpus.records,
//!         "corpus/corpus_jeake.json",
//!         render::JsonFormat::Pretty,
//!     )?;
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - **Parse**: [`parser::HocrParser`] reads one annotated page per file,
//!   in lexicographic filename order — ordering is load-bearing, letters
//!   span pages.
//! - **Assemble**: [`assemble::Assembler`] runs the boundary-driven state
//!   machine that opens a record per letter and routes every line into it.
//! - **Finalize**: [`finalize::finalize`] cleans, derives, and reorders
//!   fields into the collection's canonical schema.
//! - **Render**: [`render::to_json`] serializes the corpus with stable key
//!   order.

pub mod assemble;
pub mod collection;
pub mod error;
pub mod finalize;
pub mod model;
pub mod normalize;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use assemble::{Assembler, AssemblyStats, MultiSplit};
pub use collection::{Collection, CollectionProfile};
pub use error::{Error, Result};
pub use finalize::{finalize, CorpusRecord, FinalizeOptions};
pub use model::{AnnotatedLine, AnnotatedPage, AnnotatedParagraph, Letter};
pub use normalize::{word_count, NormalizerOptions, TextNormalizer};
pub use parser::{hocr_files, HocrParser};
pub use render::JsonFormat;

use std::path::Path;

/// A finalized corpus together with its assembly statistics.
#[derive(Debug)]
pub struct Corpus {
    /// Finalized records, in letter order
    pub records: Vec<CorpusRecord>,
    /// Defect counters gathered during assembly
    pub stats: AssemblyStats,
}

/// Assemble and finalize a collection's corpus from a directory of
/// annotated hOCR documents.
///
/// Individual documents that fail to parse are skipped with a warning;
/// only an unreadable or empty input directory is fatal.
pub fn build_corpus<P: AsRef<Path>>(input_dir: P, collection: Collection) -> Result<Corpus> {
    build_corpus_with_options(input_dir, collection, &FinalizeOptions::default())
}

/// Like [`build_corpus`], with an explicit finalization policy.
pub fn build_corpus_with_options<P: AsRef<Path>>(
    input_dir: P,
    collection: Collection,
    options: &FinalizeOptions,
) -> Result<Corpus> {
    let mut assembler = Assembler::new(collection);

    for path in hocr_files(input_dir)? {
        match HocrParser::parse_file(&path) {
            Ok(page) => assembler.assemble_page(&page),
            Err(err) => {
                log::warn!("skipping {}: {}", path.display(), err);
                assembler.note_skipped_document();
            }
        }
    }

    let profile = assembler.profile();
    let (letters, stats) = assembler.finish();
    let records = finalize(&letters, profile, options);

    Ok(Corpus { records, stats })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_corpus_missing_directory() {
        let result = build_corpus("/nonexistent/corpus", Collection::Jeake);
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_build_corpus_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let result = build_corpus(dir.path(), Collection::Jeake);
        assert!(matches!(result, Err(Error::NoDocuments(_))));
    }
}
