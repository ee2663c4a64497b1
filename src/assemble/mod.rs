//! The corpus-assembly state machine.
//!
//! A single pass over the annotated pages, in reading order. A boundary
//! line opens a new letter record; every following line mutates the open
//! record until the next boundary. The assembler owns the only two pieces
//! of carried state — the open record and the current chapter — so one
//! `Assembler` instance is one batch run.

mod boundary;
mod splitter;

pub use boundary::starts_letter;
pub use splitter::{split_multi, MultiSplit};

use crate::collection::{Collection, CollectionProfile};
use crate::model::{AnnotatedLine, AnnotatedPage, Letter, CHAPTER, LANGUAGE, PAGE, SERIAL_NR};

/// Counters for the defects a permissive ingestion run tolerates.
///
/// None of these abort the batch; they exist so that quiet data loss shows
/// up in logs and summaries instead of disappearing.
#[derive(Debug, Clone, Default)]
pub struct AssemblyStats {
    /// Documents assembled
    pub documents: usize,
    /// Documents skipped because they failed to parse
    pub skipped_documents: usize,
    /// Annotated lines processed
    pub lines: usize,
    /// Letter records opened
    pub letters: usize,
    /// Lines that arrived before any boundary and were lost
    pub discarded_lines: usize,
    /// MULTI lines dropped (no separator symbol, or an empty fragment)
    pub unmatched_multi: usize,
    /// MULTI lines containing more than one configured symbol
    pub ambiguous_multi: usize,
    /// Lines whose tag is outside the collection's vocabulary
    pub unknown_tag_lines: usize,
}

/// The corpus-assembly state machine for one collection.
pub struct Assembler {
    profile: &'static CollectionProfile,
    chapter: String,
    next_serial: u32,
    letters: Vec<Letter>,
    stats: AssemblyStats,
}

impl Assembler {
    /// Create an assembler for a collection.
    pub fn new(collection: Collection) -> Self {
        Self {
            profile: collection.profile(),
            chapter: String::new(),
            next_serial: 1,
            letters: Vec::new(),
            stats: AssemblyStats::default(),
        }
    }

    /// The collection profile driving this run.
    pub fn profile(&self) -> &'static CollectionProfile {
        self.profile
    }

    /// Counters gathered so far.
    pub fn stats(&self) -> &AssemblyStats {
        &self.stats
    }

    /// Record a document that could not be parsed.
    pub fn note_skipped_document(&mut self) {
        self.stats.skipped_documents += 1;
    }

    /// Consume one page document.
    ///
    /// Pages must arrive in lexicographic filename order; letters routinely
    /// span page boundaries and the open record carries over.
    pub fn assemble_page(&mut self, page: &AnnotatedPage) {
        self.stats.documents += 1;

        let first_par_id = page.first_paragraph_id().unwrap_or("").to_string();
        // Both flags clear on the first line that reaches the text
        // reconstruction; together with the paragraph validity they decide
        // where blank-line separators go.
        let mut first_line = true;
        let mut first_paragraph = true;

        for paragraph in &page.paragraphs {
            let mut valid_paragraph = false;

            for line in &paragraph.lines {
                self.stats.lines += 1;
                if self.profile.content.is_content(&line.annotation) {
                    valid_paragraph = true;
                }
                self.process_line(
                    line,
                    page,
                    &paragraph.id,
                    &first_par_id,
                    &mut first_line,
                    &mut first_paragraph,
                    valid_paragraph,
                );
            }

            // a content-bearing paragraph terminates with one extra newline,
            // which renders as the blank line between paragraphs
            if valid_paragraph {
                if let Some(letter) = self.letters.last_mut() {
                    letter.append_text("\n");
                }
            }
        }
    }

    /// Consume a sequence of page documents.
    pub fn assemble_pages<'a, I>(&mut self, pages: I)
    where
        I: IntoIterator<Item = &'a AnnotatedPage>,
    {
        for page in pages {
            self.assemble_page(page);
        }
    }

    /// Close the run and hand over the assembled records.
    pub fn finish(self) -> (Vec<Letter>, AssemblyStats) {
        (self.letters, self.stats)
    }

    #[allow(clippy::too_many_arguments)]
    fn process_line(
        &mut self,
        line: &AnnotatedLine,
        page: &AnnotatedPage,
        paragraph_id: &str,
        first_par_id: &str,
        first_line: &mut bool,
        first_paragraph: &mut bool,
        valid_paragraph: bool,
    ) {
        let tag = line.annotation.as_str();
        let text = line.text.as_str();

        if let Some(seed) = boundary::starts_letter(&self.profile.boundary, tag, text) {
            let mut letter = Letter::with_schema(self.profile.schema);
            letter.set(
                SERIAL_NR,
                format!("{}{}", self.profile.serial_prefix, self.next_serial),
            );
            letter.set(PAGE, page.page_number.clone());
            letter.set(CHAPTER, self.chapter.clone());
            letter.set(seed, text);
            self.next_serial += 1;
            self.stats.letters += 1;
            self.letters.push(letter);
            return;
        }

        if tag == "CHAPTER" {
            // chapter state outlives letters, pages, and documents; it is
            // stamped onto every record created until the next marker
            self.chapter = text.to_string();
            return;
        }

        if let Some((_, code)) = self
            .profile
            .language_marker_tags
            .iter()
            .find(|(marker, _)| *marker == tag)
        {
            let Some(letter) = self.letters.last_mut() else {
                note_discarded(&mut self.stats, line);
                return;
            };
            if !letter.get(LANGUAGE).contains(code) {
                letter.set(LANGUAGE, *code);
            }
            return;
        }

        if tag == "MULTI" {
            let Some(letter) = self.letters.last_mut() else {
                note_discarded(&mut self.stats, line);
                return;
            };
            match split_multi(letter, self.profile.separators, text) {
                MultiSplit::Applied { ambiguous: false } => {}
                MultiSplit::Applied { ambiguous: true } => {
                    self.stats.ambiguous_multi += 1;
                    log::warn!(
                        "{}: MULTI line {} contains several separator symbols, split on the first configured one",
                        page.source,
                        line.id
                    );
                }
                MultiSplit::NoSeparator => {
                    self.stats.unmatched_multi += 1;
                    log::warn!(
                        "{}: MULTI line {} has no separator symbol, line dropped",
                        page.source,
                        line.id
                    );
                }
                MultiSplit::EmptyFragment { symbol } => {
                    self.stats.unmatched_multi += 1;
                    log::warn!(
                        "{}: MULTI line {} splits on {:?} with an empty half, line dropped",
                        page.source,
                        line.id,
                        symbol
                    );
                }
            }
            return;
        }

        let profile = self.profile;
        let Some(letter) = self.letters.last_mut() else {
            note_discarded(&mut self.stats, line);
            return;
        };

        if !profile.is_known_tag(tag) {
            self.stats.unknown_tag_lines += 1;
            log::warn!(
                "{}: unknown annotation tag {:?} on line {}, kept as ad-hoc field",
                page.source,
                tag,
                line.id
            );
        }

        if !profile.field_exclusions.contains(&tag) {
            if profile.flat_fields.contains(&tag) {
                letter.accumulate_flat(tag, text);
            } else {
                letter.accumulate_line(tag, text);
            }
        }

        if profile.prepend_text_tags.contains(&tag) {
            // the source edition allocates these rows to the wrong
            // paragraph; they belong ahead of everything gathered so far
            letter.prepend_text(&format!("{}\n", text.trim()));
        }

        if profile.content.is_content(tag) {
            if let Some((_, code)) = profile
                .content_language_tags
                .iter()
                .find(|(marker, _)| *marker == tag)
            {
                if !letter.get(LANGUAGE).contains(code) {
                    if letter.get(LANGUAGE).is_empty() {
                        letter.set(LANGUAGE, *code);
                    } else {
                        letter.append_bare(LANGUAGE, &format!(" & {}", code));
                    }
                }
            }

            // a blank-line separator goes in front of every contributing
            // line except the very first of the page's opening paragraph
            // when that paragraph opens the page's first letter
            if !*first_line && valid_paragraph && !(*first_paragraph && paragraph_id == first_par_id)
            {
                letter.append_text("\n");
            } else {
                *first_line = false;
                *first_paragraph = false;
            }
            letter.append_text(text.trim());
        }
    }
}

fn note_discarded(stats: &mut AssemblyStats, line: &AnnotatedLine) {
    stats.discarded_lines += 1;
    log::warn!(
        "line {} with tag {:?} arrived before any letter boundary, discarded",
        line.id,
        line.annotation
    );
}
