//! Annotated page model.
//!
//! One `AnnotatedPage` per scanned page document, in the document's natural
//! reading order. Ordering is significant throughout: the assembler trusts
//! it completely, and misordered lines silently corrupt field assignment.

use serde::{Deserialize, Serialize};

/// A single annotated hOCR page document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotatedPage {
    /// Source document name (the hOCR file stem)
    pub source: String,

    /// Page number, as carried by the `page_number` attribute.
    /// Kept verbatim; empty when the attribute is absent.
    pub page_number: String,

    /// Scanned image name from the page's hOCR title attribute
    pub image: Option<String>,

    /// Page width in pixels, when the title attribute carries a bbox
    pub width: Option<u32>,

    /// Page height in pixels
    pub height: Option<u32>,

    /// Paragraph containers in reading order
    pub paragraphs: Vec<AnnotatedParagraph>,
}

impl AnnotatedPage {
    /// Create an empty page.
    pub fn new(source: impl Into<String>, page_number: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            page_number: page_number.into(),
            image: None,
            width: None,
            height: None,
            paragraphs: Vec::new(),
        }
    }

    /// Add a paragraph to the page.
    pub fn add_paragraph(&mut self, paragraph: AnnotatedParagraph) {
        self.paragraphs.push(paragraph);
    }

    /// The id of the page's opening paragraph, if any.
    pub fn first_paragraph_id(&self) -> Option<&str> {
        self.paragraphs.first().map(|p| p.id.as_str())
    }

    /// Total number of annotated lines on the page.
    pub fn line_count(&self) -> usize {
        self.paragraphs.iter().map(|p| p.lines.len()).sum()
    }

    /// Check if the page has no lines at all.
    pub fn is_empty(&self) -> bool {
        self.paragraphs.iter().all(|p| p.lines.is_empty())
    }
}

/// A paragraph container on a page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotatedParagraph {
    /// Paragraph identifier from the markup (e.g. `par_1_1`)
    pub id: String,

    /// Annotated lines in reading order
    pub lines: Vec<AnnotatedLine>,
}

impl AnnotatedParagraph {
    /// Create an empty paragraph.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            lines: Vec::new(),
        }
    }

    /// Add a line to the paragraph.
    pub fn add_line(&mut self, line: AnnotatedLine) {
        self.lines.push(line);
    }
}

/// One annotated OCR line.
///
/// `text` is already resolved: the reviewed correction when one exists,
/// the raw OCR reading otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotatedLine {
    /// Line identifier from the markup
    pub id: String,

    /// Annotation tag assigned during layout review (e.g. `BODY`, `SIGN-OFF`)
    pub annotation: String,

    /// Line text
    pub text: String,
}

impl AnnotatedLine {
    /// Create a line with an annotation tag and text.
    pub fn new(
        id: impl Into<String>,
        annotation: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            annotation: annotation.into(),
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_counts() {
        let mut page = AnnotatedPage::new("p001", "17");
        assert!(page.is_empty());
        assert_eq!(page.first_paragraph_id(), None);

        let mut par = AnnotatedParagraph::new("par_1_1");
        par.add_line(AnnotatedLine::new("line_1_1", "BODY", "Deare brother,"));
        par.add_line(AnnotatedLine::new("line_1_2", "BODY", "I received yours."));
        page.add_paragraph(par);

        assert!(!page.is_empty());
        assert_eq!(page.line_count(), 2);
        assert_eq!(page.first_paragraph_id(), Some("par_1_1"));
    }
}
