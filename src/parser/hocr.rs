//! Annotated hOCR document parsing.
//!
//! The input documents are hOCR pages that have been through layout review:
//! each `ocr_line` span carries an `annotation` tag, the raw OCR `line`
//! text, and optionally a reviewed `line_correction`. The literal string
//! `"nan"` in a correction is the sentinel for "no correction present" and
//! is treated as absent.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::model::{AnnotatedLine, AnnotatedPage, AnnotatedParagraph};

/// Parser for annotated hOCR page documents.
pub struct HocrParser;

impl HocrParser {
    /// Parse a single hOCR document from disk.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<AnnotatedPage> {
        let path = path.as_ref();
        let markup = fs::read_to_string(path)?;
        let source = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::parse_str(&source, &markup).map_err(|err| match err {
            Error::HocrParse { message, .. } => Error::HocrParse {
                path: path.to_path_buf(),
                message,
            },
            Error::MissingPage(_) => Error::MissingPage(path.to_path_buf()),
            other => other,
        })
    }

    /// Parse a single hOCR document from markup text.
    pub fn parse_str(source: &str, markup: &str) -> Result<AnnotatedPage> {
        let doc = roxmltree::Document::parse(markup).map_err(|err| Error::HocrParse {
            path: PathBuf::from(source),
            message: err.to_string(),
        })?;

        let page_node = doc
            .descendants()
            .find(|node| {
                node.tag_name().name() == "div" && node.attribute("class") == Some("ocr_page")
            })
            .ok_or_else(|| Error::MissingPage(PathBuf::from(source)))?;

        // No defaults are fabricated for absent attributes; downstream
        // fields simply stay empty.
        let mut page = AnnotatedPage::new(source, page_node.attribute("page_number").unwrap_or(""));
        if let Some(title) = page_node.attribute("title") {
            let (image, width, height) = parse_page_title(title);
            page.image = image;
            page.width = width;
            page.height = height;
        }

        for par_node in doc.descendants().filter(|node| {
            node.tag_name().name() == "p" && node.attribute("class") == Some("ocr_par")
        }) {
            let mut paragraph = AnnotatedParagraph::new(par_node.attribute("id").unwrap_or(""));

            for line_node in par_node.descendants().filter(|node| {
                node.tag_name().name() == "span" && node.attribute("class") == Some("ocr_line")
            }) {
                let text = match line_node.attribute("line_correction") {
                    Some(correction) if correction != "nan" => correction,
                    _ => line_node.attribute("line").unwrap_or(""),
                };
                paragraph.add_line(AnnotatedLine::new(
                    line_node.attribute("id").unwrap_or(""),
                    line_node.attribute("annotation").unwrap_or(""),
                    text,
                ));
            }

            page.add_paragraph(paragraph);
        }

        log::debug!(
            "parsed {}: page {} with {} lines",
            source,
            page.page_number,
            page.line_count()
        );

        Ok(page)
    }
}

/// Parse the hOCR page title attribute, e.g.
/// `image "jeake_012.png"; bbox 0 0 2481 3508; ppageno 0`.
fn parse_page_title(title: &str) -> (Option<String>, Option<u32>, Option<u32>) {
    let mut image = None;
    let mut width = None;
    let mut height = None;

    for property in title.split(';') {
        let property = property.trim();
        if let Some(name) = property.strip_prefix("image ") {
            image = Some(name.trim().trim_matches('"').to_string());
        } else if let Some(bbox) = property.strip_prefix("bbox ") {
            let coords: Vec<u32> = bbox
                .split_whitespace()
                .filter_map(|token| token.parse().ok())
                .collect();
            if let [x0, y0, x1, y1] = coords[..] {
                width = Some(x1.saturating_sub(x0));
                height = Some(y1.saturating_sub(y0));
            }
        }
    }

    (image, width, height)
}

/// List the hOCR documents of an input directory in lexicographic filename
/// order.
///
/// Documents must be processed in this order: the assembler trusts the
/// stream completely, and a shuffled sequence assigns text to the wrong
/// letters without any error.
pub fn hocr_files<P: AsRef<Path>>(input_dir: P) -> Result<Vec<PathBuf>> {
    let input_dir = input_dir.as_ref();
    let mut paths: Vec<PathBuf> = fs::read_dir(input_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "hocr"))
        .collect();

    if paths.is_empty() {
        return Err(Error::NoDocuments(input_dir.to_path_buf()));
    }

    paths.sort_by_key(|path| path.file_name().map(|name| name.to_os_string()));
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<html xmlns="http://www.w3.org/1999/xhtml">
 <body>
  <div class="ocr_page" id="page_1" title='image "scan_012.png"; bbox 0 0 2481 3508; ppageno 0' page_number="24">
   <p class="ocr_par" id="par_1_1">
    <span class="ocr_line" id="line_1_1" annotation="BODY" line="Deare Sonne," line_correction="nan"/>
    <span class="ocr_line" id="line_1_2" annotation="BODY" line="I reeceived yours" line_correction="I received yours"/>
   </p>
   <p class="ocr_par" id="par_1_2">
    <span class="ocr_line" id="line_2_1" annotation="SIGN-OFF" line="your loving father"/>
   </p>
  </div>
 </body>
</html>"#;

    #[test]
    fn test_parse_page_metadata() {
        let page = HocrParser::parse_str("scan_012", SAMPLE).unwrap();
        assert_eq!(page.source, "scan_012");
        assert_eq!(page.page_number, "24");
        assert_eq!(page.image.as_deref(), Some("scan_012.png"));
        assert_eq!(page.width, Some(2481));
        assert_eq!(page.height, Some(3508));
        assert_eq!(page.paragraphs.len(), 2);
        assert_eq!(page.first_paragraph_id(), Some("par_1_1"));
    }

    #[test]
    fn test_nan_sentinel_uses_raw_line() {
        let page = HocrParser::parse_str("scan_012", SAMPLE).unwrap();
        let lines = &page.paragraphs[0].lines;
        assert_eq!(lines[0].text, "Deare Sonne,");
        assert_eq!(lines[1].text, "I received yours");
    }

    #[test]
    fn test_missing_correction_attribute_uses_raw_line() {
        let page = HocrParser::parse_str("scan_012", SAMPLE).unwrap();
        let line = &page.paragraphs[1].lines[0];
        assert_eq!(line.text, "your loving father");
        assert_eq!(line.annotation, "SIGN-OFF");
    }

    #[test]
    fn test_missing_page_container() {
        let markup = r#"<html xmlns="http://www.w3.org/1999/xhtml"><body/></html>"#;
        let result = HocrParser::parse_str("broken", markup);
        assert!(matches!(result, Err(Error::MissingPage(_))));
    }

    #[test]
    fn test_malformed_markup() {
        let result = HocrParser::parse_str("broken", "not xml at all <");
        assert!(matches!(result, Err(Error::HocrParse { .. })));
    }

    #[test]
    fn test_missing_attributes_stay_empty() {
        let markup = r#"<html xmlns="http://www.w3.org/1999/xhtml"><body>
            <div class="ocr_page" id="page_1">
             <p class="ocr_par"><span class="ocr_line" annotation="BODY"/></p>
            </div></body></html>"#;
        let page = HocrParser::parse_str("bare", markup).unwrap();
        assert_eq!(page.page_number, "");
        assert_eq!(page.image, None);
        assert_eq!(page.paragraphs[0].lines[0].text, "");
    }
}
