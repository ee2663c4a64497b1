//! Letter boundary detection.

use crate::collection::BoundaryRule;

/// Decide whether a line opens a new letter.
///
/// Returns the field seeded with the triggering line's text. Chapter
/// markers are handled separately by the assembler and never open a letter.
pub fn starts_letter(
    rule: &BoundaryRule,
    annotation: &str,
    text: &str,
) -> Option<&'static str> {
    match *rule {
        BoundaryRule::TitleBracket { tag_fragment, seeds } => {
            if annotation.contains(tag_fragment) && text.starts_with('[') {
                Some(seeds)
            } else {
                None
            }
        }
        BoundaryRule::AnyOfTags(tags) => tags.iter().copied().find(|tag| *tag == annotation),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::{JEAKE, MARESCOE_DAVID};

    #[test]
    fn test_title_boundary_needs_bracket() {
        let rule = &JEAKE.boundary;
        assert_eq!(
            starts_letter(rule, "TITLE", "[1] Richard Jeake to Samuel Jeake"),
            Some("TITLE")
        );
        // continuation row of the same title must not open a second record
        assert_eq!(starts_letter(rule, "TITLE", "to Samuel Jeake"), None);
        assert_eq!(starts_letter(rule, "BODY", "[bracketed aside]"), None);
    }

    #[test]
    fn test_title_boundary_matches_tag_fragment() {
        let rule = &JEAKE.boundary;
        assert_eq!(starts_letter(rule, "TITLE_CONT", "[2] More"), Some("TITLE"));
    }

    #[test]
    fn test_date_boundaries_fire_unconditionally() {
        let rule = &MARESCOE_DAVID.boundary;
        assert_eq!(
            starts_letter(rule, "DATE", "LONDON 14 March 1668"),
            Some("DATE")
        );
        assert_eq!(
            starts_letter(rule, "DATE_OF_ARRIVAL", "Received 21 March 1668"),
            Some("DATE_OF_ARRIVAL")
        );
        assert_eq!(starts_letter(rule, "BODY", "14 March 1668"), None);
    }
}
