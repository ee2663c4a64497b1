//! Splitting of MULTI-annotated lines.
//!
//! A MULTI line carries two logically distinct fields on one physical row,
//! joined during layout review with a collection-specific separator symbol.
//! The separator table is scanned in order and the first symbol present in
//! the line wins; a line with several configured symbols is flagged, since
//! that usually means an annotation slip rather than a legitimate row.

use crate::collection::{FieldJoin, SeparatorRule, TextContribution};
use crate::model::Letter;

/// Outcome of routing one MULTI line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiSplit {
    /// The line was split and both fragments routed.
    Applied {
        /// More than one configured symbol occurred in the line
        ambiguous: bool,
    },
    /// No configured separator symbol occurs in the line.
    NoSeparator,
    /// The split left an empty fragment on one side of the symbol.
    EmptyFragment {
        /// The separator that was selected
        symbol: char,
    },
}

/// Split a MULTI line and route both fragments into the record.
///
/// A dropped line (no separator, empty fragment) mutates nothing.
pub fn split_multi(letter: &mut Letter, rules: &[SeparatorRule], text: &str) -> MultiSplit {
    let present: Vec<&SeparatorRule> = rules
        .iter()
        .filter(|rule| text.contains(rule.symbol))
        .collect();

    let Some(rule) = present.first() else {
        return MultiSplit::NoSeparator;
    };
    let ambiguous = present.len() > 1;

    let Some((first, second)) = text.split_once(rule.symbol) else {
        return MultiSplit::NoSeparator;
    };
    if first.is_empty() || second.is_empty() {
        return MultiSplit::EmptyFragment {
            symbol: rule.symbol,
        };
    }

    apply_fragment(letter, rule.first.field, rule.first.join, first);
    apply_fragment(letter, rule.second.field, rule.second.join, second);

    match rule.text {
        TextContribution::None => {}
        TextContribution::NewlinePair => {
            letter.append_text(&format!("{}\n{}", first, second));
        }
        TextContribution::SecondBare => letter.append_text(second),
        TextContribution::PairSpaced => {
            letter.append_text(&format!(" {} {}", first, second));
        }
    }

    MultiSplit::Applied { ambiguous }
}

fn apply_fragment(letter: &mut Letter, field: &str, join: FieldJoin, part: &str) {
    match join {
        FieldJoin::Bare => letter.append_bare(field, part),
        FieldJoin::SpacePrefixed => letter.append_space_prefixed(field, part),
        FieldJoin::Spaced => letter.append_spaced(field, part),
        FieldJoin::SpacedTrailing => letter.append_spaced_trailing(field, part),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::{JEAKE, MARESCOE_DAVID};
    use crate::model::TEXT;

    fn jeake_letter() -> Letter {
        Letter::with_schema(JEAKE.schema)
    }

    fn marescoe_letter() -> Letter {
        Letter::with_schema(MARESCOE_DAVID.schema)
    }

    #[test]
    fn test_split_routes_both_fragments() {
        let mut letter = marescoe_letter();
        let outcome = split_multi(&mut letter, MARESCOE_DAVID.separators, "Cr 174@Marescoe to David");
        assert_eq!(outcome, MultiSplit::Applied { ambiguous: false });
        assert_eq!(letter.get("ID"), "Cr 174");
        assert_eq!(letter.get("TITLE"), "Marescoe to David");
        // the id/title pairing never touches the text reconstruction
        assert_eq!(letter.get(TEXT), "");
    }

    #[test]
    fn test_split_does_not_touch_other_fields() {
        let mut letter = marescoe_letter();
        split_multi(&mut letter, MARESCOE_DAVID.separators, "Foo@Bar");
        for (name, value) in letter.fields() {
            if name != "ID" && name != "TITLE" {
                assert_eq!(value, "", "unexpected mutation of {}", name);
            }
        }
    }

    #[test]
    fn test_newline_pair_contributes_to_text() {
        let mut letter = jeake_letter();
        split_multi(
            &mut letter,
            JEAKE.separators,
            "Rye the 4th of March%Sam Jeake",
        );
        assert_eq!(letter.get("SIGN-OFF"), "Rye the 4th of March");
        assert_eq!(letter.get("SENDER_RAW"), "Sam Jeake");
        assert_eq!(letter.get(TEXT), "Rye the 4th of March\nSam Jeake");
    }

    #[test]
    fn test_body_signoff_pair_spacing() {
        let mut letter = marescoe_letter();
        letter.append_spaced("BODY", "remaine");
        split_multi(
            &mut letter,
            MARESCOE_DAVID.separators,
            "your humble servant=Charles Marescoe",
        );
        assert_eq!(letter.get("BODY"), "remaine your humble servant");
        // a first sign-off write keeps its trailing space for the next row
        assert_eq!(letter.get("SIGN-OFF"), "Charles Marescoe ");
        assert_eq!(
            letter.get(TEXT),
            " your humble servant Charles Marescoe"
        );
    }

    #[test]
    fn test_first_configured_symbol_wins() {
        let mut letter = marescoe_letter();
        let outcome = split_multi(&mut letter, MARESCOE_DAVID.separators, "Cr 1@title=rest");
        assert_eq!(outcome, MultiSplit::Applied { ambiguous: true });
        // '@' is ahead of '=' in the table, so the line splits on '@'
        assert_eq!(letter.get("ID"), "Cr 1");
        assert_eq!(letter.get("TITLE"), "title=rest");
    }

    #[test]
    fn test_no_separator_drops_line() {
        let mut letter = jeake_letter();
        let outcome = split_multi(&mut letter, JEAKE.separators, "no symbol here");
        assert_eq!(outcome, MultiSplit::NoSeparator);
        assert!(letter.fields().all(|(_, value)| value.is_empty()));
    }

    #[test]
    fn test_empty_fragment_drops_line() {
        let mut letter = jeake_letter();
        let outcome = split_multi(&mut letter, JEAKE.separators, "&Cr 99");
        assert_eq!(outcome, MultiSplit::EmptyFragment { symbol: '&' });
        assert_eq!(letter.get("ID"), "");
        assert_eq!(letter.get("TITLE"), "");
    }
}
