//! Per-collection configuration tables.
//!
//! Both collections run the same assembly skeleton; everything that differs
//! between the source editions lives here: field schema, boundary predicate,
//! content-tag rule, separator conventions, language tables, and the
//! finalization flags.

use crate::normalize::NormalizerOptions;

/// How a collection recognizes the first line of a new letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryRule {
    /// A line whose tag contains the fragment and whose text opens with `[`.
    ///
    /// The bracket guard keeps consecutive same-tag continuation rows from
    /// spawning a second record for one letter.
    TitleBracket {
        /// Tag fragment to look for (matched as substring)
        tag_fragment: &'static str,
        /// Field seeded with the triggering line's text
        seeds: &'static str,
    },

    /// A line tagged with any of the listed tags, unconditionally.
    /// The matching tag is also the seeded field.
    AnyOfTags(&'static [&'static str]),
}

impl BoundaryRule {
    /// Tags that can fire this rule.
    pub fn tags(&self) -> &'static [&'static str] {
        match *self {
            BoundaryRule::TitleBracket { .. } => &[],
            BoundaryRule::AnyOfTags(tags) => tags,
        }
    }
}

/// Which annotation tags count as letter content.
///
/// Content tags feed the `TEXT` reconstruction and validate their paragraph
/// for blank-line separation. One edition lists the noise, the other lists
/// the content.
#[derive(Debug, Clone, Copy)]
pub enum ContentRule {
    /// Every tag is content except the listed ones.
    Exclude(&'static [&'static str]),
    /// Only the listed tags are content.
    Include(&'static [&'static str]),
}

impl ContentRule {
    /// Whether lines with this tag carry letter content.
    pub fn is_content(&self, tag: &str) -> bool {
        match *self {
            ContentRule::Exclude(tags) => !tags.contains(&tag),
            ContentRule::Include(tags) => tags.contains(&tag),
        }
    }

    fn tags(&self) -> &'static [&'static str] {
        match *self {
            ContentRule::Exclude(tags) | ContentRule::Include(tags) => tags,
        }
    }
}

/// How a split fragment joins onto its target field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldJoin {
    /// Concatenate verbatim
    Bare,
    /// Always prefix a space
    SpacePrefixed,
    /// Space-separate once the field has content
    Spaced,
    /// Space-separate once the field has content; a first write keeps a
    /// trailing space for the continuation row
    SpacedTrailing,
}

/// What a separator pairing contributes to the `TEXT` reconstruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextContribution {
    /// Nothing (bookkeeping pairs such as id/title)
    None,
    /// Both fragments, newline-joined
    NewlinePair,
    /// Only the second fragment, verbatim
    SecondBare,
    /// Both fragments, space-led and space-joined
    PairSpaced,
}

/// One fragment's destination within a separator pairing.
#[derive(Debug, Clone, Copy)]
pub struct FieldTarget {
    /// Target field name
    pub field: &'static str,
    /// Join behavior for the fragment
    pub join: FieldJoin,
}

/// One entry of a collection's separator table.
///
/// The table is scanned in order and the first symbol present in a line
/// wins. Each pairing keeps its own join and text behavior; the editions'
/// conventions are deliberately asymmetric and must not be generalized.
#[derive(Debug, Clone, Copy)]
pub struct SeparatorRule {
    /// The single-character separator symbol
    pub symbol: char,
    /// Destination of the fragment before the symbol
    pub first: FieldTarget,
    /// Destination of the fragment after the symbol
    pub second: FieldTarget,
    /// Contribution to the text reconstruction
    pub text: TextContribution,
}

/// Full configuration for one letter collection.
#[derive(Debug)]
pub struct CollectionProfile {
    /// Collection name as used on the command line
    pub name: &'static str,

    /// Prefix of SERIAL_NR values
    pub serial_prefix: &'static str,

    /// Canonical field order; records are created with these fields empty
    pub schema: &'static [&'static str],

    /// Letter boundary predicate
    pub boundary: BoundaryRule,

    /// Content-tag rule (feeds TEXT, validates paragraphs)
    pub content: ContentRule,

    /// Tags whose lines never land in a named field
    pub field_exclusions: &'static [&'static str],

    /// Fields accumulated without the newline row convention
    pub flat_fields: &'static [&'static str],

    /// Tags whose text is prepended to TEXT instead of appended in place
    /// (layout repair for editions with unreliable paragraph allocation)
    pub prepend_text_tags: &'static [&'static str],

    /// Tags that only mark a language: the line text is discarded and the
    /// language code installed when not yet present
    pub language_marker_tags: &'static [(&'static str, &'static str)],

    /// Content tags that additionally contribute a language code,
    /// ` & `-appended and deduplicated
    pub content_language_tags: &'static [(&'static str, &'static str)],

    /// Ordered separator table for MULTI lines
    pub separators: &'static [SeparatorRule],

    /// Language tag to full name expansion
    pub language_map: &'static [(&'static str, &'static str)],

    /// Language assumed when no tag was gathered
    pub default_language: &'static str,

    /// Whether the default language is also appended behind gathered tags
    pub append_default_language: bool,

    /// Internal fields dropped at finalization
    pub drop_fields: &'static [&'static str],

    /// Field renames applied at finalization
    pub renames: &'static [(&'static str, &'static str)],

    /// Split TITLE into SENDER_RAW / ADDRESSEE_RAW at finalization
    pub split_title: bool,

    /// Derive PLACE_OF_WRITING / DATE_OF_WRITING / YEAR from dateline fields
    pub derive_dateline: bool,

    /// ID prefix that forces the record into the appendix chapter
    pub appendix_id_prefix: Option<&'static str>,

    /// Fields re-attached (possibly empty) to every finalized record
    pub always_attached: &'static [&'static str],

    /// Prose fields passed through the text normalizer
    pub prose_fields: &'static [&'static str],

    /// Normalizer stages for this collection's prose
    pub normalizer: NormalizerOptions,
}

impl CollectionProfile {
    /// Whether the tag belongs to the collection's annotation vocabulary.
    ///
    /// Unknown tags are still routed as ad-hoc fields; this check only
    /// drives the vocabulary-drift warning.
    pub fn is_known_tag(&self, tag: &str) -> bool {
        tag == "MULTI"
            || tag == "CHAPTER"
            || self.schema.contains(&tag)
            || self.field_exclusions.contains(&tag)
            || self.content.tags().contains(&tag)
            || self.boundary.tags().contains(&tag)
            || self.language_marker_tags.iter().any(|(t, _)| *t == tag)
            || self.content_language_tags.iter().any(|(t, _)| *t == tag)
    }
}

/// The Jeake family correspondence (Rye, 1650s-1700s).
///
/// Letters open with a bracketed title row; Latin passages are marked
/// line-by-line and only recorded as a language.
pub static JEAKE: CollectionProfile = CollectionProfile {
    name: "jeake",
    serial_prefix: "j_",
    schema: &[
        "SERIAL_NR",
        "ID",
        "TITLE",
        "PAGE",
        "SENDER",
        "SENDER_RAW",
        "ADDRESSEE",
        "ADDRESSEE_RAW",
        "SALUTATION",
        "SIGN-OFF",
        "POSTSCRIPT",
        "ADDRESSLINE",
        "DATELINE",
        "DATE",
        "NOTES",
        "LATIN",
        "FOOTNOTE",
        "BODY",
        "TEXT",
        "CHAPTER",
        "LANGUAGE",
    ],
    boundary: BoundaryRule::TitleBracket {
        tag_fragment: "TITLE",
        seeds: "TITLE",
    },
    content: ContentRule::Exclude(&[
        "CHAPTER", "FOOTNOTE", "TITLE", "ID", "NOISE", "HEADER", "LATIN",
    ]),
    field_exclusions: &["NOISE", "HEADER"],
    flat_fields: &[],
    prepend_text_tags: &[],
    language_marker_tags: &[("LATIN", "[L]")],
    content_language_tags: &[],
    separators: &[
        SeparatorRule {
            symbol: '&',
            first: FieldTarget {
                field: "TITLE",
                join: FieldJoin::SpacePrefixed,
            },
            second: FieldTarget {
                field: "ID",
                join: FieldJoin::Bare,
            },
            text: TextContribution::None,
        },
        SeparatorRule {
            symbol: 'ù',
            first: FieldTarget {
                field: "DATELINE",
                join: FieldJoin::Spaced,
            },
            second: FieldTarget {
                field: "SIGN-OFF",
                join: FieldJoin::Spaced,
            },
            text: TextContribution::NewlinePair,
        },
        SeparatorRule {
            symbol: '€',
            first: FieldTarget {
                field: "DATE",
                join: FieldJoin::Spaced,
            },
            second: FieldTarget {
                field: "SENDER_RAW",
                join: FieldJoin::Spaced,
            },
            text: TextContribution::NewlinePair,
        },
        SeparatorRule {
            symbol: '%',
            first: FieldTarget {
                field: "SIGN-OFF",
                join: FieldJoin::Spaced,
            },
            second: FieldTarget {
                field: "SENDER_RAW",
                join: FieldJoin::Spaced,
            },
            text: TextContribution::NewlinePair,
        },
        SeparatorRule {
            symbol: '£',
            first: FieldTarget {
                field: "ADDRESSEE_RAW",
                join: FieldJoin::Spaced,
            },
            second: FieldTarget {
                field: "DATELINE",
                join: FieldJoin::Spaced,
            },
            text: TextContribution::NewlinePair,
        },
        SeparatorRule {
            symbol: '$',
            first: FieldTarget {
                field: "DATELINE",
                join: FieldJoin::Spaced,
            },
            second: FieldTarget {
                field: "SENDER_RAW",
                join: FieldJoin::Spaced,
            },
            text: TextContribution::NewlinePair,
        },
    ],
    language_map: &[("[E]", "ENGLISH"), ("[L]", "LATIN")],
    default_language: "[E]",
    append_default_language: true,
    drop_fields: &["BODY", "NOISE", "HEADER"],
    renames: &[("SENDER", "SENDER_RAW"), ("ADDRESSEE", "ADDRESSEE_RAW")],
    split_title: false,
    derive_dateline: false,
    appendix_id_prefix: None,
    always_attached: &[],
    prose_fields: &[
        "SALUTATION",
        "SIGN-OFF",
        "POSTSCRIPT",
        "NOTES",
        "FOOTNOTE",
        "TEXT",
    ],
    normalizer: NormalizerOptions {
        normalize_unicode: true,
        normalize_punctuation: true,
        join_hyphenated: true,
        correct_spelling: true,
    },
};

/// The Marescoe-David merchant correspondence (London, 1660s-1670s).
///
/// Every letter opens with a date or date-of-arrival row; French passages
/// appear inside the body; itemized bills and exchange-rate tables use
/// hyphens as layout, so the hyphen joiner stays off.
pub static MARESCOE_DAVID: CollectionProfile = CollectionProfile {
    name: "marescoe-david",
    serial_prefix: "m-d_",
    schema: &[
        "SERIAL_NR",
        "ID",
        "TITLE",
        "PAGE",
        "SENDER_RAW",
        "ADDRESSEE_RAW",
        "SALUTATION",
        "SIGN-OFF",
        "POSTSCRIPT",
        "PLACE_OF_WRITING",
        "DATELINE",
        "DATE",
        "BODY",
        "FOOTNOTE",
        "TEXT",
        "EXCHANGE_RATE",
        "BILL",
        "CHAPTER",
        "LANGUAGE",
        "YEAR",
        "DATE_OF_WRITING",
        "DATE_OF_ARRIVAL",
        "DATE_OF_REPLY",
    ],
    boundary: BoundaryRule::AnyOfTags(&["DATE_OF_ARRIVAL", "DATE"]),
    content: ContentRule::Include(&["BODY", "FRENCH", "SIGN-OFF", "POSTSCRIPT"]),
    field_exclusions: &["NOISE", "HEADER"],
    flat_fields: &["LANGUAGE"],
    prepend_text_tags: &["SALUTATION"],
    language_marker_tags: &[],
    content_language_tags: &[("FRENCH", "[F]")],
    separators: &[
        SeparatorRule {
            symbol: '@',
            first: FieldTarget {
                field: "ID",
                join: FieldJoin::Bare,
            },
            second: FieldTarget {
                field: "TITLE",
                join: FieldJoin::Bare,
            },
            text: TextContribution::None,
        },
        SeparatorRule {
            symbol: '+',
            first: FieldTarget {
                field: "LANGUAGE",
                join: FieldJoin::Spaced,
            },
            second: FieldTarget {
                field: "BODY",
                join: FieldJoin::Spaced,
            },
            text: TextContribution::SecondBare,
        },
        SeparatorRule {
            symbol: 'ù',
            first: FieldTarget {
                field: "TITLE",
                join: FieldJoin::Spaced,
            },
            second: FieldTarget {
                field: "DATE_OF_REPLY",
                join: FieldJoin::Spaced,
            },
            text: TextContribution::None,
        },
        SeparatorRule {
            symbol: '§',
            first: FieldTarget {
                field: "ID",
                join: FieldJoin::Spaced,
            },
            second: FieldTarget {
                field: "BODY",
                join: FieldJoin::Spaced,
            },
            text: TextContribution::SecondBare,
        },
        SeparatorRule {
            symbol: '=',
            first: FieldTarget {
                field: "BODY",
                join: FieldJoin::Spaced,
            },
            second: FieldTarget {
                field: "SIGN-OFF",
                join: FieldJoin::SpacedTrailing,
            },
            text: TextContribution::PairSpaced,
        },
        SeparatorRule {
            symbol: '#',
            first: FieldTarget {
                field: "BILL",
                join: FieldJoin::Spaced,
            },
            second: FieldTarget {
                field: "BODY",
                join: FieldJoin::Spaced,
            },
            text: TextContribution::SecondBare,
        },
    ],
    language_map: &[
        ("[D]", "DUTCH"),
        ("[E]", "ENGLISH"),
        ("[F]", "FRENCH"),
        ("[G]", "GERMAN"),
    ],
    default_language: "[E]",
    append_default_language: false,
    drop_fields: &["BODY", "FRENCH", "NOISE", "HEADER"],
    renames: &[],
    split_title: true,
    derive_dateline: true,
    appendix_id_prefix: Some("[A"),
    always_attached: &["SENDER_RAW", "ADDRESSEE_RAW", "SALUTATION"],
    prose_fields: &[
        "SALUTATION",
        "SIGN-OFF",
        "POSTSCRIPT",
        "FOOTNOTE",
        "TEXT",
        "EXCHANGE_RATE",
        "BILL",
    ],
    normalizer: NormalizerOptions {
        normalize_unicode: true,
        normalize_punctuation: false,
        join_hyphenated: false,
        correct_spelling: true,
    },
};
