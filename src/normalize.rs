//! Text normalization pipeline for OCR-scanned correspondence.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Recurrent OCR misreadings and their corrections.
///
/// The fine print of the source editions confuses the OCR engine in
/// predictable ways (`c`/`e`, `I`/`T`/`[`, `ü`/`ii`, digit-letter swaps),
/// and several frequent words lose their following space. The table is
/// applied in order.
const SPELLING_TABLE: &[(&str, &str)] = &[
    (r"\B\|\B", "I"),
    (r"\bIam\b", "I am"),
    (r"\bTam\b", "I am"),
    (r"\b1am\b", "I am"),
    (r"\B\[am\b", "I am"),
    (r"\bIhave\b", "I have"),
    (r"\bThave\b", "I have"),
    (r"\B\[have\b", "I have"),
    (r"\bThaving\b", "I having"),
    (r"\B\[having\b", "I having"),
    (r"\bItrust\b", "I trust"),
    (r"\bIreceived", "I received"),
    (r"\bIremit\b", "I remit"),
    (r"\bIshall\b", "I shall"),
    (r"\bIFT\b", "If I"),
    (r"\bifI\b", "if I"),
    (r"\bandto\b", "and to"),
    (r"\bina\b", "in a"),
    (r"\bisa\b", "is a"),
    (r"\bif1\b", "if I"),
    (r"\bifit\b", "if it"),
    (r"\bIfit\b", "If it"),
    (r"\bIfand\b", "If and"),
    (r"\bifand", "if and"),
    (r"\bgota\b", "got a"),
    (r"\bnota\b", "not a"),
    (r"\bnotall\b", "not all"),
    (r"\bNotall\b", "Not all"),
    (r"\bIfin\b", "If in"),
    (r"\bifin\b", "if in"),
    (r"\bifthe\b", "if the"),
    (r"\bIfthe\b", "If the"),
    (r"\blitcle\b", "little"),
    (r"\bcither\b", "either"),
    (r"\bjourncy\b", "journey"),
    (r"\bmoncy\b", "money"),
    (r"\bnamcly\b", "namely"),
    (r"\bpicces\b", "pieces"),
    (r"\bscason\b", "season"),
    (r"\btherc\b", "there"),
    (r"\bweck\b", "week"),
    (r"\byct\b", "yet"),
    (r"\bct\b", "et"),
    (r"\bmicux\b", "mieux"),
    (r"\bMicux\b", "Mieux"),
    (r"\bplusicurs\b", "plusieurs"),
    (r"\bPlusicurs\b", "Plusieurs"),
    (r"\bJay\b", "J'ay"),
    (r"\bjay\b", "j'ay"),
    (r"\bDicu\b", "Dieu"),
    (r"\bdicu\b", "dieu"),
    (r"\badicu\b", "adieu"),
    (r"\bAdicu\b", "Adieu"),
    (r"\bdernicre\b", "derniere"),
    (r"\bheurcuse\b", "heureuse"),
    (r"\bMonsicur\b", "Monsieur"),
    (r"\bmonsicur\b", "monsieur"),
    (r"\bpartic\b", "partie"),
    (r"\breccu\b", "receu"),
    (r"\bLethicullier\b", "Lethieullier"),
    (r"\bLethicullier's\b", "Lethieullier's"),
    (r"\bNorrk(?:6|é)ping\b", "Norrköping"),
    (r"\bNyk(?:6|é)ping\b", "Nyköping"),
    (r"\bLiibeck\b", "Lübeck"),
    (r"\bLitbeck\b", "Lübeck"),
    (r"\bNiirnberg\b", "Nürnberg"),
    (r"\bNiiremberg\b", "Nüremberg"),
    (r"\bGliickstadt\b", "Glückstadt"),
    (r"\bCronstr(?:6|é)m\b", "Cronström"),
    (r"\bCronstr(?:6|é)ms\b", "Cronströms"),
    (r"\bOsterby\b", "Österby"),
    (r"\bliibs\b", "lübs"),
    (r"\bStiibbing\b", "Stübbing"),
    (r"\bBacrle\b", "Baerle"),
    (r"\bsce\b", "see"),
    (r"\bsoc\b", "soe"),
    (r"\bmce\b", "mee"),
    (r"\bthey’\]\B", "they'l"),
    (r"\bIb\b", "lb"),
    (r"\bIbs\b", "lbs"),
    (r"\bSIb\b", "Slb"),
    (r"\b1oth\b", "10th"),
    (r"\b2oth\b", "20th"),
    (r"\b3oth\b", "30th"),
    (r"\br2th\b", "12th"),
    (r"\bsth\b", "5th"),
    (r"\bss\b", "5s"),
    (r"\brsth\b", "15th"),
];

/// Options for text normalization.
#[derive(Debug, Clone)]
pub struct NormalizerOptions {
    /// Normalize Unicode to NFC form
    pub normalize_unicode: bool,

    /// Replace typographic dashes and quotes, drop stray trademark glyphs
    pub normalize_punctuation: bool,

    /// Join words hyphenated across line ends
    pub join_hyphenated: bool,

    /// Apply the OCR spelling-correction table
    pub correct_spelling: bool,
}

impl NormalizerOptions {
    /// Full pipeline: punctuation, hyphen joining, and spelling correction.
    pub fn full() -> Self {
        Self {
            normalize_unicode: true,
            normalize_punctuation: true,
            join_hyphenated: true,
            correct_spelling: true,
        }
    }

    /// Spelling correction only.
    ///
    /// Editions that use hyphens as legitimate layout (itemized bills,
    /// exchange-rate tables) must not pass through the hyphen joiner.
    pub fn spelling_only() -> Self {
        Self {
            normalize_unicode: true,
            normalize_punctuation: false,
            join_hyphenated: false,
            correct_spelling: true,
        }
    }
}

impl Default for NormalizerOptions {
    fn default() -> Self {
        Self::full()
    }
}

/// Text normalization pipeline.
///
/// All substitutions are idempotent: processing already-normalized text
/// yields identical output.
pub struct TextNormalizer {
    options: NormalizerOptions,
    hyphen_regex: Regex,
    spelling: Vec<(Regex, &'static str)>,
}

impl TextNormalizer {
    /// Create a new normalizer with the given options.
    pub fn new(options: NormalizerOptions) -> Self {
        Self {
            options,
            hyphen_regex: Regex::new(r"(\w+)-\s*(\w+)([.,;:!?)])?\s*").unwrap(),
            spelling: SPELLING_TABLE
                .iter()
                .map(|(pattern, replacement)| (Regex::new(pattern).unwrap(), *replacement))
                .collect(),
        }
    }

    /// Process text through the normalization pipeline.
    pub fn process(&self, text: &str) -> String {
        let mut result = text.to_string();

        if self.options.normalize_unicode {
            result = result.nfc().collect();
        }

        if self.options.normalize_punctuation {
            result = self.normalize_punctuation(&result);
        }

        if self.options.join_hyphenated {
            result = self.join_hyphenated(&result);
        }

        if self.options.correct_spelling {
            for (regex, replacement) in &self.spelling {
                result = regex.replace_all(&result, *replacement).to_string();
            }
        }

        result
    }

    fn normalize_punctuation(&self, text: &str) -> String {
        let mut result = text.replace('—', "-");
        result = result.replace('‘', "'").replace('’', "'");
        result = result.replace('“', "\"").replace('”', "\"");

        for glyph in ['©', '®', '™'] {
            result = result.replace(glyph, "");
        }

        result
    }

    fn join_hyphenated(&self, text: &str) -> String {
        // Rows end mid-word with a hyphen; the continuation follows on the
        // next row. The joined word keeps its trailing punctuation and ends
        // the row, so word counts over the result stay accurate.
        self.hyphen_regex
            .replace_all(text, "${1}${2}${3}\n")
            .to_string()
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new(NormalizerOptions::default())
    }
}

/// Count whitespace-delimited tokens in a text.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
