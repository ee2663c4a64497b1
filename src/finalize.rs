//! Record finalization.
//!
//! Turns assembled [`Letter`] records into plain JSON maps: internal
//! staging fields go, empty fields go, composite fields are decomposed,
//! language tags expand to full names, fields return to canonical schema
//! order, and the prose passes through the text normalizer. The step order
//! matters and follows the editions' conventions.

use serde_json::{Map, Value};

use crate::collection::CollectionProfile;
use crate::model::{Letter, CHAPTER, LANGUAGE, N_WORDS, PAGE, SERIAL_NR, TEXT};
use crate::normalize::{word_count, TextNormalizer};

/// One finalized corpus record, keys in canonical order.
pub type CorpusRecord = Map<String, Value>;

/// Options for finalization.
#[derive(Debug, Clone, Default)]
pub struct FinalizeOptions {
    /// Drop records with no populated field beyond the always-stamped ones.
    ///
    /// Off by default: a boundary line with nothing behind it still yields
    /// a (nearly empty) record, which downstream joins may rely on.
    pub drop_empty_records: bool,
}

impl FinalizeOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the empty-record policy.
    pub fn drop_empty_records(mut self, drop: bool) -> Self {
        self.drop_empty_records = drop;
        self
    }
}

/// Working field set during finalization: insertion-ordered, removable.
struct FieldSet {
    fields: Vec<(String, String)>,
}

impl FieldSet {
    fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    fn contains(&self, key: &str) -> bool {
        self.fields.iter().any(|(name, _)| name == key)
    }

    fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| name == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key.to_string(), value)),
        }
    }

    fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.fields.iter().position(|(name, _)| name == key)?;
        Some(self.fields.remove(index).1)
    }
}

/// Finalize assembled letters into plain corpus records.
pub fn finalize(
    letters: &[Letter],
    profile: &CollectionProfile,
    options: &FinalizeOptions,
) -> Vec<CorpusRecord> {
    let normalizer = TextNormalizer::new(profile.normalizer.clone());

    let mut records = Vec::with_capacity(letters.len());
    for letter in letters {
        let record = finalize_letter(letter, profile, &normalizer);
        if options.drop_empty_records && !is_populated(&record, profile) {
            log::warn!(
                "record {} has no populated fields, dropped",
                record
                    .get(SERIAL_NR)
                    .and_then(Value::as_str)
                    .unwrap_or("<unnumbered>")
            );
            continue;
        }
        records.push(record);
    }
    records
}

fn finalize_letter(
    letter: &Letter,
    profile: &CollectionProfile,
    normalizer: &TextNormalizer,
) -> CorpusRecord {
    // internal staging fields and empty fields go first; everything a later
    // step sets survives even when empty
    let mut working = FieldSet {
        fields: letter
            .fields()
            .filter(|(name, value)| !profile.drop_fields.contains(name) && !value.is_empty())
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect(),
    };

    for (from, to) in profile.renames {
        if let Some(value) = working.remove(from) {
            working.set(to, value);
        }
    }

    if profile.split_title {
        split_title(&mut working);
    }

    if profile.derive_dateline {
        derive_dateline(&mut working);
    }

    expand_language(&mut working, profile);

    if let Some(prefix) = profile.appendix_id_prefix {
        if working
            .get("ID")
            .is_some_and(|id| id.trim().starts_with(prefix))
        {
            working.set(CHAPTER, "APPENDIX");
        }
    }

    // canonical schema order first, surviving ad-hoc fields behind it
    let mut record = CorpusRecord::new();
    for key in profile.schema {
        if let Some(value) = working.get(key) {
            record.insert(key.to_string(), Value::String(value.to_string()));
        }
    }
    for (key, value) in &working.fields {
        if !record.contains_key(key) {
            record.insert(key.clone(), Value::String(value.clone()));
        }
    }
    for key in profile.always_attached {
        // keeps its slot when already present, lands at the end otherwise
        record.insert(
            key.to_string(),
            Value::String(working.get(key).unwrap_or("").to_string()),
        );
    }

    for value in record.values_mut() {
        if let Value::String(text) = value {
            let trimmed = text.trim_matches('\n').to_string();
            *text = trimmed;
        }
    }

    for key in profile.prose_fields {
        if let Some(Value::String(text)) = record.get(*key) {
            let cleaned = normalizer.process(text);
            record.insert(key.to_string(), Value::String(cleaned));
        }
    }

    if let Some(Value::String(text)) = record.get(TEXT) {
        let count = word_count(text);
        record.insert(N_WORDS.to_string(), Value::from(count));
    }

    record
}

/// Split a title row of the form `<sender> to <addressee>` on the first
/// `to`, repairing the common OCR misrenderings `tO` and `t0` beforehand.
/// Without the delimiter the whole title is the sender.
fn split_title(working: &mut FieldSet) {
    let Some(title) = working.get("TITLE") else {
        return;
    };
    let cleaned = title.replace(" tO ", " to ").replace(" t0 ", " to ");
    match cleaned.find("to") {
        Some(index) => {
            let sender = cleaned[..index].trim().to_string();
            let addressee = cleaned[index + 2..].trim().to_string();
            working.set("SENDER_RAW", sender);
            working.set("ADDRESSEE_RAW", addressee);
        }
        None => {
            working.set("SENDER_RAW", cleaned.trim());
            working.set("ADDRESSEE_RAW", "");
        }
    }
}

/// Derive place/date/year sub-fields from the composite dateline fields.
///
/// Datelines close with a three-token date (`the 4th May 1669`) unless the
/// editors marked the letter `[UNDATED]`; a `LONDON`-led DATE row doubles
/// as the dateline. DATE disappears once its content is distributed.
fn derive_dateline(working: &mut FieldSet) {
    if let Some(dateline) = working.get("DATELINE") {
        let undated = dateline.trim().ends_with("[UNDATED]");
        let tokens: Vec<String> = dateline.split_whitespace().map(str::to_string).collect();
        if undated {
            working.set(
                "DATE_OF_WRITING",
                tokens.last().cloned().unwrap_or_default(),
            );
            working.set(
                "PLACE_OF_WRITING",
                tokens[..tokens.len().saturating_sub(1)].join(" "),
            );
        } else {
            let split = tokens.len().saturating_sub(3);
            working.set("DATE_OF_WRITING", tokens[split..].join(" "));
            working.set("PLACE_OF_WRITING", tokens[..split].join(" "));
            working.set("YEAR", tokens.last().cloned().unwrap_or_default());
        }
    }

    if working.contains("DATE") {
        let date = working.remove("DATE").unwrap_or_default();
        let tokens: Vec<String> = date.split_whitespace().map(str::to_string).collect();
        working.set("YEAR", tokens.last().cloned().unwrap_or_default());

        if date.trim().starts_with("LONDON") {
            let split = tokens.len().saturating_sub(3);
            working.set("DATELINE", date.clone());
            working.set("DATE_OF_WRITING", tokens[split..].join(" "));
            working.set("PLACE_OF_WRITING", tokens[..split].join(" "));
        } else {
            working.set("DATE_OF_WRITING", date);
        }
    }
}

/// Default and expand the gathered language tags to full names.
fn expand_language(working: &mut FieldSet, profile: &CollectionProfile) {
    if !working.contains(LANGUAGE) {
        working.set(LANGUAGE, profile.default_language);
    } else if profile.append_default_language {
        let gathered = working.get(LANGUAGE).unwrap_or_default().to_string();
        working.set(
            LANGUAGE,
            format!("{} & {}", gathered, profile.default_language),
        );
    }

    let tags = working.get(LANGUAGE).unwrap_or_default().to_string();
    let names: Vec<&str> = tags
        .split(" & ")
        .map(|tag| {
            let tag = tag.trim();
            profile
                .language_map
                .iter()
                .find(|(code, _)| *code == tag)
                .map(|(_, name)| *name)
                .unwrap_or(tag)
        })
        .collect();
    working.set(LANGUAGE, names.join(" & "));
}

fn is_populated(record: &CorpusRecord, profile: &CollectionProfile) -> bool {
    const STAMPED: &[&str] = &[SERIAL_NR, PAGE, CHAPTER, LANGUAGE, N_WORDS];
    record.iter().any(|(key, value)| {
        !STAMPED.contains(&key.as_str())
            && !profile.always_attached.contains(&key.as_str())
            && value.as_str().is_some_and(|text| !text.is_empty())
    })
}
