//! The letter record under assembly.

use serde::{Deserialize, Serialize};

/// Collection-prefixed sequential record id, assigned at creation.
pub const SERIAL_NR: &str = "SERIAL_NR";
/// Page number of the line that opened the record.
pub const PAGE: &str = "PAGE";
/// Chapter carried forward from the most recent chapter marker.
pub const CHAPTER: &str = "CHAPTER";
/// Running reconstruction of the letter's readable text.
pub const TEXT: &str = "TEXT";
/// Accumulated language tags, ` & `-joined.
pub const LANGUAGE: &str = "LANGUAGE";
/// Whitespace-token count of `TEXT`, attached at finalization.
pub const N_WORDS: &str = "N_WORDS";

/// One letter record: an insertion-ordered mapping from field name to
/// accumulated string value.
///
/// Schema fields come first, initialized empty; unknown annotation tags
/// append ad-hoc fields behind them. Values only ever grow during assembly;
/// renames and derivations belong to finalization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Letter {
    fields: Vec<(String, String)>,
}

impl Letter {
    /// Create a record with every schema field initialized to empty.
    pub fn with_schema(schema: &[&str]) -> Self {
        Self {
            fields: schema
                .iter()
                .map(|name| (name.to_string(), String::new()))
                .collect(),
        }
    }

    /// Field value, or empty when the field does not exist.
    pub fn get(&self, key: &str) -> &str {
        self.fields
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
            .unwrap_or("")
    }

    /// Whether the record carries the field at all (even empty).
    pub fn has_field(&self, key: &str) -> bool {
        self.fields.iter().any(|(name, _)| name == key)
    }

    /// Set a field, creating it at the end of the record when new.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| name == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key.to_string(), value)),
        }
    }

    fn entry(&mut self, key: &str) -> &mut String {
        if let Some(index) = self.fields.iter().position(|(name, _)| name == key) {
            return &mut self.fields[index].1;
        }
        self.fields.push((key.to_string(), String::new()));
        &mut self.fields.last_mut().unwrap().1
    }

    /// Accumulate a line into a field following the books' layout:
    /// the concatenation is trimmed and newline-terminated, so repeated
    /// lines end up newline-joined.
    pub fn accumulate_line(&mut self, key: &str, text: &str) {
        let slot = self.entry(key);
        let joined = format!("{}{}", slot, text);
        *slot = format!("{}\n", joined.trim());
    }

    /// Accumulate without the newline convention (single-row fields).
    pub fn accumulate_flat(&mut self, key: &str, text: &str) {
        let slot = self.entry(key);
        let joined = format!("{}{}", slot, text);
        *slot = joined.trim().to_string();
    }

    /// Append a fragment verbatim.
    pub fn append_bare(&mut self, key: &str, part: &str) {
        self.entry(key).push_str(part);
    }

    /// Append a fragment behind an unconditional space.
    pub fn append_space_prefixed(&mut self, key: &str, part: &str) {
        let slot = self.entry(key);
        slot.push(' ');
        slot.push_str(part);
    }

    /// Append a fragment, space-separated when the field already has content.
    pub fn append_spaced(&mut self, key: &str, part: &str) {
        let slot = self.entry(key);
        if slot.is_empty() {
            slot.push_str(part);
        } else {
            slot.push(' ');
            slot.push_str(part);
        }
    }

    /// Like [`append_spaced`](Self::append_spaced), but a first write leaves
    /// a trailing space for the fragment that usually follows on a later row.
    pub fn append_spaced_trailing(&mut self, key: &str, part: &str) {
        let slot = self.entry(key);
        if slot.is_empty() {
            slot.push_str(part);
            slot.push(' ');
        } else {
            slot.push(' ');
            slot.push_str(part);
        }
    }

    /// Append to the running text reconstruction.
    pub fn append_text(&mut self, fragment: &str) {
        self.entry(TEXT).push_str(fragment);
    }

    /// Prepend ahead of everything gathered in the text reconstruction.
    pub fn prepend_text(&mut self, fragment: &str) {
        let slot = self.entry(TEXT);
        let mut value = String::with_capacity(fragment.len() + slot.len());
        value.push_str(fragment);
        value.push_str(slot);
        *slot = value;
    }

    /// Fields in record order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Number of fields, schema and ad-hoc alike.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_initialization() {
        let letter = Letter::with_schema(&[SERIAL_NR, "TITLE", TEXT]);
        assert_eq!(letter.field_count(), 3);
        assert_eq!(letter.get("TITLE"), "");
        assert!(letter.has_field(TEXT));
        assert!(!letter.has_field("BILL"));
    }

    #[test]
    fn test_accumulate_line_joins_with_newlines() {
        let mut letter = Letter::with_schema(&["NOTES"]);
        letter.accumulate_line("NOTES", "first row");
        letter.accumulate_line("NOTES", "second row");
        assert_eq!(letter.get("NOTES"), "first row\nsecond row\n");
    }

    #[test]
    fn test_accumulate_creates_ad_hoc_field() {
        let mut letter = Letter::with_schema(&[SERIAL_NR]);
        letter.accumulate_line("MARGINALIA", "faded note");
        assert!(letter.has_field("MARGINALIA"));
        assert_eq!(letter.get("MARGINALIA"), "faded note\n");
        // ad-hoc fields land behind the schema block
        assert_eq!(letter.fields().last().unwrap().0, "MARGINALIA");
    }

    #[test]
    fn test_spaced_appends() {
        let mut letter = Letter::with_schema(&["DATELINE", "SIGN-OFF"]);
        letter.append_spaced("DATELINE", "Rye");
        letter.append_spaced("DATELINE", "March 1680");
        assert_eq!(letter.get("DATELINE"), "Rye March 1680");

        letter.append_spaced_trailing("SIGN-OFF", "Your loving");
        assert_eq!(letter.get("SIGN-OFF"), "Your loving ");
        letter.append_spaced_trailing("SIGN-OFF", "father");
        assert_eq!(letter.get("SIGN-OFF"), "Your loving  father");
    }

    #[test]
    fn test_text_prepend() {
        let mut letter = Letter::with_schema(&[TEXT]);
        letter.append_text("body continues");
        letter.prepend_text("Most honoured Sir,\n");
        assert_eq!(letter.get(TEXT), "Most honoured Sir,\nbody continues");
    }
}
