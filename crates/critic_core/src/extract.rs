//! Best-effort parse of wall-label OCR text into artwork fields.
//!
//! Gallery labels usually carry the title on the first line and the artist on
//! the second, so unlabeled text falls back to that layout. Every value is
//! untrusted free text.

use std::sync::LazyLock;

use regex::{Match, Regex};

use crate::Field;

// Word boundaries are checked by `ascii_bounded`: CJK neighbours count as
// non-word characters, so `作品by梵谷` still splits on `by`.
static ARTIST_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)artist|by").expect("artist pattern compiles"));
static TITLE_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)untitled|title").expect("title pattern compiles"));

/// Explicit labels, tested in this order; the first hit on a line wins.
const LABELS: [(&str, Field); 4] = [
    ("artist:", Field::ArtistName),
    ("title:", Field::Title),
    ("medium:", Field::Medium),
    ("year:", Field::Year),
];

/// Fields inferred from a label photo. `None` means no signal was found.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LabelFields {
    pub artist_name: Option<String>,
    pub title: Option<String>,
    pub medium: Option<String>,
    pub year: Option<String>,
}

impl LabelFields {
    pub fn is_empty(&self) -> bool {
        self.artist_name.is_none()
            && self.title.is_none()
            && self.medium.is_none()
            && self.year.is_none()
    }

    fn slot(&mut self, field: Field) -> Option<&mut Option<String>> {
        match field {
            Field::ArtistName => Some(&mut self.artist_name),
            Field::Title => Some(&mut self.title),
            Field::Medium => Some(&mut self.medium),
            Field::Year => Some(&mut self.year),
            Field::Dimensions | Field::Notes => None,
        }
    }

    fn assign(&mut self, field: Field, value: &str) {
        if value.is_empty() {
            return;
        }
        if let Some(slot) = self.slot(field) {
            *slot = Some(value.to_string());
        }
    }
}

/// Maps recognized label text to the fields it can confidently fill.
pub fn extract_label_fields(text: &str) -> LabelFields {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let mut fields = LabelFields::default();
    for line in &lines {
        if apply_explicit_label(&mut fields, line) {
            continue;
        }
        apply_fallback(&mut fields, line);
    }

    if fields.title.is_none() {
        if let Some(first) = lines.first() {
            fields.title = Some((*first).to_string());
        }
    }
    if fields.artist_name.is_none() {
        if let Some(second) = lines.get(1) {
            fields.artist_name = Some((*second).to_string());
        }
    }
    fields
}

/// Returns true when the line carried one of the explicit labels.
fn apply_explicit_label(fields: &mut LabelFields, line: &str) -> bool {
    for (label, field) in LABELS {
        if let Some(start) = find_ignore_ascii_case(line, label) {
            let value = line[start + label.len()..].trim();
            fields.assign(field, value);
            return true;
        }
    }
    false
}

fn apply_fallback(fields: &mut LabelFields, line: &str) {
    if fields.artist_name.is_none() {
        if let Some(word) = last_keyword(&ARTIST_WORD, line) {
            fields.assign(Field::ArtistName, line[word.end()..].trim());
            return;
        }
    }
    if fields.title.is_none() {
        if let Some(word) = last_keyword(&TITLE_WORD, line) {
            let rest = line[word.end()..].trim();
            if rest.is_empty() && word.as_str().eq_ignore_ascii_case("untitled") {
                fields.assign(Field::Title, "Untitled");
            } else {
                fields.assign(Field::Title, rest);
            }
        }
    }
}

fn last_keyword<'a>(pattern: &Regex, line: &'a str) -> Option<Match<'a>> {
    pattern
        .find_iter(line)
        .filter(|word| ascii_bounded(line, word.start(), word.end()))
        .last()
}

/// True when neither neighbour of `line[start..end]` is an ASCII word byte.
fn ascii_bounded(line: &str, start: usize, end: usize) -> bool {
    let is_word = |byte: &u8| byte.is_ascii_alphanumeric() || *byte == b'_';
    let bytes = line.as_bytes();
    let before = start.checked_sub(1).and_then(|i| bytes.get(i));
    !before.is_some_and(is_word) && !bytes.get(end).is_some_and(is_word)
}

/// Byte offset of an ASCII `needle` in `haystack`, ignoring ASCII case.
///
/// Non-ASCII bytes never compare equal to the needle, so the returned offset
/// and `offset + needle.len()` are always char boundaries.
fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    let hay = haystack.as_bytes();
    let pat = needle.as_bytes();
    if pat.len() > hay.len() {
        return None;
    }
    (0..=hay.len() - pat.len()).find(|&i| hay[i..i + pat.len()].eq_ignore_ascii_case(pat))
}

#[cfg(test)]
mod tests {
    use super::find_ignore_ascii_case;

    #[test]
    fn finds_label_regardless_of_case() {
        assert_eq!(find_ignore_ascii_case("The ARTIST: x", "artist:"), Some(4));
        assert_eq!(find_ignore_ascii_case("art", "artist:"), None);
    }

    #[test]
    fn offsets_stay_on_char_boundaries() {
        let line = "藝術家 Artist: 梵谷";
        let start = find_ignore_ascii_case(line, "artist:").unwrap();
        assert!(line.is_char_boundary(start));
        assert_eq!(line[start + "artist:".len()..].trim(), "梵谷");
    }
}
