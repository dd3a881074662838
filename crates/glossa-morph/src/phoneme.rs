// Phoneme classification and segmentation
//
// Multi-character phonemes ("tʃ", "aː") must win over their single
// character prefixes, so every lookup tries the inventory longest first.

use glossa_core::phoneme::{PhonemeClass, PhonemeInventory};

/// Which end of the word an edge test looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Leading,
    Trailing,
}

/// The longest phoneme of `class` found at `edge` of `word`, if any.
pub fn edge_phoneme<'i>(
    word: &str,
    class: PhonemeClass,
    edge: Edge,
    inventory: &'i PhonemeInventory,
) -> Option<&'i str> {
    if word.is_empty() {
        return None;
    }
    inventory
        .longest_first(class)
        .into_iter()
        .find(|p| match edge {
            Edge::Leading => word.starts_with(p),
            Edge::Trailing => word.ends_with(p),
        })
}

/// Whether the phoneme at `edge` of `word` belongs to `class`.
///
/// Always false for an empty word or an empty class list.
pub fn classifies(word: &str, class: PhonemeClass, edge: Edge, inventory: &PhonemeInventory) -> bool {
    edge_phoneme(word, class, edge, inventory).is_some()
}

pub fn ends_with_class(word: &str, class: PhonemeClass, inventory: &PhonemeInventory) -> bool {
    classifies(word, class, Edge::Trailing, inventory)
}

pub fn starts_with_class(word: &str, class: PhonemeClass, inventory: &PhonemeInventory) -> bool {
    classifies(word, class, Edge::Leading, inventory)
}

/// A span of a word recognized as one phoneme (or one unknown character).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'w> {
    pub text: &'w str,
    /// Byte offset of the segment in the word.
    pub start: usize,
    pub is_vowel: bool,
}

impl Segment<'_> {
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }
}

/// Split `word` into phoneme segments by greedy longest match.
///
/// Characters that start no known phoneme become single-character
/// non-vowel segments. When a string is listed as both vowel and consonant
/// the vowel reading wins.
pub fn segment<'w>(word: &'w str, inventory: &PhonemeInventory) -> Vec<Segment<'w>> {
    let mut candidates: Vec<(&str, bool)> = inventory
        .longest_first(PhonemeClass::Vowel)
        .into_iter()
        .map(|p| (p, true))
        .chain(
            inventory
                .longest_first(PhonemeClass::Consonant)
                .into_iter()
                .map(|p| (p, false)),
        )
        .collect();
    candidates.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

    let mut segments = Vec::new();
    let mut pos = 0;
    while pos < word.len() {
        let rest = &word[pos..];
        let (len, is_vowel) = match candidates.iter().find(|(p, _)| rest.starts_with(p)) {
            Some((p, is_vowel)) => (p.len(), *is_vowel),
            // `rest` is non-empty and `pos` is always on a char boundary.
            None => (rest.chars().next().map_or(1, char::len_utf8), false),
        };
        segments.push(Segment {
            text: &word[pos..pos + len],
            start: pos,
            is_vowel,
        });
        pos += len;
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inventory() -> PhonemeInventory {
        PhonemeInventory::new(["p", "t", "k", "s", "ʃ", "tʃ", "n", "ng"], ["a", "e", "i", "o", "u", "aː"])
    }

    #[test]
    fn trailing_vowel() {
        let inv = inventory();
        assert!(ends_with_class("bula", PhonemeClass::Vowel, &inv));
        assert!(!ends_with_class("kat", PhonemeClass::Vowel, &inv));
        assert!(ends_with_class("kat", PhonemeClass::Consonant, &inv));
    }

    #[test]
    fn leading_class() {
        let inv = inventory();
        assert!(starts_with_class("anak", PhonemeClass::Vowel, &inv));
        assert!(starts_with_class("tʃapa", PhonemeClass::Consonant, &inv));
        assert!(!starts_with_class("anak", PhonemeClass::Consonant, &inv));
    }

    #[test]
    fn longest_phoneme_is_reported() {
        let inv = inventory();
        assert_eq!(
            edge_phoneme("katʃ", PhonemeClass::Consonant, Edge::Trailing, &inv),
            Some("tʃ")
        );
        assert_eq!(
            edge_phoneme("sing", PhonemeClass::Consonant, Edge::Trailing, &inv),
            Some("ng")
        );
        assert_eq!(
            edge_phoneme("tʃa", PhonemeClass::Consonant, Edge::Leading, &inv),
            Some("tʃ")
        );
    }

    #[test]
    fn empty_word_or_list_never_classifies() {
        let inv = inventory();
        assert!(!ends_with_class("", PhonemeClass::Vowel, &inv));
        let no_vowels = PhonemeInventory::new(["k"], Vec::<String>::new());
        assert!(!ends_with_class("ka", PhonemeClass::Vowel, &no_vowels));
    }

    #[test]
    fn empty_phoneme_entries_do_not_match_everything() {
        let inv = PhonemeInventory::new([""], ["", "a"]);
        assert!(!ends_with_class("kat", PhonemeClass::Consonant, &inv));
        assert!(!ends_with_class("kit", PhonemeClass::Vowel, &inv));
    }

    #[test]
    fn segments_prefer_long_phonemes() {
        let inv = inventory();
        let segs = segment("tʃaːng", &inv);
        let texts: Vec<&str> = segs.iter().map(|s| s.text).collect();
        assert_eq!(texts, vec!["tʃ", "aː", "ng"]);
        assert_eq!(
            segs.iter().map(|s| s.is_vowel).collect::<Vec<_>>(),
            vec![false, true, false]
        );
        assert_eq!(segs[1].start, "tʃ".len());
        assert_eq!(segs[2].end(), "tʃaːng".len());
    }

    #[test]
    fn unknown_characters_become_single_segments() {
        let inv = inventory();
        let segs = segment("xé", &inv);
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[1].text, "é");
        assert!(!segs[1].is_vowel);
    }
}
