// Phoneme inventory and phonological classes
//
// The inventory is owned by the phonology editor; the engine only reads it.
// Phonemes are plain strings because a single phoneme may span several
// characters ("tʃ", "aː", "ng").

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GrammarError;

/// Phonological class used by edge tests and syllable approximation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhonemeClass {
    #[default]
    Vowel,
    Consonant,
}

impl PhonemeClass {
    pub fn as_str(self) -> &'static str {
        match self {
            PhonemeClass::Vowel => "vowel",
            PhonemeClass::Consonant => "consonant",
        }
    }
}

impl fmt::Display for PhonemeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered consonant and vowel lists of a language.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PhonemeInventory {
    #[serde(default)]
    pub consonants: Vec<String>,
    #[serde(default)]
    pub vowels: Vec<String>,
}

impl PhonemeInventory {
    /// Build an inventory from anything string-like.
    pub fn new<C, V>(consonants: C, vowels: V) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        V: IntoIterator,
        V::Item: Into<String>,
    {
        Self {
            consonants: consonants.into_iter().map(Into::into).collect(),
            vowels: vowels.into_iter().map(Into::into).collect(),
        }
    }

    /// The phoneme list for a class, in the order the editor supplied it.
    pub fn phonemes(&self, class: PhonemeClass) -> &[String] {
        match class {
            PhonemeClass::Vowel => &self.vowels,
            PhonemeClass::Consonant => &self.consonants,
        }
    }

    /// Non-empty phonemes of a class, longest first.
    ///
    /// The sort is stable, so phonemes of equal length keep their declared
    /// order.
    pub fn longest_first(&self, class: PhonemeClass) -> Vec<&str> {
        let mut sorted: Vec<&str> = self
            .phonemes(class)
            .iter()
            .map(String::as_str)
            .filter(|p| !p.is_empty())
            .collect();
        sorted.sort_by(|a, b| b.len().cmp(&a.len()));
        sorted
    }
}

/// The slice of the phonology document the engine consumes.
///
/// Every other field of the document (romanization, phonotactics, allophony)
/// belongs to other collaborators and is ignored on load.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhonologyConfig {
    #[serde(default)]
    pub phoneme_inventory: PhonemeInventory,
}

impl PhonologyConfig {
    pub fn from_json(json: &str) -> Result<Self, GrammarError> {
        Ok(serde_json::from_str(json)?)
    }
}
