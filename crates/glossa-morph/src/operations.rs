// The six primitive morphological operations.
//
// Every operation is a pure function of its inputs. Affix strings may carry
// hyphens as boundary markers in the grammar editor's notation ("-s",
// "ge-", "-um-"); those are removed before anything is attached.

use glossa_core::error::MorphError;
use glossa_core::phoneme::PhonemeInventory;
use glossa_core::rule::{AblautConfig, CircumfixConfig, InfixConfig, ReduplicationMode};

use crate::pattern;
use crate::phoneme::segment;

/// Number of characters copied when no vowel anchors a syllable.
const REDUPLICATION_FALLBACK_CHARS: usize = 2;

/// A transformed word and a description of what happened to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transform {
    pub result: String,
    pub trace: String,
}

/// Strip boundary hyphens from both ends of an affix.
pub fn bare_affix(affix: &str) -> &str {
    affix.trim_matches('-')
}

pub fn prefix(word: &str, affix: &str) -> String {
    let affix = bare_affix(affix);
    let mut out = String::with_capacity(affix.len() + word.len());
    out.push_str(affix);
    out.push_str(word);
    out
}

pub fn suffix(word: &str, affix: &str) -> String {
    let affix = bare_affix(affix);
    let mut out = String::with_capacity(word.len() + affix.len());
    out.push_str(word);
    out.push_str(affix);
    out
}

/// Insert the morpheme right after the first match of the position pattern.
///
/// A pattern that never matches appends the morpheme instead; a pattern
/// that does not compile is an error.
pub fn infix(word: &str, config: &InfixConfig) -> Result<Transform, MorphError> {
    let re = pattern::compile(&config.position_regex)?;
    let morpheme = bare_affix(&config.morpheme);

    Ok(match re.find(word) {
        Some(m) => {
            let at = m.end();
            let mut result = String::with_capacity(word.len() + morpheme.len());
            result.push_str(&word[..at]);
            result.push_str(morpheme);
            result.push_str(&word[at..]);
            Transform {
                result,
                trace: format!("infix \"{morpheme}\" at pos {at}"),
            }
        }
        None => Transform {
            result: suffix(word, morpheme),
            trace: format!("infix /{}/ no match, appended \"{morpheme}\"", config.position_regex),
        },
    })
}

pub fn circumfix(word: &str, config: &CircumfixConfig) -> String {
    suffix(&prefix(word, &config.prefix_part), &config.suffix_part)
}

/// Copy all or part of the word.
///
/// Syllables are approximated from the inventory's vowels: the onset
/// syllable runs from the start of the word through its first vowel run,
/// the coda syllable from the start of the last vowel run to the end.
pub fn reduplicate(word: &str, mode: ReduplicationMode, inventory: &PhonemeInventory) -> Transform {
    match mode {
        ReduplicationMode::Full => Transform {
            result: word.repeat(2),
            trace: "full reduplication".to_string(),
        },
        ReduplicationMode::PartialOnset => {
            let onset = onset_syllable(word, inventory);
            Transform {
                result: format!("{onset}{word}"),
                trace: format!("partial onset \"{onset}\" + word"),
            }
        }
        ReduplicationMode::PartialCoda => {
            let coda = coda_syllable(word, inventory);
            Transform {
                result: format!("{word}{coda}"),
                trace: format!("word + partial coda \"{coda}\""),
            }
        }
    }
}

fn onset_syllable<'w>(word: &'w str, inventory: &PhonemeInventory) -> &'w str {
    let mut end = None;
    for seg in segment(word, inventory) {
        if seg.is_vowel {
            end = Some(seg.end());
        } else if end.is_some() {
            break;
        }
    }
    match end {
        Some(end) => &word[..end],
        None => {
            let cut = word
                .char_indices()
                .nth(REDUPLICATION_FALLBACK_CHARS)
                .map_or(word.len(), |(i, _)| i);
            &word[..cut]
        }
    }
}

fn coda_syllable<'w>(word: &'w str, inventory: &PhonemeInventory) -> &'w str {
    let mut start = None;
    for seg in segment(word, inventory).iter().rev() {
        if seg.is_vowel {
            start = Some(seg.start);
        } else if start.is_some() {
            break;
        }
    }
    match start {
        Some(start) => &word[start..],
        None => {
            let count = word.chars().count();
            let skip = count.saturating_sub(REDUPLICATION_FALLBACK_CHARS);
            let cut = word.char_indices().nth(skip).map_or(word.len(), |(i, _)| i);
            &word[cut..]
        }
    }
}

/// Replace the first occurrence of the target vowel.
///
/// An absent target leaves the word as it is; the trace says so.
pub fn ablaut(word: &str, config: &AblautConfig) -> Transform {
    let target = config.target_vowel.as_str();
    let replacement = config.replacement_vowel.as_str();
    if target.is_empty() || !word.contains(target) {
        return Transform {
            result: word.to_string(),
            trace: format!("ablaut: \"{target}\" not found"),
        };
    }
    Transform {
        result: word.replacen(target, replacement, 1),
        trace: format!("ablaut: \"{target}\" -> \"{replacement}\""),
    }
}
