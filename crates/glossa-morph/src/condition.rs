// Conditional allomorphy: pick the then- or else-affix of a clause

use glossa_core::phoneme::PhonemeInventory;
use glossa_core::rule::{ConditionTest, ConditionalClause};

use crate::pattern;
use crate::phoneme::{ends_with_class, starts_with_class};

/// The affix a clause selected for a word, and how it got there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionResolution<'c> {
    pub affix: &'c str,
    pub matched: bool,
    pub trace: String,
}

/// Evaluate `clause` against `word`.
///
/// A pattern test whose pattern does not compile counts as not matched;
/// the trace names the bad pattern.
pub fn resolve<'c>(word: &str, clause: &'c ConditionalClause, inventory: &PhonemeInventory) -> ConditionResolution<'c> {
    let (matched, test) = match &clause.test {
        ConditionTest::EndsWith { class } => {
            let m = ends_with_class(word, *class, inventory);
            (m, format!("ends_with {class}: {m}"))
        }
        ConditionTest::StartsWith { class } => {
            let m = starts_with_class(word, *class, inventory);
            (m, format!("starts_with {class}: {m}"))
        }
        ConditionTest::Matches { regex } => match pattern::is_match(regex, word) {
            Ok(m) => (m, format!("regex /{regex}/: {m}")),
            Err(e) => (false, e.to_string()),
        },
    };

    let affix = if matched {
        clause.then_affix.as_str()
    } else {
        clause.else_affix.as_str()
    };

    ConditionResolution {
        affix,
        matched,
        trace: format!("condition({test}) -> \"{affix}\""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glossa_core::phoneme::PhonemeClass;

    fn inventory() -> PhonemeInventory {
        PhonemeInventory::new(["k", "t", "s", "m"], ["a", "e", "i", "o", "u"])
    }

    fn vowel_final() -> ConditionalClause {
        ConditionalClause::new(
            ConditionTest::EndsWith {
                class: PhonemeClass::Vowel,
            },
            "-s",
            "-es",
        )
    }

    #[test]
    fn trailing_class_selects_then_affix() {
        let inv = inventory();
        let clause = vowel_final();
        let r = resolve("bula", &clause, &inv);
        assert!(r.matched);
        assert_eq!(r.affix, "-s");
        assert_eq!(r.trace, "condition(ends_with vowel: true) -> \"-s\"");
    }

    #[test]
    fn trailing_class_selects_else_affix() {
        let inv = inventory();
        let clause = vowel_final();
        let r = resolve("kat", &clause, &inv);
        assert!(!r.matched);
        assert_eq!(r.affix, "-es");
    }

    #[test]
    fn leading_class() {
        let inv = inventory();
        let clause = ConditionalClause::new(
            ConditionTest::StartsWith {
                class: PhonemeClass::Consonant,
            },
            "ma-",
            "m-",
        );
        assert_eq!(resolve("kat", &clause, &inv).affix, "ma-");
        let r = resolve("ika", &clause, &inv);
        assert_eq!(r.affix, "m-");
        assert!(r.trace.starts_with("condition(starts_with consonant: false)"));
    }

    #[test]
    fn pattern_test() {
        let inv = inventory();
        let clause = ConditionalClause::new(
            ConditionTest::Matches {
                regex: "[st]$".to_string(),
            },
            "-i",
            "-u",
        );
        assert_eq!(resolve("kat", &clause, &inv).affix, "-i");
        assert_eq!(resolve("kam", &clause, &inv).affix, "-u");
    }

    #[test]
    fn invalid_pattern_is_not_matched() {
        let inv = inventory();
        let clause = ConditionalClause::new(
            ConditionTest::Matches {
                regex: "(".to_string(),
            },
            "-i",
            "-u",
        );
        let r = resolve("kat", &clause, &inv);
        assert!(!r.matched);
        assert_eq!(r.affix, "-u");
        assert!(r.trace.contains("invalid pattern /(/"));
    }
}
