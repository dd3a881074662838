// Error types
//
// `MorphError` covers the failures that can happen while a rule is being
// applied. None of them escape the engine: they are rendered into the trace
// of an unchanged, not-applied outcome. `GrammarError` is reserved for
// loading documents, which is the only place an `Err` reaches the caller.

use crate::rule::OperationKind;

/// A recoverable failure during rule application.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MorphError {
    /// A match, condition, stem or infix-position pattern failed to compile.
    #[error("invalid pattern /{pattern}/: {message}")]
    MalformedPattern { pattern: String, message: String },

    /// An infix, circumfix, reduplication or ablaut rule without its payload.
    #[error("{kind}: missing config")]
    MissingOperationConfig { kind: OperationKind },

    /// The rule's match pattern did not match the word.
    #[error("pattern /{pattern}/ did not match")]
    GateRejected { pattern: String },

    /// No rule of the active strategy encodes the requested combination.
    #[error("{strategy}: {reason}")]
    NoApplicableRule {
        strategy: &'static str,
        reason: &'static str,
    },
}

/// Error type for loading grammar and phonology documents.
#[derive(Debug, thiserror::Error)]
pub enum GrammarError {
    /// The document is not valid JSON or does not have the expected shape.
    #[error("malformed document: {0}")]
    Json(#[from] serde_json::Error),

    /// A rule names an operation kind the engine does not know.
    #[error("rule {rule_id}: unknown operation type \"{kind}\"")]
    UnknownOperation { rule_id: String, kind: String },

    /// A rule whose operation payload is absent or empty.
    #[error("rule {rule_id}: {source}")]
    InvalidRule {
        rule_id: String,
        #[source]
        source: MorphError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn morph_error_messages_read_as_trace_fragments() {
        let e = MorphError::GateRejected {
            pattern: "a$".to_string(),
        };
        assert_eq!(e.to_string(), "pattern /a$/ did not match");

        let e = MorphError::MissingOperationConfig {
            kind: OperationKind::Infix,
        };
        assert_eq!(e.to_string(), "infix: missing config");

        let e = MorphError::NoApplicableRule {
            strategy: "isolating",
            reason: "no inflection expected",
        };
        assert_eq!(e.to_string(), "isolating: no inflection expected");
    }

    #[test]
    fn grammar_error_names_the_rule() {
        let e = GrammarError::UnknownOperation {
            rule_id: "r1".to_string(),
            kind: "metathesis".to_string(),
        };
        assert_eq!(e.to_string(), "rule r1: unknown operation type \"metathesis\"");
    }
}
