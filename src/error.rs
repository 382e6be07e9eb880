use crate::ast::Role;

/// Everything that can go wrong while building a tree from notation.
///
/// The tokenizer and the renderer are total; only the parser produces these,
/// and the first one aborts the whole parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrammarError {
    #[error("unexpected end of input: expected {expected}")]
    UnexpectedEndOfInput { expected: &'static str },

    #[error("expected a modifier tag like `[s]`, but found `{found}`")]
    ExpectedModifierTag { found: String },

    #[error("unknown role tag `{found}`: expected one of [s], [v], [c], [o], [^]")]
    UnknownRoleTag { found: String },

    #[error("no {role} head to attach `{value}` to")]
    NoMatchingHead { role: Role, value: String },

    #[error("preposition group `{{ {pair}` is not closed with `}}` (found {found})")]
    UnterminatedPrepositionGroup { pair: String, found: String },

    #[error("expected {expected}, but found `{found}`")]
    UnexpectedToken {
        expected: &'static str,
        found: String,
    },

    #[error("the {role} head is empty")]
    EmptyHead { role: Role },

    #[error("{role} `{head}` already has a preposition")]
    DuplicatePreposition { role: Role, head: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_expected_and_found() {
        let err = GrammarError::UnexpectedToken {
            expected: "a preposition head",
            found: "[o]".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "expected a preposition head, but found `[o]`"
        );

        let err = GrammarError::UnterminatedPrepositionGroup {
            pair: "on;desk".to_string(),
            found: "end of input".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "preposition group `{ on;desk` is not closed with `}` (found end of input)"
        );

        let err = GrammarError::NoMatchingHead {
            role: Role::Object,
            value: "the".to_string(),
        };
        assert_eq!(err.to_string(), "no object head to attach `the` to");
    }
}
