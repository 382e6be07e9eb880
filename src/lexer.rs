use crate::ast::Role;
use std::fmt;
use winnow::combinator::delimited;
use winnow::token::any;
use winnow::{ModalResult, Parser};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Word(String),
    Pipe,      // |  subject / verb
    Backslash, // \  verb / complement
    Semicolon, // ;  preposition / head
    Prep,      // prep:
    OpenGroup,
    CloseGroup,
    Tag(Role),
    UnknownTag(char),
}

impl Token {
    pub fn is_tag(&self) -> bool {
        matches!(self, Token::Tag(_) | Token::UnknownTag(_))
    }

    fn classify(raw: &str) -> Token {
        match raw {
            "|" => Token::Pipe,
            "\\" => Token::Backslash,
            ";" => Token::Semicolon,
            "prep:" => Token::Prep,
            "{" => Token::OpenGroup,
            "}" => Token::CloseGroup,
            _ => match tag_letter.parse(raw) {
                Ok(letter) => match Role::from_tag_letter(letter) {
                    Some(role) => Token::Tag(role),
                    None => Token::UnknownTag(letter),
                },
                Err(_) => Token::Word(raw.to_string()),
            },
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Word(w) => f.write_str(w),
            Token::Pipe => f.write_str("|"),
            Token::Backslash => f.write_str("\\"),
            Token::Semicolon => f.write_str(";"),
            Token::Prep => f.write_str("prep:"),
            Token::OpenGroup => f.write_str("{"),
            Token::CloseGroup => f.write_str("}"),
            Token::Tag(role) => write!(f, "[{}]", role.tag()),
            Token::UnknownTag(letter) => write!(f, "[{}]", letter),
        }
    }
}

// `[x]` with exactly one character between the brackets.
fn tag_letter(input: &mut &str) -> ModalResult<char> {
    delimited('[', any, ']').parse_next(input)
}

/// Splits notation into tokens. Never fails: malformed input is reported by
/// the parser.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut spaced = String::with_capacity(input.len() + 16);
    for ch in input.chars() {
        match ch {
            '|' | '\\' | ';' => {
                spaced.push(' ');
                spaced.push(ch);
                spaced.push(' ');
            }
            _ => spaced.push(ch),
        }
    }

    spaced.split_whitespace().map(Token::classify).collect()
}
