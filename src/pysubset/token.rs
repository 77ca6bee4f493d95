//! Token definitions
//!
//!     A single token enumeration is shared by every stage of the pipeline. The logos derive
//!     produces the raw tokens: literals, identifiers, the 13 keywords, punctuation and a
//!     `LineBreak(width)` token that stands for "end of line plus the next line's leading
//!     whitespace". The payload is the width of that whitespace, not its text.
//!
//!     The structural kinds `Newline`, `Indent` and `Dedent` are never produced by logos. They
//!     are synthesized by the block filter (see [block_filter](crate::pysubset::lexing::transformations::block_filter)),
//!     which consumes every `LineBreak`. The parser therefore never sees a raw width.
//!
//!     Comments (`#` to end of line) and intra-line spaces or tabs are skipped and never become
//!     tokens.
use log::warn;
use logos::{Lexer, Logos};
use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// A token paired with the byte range it was produced from.
pub type TokenLocation = (Token, Range<usize>);

/// The reserved words, in the order they are documented.
pub const KEYWORDS: [&str; 13] = [
    "if", "else", "while", "return", "and", "or", "not", "is", "lambda", "def", "class", "True",
    "False",
];

#[derive(Logos, Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[logos(skip r"[ \t\f]+")]
#[logos(skip r"#[^\r\n]*")]
pub enum Token {
    // Raw line break: newline plus the following line's indentation width
    #[regex(r"\r?\n[ \t]*", line_break_width)]
    LineBreak(usize),

    // Structural tokens, synthesized by the block filter
    Newline,
    Indent,
    Dedent,

    // Keywords
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("while")]
    While,
    #[token("return")]
    Return,
    #[token("and")]
    And,
    #[token("or")]
    Or,
    #[token("not")]
    Not,
    #[token("is")]
    Is,
    #[token("lambda")]
    Lambda,
    #[token("def")]
    Def,
    #[token("class")]
    Class,
    #[token("True")]
    True,
    #[token("False")]
    False,

    // Literals and names
    #[regex(r"[0-9]+", integer_value)]
    Integer(i64),
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    // Operators and punctuation
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("=")]
    Assign,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
}

/// Width of the whitespace that follows the last newline of the slice.
fn line_break_width(lex: &mut Lexer<Token>) -> usize {
    lex.slice()
        .rsplit('\n')
        .next()
        .map(|indentation| indentation.chars().count())
        .unwrap_or(0)
}

/// Decimal literal value. Literals that overflow an i64 are replaced by 0.
// TODO: decide whether overflow should become a LexError instead of a silent 0.
fn integer_value(lex: &mut Lexer<Token>) -> i64 {
    lex.slice().parse().unwrap_or_else(|_| {
        warn!(
            "integer literal {} is too large, substituting 0",
            lex.slice()
        );
        0
    })
}

impl Token {
    /// Tokens produced by the block filter rather than by the scanner.
    pub fn is_structural(&self) -> bool {
        matches!(self, Token::Newline | Token::Indent | Token::Dedent)
    }

    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            Token::If
                | Token::Else
                | Token::While
                | Token::Return
                | Token::And
                | Token::Or
                | Token::Not
                | Token::Is
                | Token::Lambda
                | Token::Def
                | Token::Class
                | Token::True
                | Token::False
        )
    }

    /// Human readable description used in syntax error messages.
    pub fn describe(&self) -> String {
        match self {
            Token::LineBreak(width) => format!("line break (width {width})"),
            Token::Newline => "NEWLINE".to_string(),
            Token::Indent => "INDENT".to_string(),
            Token::Dedent => "DEDENT".to_string(),
            Token::Integer(value) => format!("integer {value}"),
            // Parsers list an empty identifier when any name would do.
            Token::Identifier(name) if name.is_empty() => "identifier".to_string(),
            Token::Identifier(name) => format!("identifier '{name}'"),
            other => format!("'{other}'"),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Token::LineBreak(width) => return write!(f, "\n{}", " ".repeat(*width)),
            Token::Newline => "\n",
            Token::Indent => "<indent>",
            Token::Dedent => "<dedent>",
            Token::If => "if",
            Token::Else => "else",
            Token::While => "while",
            Token::Return => "return",
            Token::And => "and",
            Token::Or => "or",
            Token::Not => "not",
            Token::Is => "is",
            Token::Lambda => "lambda",
            Token::Def => "def",
            Token::Class => "class",
            Token::True => "True",
            Token::False => "False",
            Token::Integer(value) => return write!(f, "{value}"),
            Token::Identifier(name) => return write!(f, "{name}"),
            Token::EqEq => "==",
            Token::NotEq => "!=",
            Token::Assign => "=",
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Comma => ",",
            Token::Colon => ":",
            Token::Semicolon => ";",
            Token::LParen => "(",
            Token::RParen => ")",
            Token::LBracket => "[",
            Token::RBracket => "]",
            Token::LBrace => "{",
            Token::RBrace => "}",
        };
        f.write_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        Token::lexer(source).filter_map(|result| result.ok()).collect()
    }

    #[test]
    fn test_keywords_and_identifiers() {
        assert_eq!(
            kinds("if iffy lambda_ True"),
            vec![
                Token::If,
                Token::Identifier("iffy".to_string()),
                Token::Identifier("lambda_".to_string()),
                Token::True,
            ]
        );
    }

    #[test]
    fn test_every_keyword_has_a_token() {
        for keyword in KEYWORDS {
            let tokens = kinds(keyword);
            assert_eq!(tokens.len(), 1, "{keyword}");
            assert!(tokens[0].is_keyword(), "{keyword} lexed as {:?}", tokens[0]);
        }
    }

    #[test]
    fn test_lowercase_booleans_are_identifiers() {
        assert_eq!(kinds("true"), vec![Token::Identifier("true".to_string())]);
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            kinds("== != = + - , : ; ( ) [ ] { }"),
            vec![
                Token::EqEq,
                Token::NotEq,
                Token::Assign,
                Token::Plus,
                Token::Minus,
                Token::Comma,
                Token::Colon,
                Token::Semicolon,
                Token::LParen,
                Token::RParen,
                Token::LBracket,
                Token::RBracket,
                Token::LBrace,
                Token::RBrace,
            ]
        );
    }

    #[test]
    fn test_line_break_carries_width() {
        assert_eq!(
            kinds("a\n    b\n\tc\r\nd"),
            vec![
                Token::Identifier("a".to_string()),
                Token::LineBreak(4),
                Token::Identifier("b".to_string()),
                Token::LineBreak(1),
                Token::Identifier("c".to_string()),
                Token::LineBreak(0),
                Token::Identifier("d".to_string()),
            ]
        );
    }

    #[test]
    fn test_comments_are_skipped() {
        assert_eq!(
            kinds("x # trailing comment"),
            vec![Token::Identifier("x".to_string())]
        );
    }

    #[test]
    fn test_integer_overflow_becomes_zero() {
        assert_eq!(kinds("99999999999999999999999"), vec![Token::Integer(0)]);
        assert_eq!(kinds("42"), vec![Token::Integer(42)]);
    }

    #[test]
    fn test_display_round_trips_spelling() {
        for source in ["if", "==", "{", "True", "x1", "17"] {
            let token = kinds(source).remove(0);
            assert_eq!(token.to_string(), source);
        }
    }
}
