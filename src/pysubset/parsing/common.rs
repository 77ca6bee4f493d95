//! Shared parser pieces
//!
//! Small combinators used by both the expression and the statement grammar.

use chumsky::prelude::*;

use crate::pysubset::ast::Parameter;
use crate::pysubset::token::Token;

/// Type alias for parser error
pub(crate) type ParserError = Simple<Token>;

/// Boxed parser, the common currency between grammar levels
pub(crate) type GrammarParser<T> = BoxedParser<'static, Token, T, ParserError>;

/// Match one exact token.
pub(crate) fn token(kind: Token) -> impl Parser<Token, Token, Error = ParserError> + Clone {
    just(kind)
}

pub(crate) fn identifier() -> impl Parser<Token, String, Error = ParserError> + Clone {
    filter_map(|span, tok| match tok {
        Token::Identifier(name) => Ok(name),
        other => Err(Simple::expected_input_found(
            span,
            vec![Some(Token::Identifier(String::new()))],
            Some(other),
        )),
    })
}

pub(crate) fn integer() -> impl Parser<Token, i64, Error = ParserError> + Clone {
    filter_map(|span, tok| match tok {
        Token::Integer(value) => Ok(value),
        other => Err(Simple::expected_input_found(span, Vec::new(), Some(other))),
    })
}

/// `name, name, ...`, possibly empty, no trailing comma.
pub(crate) fn parameters() -> impl Parser<Token, Vec<Parameter>, Error = ParserError> + Clone {
    identifier()
        .map(Parameter::new)
        .separated_by(token(Token::Comma))
        .labelled("parameter list")
}
