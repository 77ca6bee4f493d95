//! Expression grammar
//!
//!     One grammar, built for a given level. Productions a level does not have are simply not
//!     added, so the same builder functions serve every level. Binding strength, loosest first:
//!
//!         conditional, lambda     (L2)
//!         or                      (L1)
//!         and                     (L1)
//!         not                     (L1)
//!         == != is                (L1, non-associative, chains nest on the left)
//!         +                       (L0, left-associative)
//!         unary -                 (L0, right-associative, tighter than +)
//!         call, subscript, atom
//!
//!     At L0 an expression is an addition chain, at L1 an `or` test, at L2 a conditional or a
//!     lambda. There is no binary minus at any level.

use chumsky::prelude::*;

use super::common::{identifier, integer, parameters, token, GrammarParser, ParserError};
use crate::pysubset::ast::{BoolOperator, CmpOperator, Expr, ExprContext};
use crate::pysubset::level::Level;
use crate::pysubset::token::Token;

/// Postfix operations that may follow an atom.
#[derive(Debug, Clone)]
enum Trailer {
    Call(Vec<Expr>),
    Index(Expr),
}

/// Build the expression parser for `level`.
pub(crate) fn expression(level: Level) -> GrammarParser<Expr> {
    recursive(move |expr: Recursive<'static, Token, Expr, ParserError>| {
        let expr = expr.boxed();
        let a_expr = addition(primary(level, expr.clone()));

        if level < Level::L1 {
            return a_expr;
        }

        let or_test = boolean_tests(a_expr);

        if level < Level::L2 {
            return or_test;
        }

        let conditional = recursive(
            move |conditional: Recursive<'static, Token, Expr, ParserError>| {
                or_test
                    .clone()
                    .then(
                        token(Token::If)
                            .ignore_then(or_test.clone())
                            .then_ignore(token(Token::Else))
                            .then(conditional)
                            .or_not(),
                    )
                    .map(|(body, tail)| match tail {
                        Some((test, orelse)) => Expr::if_exp(test, body, orelse),
                        None => body,
                    })
            },
        );

        let lambda = token(Token::Lambda)
            .ignore_then(parameters())
            .then_ignore(token(Token::Colon))
            .then(expr)
            .map(|(params, body)| Expr::lambda(params, body))
            .labelled("lambda");

        lambda.or(conditional).boxed()
    })
    .labelled("expression")
    .boxed()
}

/// `atom (call | subscript)*`. Subscripts exist from L1 on.
pub(crate) fn primary(level: Level, expr: GrammarParser<Expr>) -> GrammarParser<Expr> {
    let mut atom = choice((
        identifier().map(Expr::name),
        integer().map(Expr::int),
        expr.clone()
            .delimited_by(token(Token::LParen), token(Token::RParen)),
    ))
    .boxed();

    let mut trailer = expr
        .clone()
        .separated_by(token(Token::Comma))
        .delimited_by(token(Token::LParen), token(Token::RParen))
        .map(Trailer::Call)
        .boxed();

    if level >= Level::L1 {
        let boolean = token(Token::True)
            .to(Expr::bool(true))
            .or(token(Token::False).to(Expr::bool(false)));
        let list = expr
            .clone()
            .separated_by(token(Token::Comma))
            .delimited_by(token(Token::LBracket), token(Token::RBracket))
            .map(Expr::list)
            .labelled("list");
        let dict = expr
            .clone()
            .then_ignore(token(Token::Colon))
            .then(expr.clone())
            .separated_by(token(Token::Comma))
            .delimited_by(token(Token::LBrace), token(Token::RBrace))
            .map(Expr::dict)
            .labelled("dict");
        atom = choice((atom, boolean, list, dict)).boxed();

        let index = expr
            .delimited_by(token(Token::LBracket), token(Token::RBracket))
            .map(Trailer::Index);
        trailer = trailer.or(index).boxed();
    }

    atom.then(trailer.repeated())
        .foldl(|value, trailer| match trailer {
            Trailer::Call(args) => Expr::call(value, args),
            Trailer::Index(index) => Expr::subscript(value, index),
        })
        .boxed()
}

/// `-* primary (+ -* primary)*`
fn addition(primary: GrammarParser<Expr>) -> GrammarParser<Expr> {
    let u_expr = token(Token::Minus)
        .repeated()
        .then(primary)
        .foldr(|_, operand| Expr::neg(operand));

    u_expr
        .clone()
        .then(token(Token::Plus).ignore_then(u_expr).repeated())
        .foldl(Expr::add)
        .boxed()
}

/// The `or / and / not / comparison` ladder on top of an addition chain.
fn boolean_tests(a_expr: GrammarParser<Expr>) -> GrammarParser<Expr> {
    let operator = choice((
        token(Token::EqEq).to(CmpOperator::Eq),
        token(Token::NotEq).to(CmpOperator::NotEq),
        token(Token::Is).to(CmpOperator::Is),
    ));

    let comparison = a_expr
        .clone()
        .then(operator.then(a_expr).repeated())
        .foldl(|left, (op, right)| Expr::compare(left, op, right));

    let not_test = token(Token::Not)
        .repeated()
        .then(comparison)
        .foldr(|_, operand| Expr::not(operand));

    let and_test = chain(not_test.boxed(), Token::And, BoolOperator::And);
    chain(and_test, Token::Or, BoolOperator::Or)
}

/// `operand (keyword operand)*`, one flat `BoolOp` when the keyword occurs at all.
fn chain(operand: GrammarParser<Expr>, keyword: Token, op: BoolOperator) -> GrammarParser<Expr> {
    operand
        .clone()
        .then(token(keyword).ignore_then(operand).repeated())
        .map(move |(first, rest)| {
            if rest.is_empty() {
                first
            } else {
                let mut values = Vec::with_capacity(rest.len() + 1);
                values.push(first);
                values.extend(rest);
                Expr::bool_op(op, values)
            }
        })
        .boxed()
}

/// Left-hand side of `=`: a name, a parenthesised or bracketed target, or (L1) a subscript.
pub(crate) fn target(level: Level, expr: GrammarParser<Expr>) -> GrammarParser<Expr> {
    recursive(move |target: Recursive<'static, Token, Expr, ParserError>| {
        let name = identifier().map(Expr::store);
        let parenthesized = target
            .clone()
            .delimited_by(token(Token::LParen), token(Token::RParen));
        let bracketed = target
            .delimited_by(token(Token::LBracket), token(Token::RBracket))
            .map(|inner| Expr::List {
                elts: vec![inner],
                ctx: ExprContext::Store,
            });
        let simple = choice((name, parenthesized, bracketed));

        if level < Level::L1 {
            return simple.boxed();
        }

        let subscript = primary(level, expr).try_map(|value, span| match value {
            Expr::Subscript { .. } => Ok(value.into_store()),
            _ => Err(Simple::custom(span, "cannot assign to this expression")),
        });
        subscript.or(simple).boxed()
    })
    .labelled("assignment target")
    .boxed()
}
