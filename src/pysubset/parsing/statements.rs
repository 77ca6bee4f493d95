//! Statement grammar
//!
//!     module     := statement* end
//!     statement  := compound | simple NEWLINE
//!     simple     := target = expression | return [expression] | expression
//!     suite      := simple NEWLINE | INDENT statement+ DEDENT
//!     compound   := def NAME ( params ) : suite                    (L2)
//!                 | if expression : suite [else : suite]           (L3)
//!                 | while expression : suite                       (L3)
//!                 | class NAME : suite                             (L3)
//!
//!     A compound statement is never followed by its own NEWLINE: its suite already ends with
//!     one, or with the DEDENT that closes the block. Because blocks are explicit tokens, an
//!     `else` can only belong to the `if` whose suite it directly follows.

use chumsky::prelude::*;

use super::common::{identifier, parameters, token, GrammarParser, ParserError};
use super::expressions::{expression, target};
use crate::pysubset::ast::{Expr, Module, Stmt};
use crate::pysubset::level::Level;
use crate::pysubset::token::Token;

/// Build the whole-module parser for `level`.
pub(crate) fn module_parser(level: Level) -> GrammarParser<Module> {
    statement(level)
        .repeated()
        .then_ignore(end())
        .map(Module::new)
        .boxed()
}

pub(crate) fn statement(level: Level) -> GrammarParser<Stmt> {
    let expr = expression(level);
    let simple = simple_statement(level, expr.clone());

    recursive(move |statement: Recursive<'static, Token, Stmt, ParserError>| {
        let line = simple
            .clone()
            .then_ignore(token(Token::Newline))
            .labelled("statement");

        if level < Level::L2 {
            return line.boxed();
        }

        let suite = simple
            .then_ignore(token(Token::Newline))
            .map(|stmt| vec![stmt])
            .or(statement
                .repeated()
                .at_least(1)
                .delimited_by(token(Token::Indent), token(Token::Dedent)))
            .labelled("suite")
            .boxed();

        let function = token(Token::Def)
            .ignore_then(identifier())
            .then(parameters().delimited_by(token(Token::LParen), token(Token::RParen)))
            .then_ignore(token(Token::Colon))
            .then(suite.clone())
            .map(|((name, params), body)| Stmt::FunctionDef { name, params, body })
            .labelled("function definition");

        if level < Level::L3 {
            return function.or(line).boxed();
        }

        let if_statement = token(Token::If)
            .ignore_then(expr.clone())
            .then_ignore(token(Token::Colon))
            .then(suite.clone())
            .then(
                token(Token::Else)
                    .ignore_then(token(Token::Colon))
                    .ignore_then(suite.clone())
                    .or_not(),
            )
            .map(|((test, body), orelse)| Stmt::If {
                test,
                body,
                orelse: orelse.unwrap_or_default(),
            })
            .labelled("if statement");

        let while_statement = token(Token::While)
            .ignore_then(expr.clone())
            .then_ignore(token(Token::Colon))
            .then(suite.clone())
            .map(|(test, body)| Stmt::While { test, body })
            .labelled("while statement");

        let class = token(Token::Class)
            .ignore_then(identifier())
            .then_ignore(token(Token::Colon))
            .then(suite)
            .map(|(name, body)| Stmt::ClassDef { name, body })
            .labelled("class definition");

        choice((function, if_statement, while_statement, class, line)).boxed()
    })
    .boxed()
}

fn simple_statement(level: Level, expr: GrammarParser<Expr>) -> GrammarParser<Stmt> {
    let assignment = target(level, expr.clone())
        .then_ignore(token(Token::Assign))
        .then(expr.clone())
        .map(|(target, value)| Stmt::assign(target, value));

    let evaluation = expr.clone().map(Stmt::expr);

    if level < Level::L2 {
        return assignment.or(evaluation).boxed();
    }

    let return_statement = token(Token::Return)
        .ignore_then(expr.or_not())
        .map(|value| Stmt::Return { value })
        .labelled("return statement");

    choice((return_statement, assignment, evaluation)).boxed()
}
