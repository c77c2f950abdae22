//! Recursive-descent parser with precedence climbing at the expression
//! level.

mod expression;
mod statement;

use crate::ast::Stmt;
use crate::error::ParseError;
use crate::lexer::lex;
use crate::token::{Token, TokenKind};

/// Parse a whole source file into a list of top-level declarations,
/// collecting every recoverable syntax error along the way.
///
/// Lexical errors are reported alongside parse errors rather than aborting
/// the parse outright, since a caller typically wants to see both classes
/// of problem in one pass.
pub fn parse(source: &str) -> (Vec<Stmt>, Vec<ParseError>) {
    let (tokens, lex_errors) = lex(source);
    let mut parser = Parser::new(tokens);
    let mut stmts = Vec::new();
    while !parser.is_eof() {
        match parser.declaration() {
            Ok(stmt) => stmts.push(stmt),
            Err(e) => {
                parser.errors.push(e);
                parser.synchronize();
            }
        }
    }
    let mut errors: Vec<ParseError> = lex_errors
        .into_iter()
        .map(|e| ParseError::new(e.location, e.message))
        .collect();
    errors.extend(parser.errors);
    (stmts, errors)
}

/// Parser state, exposed for single-statement REPL use via
/// [`Parser::declaration`].
pub(crate) struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) pos: usize,
    pub(crate) errors: Vec<ParseError>,
}

impl Parser {
    pub(crate) fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0, errors: Vec::new() }
    }

    pub(crate) fn is_eof(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    pub(crate) fn previous(&self) -> &Token {
        &self.tokens[self.pos.saturating_sub(1).min(self.tokens.len() - 1)]
    }

    pub(crate) fn peek_at(&self, offset: usize) -> &Token {
        &self.tokens[(self.pos + offset).min(self.tokens.len() - 1)]
    }

    pub(crate) fn advance(&mut self) -> Token {
        let tok = self.peek().clone();
        if !self.is_eof() {
            self.pos += 1;
        }
        tok
    }

    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.peek().kind) == std::mem::discriminant(kind)
    }

    pub(crate) fn matches(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, kind: TokenKind, context: &str) -> Result<Token, ParseError> {
        if self.check(&kind) {
            Ok(self.advance())
        } else {
            Err(ParseError::new(
                self.peek().location,
                format!("expected {kind} {context}, found {}", self.peek().kind),
            ))
        }
    }

    pub(crate) fn expect_ident(&mut self) -> Result<String, ParseError> {
        match self.peek().kind.clone() {
            TokenKind::Ident(name) => {
                self.advance();
                Ok(name)
            }
            other => Err(ParseError::new(self.peek().location, format!("expected identifier, found {other}"))),
        }
    }

    /// Advance tokens until the last-consumed token is `;`, or the current
    /// token opens a new statement, so a single bad statement doesn't poison
    /// the rest of the file.
    pub(crate) fn synchronize(&mut self) {
        while !self.is_eof() {
            if matches!(self.previous().kind, TokenKind::Semi) {
                return;
            }
            if matches!(
                self.peek().kind,
                TokenKind::If | TokenKind::For | TokenKind::Fn | TokenKind::Let | TokenKind::Print
            ) {
                return;
            }
            self.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinOp, Expr, Stmt, UnOp};

    #[test]
    fn parses_assignment_and_call() {
        let (stmts, errors) = parse("q <- qubit();");
        assert!(errors.is_empty());
        assert_eq!(stmts.len(), 1);
        match &stmts[0] {
            Stmt::AssnStmt { name, rhs } => {
                assert_eq!(name, "q");
                assert!(matches!(rhs, Expr::Call { .. }));
            }
            other => panic!("expected assignment, got {other:?}"),
        }
    }

    #[test]
    fn precedence_climbing_respects_table() {
        let (stmts, errors) = parse("x <- 1 + 2 * 3;");
        assert!(errors.is_empty());
        match &stmts[0] {
            Stmt::AssnStmt { rhs: Expr::BinOp { op: BinOp::Add, right, .. }, .. } => {
                assert!(matches!(**right, Expr::BinOp { op: BinOp::Mul, .. }));
            }
            other => panic!("unexpected shape: {other:?}"),
        }
    }

    #[test]
    fn caret_is_right_associative() {
        let (stmts, _) = parse("x <- 2 ^ 3 ^ 2;");
        match &stmts[0] {
            Stmt::AssnStmt { rhs: Expr::BinOp { op: BinOp::Pow, left, right, .. }, .. } => {
                assert!(matches!(**left, Expr::Literal(_)));
                assert!(matches!(**right, Expr::BinOp { op: BinOp::Pow, .. }));
            }
            other => panic!("unexpected shape: {other:?}"),
        }
    }

    #[test]
    fn if_else_requires_brace_blocks() {
        let (stmts, errors) = parse("if q { r <- ~r; } else { s <- ~s; }");
        assert!(errors.is_empty());
        assert!(matches!(stmts[0], Stmt::IfStmt { else_block: Some(_), .. }));
    }

    #[test]
    fn unary_operators_are_right_associative_prefix() {
        let (stmts, errors) = parse("x <- ~!?q;");
        assert!(errors.is_empty());
        match &stmts[0] {
            Stmt::AssnStmt { rhs: Expr::UnOp { op: UnOp::Not, right, .. }, .. } => {
                assert!(matches!(**right, Expr::UnOp { op: UnOp::Delinearize, .. }));
            }
            other => panic!("unexpected shape: {other:?}"),
        }
    }

    #[test]
    fn array_literals_both_shapes() {
        let (stmts, errors) = parse("a <- [1, 2, 3]; b <- [qubit(); 4];");
        assert!(errors.is_empty());
        assert!(matches!(stmts[0], Stmt::AssnStmt { rhs: Expr::ExtensionalArray { .. }, .. }));
        assert!(matches!(stmts[1], Stmt::AssnStmt { rhs: Expr::IntensionalArray { .. }, .. }));
    }

    #[test]
    fn error_recovery_reports_multiple_errors() {
        let (_, errors) = parse("x <- ; y <- ;");
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn let_and_for_and_fn_parse() {
        let (stmts, errors) = parse(
            "let x <- qubit() in { print x; } for i in 0..3 { print i; } fn f(a, b) { print a; }",
        );
        assert!(errors.is_empty());
        assert_eq!(stmts.len(), 3);
        assert!(matches!(stmts[0], Stmt::LetStmt { .. }));
        assert!(matches!(stmts[1], Stmt::ForStmt { .. }));
        assert!(matches!(stmts[2], Stmt::FnStmt { .. }));
    }
}
