//! Statement and declaration parsing.

use super::Parser;
use crate::ast::Stmt;
use crate::error::ParseError;
use crate::token::TokenKind;

impl Parser {
    /// Parse one top-level declaration: an assignment, a function
    /// definition, or a plain statement. Exposed for single-statement REPL
    /// use.
    pub(crate) fn declaration(&mut self) -> Result<Stmt, ParseError> {
        if let TokenKind::Ident(name) = self.peek().kind.clone() {
            if matches!(self.peek_at(1).kind, TokenKind::Arrow) {
                self.advance(); // identifier
                self.advance(); // '<-'
                let rhs = self.parse_expression()?;
                self.expect(TokenKind::Semi, "to terminate assignment")?;
                return Ok(Stmt::AssnStmt { name, rhs });
            }
        }
        if self.check(&TokenKind::Fn) {
            return self.parse_fn_stmt();
        }
        self.statement()
    }

    fn statement(&mut self) -> Result<Stmt, ParseError> {
        match &self.peek().kind {
            TokenKind::If => self.parse_if_stmt(),
            TokenKind::Let => self.parse_let_stmt(),
            TokenKind::For => self.parse_for_stmt(),
            TokenKind::Print => self.parse_print_stmt(),
            TokenKind::LBrace => Ok(Stmt::BlockStmt(self.parse_block()?)),
            _ => {
                let expr = self.parse_expression()?;
                self.expect(TokenKind::Semi, "to terminate expression statement")?;
                Ok(Stmt::ExprStmt(expr))
            }
        }
    }

    fn parse_block(&mut self) -> Result<Vec<Stmt>, ParseError> {
        self.expect(TokenKind::LBrace, "to open a block")?;
        let mut stmts = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.is_eof() {
            stmts.push(self.declaration()?);
        }
        self.expect(TokenKind::RBrace, "to close a block")?;
        Ok(stmts)
    }

    fn parse_print_stmt(&mut self) -> Result<Stmt, ParseError> {
        self.advance(); // 'print'
        let expr = self.parse_expression()?;
        self.expect(TokenKind::Semi, "to terminate print statement")?;
        Ok(Stmt::PrintStmt(expr))
    }

    fn parse_if_stmt(&mut self) -> Result<Stmt, ParseError> {
        self.advance(); // 'if'
        let cond = self.parse_expression()?;
        let then_block = self.parse_block()?;
        let else_block = if self.matches(&TokenKind::Else) {
            Some(self.parse_block()?)
        } else {
            None
        };
        Ok(Stmt::IfStmt { cond, then_block, else_block })
    }

    fn parse_let_stmt(&mut self) -> Result<Stmt, ParseError> {
        self.advance(); // 'let'
        let binder = self.expect_ident()?;
        self.expect(TokenKind::Arrow, "after let binder")?;
        let expr = self.parse_expression()?;
        self.expect(TokenKind::In, "before let body")?;
        let body = self.parse_block()?;
        Ok(Stmt::LetStmt { binder, expr, body })
    }

    fn parse_for_stmt(&mut self) -> Result<Stmt, ParseError> {
        self.advance(); // 'for'
        let binder = self.expect_ident()?;
        self.expect(TokenKind::In, "after for binder")?;
        let iterator = self.parse_expression()?;
        let body = self.parse_block()?;
        Ok(Stmt::ForStmt { binder, iterator, body })
    }

    fn parse_fn_stmt(&mut self) -> Result<Stmt, ParseError> {
        self.advance(); // 'fn'
        let name = self.expect_ident()?;
        self.expect(TokenKind::LParen, "to open parameter list")?;
        let mut params = Vec::new();
        if !self.check(&TokenKind::RParen) {
            params.push(self.expect_ident()?);
            while self.matches(&TokenKind::Comma) {
                params.push(self.expect_ident()?);
            }
        }
        self.expect(TokenKind::RParen, "to close parameter list")?;
        let body = self.parse_block()?;
        Ok(Stmt::FnStmt { name, params, body })
    }
}
