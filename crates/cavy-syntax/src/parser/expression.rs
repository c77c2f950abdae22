//! Expression parsing: precedence climbing over a fixed operator table.

use super::Parser;
use crate::ast::{BinOp, Expr, UnOp};
use crate::error::ParseError;
use crate::token::TokenKind;

/// `(precedence, right-associative?)` for each binary operator.
fn binop_for(kind: &TokenKind) -> Option<(BinOp, u8, bool)> {
    match kind {
        TokenKind::EqEq => Some((BinOp::Eq, 1, false)),
        TokenKind::NotEq => Some((BinOp::NotEq, 1, false)),
        TokenKind::DotDot => Some((BinOp::Range, 2, false)),
        TokenKind::Plus => Some((BinOp::Add, 3, false)),
        TokenKind::Minus => Some((BinOp::Sub, 3, false)),
        TokenKind::Star => Some((BinOp::Mul, 4, false)),
        TokenKind::Percent => Some((BinOp::Mod, 4, false)),
        TokenKind::Caret => Some((BinOp::Pow, 5, true)),
        _ => None,
    }
}

impl Parser {
    pub(super) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary(0)
    }

    fn parse_binary(&mut self, min_prec: u8) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;
        while let Some((op, prec, right_assoc)) = binop_for(&self.peek().kind) {
            if prec < min_prec {
                break;
            }
            let location = self.peek().location;
            self.advance();
            let next_min = if right_assoc { prec } else { prec + 1 };
            let right = self.parse_binary(next_min)?;
            left = Expr::BinOp {
                left: Box::new(left),
                op,
                right: Box::new(right),
                location,
            };
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let (op, location) = match &self.peek().kind {
            TokenKind::Question => (UnOp::Linearize, self.peek().location),
            TokenKind::Bang => (UnOp::Delinearize, self.peek().location),
            TokenKind::Tilde => (UnOp::Not, self.peek().location),
            _ => return self.parse_postfix(),
        };
        self.advance();
        let right = self.parse_unary()?;
        Ok(Expr::UnOp { op, right: Box::new(right), location })
    }

    fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary()?;
        loop {
            match &self.peek().kind {
                TokenKind::LParen => {
                    let location = self.peek().location;
                    self.advance();
                    let args = self.parse_expression_list(&TokenKind::RParen)?;
                    self.expect(TokenKind::RParen, "to close call arguments")?;
                    expr = Expr::Call { callee: Box::new(expr), args, location };
                }
                TokenKind::LBracket => {
                    let location = self.peek().location;
                    self.advance();
                    let index = self.parse_expression()?;
                    self.expect(TokenKind::RBracket, "to close index expression")?;
                    expr = Expr::Index { root: Box::new(expr), index: Box::new(index), location };
                }
                _ => break,
            }
        }
        Ok(expr)
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let token = self.peek().clone();
        match token.kind {
            TokenKind::Int(_) | TokenKind::Bool(_) => {
                self.advance();
                Ok(Expr::Literal(token))
            }
            TokenKind::Ident(name) => {
                self.advance();
                Ok(Expr::Variable { name, location: token.location })
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expression()?;
                self.expect(TokenKind::RParen, "to close parenthesised expression")?;
                Ok(Expr::Group(Box::new(inner)))
            }
            TokenKind::LBracket => self.parse_array_literal(),
            other => Err(ParseError::new(token.location, format!("expected an expression, found {other}"))),
        }
    }

    fn parse_array_literal(&mut self) -> Result<Expr, ParseError> {
        let location = self.peek().location;
        self.advance(); // '['
        let first = self.parse_expression()?;
        if self.matches(&TokenKind::Semi) {
            let reps = self.parse_expression()?;
            self.expect(TokenKind::RBracket, "to close intensional array literal")?;
            return Ok(Expr::IntensionalArray { item: Box::new(first), reps: Box::new(reps), location });
        }
        let mut items = vec![first];
        while self.matches(&TokenKind::Comma) {
            if self.check(&TokenKind::RBracket) {
                break;
            }
            items.push(self.parse_expression()?);
        }
        self.expect(TokenKind::RBracket, "to close array literal")?;
        Ok(Expr::ExtensionalArray { items, location })
    }

    pub(super) fn parse_expression_list(&mut self, terminator: &TokenKind) -> Result<Vec<Expr>, ParseError> {
        if self.check(terminator) {
            return Ok(Vec::new());
        }
        let mut exprs = vec![self.parse_expression()?];
        while self.matches(&TokenKind::Comma) {
            exprs.push(self.parse_expression()?);
        }
        Ok(exprs)
    }
}
