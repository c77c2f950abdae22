//! Abstract syntax tree.
//!
//! Expressions and statements are two disjoint tagged families; the
//! evaluator pattern-matches on them directly rather than dispatching
//! through a trait object.

use crate::token::{Location, Token};
use serde::{Deserialize, Serialize};

/// A binary operator, as classified by the parser's precedence table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinOp {
    Eq,
    NotEq,
    Range,
    Add,
    Sub,
    Mul,
    Mod,
    Pow,
}

/// A prefix unary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnOp {
    /// `?`, linearise a boolean literal into a qubit.
    Linearize,
    /// `!`, strong-measure a qubit (delinearise).
    Delinearize,
    /// `~`, logical NOT on a boolean or a Pauli-X application on a qubit.
    Not,
}

/// An expression.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Expr {
    BinOp {
        left: Box<Expr>,
        op: BinOp,
        right: Box<Expr>,
        location: Location,
    },
    UnOp {
        op: UnOp,
        right: Box<Expr>,
        location: Location,
    },
    Literal(Token),
    Group(Box<Expr>),
    Variable {
        name: String,
        location: Location,
    },
    ExtensionalArray {
        items: Vec<Expr>,
        location: Location,
    },
    IntensionalArray {
        item: Box<Expr>,
        reps: Box<Expr>,
        location: Location,
    },
    Index {
        root: Box<Expr>,
        index: Box<Expr>,
        location: Location,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
        location: Location,
    },
}

impl Expr {
    /// The location to blame in a diagnostic about this expression.
    pub fn location(&self) -> Location {
        match self {
            Expr::BinOp { location, .. }
            | Expr::UnOp { location, .. }
            | Expr::Variable { location, .. }
            | Expr::ExtensionalArray { location, .. }
            | Expr::IntensionalArray { location, .. }
            | Expr::Index { location, .. }
            | Expr::Call { location, .. } => *location,
            Expr::Literal(tok) => tok.location,
            Expr::Group(inner) => inner.location(),
        }
    }
}

/// A statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Stmt {
    ExprStmt(Expr),
    PrintStmt(Expr),
    AssnStmt {
        name: String,
        rhs: Expr,
    },
    BlockStmt(Vec<Stmt>),
    IfStmt {
        cond: Expr,
        then_block: Vec<Stmt>,
        else_block: Option<Vec<Stmt>>,
    },
    LetStmt {
        binder: String,
        expr: Expr,
        body: Vec<Stmt>,
    },
    ForStmt {
        binder: String,
        iterator: Expr,
        body: Vec<Stmt>,
    },
    FnStmt {
        name: String,
        params: Vec<String>,
        body: Vec<Stmt>,
    },
}
