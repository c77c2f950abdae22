//! Lexer, AST and parser for the Cavy language.
//!
//! This crate is the front half of the compile-evaluate pipeline:
//!
//! ```text
//! source text -> Lexer -> token stream -> Parser -> AST
//! ```
//!
//! Both the lexer and the parser are error-recovering: a whole file's
//! lexical and syntactic errors are reported together rather than
//! stopping at the first one. [`parser::parse`] drives both passes.
//!
//! # Example
//!
//! ```rust
//! use cavy_syntax::parse;
//!
//! let (stmts, errors) = parse("q <- qubit(); r <- split(q);");
//! assert!(errors.is_empty());
//! assert_eq!(stmts.len(), 2);
//! ```

mod ast;
mod error;
mod lexer;
mod parser;
mod token;

pub use ast::{BinOp, Expr, Stmt, UnOp};
pub use error::{LexError, ParseError};
pub use lexer::lex;
pub use parser::parse;
pub use token::{Location, Token, TokenKind};
