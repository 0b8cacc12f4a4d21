//! Syntax tree produced by the [`Parser`](crate::parser::Parser).
//!
//! Expressions and statements are closed enums; every pass (resolver,
//! interpreter, printer) matches them exhaustively. Nodes own their tokens,
//! so a tree can outlive the source text it was parsed from.

use std::fmt;
use std::rc::Rc;

use crate::token::Token;

/// Stable identity of a variable‑referencing expression node.
///
/// Handed out by the parser, unique for the lifetime of a
/// [`Session`](crate::session::Session); the resolver's side table is keyed
/// by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExprId(pub u32);

impl fmt::Display for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A **literal constant** that appears directly in the source code.
///
/// The parser copies the value out of the token so the node does not need to
/// keep the token around.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// Numeric literal, stored as IEEE‑754 `f64`.
    Number(f64),

    /// String literal without surrounding quotes.
    Str(String),

    True,

    False,

    Nil,
}

/// Every kind of *expression*.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal constant: number, string, `true`, `false`, or `nil`.
    Literal(LiteralValue),

    /// Parenthesised sub‑expression: `"(" expression ")"`.
    Grouping(Box<Expr>),

    /// Prefix unary operator expression: `!ready`, `-42`.
    Unary {
        /// The operator token (`!` or `-`).
        operator: Token,
        right: Box<Expr>,
    },

    /// Infix arithmetic, comparison, or equality expression.
    Binary {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },

    /// Short‑circuiting `and` / `or`.
    Logical {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },

    /// Variable read.
    Variable { id: ExprId, name: Token },

    /// Assignment: `identifier "=" expression`.
    Assign {
        id: ExprId,
        name: Token,
        value: Box<Expr>,
    },

    /// Call expression: `callee(arg, ...)`.
    Call {
        callee: Box<Expr>,
        /// The closing `)` token, retained for error reporting.
        paren: Token,
        arguments: Vec<Expr>,
    },
}

/// A function declaration. Shared between the tree and every function value
/// created from it.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: Token,
    pub params: Vec<Token>,
    pub body: Vec<Stmt>,
}

/// Every kind of *statement*. A program is a sequence of these.
///
/// There is no `for` node: the parser desugars `for` loops into blocks and
/// `while`.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// Stand‑alone expression terminated by a semicolon.
    Expression(Expr),

    Print(Expr),

    /// `"var" IDENT ("=" initializer)? ";"`.
    Var {
        name: Token,
        initializer: Option<Expr>,
    },

    /// Braced scope containing zero or more declarations.
    Block(Vec<Stmt>),

    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },

    While {
        condition: Expr,
        body: Box<Stmt>,
    },

    Function(Rc<FunctionDecl>),

    Return {
        /// The `return` keyword token, for error locations.
        keyword: Token,
        /// Absent ⇒ `nil` is returned.
        value: Option<Expr>,
    },
}
