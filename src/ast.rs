// Abstract Syntax Tree definitions for the TINY-style source language
//
// The tree is built entirely by the parser before code generation starts.
// The code generator only reads it; nothing here is mutated after parse.

/// Arithmetic operators recognized in expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

/// Comparison operators recognized in conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    LessThan,
    Equal,
}

/// Expression nodes. Every binary node owns exactly two children.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Integer literal.
    Number(i64),
    /// Variable reference, resolved against the symbol table at emission.
    Ident(String),
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Comparison used as a condition. Sets the machine's comparison
    /// indicator; it does not produce a value in the accumulator.
    Comparison {
        op: CompareOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

/// Statement nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Assign {
        name: String,
        value: Expr,
    },
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
    },
    IfElse {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Box<Stmt>,
    },
    /// Post-test loop: run the body, then exit once `until` holds.
    Repeat {
        body: Box<Stmt>,
        until: Expr,
    },
    Read {
        name: String,
    },
    Write {
        name: String,
    },
    /// Two statements in source order.
    Seq {
        first: Box<Stmt>,
        second: Box<Stmt>,
    },
}

/// Program root. Owns exactly one body statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub body: Stmt,
}
