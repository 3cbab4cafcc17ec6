// Code Generator Error Handling

use std::fmt;

/// Errors surfaced by the code generator.
///
/// All of these are unrecoverable at the point of detection: generation is
/// an all-or-nothing pass, and the caller receives no instruction stream
/// once any of them fires.
#[derive(Debug, Clone)]
pub enum CodegenError {
    /// An identifier has no symbol-table entry and auto-declaration does
    /// not apply at the position where it was used.
    UnresolvedSymbol(String),

    /// A node violates the structural invariant expected at its position,
    /// e.g. a condition that is not a comparison.
    MalformedTree(String),

    /// The destination for the instruction stream could not be written.
    OutputWrite(String),
}

impl fmt::Display for CodegenError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CodegenError::UnresolvedSymbol(name) => {
                write!(f, "Unresolved symbol '{}'", name)
            }
            CodegenError::MalformedTree(msg) => {
                write!(f, "Malformed syntax tree: {}", msg)
            }
            CodegenError::OutputWrite(msg) => {
                write!(f, "Failed to write instruction stream: {}", msg)
            }
        }
    }
}

impl std::error::Error for CodegenError {}

impl From<std::io::Error> for CodegenError {
    fn from(err: std::io::Error) -> Self {
        CodegenError::OutputWrite(err.to_string())
    }
}
