// tinymix - code generation backend for a TINY-style imperative language
//
// Walks an externally built AST and symbol table and emits a MIXAL-style
// instruction listing for an accumulator-and-index-register machine.
// Lexing, parsing, and symbol-table construction policy live upstream;
// assembling the listing lives downstream. machine.rs carries a
// behavioral model of the target so generated streams can be executed
// directly, which is how the test suite checks them.

#[macro_use]
extern crate lazy_static;

pub mod allocator;
pub mod ast;
pub mod codegen;
pub mod codegen_expr;
pub mod error;
pub mod instruction;
pub mod machine;
pub mod symbol_table;

pub use codegen::{generate_program, CodegenOptions, MixalCodeGen};
pub use error::CodegenError;
pub use symbol_table::SymbolTable;

#[cfg(test)]
mod machine_tests;
