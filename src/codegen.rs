// MIXAL Code Generator
//
// Transforms the parsed AST into a MIXAL-style instruction listing for the
// accumulator-and-index-register target. Statement emission lives here;
// expression emission is in codegen_expr.rs.

use crate::allocator::LabelAllocator;
use crate::ast::{CompareOp, Expr, Program, Stmt};
use crate::error::CodegenError;
use crate::instruction::{Label, Line, MemRef, Op};
use crate::symbol_table::SymbolTable;
use log::debug;

/// Default load address for the generated program.
pub const DEFAULT_ORIGIN: i64 = 2000;

/// Code generation policy knobs.
#[derive(Debug, Clone, Copy)]
pub struct CodegenOptions {
    /// Address the program is assembled at (`ORIG`/`END` operand).
    pub origin: i64,
    /// Whether assigning to or reading into an unseen name creates its
    /// symbol-table entry. Plain uses never auto-declare.
    pub auto_declare: bool,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        CodegenOptions {
            origin: DEFAULT_ORIGIN,
            auto_declare: true,
        }
    }
}

/// Code generation context.
///
/// Owns the label/temporary allocator and the growing instruction stream;
/// borrows the externally owned symbol table for the duration of one
/// compilation. Build a fresh one per program so counters start clean.
pub struct MixalCodeGen<'a> {
    options: CodegenOptions,
    labels: LabelAllocator,
    symbols: &'a mut SymbolTable,
    code: Vec<Line>,
}

impl<'a> MixalCodeGen<'a> {
    pub fn new(symbols: &'a mut SymbolTable, options: CodegenOptions) -> Self {
        MixalCodeGen {
            options,
            labels: LabelAllocator::new(),
            symbols,
            code: Vec::new(),
        }
    }

    /// Generate the complete listing for a program.
    ///
    /// All-or-nothing: on any error the partial stream is discarded and
    /// the caller receives only the error.
    pub fn generate(&mut self, program: &Program) -> Result<Vec<Line>, CodegenError> {
        debug!("Code generation starting at origin {}", self.options.origin);

        self.emit(Op::Orig(self.options.origin));
        self.generate_statement(&program.body)?;
        self.emit(Op::End(self.options.origin));

        debug!("Code generation complete: {} lines", self.code.len());
        Ok(std::mem::take(&mut self.code))
    }

    pub(crate) fn emit(&mut self, op: Op) {
        self.code.push(Line::op(op));
    }

    /// Mint a fresh temporary slot for the expression emitter.
    pub(crate) fn next_temp(&mut self) -> u32 {
        self.labels.next_temp()
    }

    pub(crate) fn emit_anchor(&mut self, label: Label) {
        self.code.push(Line::anchor(label));
    }

    /// Storage resolver: map an operand name to a numeric memory address.
    ///
    /// A name spelled entirely in digits is a constant and parses directly
    /// as the address. Anything else goes through the symbol table, with a
    /// fresh entry appended when `declare` holds at an auto-declaring
    /// position and the policy is enabled.
    pub(crate) fn resolve(&mut self, name: &str, declare: bool) -> Result<i64, CodegenError> {
        if !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit()) {
            // Digits only, but the value can still overflow an i64.
            return name
                .parse::<i64>()
                .map_err(|_| CodegenError::MalformedTree(format!("constant out of range: {}", name)));
        }

        if let Some(address) = self.symbols.lookup(name) {
            return Ok(address);
        }

        if declare && self.options.auto_declare {
            let address = self.symbols.insert(name);
            debug!("Auto-declared '{}' at address {}", name, address);
            return Ok(address);
        }

        Err(CodegenError::UnresolvedSymbol(name.to_string()))
    }

    fn generate_statement(&mut self, stmt: &Stmt) -> Result<(), CodegenError> {
        match stmt {
            Stmt::Assign { name, value } => {
                self.generate_expression(value)?;
                // Resolve after the value is computed so auto-declaration
                // happens at the moment of the store.
                let address = self.resolve(name, true)?;
                self.emit(Op::StA(MemRef::Addr(address)));
            }

            Stmt::If {
                condition,
                then_branch,
            } => {
                let index = self.labels.next_if_label();
                debug!("If statement using label group {}", index);

                let jump = self.condition_jump(condition, Label::Then(index))?;
                self.generate_expression(condition)?;
                self.emit(jump);
                self.emit(Op::Jmp(Label::Endif(index)));
                self.emit_anchor(Label::Then(index));
                self.generate_statement(then_branch)?;
                self.emit_anchor(Label::Endif(index));
            }

            Stmt::IfElse {
                condition,
                then_branch,
                else_branch,
            } => {
                let index = self.labels.next_if_label();
                debug!("If/else statement using label group {}", index);

                let jump = self.condition_jump(condition, Label::Then(index))?;
                self.generate_expression(condition)?;
                self.emit(jump);
                self.emit(Op::Jmp(Label::Else(index)));
                self.emit_anchor(Label::Then(index));
                self.generate_statement(then_branch)?;
                self.emit(Op::Jmp(Label::Endif(index)));
                self.emit_anchor(Label::Else(index));
                self.generate_statement(else_branch)?;
                self.emit_anchor(Label::Endif(index));
            }

            Stmt::Repeat { body, until } => {
                let index = self.labels.next_repeat_label();
                debug!("Repeat statement using label pair {}", index);

                self.emit_anchor(Label::Repeat(index));
                self.generate_statement(body)?;
                // The tested condition is the exit test: fall out of the
                // loop once it holds, otherwise jump back to the top.
                let jump = self.condition_jump(until, Label::EndRepeat(index))?;
                self.generate_expression(until)?;
                self.emit(jump);
                self.emit(Op::Jmp(Label::Repeat(index)));
                self.emit_anchor(Label::EndRepeat(index));
            }

            Stmt::Read { name } => {
                // Reading stores into the cell, so it defines the name the
                // same way an assignment target does.
                let address = self.resolve(name, true)?;
                self.emit(Op::In);
                self.emit(Op::StA(MemRef::Addr(address)));
            }

            Stmt::Write { name } => {
                let address = self.resolve(name, false)?;
                self.emit(Op::Out(MemRef::Addr(address)));
            }

            Stmt::Seq { first, second } => {
                self.generate_statement(first)?;
                self.generate_statement(second)?;
            }
        }

        Ok(())
    }

    /// Pick the conditional jump matching a condition's polarity.
    ///
    /// Only comparisons are legal conditions; anything else is an upstream
    /// parser defect, rejected rather than skipped.
    fn condition_jump(&self, condition: &Expr, target: Label) -> Result<Op, CodegenError> {
        match condition {
            Expr::Comparison {
                op: CompareOp::LessThan,
                ..
            } => Ok(Op::Jl(target)),
            Expr::Comparison {
                op: CompareOp::Equal,
                ..
            } => Ok(Op::Je(target)),
            other => Err(CodegenError::MalformedTree(format!(
                "condition is not a comparison: {:?}",
                other
            ))),
        }
    }
}

/// Generate the listing for `program` against `symbols`.
pub fn generate_program(
    program: &Program,
    symbols: &mut SymbolTable,
    options: CodegenOptions,
) -> Result<Vec<Line>, CodegenError> {
    MixalCodeGen::new(symbols, options).generate(program)
}
