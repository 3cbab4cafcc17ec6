// MIXAL Code Generator - Expression Emission
//
// Split out of codegen.rs in the same way the statement and expression
// walks are separate concerns. Every sequence emitted here leaves the
// expression's value in the accumulator, except comparisons, which only
// set the machine's comparison indicator for the enclosing construct.

use crate::ast::{BinaryOp, Expr};
use crate::codegen::MixalCodeGen;
use crate::error::CodegenError;
use crate::instruction::{MemRef, Op, Scratch};
use log::trace;

impl<'a> MixalCodeGen<'a> {
    pub(crate) fn generate_expression(&mut self, expr: &Expr) -> Result<(), CodegenError> {
        match expr {
            Expr::Number(value) => {
                trace!("expression: literal {}", value);
                self.emit(Op::EntA(*value));
            }

            Expr::Ident(name) => {
                trace!("expression: identifier {}", name);
                // A use never declares; an unknown name here is a hard
                // error, not a sentinel address.
                let address = self.resolve(name, false)?;
                self.emit(Op::LdA(MemRef::Addr(address)));
            }

            Expr::Binary { op, left, right } => {
                self.generate_binary(*op, left, right)?;
            }

            Expr::Comparison { left, right, .. } => {
                self.generate_comparison(left, right)?;
            }
        }

        Ok(())
    }

    /// Arithmetic: evaluate the left operand, park it in a fresh temporary,
    /// evaluate the right operand, then combine against the temporary.
    ///
    /// The temporary is minted after the left operand's own emission, so
    /// every slot a nested subexpression claimed is already behind the
    /// counter; slots are never reused within a compilation.
    fn generate_binary(
        &mut self,
        op: BinaryOp,
        left: &Expr,
        right: &Expr,
    ) -> Result<(), CodegenError> {
        self.generate_expression(left)?;
        let temp = MemRef::Temp(self.next_temp());
        self.emit(Op::StA(temp));
        self.generate_expression(right)?;

        match op {
            BinaryOp::Add => {
                self.emit(Op::Add(temp));
            }

            BinaryOp::Subtract => {
                // SUB leaves right - left; negate through OPPTEMP so the
                // observable result is always left - right.
                self.emit(Op::Sub(temp));
                self.emit(Op::StA(MemRef::Scratch(Scratch::Opposite)));
                self.emit(Op::EntA(0));
                self.emit(Op::Sub(MemRef::Scratch(Scratch::Opposite)));
            }

            BinaryOp::Multiply => {
                // The product lands split across A:X with the low half in
                // X. Pull it back into A and clear X so a single-register
                // consumer sees only the product.
                self.emit(Op::Mul(temp));
                self.emit(Op::StX(temp));
                self.emit(Op::LdA(temp));
                self.emit(Op::EntX(0));
            }

            BinaryOp::Divide => {
                // At this point A holds the right operand and the
                // temporary holds the left, which is backwards for DIV.
                // Swap them through SWAPTEMP so the dividend is left and
                // the divisor cell holds right, then divide the 0:X pair.
                self.emit(Op::StA(MemRef::Scratch(Scratch::Swap)));
                self.emit(Op::LdX(MemRef::Scratch(Scratch::Swap)));
                self.emit(Op::LdA(temp));
                self.emit(Op::StX(temp));
                self.emit(Op::StA(MemRef::Scratch(Scratch::Swap)));
                self.emit(Op::LdX(MemRef::Scratch(Scratch::Swap)));
                self.emit(Op::EntA(0));
                self.emit(Op::Div(temp));
                // Quotient is in A; drop the remainder half.
                self.emit(Op::EntX(0));
            }
        }

        Ok(())
    }

    /// Comparison: left operand into the accumulator, then one compare
    /// against the right operand. Leaves only the comparison indicator
    /// set; the statement emitter pairs it with the matching jump.
    fn generate_comparison(&mut self, left: &Expr, right: &Expr) -> Result<(), CodegenError> {
        self.generate_expression(left)?;

        match right {
            Expr::Number(value) => {
                // Literal compare: stage the immediate through CMPTEMP.
                self.emit(Op::EntX(*value));
                self.emit(Op::StX(MemRef::Scratch(Scratch::Compare)));
                self.emit(Op::CmpA(MemRef::Scratch(Scratch::Compare)));
            }

            Expr::Ident(name) => {
                let address = self.resolve(name, false)?;
                self.emit(Op::CmpA(MemRef::Addr(address)));
            }

            other => {
                return Err(CodegenError::MalformedTree(format!(
                    "comparison right operand must be a literal or identifier: {:?}",
                    other
                )));
            }
        }

        Ok(())
    }
}
