// Target-machine instruction set and listing format
//
// The output is a MIXAL-style text listing: one instruction or label
// anchor per line. Mnemonic spellings live in one fixed table so the
// stream stays internally consistent; the companion assembler that
// consumes the listing is an external collaborator.

use crate::error::CodegenError;
use std::collections::HashMap;
use std::fmt;
use std::io;

/// Named scratch cells the emitter reserves for fixed jobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scratch {
    /// Holds the raw difference while subtraction is negated.
    Opposite,
    /// Staging cell for the accumulator/index swap before a divide.
    Swap,
    /// Staging cell for comparing against a literal.
    Compare,
}

impl fmt::Display for Scratch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Scratch::Opposite => write!(f, "OPPTEMP"),
            Scratch::Swap => write!(f, "SWAPTEMP"),
            Scratch::Compare => write!(f, "CMPTEMP"),
        }
    }
}

/// A memory operand: a resolved numeric address, a minted temporary slot,
/// or one of the fixed scratch cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemRef {
    Addr(i64),
    Temp(u32),
    Scratch(Scratch),
}

impl fmt::Display for MemRef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MemRef::Addr(address) => write!(f, "{}", address),
            MemRef::Temp(slot) => write!(f, "TEMP{}", slot),
            MemRef::Scratch(cell) => write!(f, "{}", cell),
        }
    }
}

/// A control-flow label: construct kind plus the allocator index minted
/// when the construct began emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Then(u32),
    Else(u32),
    Endif(u32),
    Repeat(u32),
    EndRepeat(u32),
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Label::Then(n) => write!(f, "THEN{}", n),
            Label::Else(n) => write!(f, "ELSE{}", n),
            Label::Endif(n) => write!(f, "ENDIF{}", n),
            Label::Repeat(n) => write!(f, "REPEAT{}", n),
            Label::EndRepeat(n) => write!(f, "ENDREPEAT{}", n),
        }
    }
}

/// Operation kinds, used to key the mnemonic table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    Orig,
    End,
    EntA,
    EntX,
    LdA,
    LdX,
    StA,
    StX,
    Add,
    Sub,
    Mul,
    Div,
    CmpA,
    Jmp,
    Jl,
    Je,
    In,
    Out,
    Nop,
}

lazy_static! {
    /// Fixed spelling for every mnemonic in the output instruction set.
    pub static ref MNEMONICS: HashMap<Mnemonic, &'static str> = {
        let mut m = HashMap::new();
        m.insert(Mnemonic::Orig, "ORIG");
        m.insert(Mnemonic::End, "END");
        m.insert(Mnemonic::EntA, "ENTA");
        m.insert(Mnemonic::EntX, "ENTX");
        m.insert(Mnemonic::LdA, "LDA");
        m.insert(Mnemonic::LdX, "LDX");
        m.insert(Mnemonic::StA, "STA");
        m.insert(Mnemonic::StX, "STX");
        m.insert(Mnemonic::Add, "ADD");
        m.insert(Mnemonic::Sub, "SUB");
        m.insert(Mnemonic::Mul, "MUL");
        m.insert(Mnemonic::Div, "DIV");
        m.insert(Mnemonic::CmpA, "CMPA");
        m.insert(Mnemonic::Jmp, "JMP");
        m.insert(Mnemonic::Jl, "JL");
        m.insert(Mnemonic::Je, "JE");
        m.insert(Mnemonic::In, "INP");
        m.insert(Mnemonic::Out, "OUT");
        m.insert(Mnemonic::Nop, "NOP");
        m
    };
}

/// A single target-machine operation with its operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// Start-of-program directive: the load address.
    Orig(i64),
    /// End-of-program directive: the entry address.
    End(i64),
    /// Load an immediate into the accumulator.
    EntA(i64),
    /// Load an immediate into the index register.
    EntX(i64),
    LdA(MemRef),
    LdX(MemRef),
    StA(MemRef),
    StX(MemRef),
    Add(MemRef),
    Sub(MemRef),
    Mul(MemRef),
    Div(MemRef),
    /// Compare the accumulator against a cell, setting the indicator.
    CmpA(MemRef),
    Jmp(Label),
    /// Jump if the indicator says Less.
    Jl(Label),
    /// Jump if the indicator says Equal.
    Je(Label),
    /// Read one value from the input device into the accumulator.
    In,
    /// Write a cell's value to the output device.
    Out(MemRef),
    /// Label anchor.
    Nop,
}

impl Op {
    pub fn mnemonic(&self) -> Mnemonic {
        match self {
            Op::Orig(_) => Mnemonic::Orig,
            Op::End(_) => Mnemonic::End,
            Op::EntA(_) => Mnemonic::EntA,
            Op::EntX(_) => Mnemonic::EntX,
            Op::LdA(_) => Mnemonic::LdA,
            Op::LdX(_) => Mnemonic::LdX,
            Op::StA(_) => Mnemonic::StA,
            Op::StX(_) => Mnemonic::StX,
            Op::Add(_) => Mnemonic::Add,
            Op::Sub(_) => Mnemonic::Sub,
            Op::Mul(_) => Mnemonic::Mul,
            Op::Div(_) => Mnemonic::Div,
            Op::CmpA(_) => Mnemonic::CmpA,
            Op::Jmp(_) => Mnemonic::Jmp,
            Op::Jl(_) => Mnemonic::Jl,
            Op::Je(_) => Mnemonic::Je,
            Op::In => Mnemonic::In,
            Op::Out(_) => Mnemonic::Out,
            Op::Nop => Mnemonic::Nop,
        }
    }

    fn operand(&self) -> Option<String> {
        match self {
            Op::Orig(n) | Op::End(n) | Op::EntA(n) | Op::EntX(n) => Some(n.to_string()),
            Op::LdA(m) | Op::LdX(m) | Op::StA(m) | Op::StX(m) => Some(m.to_string()),
            Op::Add(m) | Op::Sub(m) | Op::Mul(m) | Op::Div(m) => Some(m.to_string()),
            Op::CmpA(m) | Op::Out(m) => Some(m.to_string()),
            Op::Jmp(l) | Op::Jl(l) | Op::Je(l) => Some(l.to_string()),
            Op::In | Op::Nop => None,
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let spelling = MNEMONICS[&self.mnemonic()];
        match self.operand() {
            Some(operand) => write!(f, "{} {}", spelling, operand),
            None => write!(f, "{}", spelling),
        }
    }
}

/// One line of the output listing: an optional label in the left column
/// and an operation. Label anchors carry `NOP` as their operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    pub label: Option<Label>,
    pub op: Op,
}

impl Line {
    pub fn op(op: Op) -> Self {
        Line { label: None, op }
    }

    /// A label declaration, anchored with a no-op.
    pub fn anchor(label: Label) -> Self {
        Line {
            label: Some(label),
            op: Op::Nop,
        }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.label {
            Some(label) => write!(f, "{} {}", label, self.op),
            None => write!(f, " {}", self.op),
        }
    }
}

/// Render a stream as listing text, one line per instruction.
pub fn render(lines: &[Line]) -> String {
    let mut text = String::new();
    for line in lines {
        text.push_str(&line.to_string());
        text.push('\n');
    }
    text
}

/// Write a stream to any sink that accepts ordered lines.
pub fn write_listing<W: io::Write>(lines: &[Line], writer: &mut W) -> Result<(), CodegenError> {
    for line in lines {
        writeln!(writer, "{}", line)?;
    }
    Ok(())
}
