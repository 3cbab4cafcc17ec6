// Behavioral model of the accumulator-and-index-register target machine
//
// Executes a generated instruction stream directly, without going through
// the companion assembler. This is what the test suite runs emitted code
// on, and it is deliberately strict: conditions the real machine would
// shrug at (a jump before any comparison, a duplicate label) are execution
// errors here so generator defects surface immediately.

use crate::instruction::{Label, Line, MemRef, Op};
use log::debug;
use std::cmp::Ordering;
use std::collections::{HashMap, VecDeque};

/// Upper bound on executed instructions before the run is declared stuck.
const DEFAULT_STEP_LIMIT: u64 = 100_000;

/// Result of executing one instruction.
enum ExecState {
    /// Fall through to the next line.
    Continue,
    /// Jump taken to the given line index.
    Jumped(usize),
    /// END reached.
    Halted,
}

/// Machine state: registers, memory, comparison indicator, and the input
/// and output devices.
#[derive(Debug, Default)]
pub struct Machine {
    /// Accumulator register A.
    pub acc: i64,
    /// Index register X, the overflow/remainder half for MUL and DIV.
    pub index: i64,
    memory: HashMap<MemRef, i64>,
    /// Set by CMPA, consumed by JL/JE. Persists until the next compare.
    indicator: Option<Ordering>,
    input: VecDeque<i64>,
    output: Vec<i64>,
}

impl Machine {
    pub fn new() -> Self {
        Machine::default()
    }

    /// Queue values for the input device, consumed in order by `INP`.
    pub fn feed_input(&mut self, values: &[i64]) {
        self.input.extend(values);
    }

    /// Everything `OUT` has written, in order.
    pub fn output(&self) -> &[i64] {
        &self.output
    }

    /// Read a memory cell. Cells never written read as zero.
    pub fn read(&self, cell: MemRef) -> i64 {
        self.memory.get(&cell).copied().unwrap_or(0)
    }

    pub fn write(&mut self, cell: MemRef, value: i64) {
        self.memory.insert(cell, value);
    }

    /// Run a stream to completion with the default instruction budget.
    pub fn run(&mut self, lines: &[Line]) -> Result<(), String> {
        self.run_with_limit(lines, DEFAULT_STEP_LIMIT)
    }

    /// Run a stream to completion, executing at most `max_steps`
    /// instructions.
    pub fn run_with_limit(&mut self, lines: &[Line], max_steps: u64) -> Result<(), String> {
        let labels = collect_labels(lines)?;
        let mut pc = 0;
        let mut steps: u64 = 0;

        while pc < lines.len() {
            steps += 1;
            if steps > max_steps {
                return Err(format!(
                    "instruction budget of {} exhausted at line {}",
                    max_steps, pc
                ));
            }

            match self.step(&lines[pc], &labels)? {
                ExecState::Continue => pc += 1,
                ExecState::Jumped(target) => pc = target,
                ExecState::Halted => {
                    debug!("halted after {} instructions", steps);
                    return Ok(());
                }
            }
        }

        Err("program ran off the end of the stream without END".to_string())
    }

    fn step(
        &mut self,
        line: &Line,
        labels: &HashMap<Label, usize>,
    ) -> Result<ExecState, String> {
        match line.op {
            Op::Orig(_) | Op::Nop => {}

            Op::End(_) => return Ok(ExecState::Halted),

            Op::EntA(value) => self.acc = value,
            Op::EntX(value) => self.index = value,

            Op::LdA(cell) => self.acc = self.read(cell),
            Op::LdX(cell) => self.index = self.read(cell),
            Op::StA(cell) => self.write(cell, self.acc),
            Op::StX(cell) => self.write(cell, self.index),

            Op::Add(cell) => self.acc += self.read(cell),
            Op::Sub(cell) => self.acc -= self.read(cell),

            Op::Mul(cell) => {
                // Double-width product split across A:X, low half in X.
                // Products that fit a single register leave A at zero.
                let product = self.acc * self.read(cell);
                self.acc = 0;
                self.index = product;
            }

            Op::Div(cell) => {
                // Dividend is the A:X pair with X as the low half. The
                // generator always clears A first; anything else would
                // overflow the quotient on the real machine.
                if self.acc != 0 {
                    return Err(format!(
                        "DIV with nonzero accumulator {} would overflow",
                        self.acc
                    ));
                }
                let divisor = self.read(cell);
                if divisor == 0 {
                    return Err("division by zero".to_string());
                }
                let dividend = self.index;
                self.acc = dividend / divisor;
                self.index = dividend % divisor;
            }

            Op::CmpA(cell) => {
                self.indicator = Some(self.acc.cmp(&self.read(cell)));
            }

            Op::Jmp(label) => return Ok(ExecState::Jumped(jump_target(labels, label)?)),

            Op::Jl(label) => {
                if self.conditional(label)? == Ordering::Less {
                    return Ok(ExecState::Jumped(jump_target(labels, label)?));
                }
            }

            Op::Je(label) => {
                if self.conditional(label)? == Ordering::Equal {
                    return Ok(ExecState::Jumped(jump_target(labels, label)?));
                }
            }

            Op::In => {
                self.acc = self
                    .input
                    .pop_front()
                    .ok_or_else(|| "INP with an empty input queue".to_string())?;
            }

            Op::Out(cell) => self.output.push(self.read(cell)),
        }

        Ok(ExecState::Continue)
    }

    fn conditional(&self, label: Label) -> Result<Ordering, String> {
        self.indicator
            .ok_or_else(|| format!("conditional jump to {} before any comparison", label))
    }
}

/// Map every anchored label to its line index.
///
/// A label declared twice is an error; the generator's allocator is
/// supposed to make this impossible.
fn collect_labels(lines: &[Line]) -> Result<HashMap<Label, usize>, String> {
    let mut labels = HashMap::new();
    for (index, line) in lines.iter().enumerate() {
        if let Some(label) = line.label {
            if labels.insert(label, index).is_some() {
                return Err(format!("duplicate label declaration {}", label));
            }
        }
    }
    Ok(labels)
}

fn jump_target(labels: &HashMap<Label, usize>, label: Label) -> Result<usize, String> {
    labels
        .get(&label)
        .copied()
        .ok_or_else(|| format!("jump to undefined label {}", label))
}
