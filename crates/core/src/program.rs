//! Postfix programs
//!
//! A [`Program`] is a flat list of [`OpRef`]s plus the pools they index into.
//! Programs only ever grow: every append pushes one pool entry and one op.
//!
//! ```text
//! ops:        [Const(0), Generator(0), BinaryOp(0), UnaryOp(1)]
//!                   │          │             │           │
//! constants:  [3] ◄─┘          │             │           │
//! generators: [|x| x, |x| x+1] ◄─────────────┼───────────┘
//!               ▲ (Generator(0))             │
//! binary_ops: [|a, b| a * b] ◄───────────────┘
//! ```
//!
//! Generator functions and unary transforms share the `generators` pool. The
//! tag on the `OpRef` decides how an entry is invoked: `Generator` on the
//! domain value, `UnaryOp` on the popped top of stack.

use crate::error::ProgramError;
use crate::eval_stack::EvalStack;
use crate::scalar::Scalar;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// A one-argument function: a generator or a unary transform.
pub type GeneratorFn<T> = Arc<dyn Fn(T) -> T + Send + Sync>;

/// A two-argument combinator, called as `f(earlier, later)`.
pub type BinaryFn<T> = Arc<dyn Fn(T, T) -> T + Send + Sync>;

/// Tagged reference into one of a program's pools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpRef {
    /// Push `constants[i]`
    Const(usize),
    /// Push `generators[i](domain value)`
    Generator(usize),
    /// Pop one value, push `generators[i](v)`
    UnaryOp(usize),
    /// Pop two values, push `binary_ops[i](second, top)`
    BinaryOp(usize),
}

impl OpRef {
    /// Number of values the op pops
    pub fn arity(self) -> usize {
        match self {
            OpRef::Const(_) | OpRef::Generator(_) => 0,
            OpRef::UnaryOp(_) => 1,
            OpRef::BinaryOp(_) => 2,
        }
    }

    /// Net change in stack depth
    pub fn stack_delta(self) -> isize {
        match self {
            OpRef::Const(_) | OpRef::Generator(_) => 1,
            OpRef::UnaryOp(_) => 0,
            OpRef::BinaryOp(_) => -1,
        }
    }
}

impl fmt::Display for OpRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpRef::Const(i) => write!(f, "const #{}", i),
            OpRef::Generator(i) => write!(f, "gen #{}", i),
            OpRef::UnaryOp(i) => write!(f, "unop #{}", i),
            OpRef::BinaryOp(i) => write!(f, "binop #{}", i),
        }
    }
}

/// Entry counts of each pool
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolSizes {
    pub constants: usize,
    pub generators: usize,
    pub binary_ops: usize,
}

/// An append-only postfix program and its pools
///
/// Invariant: every `OpRef` in `ops` indexes an existing entry of its pool.
/// The fields are private and only the `push_*` methods grow them, each
/// pushing the pool entry before the op that refers to it. `splice` relies
/// on this to index `other`'s pools directly. `evaluate` still checks every
/// index and reports `DanglingReference` instead of panicking.
pub struct Program<T> {
    ops: Vec<OpRef>,
    constants: Vec<T>,
    generators: Vec<GeneratorFn<T>>,
    binary_ops: Vec<BinaryFn<T>>,
}

// Manual impl: `Arc<dyn Fn>` entries clone by handle, so only `T: Clone` is
// needed, not `dyn Fn: Clone`.
impl<T: Clone> Clone for Program<T> {
    fn clone(&self) -> Self {
        Program {
            ops: self.ops.clone(),
            constants: self.constants.clone(),
            generators: self.generators.clone(),
            binary_ops: self.binary_ops.clone(),
        }
    }
}

impl<T> Default for Program<T> {
    fn default() -> Self {
        Program {
            ops: Vec::new(),
            constants: Vec::new(),
            generators: Vec::new(),
            binary_ops: Vec::new(),
        }
    }
}

impl<T: Scalar> Program<T> {
    /// Create an empty program
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded ops, in evaluation order
    pub fn ops(&self) -> &[OpRef] {
        &self.ops
    }

    /// Number of recorded ops
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// The constant pool
    pub fn constants(&self) -> &[T] {
        &self.constants
    }

    pub fn pool_sizes(&self) -> PoolSizes {
        PoolSizes {
            constants: self.constants.len(),
            generators: self.generators.len(),
            binary_ops: self.binary_ops.len(),
        }
    }

    /// Append a constant push
    pub fn push_const(&mut self, value: T) {
        self.constants.push(value);
        self.ops.push(OpRef::Const(self.constants.len() - 1));
    }

    /// Append a generator push
    pub fn push_generator(&mut self, f: GeneratorFn<T>) {
        self.generators.push(f);
        self.ops.push(OpRef::Generator(self.generators.len() - 1));
    }

    /// Append a unary transform of the top of stack
    pub fn push_unary(&mut self, f: GeneratorFn<T>) {
        self.generators.push(f);
        self.ops.push(OpRef::UnaryOp(self.generators.len() - 1));
    }

    /// Append a binary combination of the top two values
    pub fn push_binary(&mut self, f: BinaryFn<T>) {
        self.binary_ops.push(f);
        self.ops.push(OpRef::BinaryOp(self.binary_ops.len() - 1));
    }

    /// Append a deep copy of `other`'s program
    ///
    /// Every referenced entry is re-appended into this program's pools and
    /// re-indexed, so the result never shares pool slots with `other`.
    pub fn splice(&mut self, other: &Program<T>) {
        let before = self.ops.len();
        self.ops.reserve(other.ops.len());
        // In bounds by the pool invariant on `Program`
        for &op in &other.ops {
            match op {
                OpRef::Const(i) => self.push_const(other.constants[i]),
                OpRef::Generator(i) => self.push_generator(Arc::clone(&other.generators[i])),
                OpRef::UnaryOp(i) => self.push_unary(Arc::clone(&other.generators[i])),
                OpRef::BinaryOp(i) => self.push_binary(Arc::clone(&other.binary_ops[i])),
            }
        }
        debug!(
            "splice: appended {} ops ({} -> {})",
            other.ops.len(),
            before,
            self.ops.len()
        );
    }

    /// Statically check stack discipline, returning the maximum depth reached
    pub fn max_depth(&self) -> Result<usize, ProgramError> {
        if self.ops.is_empty() {
            return Err(ProgramError::EmptyProgram);
        }
        let mut depth = 0usize;
        let mut max = 0usize;
        for (position, &op) in self.ops.iter().enumerate() {
            if depth < op.arity() {
                return Err(ProgramError::StackUnderflow {
                    position,
                    op,
                    depth,
                });
            }
            depth = depth.saturating_add_signed(op.stack_delta());
            max = max.max(depth);
        }
        if depth != 1 {
            return Err(ProgramError::UnbalancedStack { depth });
        }
        Ok(max)
    }

    /// Check that the program is well formed: balanced and every reference in bounds
    pub fn validate(&self) -> Result<(), ProgramError> {
        self.max_depth()?;
        for (position, &op) in self.ops.iter().enumerate() {
            let in_bounds = match op {
                OpRef::Const(i) => i < self.constants.len(),
                OpRef::Generator(i) | OpRef::UnaryOp(i) => i < self.generators.len(),
                OpRef::BinaryOp(i) => i < self.binary_ops.len(),
            };
            if !in_bounds {
                return Err(ProgramError::DanglingReference { position, op });
            }
        }
        Ok(())
    }

    /// Run the program for one domain value
    ///
    /// `stack` is cleared first; callers evaluating many indices pass the same
    /// stack each time.
    pub fn evaluate(&self, domain: T, stack: &mut EvalStack<T>) -> Result<T, ProgramError> {
        if self.ops.is_empty() {
            return Err(ProgramError::EmptyProgram);
        }
        stack.clear();

        for (position, &op) in self.ops.iter().enumerate() {
            let dangling = ProgramError::DanglingReference { position, op };
            let underflow = |depth| ProgramError::StackUnderflow {
                position,
                op,
                depth,
            };
            match op {
                OpRef::Const(i) => {
                    let value = *self.constants.get(i).ok_or(dangling)?;
                    stack.push(value);
                }
                OpRef::Generator(i) => {
                    let f = self.generators.get(i).ok_or(dangling)?;
                    stack.push(f(domain));
                }
                OpRef::UnaryOp(i) => {
                    let f = self.generators.get(i).ok_or(dangling)?;
                    let v = stack.pop().ok_or_else(|| underflow(0))?;
                    stack.push(f(v));
                }
                OpRef::BinaryOp(i) => {
                    let f = self.binary_ops.get(i).ok_or(dangling)?;
                    let depth = stack.depth();
                    let (second, top) = stack.pop_two().ok_or_else(|| underflow(depth))?;
                    stack.push(f(second, top));
                }
            }
        }

        match (stack.pop(), stack.depth()) {
            (Some(result), 0) => {
                trace!("evaluate: domain {} -> {}", domain, result);
                Ok(result)
            }
            (Some(_), rest) => Err(ProgramError::UnbalancedStack { depth: rest + 1 }),
            (None, _) => Err(ProgramError::UnbalancedStack { depth: 0 }),
        }
    }
}

impl<T: Scalar> fmt::Display for Program<T> {
    /// One instruction per line; constants are shown inline
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, op) in self.ops.iter().enumerate() {
            match op {
                OpRef::Const(i) => match self.constants.get(*i) {
                    Some(value) => writeln!(f, "{:4}: {} ({})", position, op, value)?,
                    None => writeln!(f, "{:4}: {} (missing)", position, op)?,
                },
                _ => writeln!(f, "{:4}: {}", position, op)?,
            }
        }
        Ok(())
    }
}

impl<T: Scalar> fmt::Debug for Program<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Program")
            .field("ops", &self.ops)
            .field("constants", &self.constants)
            .field("generators", &self.generators.len())
            .field("binary_ops", &self.binary_ops.len())
            .finish()
    }
}
