//! Sequence expressions
//!
//! A `SequenceExpression` never stores sequence values. It records how to
//! compute the value at any index as a postfix [`Program`], and replays that
//! program on demand:
//!
//! ```rust,ignore
//! let mut seq = SequenceExpression::from_constant(3i64);
//! seq.combine(Operand::generator(|x| x), |a, b| a * b); // 3 * x
//! assert_eq!(seq.value_at(4)?, 12);
//! ```
//!
//! Construction is append-only. Every `combine` appends the operand's
//! encoding followed by one binary op; every `map` appends one unary op.
//! Operands that are themselves sequences are spliced in as deep copies, so
//! an expression never depends on anything it was built from.

use crate::config::SeqConfig;
use crate::error::SeqError;
use crate::operand::Operand;
use crate::operators::{BinaryOperator, UnaryOperator};
use lazyseq_core::{BinaryFn, EvalStack, GeneratorFn, Program, Scalar};
use std::sync::Arc;
use tracing::{debug, warn};

/// A lazily evaluated, index-addressable numeric sequence
///
/// The value at `index` is the result of running the program with the domain
/// value `start + step * index` fed to every generator.
///
/// Evaluation takes `&self` and the type is `Send + Sync`, so many threads
/// may evaluate one expression at once; appending needs `&mut self`.
#[derive(Clone, Debug)]
pub struct SequenceExpression<T: Scalar> {
    start: T,
    step: T,
    program: Program<T>,
    config: SeqConfig,
}

impl<T: Scalar> Default for SequenceExpression<T> {
    /// The constant zero sequence
    fn default() -> Self {
        Self::from_constant(T::zero())
    }
}

impl<T: Scalar> SequenceExpression<T> {
    fn empty(start: T, step: T) -> Self {
        SequenceExpression {
            start,
            step: coerce_step(step),
            program: Program::new(),
            config: SeqConfig::default(),
        }
    }

    /// The sequence whose every value is `value`
    pub fn from_constant(value: T) -> Self {
        let mut expr = Self::empty(T::zero(), T::one());
        expr.program.push_const(value);
        expr
    }

    /// The sequence `f(start + step * index)`, with start 0 and step 1
    pub fn from_generator(f: impl Fn(T) -> T + Send + Sync + 'static) -> Self {
        let mut expr = Self::empty(T::zero(), T::one());
        expr.program.push_generator(Arc::new(f));
        expr
    }

    /// Build from any operand
    ///
    /// A sequence operand is deep-copied, keeping its start, step and config.
    /// Constants and generators start at 0 with step 1.
    pub fn from_operand(operand: impl Into<Operand<T>>) -> Self {
        match operand.into() {
            Operand::Expr(expr) => {
                let mut copy = Self::empty(expr.start, expr.step);
                copy.config = expr.config.clone();
                copy.program.splice(&expr.program);
                copy
            }
            operand => {
                let mut expr = Self::empty(T::zero(), T::one());
                expr.push_operand(operand);
                expr
            }
        }
    }

    /// Build from any operand with an explicit start and step
    ///
    /// A zero `step` is coerced to 1.
    pub fn from_operand_with(operand: impl Into<Operand<T>>, start: T, step: T) -> Self {
        let mut expr = Self::from_operand(operand);
        expr.start = start;
        expr.step = coerce_step(step);
        expr
    }

    /// Replace the configuration (builder pattern)
    pub fn with_config(mut self, config: SeqConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &SeqConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: SeqConfig) {
        self.config = config;
    }

    /// Domain value at index 0
    pub fn start(&self) -> T {
        self.start
    }

    /// Domain increment per index (never zero)
    pub fn step(&self) -> T {
        self.step
    }

    pub fn set_start(&mut self, start: T) {
        self.start = start;
    }

    /// Set the step; a zero step is silently coerced to 1
    pub fn set_step(&mut self, step: T) {
        self.step = coerce_step(step);
    }

    /// The recorded program
    pub fn program(&self) -> &Program<T> {
        &self.program
    }

    /// Domain value fed to generators at `index`
    pub fn domain_value(&self, index: i64) -> T {
        T::domain_value(self.start, self.step, index)
    }

    /// Compute the value at `index`
    ///
    /// Only fails if the program is malformed, which the append protocol
    /// rules out.
    pub fn value_at(&self, index: i64) -> Result<T, SeqError> {
        let mut stack = self.new_stack();
        self.value_at_with(index, &mut stack)
    }

    /// Alias for [`value_at`](Self::value_at), the `seq[i]` form
    pub fn at(&self, index: i64) -> Result<T, SeqError> {
        self.value_at(index)
    }

    pub(crate) fn new_stack(&self) -> EvalStack<T> {
        EvalStack::new(self.config.stack_capacity)
    }

    pub(crate) fn value_at_with(&self, index: i64, stack: &mut EvalStack<T>) -> Result<T, SeqError> {
        Ok(self.program.evaluate(self.domain_value(index), stack)?)
    }

    /// Append a unary transform of every value
    pub fn map(&mut self, f: impl Fn(T) -> T + Send + Sync + 'static) -> &mut Self {
        self.map_fn(Arc::new(f))
    }

    /// Append a unary transform already in pool form
    pub fn map_fn(&mut self, f: GeneratorFn<T>) -> &mut Self {
        self.program.push_unary(f);
        self
    }

    /// Append a built-in unary operator
    pub fn map_operator(&mut self, op: UnaryOperator) -> &mut Self {
        self.map_fn(op.function::<T>())
    }

    /// Append the unary operator named by `token` (`"++"` or `"--"`)
    ///
    /// An unknown token appends nothing. Under the strict operator-name
    /// policy it is reported as `SeqError::UnresolvedOperator` instead.
    pub fn map_named(&mut self, token: &str) -> Result<&mut Self, SeqError> {
        match UnaryOperator::from_token(token) {
            Some(op) => Ok(self.map_operator(op)),
            None => {
                self.unresolved(token)?;
                Ok(self)
            }
        }
    }

    /// Add 1 to every value
    pub fn increment(&mut self) -> &mut Self {
        self.map_operator(UnaryOperator::Increment)
    }

    /// Subtract 1 from every value
    pub fn decrement(&mut self) -> &mut Self {
        self.map_operator(UnaryOperator::Decrement)
    }

    /// Append `operand`, then `binop(self, operand)`
    ///
    /// The existing expression is the first argument of `binop`, the operand
    /// the second.
    pub fn combine(
        &mut self,
        operand: impl Into<Operand<T>>,
        binop: impl Fn(T, T) -> T + Send + Sync + 'static,
    ) -> &mut Self {
        self.combine_fn(operand, Arc::new(binop))
    }

    /// `combine` with a combinator already in pool form
    pub fn combine_fn(&mut self, operand: impl Into<Operand<T>>, binop: BinaryFn<T>) -> &mut Self {
        let before = self.program.len();
        self.push_operand(operand.into());
        self.program.push_binary(binop);
        debug!(
            "combine: program grew from {} to {} ops",
            before,
            self.program.len()
        );
        self
    }

    /// `combine` with a built-in operator
    pub fn combine_operator(
        &mut self,
        operand: impl Into<Operand<T>>,
        op: BinaryOperator,
    ) -> &mut Self {
        self.combine_fn(operand, op.function::<T>())
    }

    /// `combine` with the binary operator named by `token`
    ///
    /// A token outside the operator table appends nothing, operand
    /// included. Under the strict operator-name policy it is reported as
    /// `SeqError::UnresolvedOperator` instead.
    pub fn combine_named(
        &mut self,
        operand: impl Into<Operand<T>>,
        token: &str,
    ) -> Result<&mut Self, SeqError> {
        match self.resolve_binary(token)? {
            Some(f) => Ok(self.combine_fn(operand, f)),
            None => Ok(self),
        }
    }

    /// Resolve a binary token, applying the operator-name policy
    pub(crate) fn resolve_binary(&self, token: &str) -> Result<Option<BinaryFn<T>>, SeqError> {
        match BinaryOperator::from_token(token).map(|op| op.function::<T>()) {
            Some(f) => Ok(Some(f)),
            None => {
                self.unresolved(token)?;
                Ok(None)
            }
        }
    }

    fn unresolved(&self, token: &str) -> Result<(), SeqError> {
        if self.config.is_strict() {
            return Err(SeqError::UnresolvedOperator(token.to_string()));
        }
        warn!(
            "unresolved operator name '{}' for {}, operation skipped",
            token,
            std::any::type_name::<T>()
        );
        Ok(())
    }

    fn push_operand(&mut self, operand: Operand<T>) {
        match operand {
            Operand::Const(value) => self.program.push_const(value),
            Operand::Generator(f) => self.program.push_generator(f),
            Operand::Expr(expr) => self.program.splice(&expr.program),
        }
    }
}

fn coerce_step<T: Scalar>(step: T) -> T {
    if step == T::zero() { T::one() } else { step }
}
