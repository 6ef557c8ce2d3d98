//! Evaluation Stack
//!
//! The value stack the program interpreter runs on. One stack can be reused
//! across many evaluations (see [`EvalStack::clear`]), which is how range
//! materialization avoids an allocation per element.
//!
//! ## Stack Layout
//!
//! ```text
//! ┌──────────┬──────────┬──────────┬─────────┐
//! │   v0     │   v1     │   v2     │  ...    │
//! └──────────┴──────────┴──────────┴─────────┘
//!                                   ↑ depth
//!
//! - Grows upward
//! - Push: store at depth, increment depth
//! - Pop: decrement depth, load from depth
//! ```
//!
//! A well-formed program never holds more values than its
//! [`max_depth`](crate::Program::max_depth), so the default capacity is
//! small.

/// Default stack capacity (number of values)
pub const DEFAULT_STACK_CAPACITY: usize = 16;

/// Value stack for the program interpreter
#[derive(Debug, Clone)]
pub struct EvalStack<T> {
    values: Vec<T>,
}

impl<T: Copy> EvalStack<T> {
    /// Create a new stack with the given capacity
    pub fn new(capacity: usize) -> Self {
        EvalStack {
            values: Vec::with_capacity(capacity),
        }
    }

    /// Create a new stack with default capacity
    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_STACK_CAPACITY)
    }

    /// Get the current stack depth
    #[inline(always)]
    pub fn depth(&self) -> usize {
        self.values.len()
    }

    /// Check if the stack is empty
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Push a value onto the stack
    ///
    /// Grows the stack if necessary.
    #[inline]
    pub fn push(&mut self, val: T) {
        self.values.push(val);
    }

    /// Pop the top value, or `None` if the stack is empty
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        self.values.pop()
    }

    /// Pop the top two values as `(second, top)`
    ///
    /// Leaves the stack untouched if it holds fewer than two values.
    #[inline]
    pub fn pop_two(&mut self) -> Option<(T, T)> {
        if self.values.len() < 2 {
            return None;
        }
        let top = self.values.pop()?;
        let second = self.values.pop()?;
        Some((second, top))
    }

    /// Drop every value, keeping the allocation
    pub fn clear(&mut self) {
        self.values.clear();
    }
}

impl<T: Copy> Default for EvalStack<T> {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}
