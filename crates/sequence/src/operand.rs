//! Operands accepted by constructors and `combine`

use crate::expression::SequenceExpression;
use lazyseq_core::{GeneratorFn, Scalar};
use std::fmt;
use std::sync::Arc;

/// Something that can become (part of) a sequence program
pub enum Operand<T: Scalar> {
    /// A literal value, the same at every index
    Const(T),
    /// A function of the domain value `start + step * index`
    Generator(GeneratorFn<T>),
    /// Another sequence; its program is spliced in, never referenced
    Expr(SequenceExpression<T>),
}

impl<T: Scalar> Operand<T> {
    /// Wrap a generator function
    pub fn generator(f: impl Fn(T) -> T + Send + Sync + 'static) -> Self {
        Operand::Generator(Arc::new(f))
    }
}

impl<T: Scalar> Clone for Operand<T> {
    fn clone(&self) -> Self {
        match self {
            Operand::Const(v) => Operand::Const(*v),
            Operand::Generator(f) => Operand::Generator(Arc::clone(f)),
            Operand::Expr(expr) => Operand::Expr(expr.clone()),
        }
    }
}

impl<T: Scalar> fmt::Debug for Operand<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Const(v) => write!(f, "Const({:?})", v),
            Operand::Generator(_) => write!(f, "Generator(<fn>)"),
            Operand::Expr(expr) => write!(f, "Expr({:?})", expr),
        }
    }
}

impl<T: Scalar> From<SequenceExpression<T>> for Operand<T> {
    fn from(expr: SequenceExpression<T>) -> Self {
        Operand::Expr(expr)
    }
}

impl<T: Scalar> From<&SequenceExpression<T>> for Operand<T> {
    fn from(expr: &SequenceExpression<T>) -> Self {
        Operand::Expr(expr.clone())
    }
}

macro_rules! scalar_operand {
    ($($t:ty),* $(,)?) => {$(
        impl From<$t> for Operand<$t> {
            fn from(value: $t) -> Self {
                Operand::Const(value)
            }
        }
    )*};
}

scalar_operand!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);
