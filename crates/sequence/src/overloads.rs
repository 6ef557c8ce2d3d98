//! Operator sugar
//!
//! Each std operator compiles one more instruction into the program instead
//! of computing anything:
//!
//! ```rust,ignore
//! let mut seq = SequenceExpression::from_generator(|x: i64| x);
//! seq *= 3i64;            // x * 3
//! seq -= &other;          // (x * 3) - other
//! let shifted = &seq << 1i64; // new expression, `seq` untouched
//! ```
//!
//! The right-hand side is anything `Into<Operand<T>>`: a scalar, an
//! `Operand`, or a sequence (owned or borrowed). Compound assignment appends
//! to the left-hand expression; the plain operators return a new one.

use crate::expression::SequenceExpression;
use crate::operand::Operand;
use crate::operators::BinaryOperator;
use lazyseq_core::Scalar;
use std::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Div,
    DivAssign, Mul, MulAssign, Rem, RemAssign, Shl, ShlAssign, Shr, ShrAssign, Sub, SubAssign,
};

macro_rules! binary_overload {
    ($($trait:ident $method:ident, $assign_trait:ident $assign_method:ident => $op:ident;)*) => {$(
        impl<T: Scalar, O: Into<Operand<T>>> $assign_trait<O> for SequenceExpression<T> {
            fn $assign_method(&mut self, rhs: O) {
                self.combine_operator(rhs, BinaryOperator::$op);
            }
        }

        impl<T: Scalar, O: Into<Operand<T>>> $trait<O> for SequenceExpression<T> {
            type Output = SequenceExpression<T>;

            fn $method(mut self, rhs: O) -> SequenceExpression<T> {
                self.combine_operator(rhs, BinaryOperator::$op);
                self
            }
        }

        impl<T: Scalar, O: Into<Operand<T>>> $trait<O> for &SequenceExpression<T> {
            type Output = SequenceExpression<T>;

            fn $method(self, rhs: O) -> SequenceExpression<T> {
                let mut expr = self.clone();
                expr.combine_operator(rhs, BinaryOperator::$op);
                expr
            }
        }
    )*};
}

binary_overload! {
    Add add, AddAssign add_assign => Add;
    Sub sub, SubAssign sub_assign => Sub;
    Mul mul, MulAssign mul_assign => Mul;
    Div div, DivAssign div_assign => Div;
    Rem rem, RemAssign rem_assign => Rem;
    BitAnd bitand, BitAndAssign bitand_assign => BitAnd;
    BitOr bitor, BitOrAssign bitor_assign => BitOr;
    BitXor bitxor, BitXorAssign bitxor_assign => BitXor;
    Shr shr, ShrAssign shr_assign => Shr;
    Shl shl, ShlAssign shl_assign => Shl;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{OperatorNamePolicy, SeqConfig};

    fn identity() -> SequenceExpression<i64> {
        SequenceExpression::from_generator(|x| x)
    }

    #[test]
    fn test_compound_assignment() {
        let mut seq = identity();
        seq += 2i64;
        seq *= 3i64;
        seq -= 1i64;
        // ((x + 2) * 3) - 1
        assert_eq!(seq.value_at(4), Ok(17));
    }

    #[test]
    fn test_plain_operators_leave_operand_untouched() {
        let seq = identity();
        let doubled = &seq * 2i64;
        assert_eq!(seq.value_at(5), Ok(5));
        assert_eq!(doubled.value_at(5), Ok(10));

        let chained = seq + 1i64;
        assert_eq!(chained.value_at(5), Ok(6));
    }

    #[test]
    fn test_constant_left_operand() {
        let three = SequenceExpression::from_constant(3i64);
        let product = three * identity();
        assert_eq!(product.value_at(4), Ok(12));
    }

    #[test]
    fn test_non_commutative_order() {
        let ten = SequenceExpression::from_constant(10i64);
        assert_eq!((&ten - identity()).value_at(3), Ok(7));
        assert_eq!((&ten / identity()).value_at(3), Ok(3));
        assert_eq!((&ten % identity()).value_at(3), Ok(1));
        assert_eq!((&ten >> identity()).value_at(1), Ok(5));
        assert_eq!((&ten << identity()).value_at(2), Ok(40));
    }

    #[test]
    fn test_bitwise_operators() {
        let seq = SequenceExpression::from_constant(0b1100i64);
        assert_eq!((&seq & 0b1010i64).value_at(0), Ok(0b1000));
        assert_eq!((&seq | 0b1010i64).value_at(0), Ok(0b1110));
        assert_eq!((&seq ^ 0b1010i64).value_at(0), Ok(0b0110));

        let mut acc = seq.clone();
        acc &= 0b0100i64;
        acc |= 0b0001i64;
        acc ^= 0b0011i64;
        acc <<= 2i64;
        acc >>= 1i64;
        // ((0b1100 & 0b0100) | 1) ^ 3 = 0b0110, << 2 = 24, >> 1 = 12
        assert_eq!(acc.value_at(0), Ok(12));
    }

    #[test]
    fn test_sequence_operands() {
        let mut seq = identity();
        let squares = SequenceExpression::from_generator(|x: i64| x * x);
        seq += &squares;
        seq /= 2i64;
        // (x + x^2) / 2: triangular numbers
        assert_eq!(seq.first(5), Ok(vec![0, 1, 3, 6, 10]));
    }

    #[test]
    fn test_float_bitwise_and_remainder() {
        let mut masked = SequenceExpression::from_generator(|x: f64| x);
        masked &= 6.0f64;
        assert_eq!(masked.program().len(), 3);
        assert_eq!(masked.value_at(7), Ok(6.0));

        let mut halves = SequenceExpression::from_generator(|x: f64| x + 0.5);
        halves %= 2.0f64;
        // 3.5 truncates to 3
        assert_eq!(halves.value_at(3), Ok(1.0));

        let shifted = &halves << 2.0f64;
        assert_eq!(shifted.value_at(3), Ok(4.0));
    }

    #[test]
    fn test_float_shift_under_strict_policy() {
        let strict = SeqConfig::new().with_operator_names(OperatorNamePolicy::Strict);
        let mut seq = SequenceExpression::from_generator(|x: f64| x).with_config(strict);
        seq <<= 1.0f64;
        assert_eq!(seq.program().len(), 3);
        assert_eq!(seq.value_at(5), Ok(10.0));
    }

    #[test]
    fn test_generator_operand() {
        let mut seq = SequenceExpression::from_constant(1i64);
        seq += Operand::generator(|x: i64| x * 10);
        assert_eq!(seq.value_at(3), Ok(31));
    }
}
