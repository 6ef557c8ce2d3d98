//! Scalar element types
//!
//! A sequence is instantiated over exactly one arithmetic type. `Scalar`
//! collects the arithmetic the machine and the built-in operators need.
//!
//! # Overflow Behavior
//!
//! Integer arithmetic uses **wrapping semantics**, the same way for every
//! operator:
//! - `plus`, `minus`, `times`: wrap on overflow
//! - `quotient`: `MIN / -1` wraps to `MIN`; division by zero yields 0
//! - `remainder`: `MIN % -1` is 0; remainder by zero yields 0
//! - shifts: the shift amount is taken modulo the bit width
//!
//! Floating-point types follow IEEE 754 for `plus`, `minus`, `times` and
//! `quotient`. Their `remainder`, bitwise and shift operators truncate both
//! operands to `i64`, apply the integer operator and convert back, so
//! `7.9 & 6.0` is `6.0` and `3.5 % 2.0` is `1.0`. A remainder whose
//! truncated divisor is 0 yields 0, as for integers.

use num_traits::{One, Zero};
use std::fmt::{Debug, Display};
use tracing::warn;

/// Bitwise and shift operators of a scalar type.
#[derive(Clone, Copy)]
pub struct Bitwise<T> {
    pub and: fn(T, T) -> T,
    pub or: fn(T, T) -> T,
    pub xor: fn(T, T) -> T,
    /// `a >> b`
    pub shr: fn(T, T) -> T,
    /// `a << b`
    pub shl: fn(T, T) -> T,
}

/// An arithmetic element type usable in a sequence.
pub trait Scalar:
    Copy + PartialOrd + Debug + Display + Zero + One + Send + Sync + 'static
{
    /// Convert an index into this type (`as` conversion)
    fn from_index(index: i64) -> Self;

    fn plus(self, rhs: Self) -> Self;
    fn minus(self, rhs: Self) -> Self;
    fn times(self, rhs: Self) -> Self;
    fn quotient(self, rhs: Self) -> Self;
    fn remainder(self, rhs: Self) -> Self;

    /// `self + 1`
    fn succ(self) -> Self {
        self.plus(Self::one())
    }

    /// `self - 1`
    fn pred(self) -> Self {
        self.minus(Self::one())
    }

    /// Bitwise and shift operators
    fn bitwise() -> Bitwise<Self>;

    /// `start + step * index`: the domain value fed to generators.
    fn domain_value(start: Self, step: Self, index: i64) -> Self {
        start.plus(step.times(Self::from_index(index)))
    }
}

macro_rules! int_scalar {
    ($($t:ty),* $(,)?) => {$(
        impl Scalar for $t {
            #[inline]
            fn from_index(index: i64) -> Self {
                index as $t
            }

            #[inline]
            fn plus(self, rhs: Self) -> Self {
                self.wrapping_add(rhs)
            }

            #[inline]
            fn minus(self, rhs: Self) -> Self {
                self.wrapping_sub(rhs)
            }

            #[inline]
            fn times(self, rhs: Self) -> Self {
                self.wrapping_mul(rhs)
            }

            fn quotient(self, rhs: Self) -> Self {
                if rhs == 0 {
                    warn!("divide: division by zero (attempted {} / 0)", self);
                    return 0;
                }
                self.wrapping_div(rhs)
            }

            fn remainder(self, rhs: Self) -> Self {
                if rhs == 0 {
                    warn!("modulo: division by zero (attempted {} % 0)", self);
                    return 0;
                }
                self.wrapping_rem(rhs)
            }

            fn bitwise() -> Bitwise<Self> {
                Bitwise {
                    and: |a, b| a & b,
                    or: |a, b| a | b,
                    xor: |a, b| a ^ b,
                    shr: |a, b| a.wrapping_shr(b as u32),
                    shl: |a, b| a.wrapping_shl(b as u32),
                }
            }
        }
    )*};
}

macro_rules! float_scalar {
    ($($t:ty),* $(,)?) => {$(
        impl Scalar for $t {
            #[inline]
            fn from_index(index: i64) -> Self {
                index as $t
            }

            #[inline]
            fn plus(self, rhs: Self) -> Self {
                self + rhs
            }

            #[inline]
            fn minus(self, rhs: Self) -> Self {
                self - rhs
            }

            #[inline]
            fn times(self, rhs: Self) -> Self {
                self * rhs
            }

            #[inline]
            fn quotient(self, rhs: Self) -> Self {
                self / rhs
            }

            fn remainder(self, rhs: Self) -> Self {
                (self as i64).remainder(rhs as i64) as $t
            }

            fn bitwise() -> Bitwise<Self> {
                Bitwise {
                    and: |a, b| ((a as i64) & (b as i64)) as $t,
                    or: |a, b| ((a as i64) | (b as i64)) as $t,
                    xor: |a, b| ((a as i64) ^ (b as i64)) as $t,
                    shr: |a, b| (a as i64).wrapping_shr(b as i64 as u32) as $t,
                    shl: |a, b| (a as i64).wrapping_shl(b as i64 as u32) as $t,
                }
            }
        }
    )*};
}

int_scalar!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
float_scalar!(f32, f64);
