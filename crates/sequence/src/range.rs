//! Ranges and folds over sequence indices
//!
//! # Direction
//!
//! `range(lo, hi)` walks indices from `lo` to `hi` inclusive, one index at a
//! time, in the direction given by the sign of `step`:
//!
//! | step | bounds     | walk                  |
//! |------|------------|-----------------------|
//! | > 0  | `lo <= hi` | `lo, lo+1, ..., hi`   |
//! | < 0  | `lo >= hi` | `lo, lo-1, ..., hi`   |
//! | any  | otherwise  | empty                 |
//!
//! `first(n)` and the `*_first` folds always walk indices `0..n` upward,
//! whatever the step.
//!
//! The `*_by` forms take an explicit index stride. Its sign sets the
//! direction in place of `step`, so `range_by(0, 9, 3)` visits `0, 3, 6, 9`
//! and `range_by(9, 0, -4)` visits `9, 5, 1`. A stride of 0 falls back to the
//! plain walk.
//!
//! # Folds
//!
//! A fold starts from `value_at(lo)` (or `binop(value_at(lo), seed)` when
//! seeded) and combines the remaining values left to right. When the walk is
//! empty the fold is just that starting value.

use crate::error::SeqError;
use crate::expression::SequenceExpression;
use lazyseq_core::Scalar;
use std::iter::{Rev, StepBy};
use std::ops::RangeInclusive;
use tracing::debug;

/// Indices visited by a range walk
#[derive(Debug, Clone)]
pub enum RangeIndices {
    Ascending(StepBy<RangeInclusive<i64>>),
    Descending(StepBy<Rev<RangeInclusive<i64>>>),
    Empty,
}

impl Iterator for RangeIndices {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        match self {
            RangeIndices::Ascending(r) => r.next(),
            RangeIndices::Descending(r) => r.next(),
            RangeIndices::Empty => None,
        }
    }
}

impl<T: Scalar> SequenceExpression<T> {
    /// The indices `range(lo, hi)` visits
    pub fn range_indices(&self, lo: i64, hi: i64) -> RangeIndices {
        self.range_indices_by(lo, hi, 0)
    }

    /// The indices `range_by(lo, hi, stride)` visits
    pub fn range_indices_by(&self, lo: i64, hi: i64, stride: i64) -> RangeIndices {
        let stride = match stride {
            0 if self.step() > T::zero() => 1,
            0 if self.step() < T::zero() => -1,
            0 => return RangeIndices::Empty,
            s => s,
        };
        let by = usize::try_from(stride.unsigned_abs()).unwrap_or(usize::MAX);
        if stride > 0 && lo <= hi {
            RangeIndices::Ascending((lo..=hi).step_by(by))
        } else if stride < 0 && lo >= hi {
            RangeIndices::Descending((hi..=lo).rev().step_by(by))
        } else {
            RangeIndices::Empty
        }
    }

    /// Values at indices `lo` to `hi` inclusive, in step direction
    ///
    /// Bounds that disagree with the sign of `step` give an empty vector.
    pub fn range(&self, lo: i64, hi: i64) -> Result<Vec<T>, SeqError> {
        self.range_by(lo, hi, 0)
    }

    /// Values at every `stride`-th index from `lo` towards `hi`
    pub fn range_by(&self, lo: i64, hi: i64, stride: i64) -> Result<Vec<T>, SeqError> {
        let indices = self.range_indices_by(lo, hi, stride);
        let len = match indices {
            RangeIndices::Empty => 0,
            _ => (lo.abs_diff(hi) / stride.unsigned_abs().max(1)) as u128 + 1,
        };
        self.check_range_len(len)?;
        debug!("range: materializing {} values from {} to {}", len, lo, hi);
        self.collect_indices(indices, len as usize)
    }

    /// The first `n` values, at indices `0..n`
    pub fn first(&self, n: usize) -> Result<Vec<T>, SeqError> {
        self.check_range_len(n as u128)?;
        debug!("first: materializing {} values", n);
        self.collect_indices(first_indices(n), n)
    }

    /// Values at indices `0, stride, 2 * stride, ...`, `n` of them
    ///
    /// A stride of 0 is the same as 1.
    pub fn first_by(&self, n: usize, stride: i64) -> Result<Vec<T>, SeqError> {
        self.check_range_len(n as u128)?;
        debug!("first: materializing {} values, stride {}", n, stride);
        self.collect_indices(strided_indices(n, stride), n)
    }

    /// Left fold of `range(lo, hi)` with `binop`, starting from `value_at(lo)`
    pub fn fold_range(
        &self,
        lo: i64,
        hi: i64,
        binop: impl Fn(T, T) -> T,
    ) -> Result<T, SeqError> {
        self.fold_indices(lo, self.range_indices(lo, hi), &binop, None)
    }

    /// Left fold of `range(lo, hi)`; the first step is `binop(value_at(lo), seed)`
    pub fn fold_range_seeded(
        &self,
        lo: i64,
        hi: i64,
        binop: impl Fn(T, T) -> T,
        seed: T,
    ) -> Result<T, SeqError> {
        self.fold_indices(lo, self.range_indices(lo, hi), &binop, Some(seed))
    }

    /// Left fold of the first `n` values; `value_at(0)` when `n` is 0
    pub fn fold_first(&self, n: usize, binop: impl Fn(T, T) -> T) -> Result<T, SeqError> {
        self.fold_indices(0, first_indices(n), &binop, None)
    }

    /// Seeded left fold of the first `n` values
    pub fn fold_first_seeded(
        &self,
        n: usize,
        binop: impl Fn(T, T) -> T,
        seed: T,
    ) -> Result<T, SeqError> {
        self.fold_indices(0, first_indices(n), &binop, Some(seed))
    }

    /// Left fold of `range_by(lo, hi, stride)`
    pub fn fold_range_by(
        &self,
        lo: i64,
        hi: i64,
        stride: i64,
        binop: impl Fn(T, T) -> T,
    ) -> Result<T, SeqError> {
        self.fold_indices(lo, self.range_indices_by(lo, hi, stride), &binop, None)
    }

    /// Left fold of `first_by(n, stride)`
    pub fn fold_first_by(
        &self,
        n: usize,
        stride: i64,
        binop: impl Fn(T, T) -> T,
    ) -> Result<T, SeqError> {
        self.fold_indices(0, strided_indices(n, stride), &binop, None)
    }

    /// `fold_range` with a named operator
    ///
    /// An unresolved name gives `Ok(None)`, or `SeqError::UnresolvedOperator`
    /// under the strict operator-name policy.
    pub fn fold_range_named(&self, lo: i64, hi: i64, token: &str) -> Result<Option<T>, SeqError> {
        let Some(f) = self.resolve_binary(token)? else {
            return Ok(None);
        };
        self.fold_range(lo, hi, |a, b| f(a, b)).map(Some)
    }

    /// `fold_range_seeded` with a named operator
    pub fn fold_range_named_seeded(
        &self,
        lo: i64,
        hi: i64,
        token: &str,
        seed: T,
    ) -> Result<Option<T>, SeqError> {
        let Some(f) = self.resolve_binary(token)? else {
            return Ok(None);
        };
        self.fold_range_seeded(lo, hi, |a, b| f(a, b), seed).map(Some)
    }

    /// `fold_first` with a named operator
    pub fn fold_first_named(&self, n: usize, token: &str) -> Result<Option<T>, SeqError> {
        let Some(f) = self.resolve_binary(token)? else {
            return Ok(None);
        };
        self.fold_first(n, |a, b| f(a, b)).map(Some)
    }

    /// `fold_first_seeded` with a named operator
    pub fn fold_first_named_seeded(
        &self,
        n: usize,
        token: &str,
        seed: T,
    ) -> Result<Option<T>, SeqError> {
        let Some(f) = self.resolve_binary(token)? else {
            return Ok(None);
        };
        self.fold_first_seeded(n, |a, b| f(a, b), seed).map(Some)
    }

    /// Sum of `range(lo, hi)`
    pub fn sum_range(&self, lo: i64, hi: i64) -> Result<T, SeqError> {
        self.fold_range(lo, hi, T::plus)
    }

    /// Product of `range(lo, hi)`
    pub fn product_range(&self, lo: i64, hi: i64) -> Result<T, SeqError> {
        self.fold_range(lo, hi, T::times)
    }

    /// Sum of the first `n` values
    pub fn sum_first(&self, n: usize) -> Result<T, SeqError> {
        self.fold_first(n, T::plus)
    }

    /// Product of the first `n` values
    pub fn product_first(&self, n: usize) -> Result<T, SeqError> {
        self.fold_first(n, T::times)
    }

    /// Sum of `range_by(lo, hi, stride)`
    pub fn sum_range_by(&self, lo: i64, hi: i64, stride: i64) -> Result<T, SeqError> {
        self.fold_range_by(lo, hi, stride, T::plus)
    }

    /// Sum of `first_by(n, stride)`
    pub fn sum_first_by(&self, n: usize, stride: i64) -> Result<T, SeqError> {
        self.fold_first_by(n, stride, T::plus)
    }

    fn check_range_len(&self, len: u128) -> Result<(), SeqError> {
        match self.config().max_range_len {
            Some(limit) if len > limit as u128 => Err(SeqError::RangeTooLarge { len, limit }),
            _ => Ok(()),
        }
    }

    fn collect_indices(
        &self,
        indices: impl Iterator<Item = i64>,
        len: usize,
    ) -> Result<Vec<T>, SeqError> {
        let mut stack = self.new_stack();
        let mut values = Vec::with_capacity(len.min(MAX_PREALLOC));
        for i in indices {
            values.push(self.value_at_with(i, &mut stack)?);
        }
        Ok(values)
    }

    fn fold_indices(
        &self,
        lo: i64,
        indices: impl Iterator<Item = i64>,
        binop: &dyn Fn(T, T) -> T,
        seed: Option<T>,
    ) -> Result<T, SeqError> {
        let mut stack = self.new_stack();
        let first = self.value_at_with(lo, &mut stack)?;
        let mut acc = match seed {
            Some(seed) => binop(first, seed),
            None => first,
        };
        // The walk starts at `lo`, which is already in `acc`
        for i in indices.skip(1) {
            acc = binop(acc, self.value_at_with(i, &mut stack)?);
        }
        Ok(acc)
    }
}

/// Upper bound on up-front allocation for a materialized range
const MAX_PREALLOC: usize = 1 << 16;

fn first_indices(n: usize) -> std::ops::Range<i64> {
    0..i64::try_from(n).unwrap_or(i64::MAX)
}

fn strided_indices(n: usize, stride: i64) -> impl Iterator<Item = i64> {
    let stride = if stride == 0 { 1 } else { stride };
    first_indices(n).map(move |k| k.wrapping_mul(stride))
}
