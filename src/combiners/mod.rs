//! Combiners that reduce a group of values into one output.
//!
//! A combiner is described by [`CombineFn`]: it creates an empty accumulator, adds inputs one
//! at a time, merges partial accumulators, and finishes into the output value. Combiners that
//! can build their accumulator straight from a whole group also implement
//! [`LiftableCombiner`].
//!
//! - [`RecitationFold`] -- folds the rows of one recitation into a [`RecitationRecord`].
//!
//! [`RecitationRecord`]: crate::record::RecitationRecord

pub mod recitation;

pub use recitation::{RecitationAcc, RecitationFold};

/// An order-aware reduction over values `V`, accumulating into `A` and producing `O`.
///
/// `merge(acc, other)` must treat `other` as covering inputs that come after those already in
/// `acc`.
pub trait CombineFn<V, A, O>: Send + Sync + 'static {
    fn create(&self) -> A;
    fn add_input(&self, acc: &mut A, v: V);
    fn merge(&self, acc: &mut A, other: A);
    fn finish(&self, acc: A) -> O;
}

/// A combiner that can build its accumulator from a whole group in one call.
pub trait LiftableCombiner<V, A, O>: CombineFn<V, A, O> {
    fn build_from_group(&self, values: &[V]) -> A;
}
