use std::fmt::Debug;
use std::hash::Hash;

/// Trait for types that can serve as transition labels in an [`Automaton`](super::Automaton).
///
/// This trait is automatically implemented for any type satisfying all the
/// required bounds (`char`, `u8`, `u16`, `u32`, etc.).
///
/// - `Copy`: transitions store labels by value
/// - `Eq + Ord`: transitions are kept sorted, which fixes the breadth-first
///   visiting order during compilation
/// - `Hash`: patterns are used as report keys
/// - `Debug`: debug printing of states
pub trait MatchChar: Copy + Eq + Ord + Hash + Debug {}

impl<T: Copy + Eq + Ord + Hash + Debug> MatchChar for T {}
