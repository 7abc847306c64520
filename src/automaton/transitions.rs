use super::char_trait::MatchChar;
use super::state::StateId;

/// The outgoing edges of a state, sorted by label.
///
/// Most trie states have one or two children, so those cases are stored inline
/// and only states with three or more children allocate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Transitions<C: MatchChar> {
    /// No children.
    None,
    /// Exactly one child (label, state).
    One((C, StateId)),
    /// Exactly two children, `c1 < c2`.
    Two((C, StateId, C, StateId)),
    /// Three or more children, sorted by label.
    Many(Vec<(C, StateId)>),
}

impl<C: MatchChar> Transitions<C> {
    /// Returns the edge at `index` in label order.
    #[inline]
    pub(crate) fn at(&self, index: usize) -> Option<(C, StateId)> {
        match self {
            Transitions::None => None,
            Transitions::One(edge) => (index == 0).then_some(*edge),
            Transitions::Two((c1, s1, c2, s2)) => match index {
                0 => Some((*c1, *s1)),
                1 => Some((*c2, *s2)),
                _ => None,
            },
            Transitions::Many(edges) => edges.get(index).copied(),
        }
    }

    /// Returns the target of the edge labeled `letter`.
    #[inline]
    pub(crate) fn get(&self, letter: C) -> Option<StateId> {
        match self {
            Transitions::None => None,
            Transitions::One((ch, state)) => (*ch == letter).then_some(*state),
            Transitions::Two((c1, s1, c2, s2)) => {
                if letter == *c1 {
                    Some(*s1)
                } else if letter == *c2 {
                    Some(*s2)
                } else {
                    None
                }
            }
            Transitions::Many(edges) => {
                // Unrolling by 2 keeps small fan-outs on a linear scan; past that
                // the labels are sorted and a binary search wins.
                if edges.len() > 16 {
                    return edges
                        .binary_search_by_key(&letter, |&(ch, _)| ch)
                        .ok()
                        .map(|i| edges[i].1);
                }
                let chunks = edges.chunks_exact(2);
                let remainder = chunks.remainder();
                for chunk in chunks {
                    if chunk[0].0 == letter {
                        return Some(chunk[0].1);
                    }
                    if chunk[1].0 == letter {
                        return Some(chunk[1].1);
                    }
                }
                remainder
                    .iter()
                    .find(|&&(ch, _)| ch == letter)
                    .map(|&(_, state)| state)
            }
        }
    }

    /// Adds an edge in sorted position.
    ///
    /// The caller guarantees `letter` is not already present.
    pub(crate) fn insert(&mut self, letter: C, target: StateId) {
        debug_assert!(self.get(letter).is_none(), "insert: letter already exists");
        *self = match std::mem::replace(self, Transitions::None) {
            Transitions::None => Transitions::One((letter, target)),
            Transitions::One((c1, s1)) => {
                if letter < c1 {
                    Transitions::Two((letter, target, c1, s1))
                } else {
                    Transitions::Two((c1, s1, letter, target))
                }
            }
            Transitions::Two((c1, s1, c2, s2)) => {
                let mut edges = vec![(c1, s1), (c2, s2), (letter, target)];
                edges.sort_unstable_by_key(|&(ch, _)| ch);
                Transitions::Many(edges)
            }
            Transitions::Many(mut edges) => {
                let pos = edges.partition_point(|&(ch, _)| ch < letter);
                edges.insert(pos, (letter, target));
                Transitions::Many(edges)
            }
        };
    }

    /// Returns the number of outgoing edges.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        match self {
            Transitions::None => 0,
            Transitions::One(_) => 1,
            Transitions::Two(_) => 2,
            Transitions::Many(edges) => edges.len(),
        }
    }

    /// Returns an iterator over the edges in label order.
    #[inline]
    pub(crate) fn iter(&self) -> TransitionIter<'_, C> {
        TransitionIter {
            transitions: self,
            index: 0,
        }
    }
}

/// An iterator over the edges of a state, in label order.
#[derive(Clone)]
pub(crate) struct TransitionIter<'a, C: MatchChar> {
    transitions: &'a Transitions<C>,
    index: usize,
}

impl<C: MatchChar> Iterator for TransitionIter<'_, C> {
    type Item = (C, StateId);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let edge = self.transitions.at(self.index)?;
        self.index += 1;
        Some(edge)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.transitions.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl<C: MatchChar> ExactSizeIterator for TransitionIter<'_, C> {}
