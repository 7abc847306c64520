use std::iter::Copied;
use std::ops::Range;
use std::slice;
use std::str::Chars;

use hashbrown::HashMap;

use super::builder::{Builder, IntoPattern};
use super::char_trait::MatchChar;
use super::config::{Config, EmptyPattern};
use super::state::{PatternId, State, StateId, StateRef};

/// Trait for types that can be scanned by an [`Automaton`].
///
/// Text is consumed one symbol at a time; for `&str` the symbols are `char`s,
/// so multi-byte UTF-8 sequences are never split.
pub trait IntoText<C: MatchChar> {
    /// The symbol iterator.
    type Iter: Iterator<Item = C>;

    /// Returns an iterator over the symbols of this text.
    fn into_text(self) -> Self::Iter;
}

impl<'t> IntoText<char> for &'t str {
    type Iter = Chars<'t>;

    fn into_text(self) -> Chars<'t> {
        self.chars()
    }
}

impl<'t> IntoText<char> for &'t String {
    type Iter = Chars<'t>;

    fn into_text(self) -> Chars<'t> {
        self.chars()
    }
}

impl<'t, C: MatchChar> IntoText<C> for &'t [C] {
    type Iter = Copied<slice::Iter<'t, C>>;

    fn into_text(self) -> Self::Iter {
        self.iter().copied()
    }
}

impl<'t, C: MatchChar> IntoText<C> for &'t Vec<C> {
    type Iter = Copied<slice::Iter<'t, C>>;

    fn into_text(self) -> Self::Iter {
        self.iter().copied()
    }
}

impl<C: MatchChar> IntoText<C> for Vec<C> {
    type Iter = std::vec::IntoIter<C>;

    fn into_text(self) -> Self::Iter {
        self.into_iter()
    }
}

impl<C: MatchChar, const N: usize> IntoText<C> for [C; N] {
    type Iter = std::array::IntoIter<C, N>;

    fn into_text(self) -> Self::Iter {
        self.into_iter()
    }
}

/// A compiled Aho-Corasick automaton.
///
/// Produced by [`Builder::build`]. It is immutable: every search keeps its own
/// cursor, so one automaton can be shared across threads and searched
/// concurrently. To add patterns, turn it back into a builder with
/// [`into_builder`](Automaton::into_builder) and build again.
///
/// # Examples
///
/// ```
/// use libaho::automaton::build_automaton;
///
/// let automaton = build_automaton(["he", "she", "his", "hers"]);
/// let mut matches = automaton.find_iter("ushers").map(|m| (m.start(), m.end()));
/// assert_eq!(matches.next(), Some((1, 4))); // she
/// assert_eq!(matches.next(), Some((2, 4))); // he
/// assert_eq!(matches.next(), Some((2, 6))); // hers
/// assert_eq!(matches.next(), None);
/// ```
#[derive(Clone, Debug)]
pub struct Automaton<C: MatchChar> {
    config: Config,
    states: Vec<State<C>>,
    patterns: Vec<Box<[C]>>,
    empty: Option<PatternId>,
}

impl<C: MatchChar> Automaton<C> {
    pub(crate) fn from_parts(
        config: Config,
        states: Vec<State<C>>,
        patterns: Vec<Box<[C]>>,
    ) -> Self {
        let empty = match config.get_empty_pattern() {
            EmptyPattern::Ignore => None,
            EmptyPattern::EveryPosition => states[StateId::ROOT.as_usize()].terminal,
        };
        Automaton {
            config,
            states,
            patterns,
            empty,
        }
    }

    /// Builds an automaton from an iterator of patterns with the default [`Config`].
    pub fn new<P: IntoPattern<C>>(patterns: impl IntoIterator<Item = P>) -> Self {
        super::builder::build_automaton(patterns)
    }

    /// Hands the trie back to a [`Builder`] so more patterns can be added.
    ///
    /// Pattern ids stay stable; the next [`Builder::build`] recompiles every
    /// failure link and output set.
    pub fn into_builder(self) -> Builder<C> {
        Builder::from_parts(self.config, self.states, self.patterns)
    }

    /// Returns the root state.
    pub fn root(&self) -> StateRef<'_, C> {
        StateRef::new(&self.states, StateId::ROOT)
    }

    /// Returns the state with the given id, if it exists.
    pub fn state(&self, id: StateId) -> Option<StateRef<'_, C>> {
        (id.as_usize() < self.states.len()).then(|| StateRef::new(&self.states, id))
    }

    /// Returns the number of states, including the root.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Returns the number of distinct patterns.
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// Returns the pattern with the given id.
    pub fn pattern(&self, id: PatternId) -> Option<&[C]> {
        self.patterns.get(id.as_usize()).map(|p| &p[..])
    }

    /// Returns all patterns, indexed by [`PatternId`].
    pub fn patterns(&self) -> impl ExactSizeIterator<Item = (PatternId, &[C])> {
        self.patterns
            .iter()
            .enumerate()
            .map(|(i, p)| (PatternId::new(i), &p[..]))
    }

    /// Looks up the id of an inserted pattern.
    pub fn pattern_id(&self, pattern: impl IntoPattern<C>) -> Option<PatternId> {
        pattern
            .collect_pattern()
            .iter()
            .try_fold(self.root(), |state, &ch| state.get(ch))
            .and_then(|state| state.terminal())
    }

    /// Returns the configuration this automaton was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the state reached from `state` on `ch`, following failure links.
    #[inline]
    fn next_state(&self, mut state: StateId, ch: C) -> StateId {
        loop {
            let current = &self.states[state.as_usize()];
            if let Some(next) = current.transitions.get(ch) {
                return next;
            }
            if state.is_root() {
                return state;
            }
            state = current.failure;
        }
    }

    /// Returns a lazy iterator over every match in `text`.
    ///
    /// Matches are produced in order of their end position; matches ending at
    /// the same position come longest first.
    pub fn find_iter<T: IntoText<C>>(&self, text: T) -> FindIter<'_, C, T::Iter> {
        FindIter {
            automaton: self,
            text: text.into_text(),
            state: StateId::ROOT,
            position: 0,
            pending: &[],
            held: None,
        }
    }

    /// Returns the first match by end position, if any.
    pub fn find<T: IntoText<C>>(&self, text: T) -> Option<Match> {
        self.find_iter(text).next()
    }

    /// True if any pattern occurs in `text`.
    pub fn is_match<T: IntoText<C>>(&self, text: T) -> bool {
        self.find(text).is_some()
    }

    /// Scans `text` once and reports the start positions of every pattern.
    ///
    /// Overlapping and nested occurrences are all reported. Positions for each
    /// pattern are in increasing order; patterns that never occur are absent.
    pub fn search<T: IntoText<C>>(&self, text: T) -> SearchReport<'_, C> {
        let mut matches: HashMap<PatternId, Vec<usize>> = HashMap::new();
        for m in self.find_iter(text) {
            matches.entry(m.pattern()).or_default().push(m.start());
        }
        SearchReport {
            automaton: self,
            matches,
        }
    }
}

/// One occurrence of a pattern in a text, in symbol offsets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Match {
    pattern: PatternId,
    start: usize,
    end: usize,
}

impl Match {
    /// The pattern that matched.
    #[inline]
    pub fn pattern(&self) -> PatternId {
        self.pattern
    }

    /// Offset of the first symbol of the match.
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Offset one past the last symbol of the match.
    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    /// Length of the match in symbols.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True for a match of the empty pattern.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The matched range.
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Iterator over the matches in a text, created by [`Automaton::find_iter`].
pub struct FindIter<'a, C: MatchChar, I> {
    automaton: &'a Automaton<C>,
    text: I,
    state: StateId,
    /// Number of symbols consumed so far.
    position: usize,
    /// Outputs of the current state not yet yielded.
    pending: &'a [PatternId],
    /// Symbol read ahead while the empty pattern was reported at its index.
    held: Option<C>,
}

impl<'a, C: MatchChar, I: Iterator<Item = C>> FindIter<'a, C, I> {
    fn advance(&mut self, ch: C) {
        self.state = self.automaton.next_state(self.state, ch);
        self.position += 1;
        // The root only ever outputs the empty pattern, which is policy-driven.
        if !self.state.is_root() {
            self.pending = &self.automaton.states[self.state.as_usize()].outputs;
        }
    }
}

impl<C: MatchChar, I: Iterator<Item = C>> Iterator for FindIter<'_, C, I> {
    type Item = Match;

    fn next(&mut self) -> Option<Match> {
        loop {
            if let Some((&pattern, rest)) = self.pending.split_first() {
                self.pending = rest;
                let len = self.automaton.patterns[pattern.as_usize()].len();
                return Some(Match {
                    pattern,
                    start: self.position - len,
                    end: self.position,
                });
            }

            let ch = match self.held.take() {
                Some(ch) => ch,
                None => {
                    let ch = self.text.next()?;
                    if let Some(empty) = self.automaton.empty {
                        self.held = Some(ch);
                        return Some(Match {
                            pattern: empty,
                            start: self.position,
                            end: self.position,
                        });
                    }
                    ch
                }
            };
            self.advance(ch);
        }
    }
}

/// The result of [`Automaton::search`]: start positions per matched pattern.
///
/// Only patterns that occurred at least once are present.
#[derive(Clone, Debug)]
pub struct SearchReport<'a, C: MatchChar> {
    automaton: &'a Automaton<C>,
    matches: HashMap<PatternId, Vec<usize>>,
}

impl<'a, C: MatchChar> SearchReport<'a, C> {
    /// Returns the start positions of `pattern`, or `None` if it never occurred
    /// (or was never inserted).
    pub fn get(&self, pattern: impl IntoPattern<C>) -> Option<&[usize]> {
        self.automaton
            .pattern_id(pattern)
            .and_then(|id| self.positions(id))
    }

    /// Returns the start positions of the pattern with the given id.
    pub fn positions(&self, id: PatternId) -> Option<&[usize]> {
        self.matches.get(&id).map(Vec::as_slice)
    }

    /// Returns the number of distinct patterns that matched.
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// True if nothing matched.
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Returns the total number of occurrences across all patterns.
    pub fn match_count(&self) -> usize {
        self.matches.values().map(Vec::len).sum()
    }

    /// Iterates over `(pattern, positions)` in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a [C], &[usize])> + '_ {
        let automaton = self.automaton;
        self.matches
            .iter()
            .map(move |(id, positions)| (&automaton.patterns[id.as_usize()][..], &positions[..]))
    }

    /// Consumes the report, keying positions by pattern id.
    pub fn into_inner(self) -> HashMap<PatternId, Vec<usize>> {
        self.matches
    }
}

impl SearchReport<'_, char> {
    /// Consumes the report, keying positions by the pattern text.
    pub fn into_strings(self) -> HashMap<String, Vec<usize>> {
        let automaton = self.automaton;
        self.matches
            .into_iter()
            .map(|(id, positions)| (automaton.patterns[id.as_usize()].iter().collect(), positions))
            .collect()
    }
}
