use std::fmt;

use smallvec::SmallVec;

use super::char_trait::MatchChar;
use super::transitions::Transitions;

/// Index of a state in the automaton's state arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateId(usize);

impl StateId {
    /// The root state, representing the empty prefix.
    pub const ROOT: StateId = StateId(0);

    pub(crate) fn new(index: usize) -> Self {
        StateId(index)
    }

    /// Returns the arena index of this state.
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0
    }

    /// True if this is the root state.
    #[inline]
    pub fn is_root(self) -> bool {
        self == StateId::ROOT
    }
}

/// Identifier of an inserted pattern, assigned in insertion order starting at 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PatternId(usize);

impl PatternId {
    pub(crate) fn new(index: usize) -> Self {
        PatternId(index)
    }

    /// Returns the index of this pattern in insertion order.
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0
    }
}

impl fmt::Display for PatternId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One state of the automaton, i.e. one distinct prefix of the pattern set.
#[derive(Clone, Debug)]
pub(crate) struct State<C: MatchChar> {
    pub(crate) transitions: Transitions<C>,
    /// Longest proper suffix of this prefix that is itself a prefix in the trie.
    /// Only meaningful after compilation; the root points to itself.
    pub(crate) failure: StateId,
    /// The pattern spelled by the path to this state, if one was inserted.
    pub(crate) terminal: Option<PatternId>,
    /// `terminal` plus everything inherited through the failure chain,
    /// longest pattern first.
    pub(crate) outputs: SmallVec<[PatternId; 2]>,
    pub(crate) depth: usize,
}

impl<C: MatchChar> State<C> {
    pub(crate) fn new(depth: usize) -> Self {
        State {
            transitions: Transitions::None,
            failure: StateId::ROOT,
            terminal: None,
            outputs: SmallVec::new(),
            depth,
        }
    }
}

/// A borrowed view of one state of a compiled [`Automaton`](super::Automaton).
///
/// Obtained through [`Automaton::root`](super::Automaton::root) and used to walk
/// the trie edges and failure links without exposing the arena itself.
#[derive(Clone, Copy)]
pub struct StateRef<'a, C: MatchChar> {
    states: &'a [State<C>],
    id: StateId,
}

impl<'a, C: MatchChar> StateRef<'a, C> {
    pub(crate) fn new(states: &'a [State<C>], id: StateId) -> Self {
        debug_assert!(id.as_usize() < states.len());
        StateRef { states, id }
    }

    #[inline]
    fn state(&self) -> &'a State<C> {
        &self.states[self.id.as_usize()]
    }

    /// Returns the id of this state.
    #[inline]
    pub fn id(&self) -> StateId {
        self.id
    }

    /// True if this is the root state.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.id.is_root()
    }

    /// Length of the prefix this state represents.
    #[inline]
    pub fn depth(&self) -> usize {
        self.state().depth
    }

    /// Returns the state the edge labeled `letter` leads to, if any.
    #[inline]
    pub fn get(&self, letter: C) -> Option<StateRef<'a, C>> {
        self.state()
            .transitions
            .get(letter)
            .map(|id| StateRef::new(self.states, id))
    }

    /// Returns the trie children of this state in label order.
    pub fn children(&self) -> impl ExactSizeIterator<Item = (C, StateRef<'a, C>)> + 'a {
        let states = self.states;
        self.state()
            .transitions
            .iter()
            .map(move |(ch, id)| (ch, StateRef::new(states, id)))
    }

    /// Returns the failure-link target. The root's failure link is the root.
    #[inline]
    pub fn failure(&self) -> StateRef<'a, C> {
        StateRef::new(self.states, self.state().failure)
    }

    /// The pattern that ends exactly at this state, if any.
    #[inline]
    pub fn terminal(&self) -> Option<PatternId> {
        self.state().terminal
    }

    /// All patterns recognised in this state, including inherited ones,
    /// longest first.
    #[inline]
    pub fn outputs(&self) -> &'a [PatternId] {
        &self.state().outputs
    }
}

impl<C: MatchChar> PartialEq for StateRef<'_, C> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.states, other.states) && self.id == other.id
    }
}

impl<C: MatchChar> Eq for StateRef<'_, C> {}

impl<C: MatchChar> fmt::Debug for StateRef<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateRef")
            .field("id", &self.id)
            .field("depth", &self.depth())
            .field("failure", &self.state().failure)
            .field("outputs", &self.outputs())
            .finish()
    }
}
