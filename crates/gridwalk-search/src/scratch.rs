//! Per-search scratch memory.
//!
//! Scores, back-pointers and open/closed membership for every cell, held
//! in flat arrays indexed by [`CellIndex`]. The path finder owns one
//! scratch and resets it at the start of every search, so nothing leaks
//! from one search into the next.

use gridwalk_core::CellIndex;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Membership of a cell in the current search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NodeState {
    /// Not reached yet.
    #[default]
    Unseen,
    /// On the frontier.
    Open,
    /// Expanded; never reconsidered.
    Closed,
}

/// Search scores of one cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Scores {
    /// Exact cost from the start.
    pub g: u32,
    /// Heuristic estimate to the goal.
    pub h: u32,
    /// `g + h`.
    pub f: u32,
}

/// Heap entry: `(f, insertion sequence, cell)`, min-ordered.
type OpenEntry = Reverse<(u32, u32, u32)>;

/// Reusable search state.
///
/// The open set is a binary heap keyed by `(f, insertion sequence)`. A
/// cell keeps the sequence number of its first insertion when its score
/// improves, so popping the minimum gives the same answer as scanning an
/// insertion-ordered list for its leftmost minimum. Entries made stale by
/// a score improvement or by closing the cell are skipped on pop.
#[derive(Debug, Default)]
pub struct SearchScratch {
    scores: Vec<Scores>,
    previous: Vec<Option<CellIndex>>,
    state: Vec<NodeState>,
    seq: Vec<u32>,
    heap: BinaryHeap<OpenEntry>,
    next_seq: u32,
}

impl SearchScratch {
    /// Create scratch sized for `cell_count` cells.
    pub fn with_capacity(cell_count: usize) -> Self {
        let mut s = Self::default();
        s.reset(cell_count);
        s
    }

    /// Zero every score, clear every back-pointer and empty both sets.
    ///
    /// Resizes to `cell_count` if the grid changed size.
    pub fn reset(&mut self, cell_count: usize) {
        self.scores.clear();
        self.scores.resize(cell_count, Scores::default());
        self.previous.clear();
        self.previous.resize(cell_count, None);
        self.state.clear();
        self.state.resize(cell_count, NodeState::Unseen);
        self.seq.clear();
        self.seq.resize(cell_count, 0);
        self.heap.clear();
        self.next_seq = 0;
    }

    /// Number of cells covered.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Whether the scratch covers no cells.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Scores of `cell`.
    pub fn scores(&self, cell: CellIndex) -> Scores {
        self.scores[cell.get()]
    }

    /// Back-pointer of `cell`.
    pub fn previous(&self, cell: CellIndex) -> Option<CellIndex> {
        self.previous[cell.get()]
    }

    /// Membership of `cell`.
    pub fn state(&self, cell: CellIndex) -> NodeState {
        self.state[cell.get()]
    }

    /// Number of cells on the frontier.
    pub fn open_len(&self) -> usize {
        self.state.iter().filter(|s| **s == NodeState::Open).count()
    }

    /// Record new scores and back-pointer for `cell`, then make sure it is
    /// on the frontier.
    pub(crate) fn relax(&mut self, cell: CellIndex, scores: Scores, previous: Option<CellIndex>) {
        let i = cell.get();
        self.scores[i] = scores;
        self.previous[i] = previous;
        if self.state[i] != NodeState::Open {
            self.state[i] = NodeState::Open;
            self.seq[i] = self.next_seq;
            self.next_seq += 1;
        }
        self.heap.push(Reverse((scores.f, self.seq[i], cell.0)));
    }

    /// Pop the open cell with minimum `f`, earliest-inserted on ties.
    pub(crate) fn pop_min(&mut self) -> Option<CellIndex> {
        while let Some(Reverse((f, _seq, raw))) = self.heap.pop() {
            let cell = CellIndex(raw);
            if self.state[cell.get()] == NodeState::Open && self.scores[cell.get()].f == f {
                return Some(cell);
            }
        }
        None
    }

    pub(crate) fn close(&mut self, cell: CellIndex) {
        self.state[cell.get()] = NodeState::Closed;
    }

    /// Follow back-pointers from `goal` and return the path start-first.
    pub(crate) fn reconstruct(&self, goal: CellIndex) -> Vec<CellIndex> {
        let mut path = vec![goal];
        let mut current = goal;
        while let Some(prev) = self.previous[current.get()] {
            path.push(prev);
            current = prev;
        }
        path.reverse();
        path
    }
}
