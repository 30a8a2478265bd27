//! Depth bounded cycle search anchored at a single token.
//!
//! The search walks the [`TokenGraph`] depth first from the anchor and emits
//! every walk that returns to the anchor after `min_depth..=max_depth` swaps
//! without using the same pool twice. Edges are tried in stored order, so
//! cycles come out in DFS pre-order and identical input always produces the
//! same sequence.
//!
//! The anchor never appears as an interior token: reaching it before
//! `min_depth` prunes the branch instead of walking through it.

use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::debug;

use super::graph::{Edge, PoolIndex, TokenGraph, TokenIndex};
use super::types::Cycle;

/// Receives cycles as the search finds them.
///
/// Returning `ControlFlow::Break` stops the whole search.
pub trait CycleSink {
    /// Takes ownership of a completed cycle
    fn accept(&mut self, cycle: Cycle) -> ControlFlow<()>;
}

impl CycleSink for Vec<Cycle> {
    fn accept(&mut self, cycle: Cycle) -> ControlFlow<()> {
        self.push(cycle);
        ControlFlow::Continue(())
    }
}

/// Shared flag asking a running search to stop
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// A flag that is not set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Asks every holder of this flag to stop
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether `cancel` has been called
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// What a finished search reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Cycles the sink accepted
    pub emitted: usize,
    /// Whether the search stopped before exhausting the graph
    pub interrupted: bool,
}

/// Mutable state of the walk. Every push is undone before the frame returns.
struct Walk {
    /// Tokens on the current path, anchor first
    tokens: Vec<TokenIndex>,
    /// Pools on the current path
    pools: Vec<PoolIndex>,
    /// `used[pool]` is true while the pool is on the current path
    used: Vec<bool>,
    /// Accepted cycles
    emitted: usize,
}

/// Enumerates anchored cycles of bounded length
pub struct CycleFinder<'g> {
    /// Graph being searched
    graph: &'g TokenGraph,
    /// Start and end of every cycle
    anchor: TokenIndex,
    /// Shortest cycle to emit, in swaps
    min_depth: usize,
    /// Longest cycle to emit, in swaps
    max_depth: usize,
    /// Checked at every frame
    cancel: CancelFlag,
}

impl<'g> CycleFinder<'g> {
    /// Creates a finder for cycles of `min_depth..=max_depth` swaps.
    ///
    /// A `min_depth` of zero is treated as one.
    #[must_use]
    pub fn new(graph: &'g TokenGraph, anchor: TokenIndex, min_depth: usize, max_depth: usize) -> Self {
        Self {
            graph,
            anchor,
            min_depth: min_depth.max(1),
            max_depth,
            cancel: CancelFlag::new(),
        }
    }

    /// Attaches a cancellation flag
    #[must_use]
    pub fn with_cancel(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    /// Runs the search to completion, cancellation, or until the sink breaks
    pub fn run<S: CycleSink + ?Sized>(&self, sink: &mut S) -> SearchOutcome {
        // a walk never holds more pools than the graph has
        let longest = self.max_depth.min(self.graph.pool_count());
        let mut walk = Walk {
            tokens: Vec::with_capacity(longest + 1),
            pools: Vec::with_capacity(longest),
            used: vec![false; self.graph.pool_count()],
            emitted: 0,
        };
        walk.tokens.push(self.anchor);

        let flow = self.search(&mut walk, self.anchor, sink);
        if flow.is_break() {
            debug!(
                "finder::run: Search interrupted after {} cycles",
                walk.emitted
            );
        }

        SearchOutcome {
            emitted: walk.emitted,
            interrupted: flow.is_break(),
        }
    }

    fn search<S: CycleSink + ?Sized>(
        &self,
        walk: &mut Walk,
        current: TokenIndex,
        sink: &mut S,
    ) -> ControlFlow<()> {
        if self.cancel.is_cancelled() {
            return ControlFlow::Break(());
        }
        // A path already at max_depth swaps cannot be extended
        if walk.pools.len() >= self.max_depth {
            return ControlFlow::Continue(());
        }

        for edge in self.graph.edges(current) {
            if walk.used[edge.pool] {
                continue;
            }
            let depth = walk.pools.len() + 1;

            if edge.to == self.anchor {
                if depth >= self.min_depth && self.emit(walk, *edge, sink).is_break() {
                    return ControlFlow::Break(());
                }
                continue;
            }

            // Nothing past max_depth can close
            if depth == self.max_depth {
                continue;
            }

            walk.tokens.push(edge.to);
            walk.pools.push(edge.pool);
            walk.used[edge.pool] = true;

            let flow = self.search(walk, edge.to, sink);

            walk.used[edge.pool] = false;
            walk.pools.pop();
            walk.tokens.pop();

            if flow.is_break() {
                return flow;
            }
        }

        ControlFlow::Continue(())
    }

    fn emit<S: CycleSink + ?Sized>(&self, walk: &mut Walk, closing: Edge, sink: &mut S) -> ControlFlow<()> {
        let mut tokens = Vec::with_capacity(walk.tokens.len() + 1);
        tokens.extend(walk.tokens.iter().map(|&token| self.graph.token(token).to_string()));
        tokens.push(self.graph.token(closing.to).to_string());

        let mut pools = Vec::with_capacity(walk.pools.len() + 1);
        pools.extend(walk.pools.iter().map(|&pool| self.graph.pool(pool).to_string()));
        pools.push(self.graph.pool(closing.pool).to_string());

        let flow = sink.accept(Cycle { tokens, pools });
        if flow.is_continue() {
            walk.emitted += 1;
        }
        flow
    }
}
