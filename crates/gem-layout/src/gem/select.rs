//! Round-based random vertex selection.

use gem_graph::VertexId;

use super::rng::XorShift64Star;

/// Hands out every vertex exactly once per round, in random order.
///
/// Each pick is one Fisher-Yates step over the not-yet-picked prefix of `order`. The last pick
/// of a round always ends up in slot 0, so the first pick of the next round skips that slot and
/// the same vertex is never chosen twice in a row.
#[derive(Debug, Clone)]
pub(crate) struct RoundSelector {
    order: Vec<usize>,
    remaining: usize,
    completed_round: bool,
}

impl RoundSelector {
    pub(crate) fn new(vertex_count: usize) -> Self {
        Self {
            order: (0..vertex_count).collect(),
            remaining: vertex_count,
            completed_round: false,
        }
    }

    pub(crate) fn next(&mut self, rng: &mut XorShift64Star) -> Option<VertexId> {
        let n = self.order.len();
        if n == 0 {
            return None;
        }
        if self.remaining == 0 {
            self.remaining = n;
            self.completed_round = true;
        }
        let i = if self.completed_round && self.remaining == n && n > 1 {
            1 + rng.index_below(n - 1)
        } else {
            rng.index_below(self.remaining)
        };
        self.remaining -= 1;
        self.order.swap(i, self.remaining);
        Some(VertexId::from_index(self.order[self.remaining]))
    }
}
