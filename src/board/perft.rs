//! Perft: legal-move tree leaf counting.

use super::position::Position;
use super::types::Move;

impl Position {
    /// Count the leaf nodes of the legal move tree at `depth`.
    ///
    /// `perft(0)` is 1 by definition; at depth 1 the generated move count
    /// is returned directly (bulk counting).
    #[must_use]
    pub fn perft(&mut self, depth: u32) -> u64 {
        if depth == 0 {
            return 1;
        }
        let moves = self.generate_moves();
        if depth == 1 {
            return moves.len() as u64;
        }

        let mut nodes = 0;
        for &m in &moves {
            self.make_move(m);
            nodes += self.perft(depth - 1);
            self.take_move(m);
        }
        nodes
    }

    /// Per-root-move subtotals of `perft(depth)`, the classic debugging
    /// breakdown. The pairs come back in generation order.
    #[must_use]
    pub fn divide(&mut self, depth: u32) -> Vec<(Move, u64)> {
        assert!(depth > 0, "divide requires depth >= 1");
        let moves = self.generate_moves();
        let mut results = Vec::with_capacity(moves.len());

        for &m in &moves {
            self.make_move(m);
            let nodes = self.perft(depth - 1);
            self.take_move(m);
            #[cfg(feature = "logging")]
            log::debug!("divide {}: {}", self.to_uci(m), nodes);
            results.push((m, nodes));
        }
        results
    }
}
