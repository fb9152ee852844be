/* =======================================================================
Sharpmate is a chess playing engine.

Sharpmate is free software: you can redistribute it and/or modify it under
the terms of the GNU General Public License version 3 as published by
the Free Software Foundation.

Sharpmate is distributed in the hope that it will be useful, but WITHOUT
ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or
FITNESS FOR A PARTICULAR PURPOSE.  See the GNU General Public License
for more details.

You should have received a copy of the GNU General Public License along
with this program.  If not, see <http://www.gnu.org/licenses/>.
======================================================================= */

use crate::{
    board::Board,
    defs::FEN_START_POSITION,
    misc::parse,
    movegen::defs::Move,
    movegen::MoveGenerator,
};
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use std::collections::HashMap;

// A handful of named main lines, good enough to get a club-level game out
// of theory without dragging in an external Polyglot book file. Each line
// is a sequence of moves in long algebraic notation played from the start
// position; lines sharing a prefix accumulate weight on that branch, so
// more common openings get picked more often.
const BOOK_LINES: &[&[&str]] = &[
    &["e2e4", "e7e5", "g1f3", "b8c6", "f1b5"],
    &["e2e4", "e7e5", "g1f3", "b8c6", "f1c4"],
    &["e2e4", "e7e5", "g1f3", "g8f6"],
    &["e2e4", "c7c5", "g1f3", "d7d6"],
    &["e2e4", "c7c5", "g1f3", "b8c6"],
    &["e2e4", "e7e6", "d2d4", "d7d5"],
    &["e2e4", "c7c6", "d2d4", "d7d5"],
    &["d2d4", "d7d5", "c2c4", "e7e6"],
    &["d2d4", "d7d5", "c2c4", "c7c6"],
    &["d2d4", "g8f6", "c2c4", "g7g6"],
    &["d2d4", "g8f6", "c2c4", "e7e6"],
    &["g1f3", "d7d5", "c2c4", "d5c4"],
    &["c2c4", "e7e5", "b1c3", "g8f6"],
];

struct WeightedMove {
    algebraic: String,
    weight: u16,
}

pub struct OpeningBook {
    positions: HashMap<u64, Vec<WeightedMove>>,
}

impl OpeningBook {
    pub fn new() -> Self {
        let mut positions: HashMap<u64, Vec<WeightedMove>> = HashMap::new();
        let mg = MoveGenerator::new();

        for line in BOOK_LINES {
            let mut board = Board::new();
            if board.fen_read(Some(FEN_START_POSITION)).is_err() {
                continue;
            }

            for mv_str in line.iter() {
                let key = board.game_state.zobrist_key;

                let potential = match parse::algebraic_move_to_number(mv_str) {
                    Ok(p) => p,
                    Err(_) => break,
                };
                let mv = match mg.find_move(&board, potential) {
                    Some(m) => m,
                    None => break,
                };

                let entry = positions.entry(key).or_default();
                match entry.iter_mut().find(|w| w.algebraic == *mv_str) {
                    Some(w) => w.weight = w.weight.saturating_add(10),
                    None => entry.push(WeightedMove {
                        algebraic: mv_str.to_string(),
                        weight: 10,
                    }),
                }

                if !board.make(mv, &mg) {
                    break;
                }
            }
        }

        Self { positions }
    }

    // Picks a move for the current position, weighted towards lines that
    // occur more often in the table above. Returns None once the game has
    // left book, so the caller can fall through to a normal search.
    pub fn get_move(&self, board: &Board, mg: &MoveGenerator) -> Option<Move> {
        let key = board.game_state.zobrist_key;
        let candidates = self.positions.get(&key)?;
        if candidates.is_empty() {
            return None;
        }

        let weights: Vec<u16> = candidates.iter().map(|c| c.weight).collect();
        let dist = WeightedIndex::new(&weights).ok()?;
        let chosen = &candidates[dist.sample(&mut thread_rng())];

        let potential = parse::algebraic_move_to_number(&chosen.algebraic).ok()?;
        mg.find_move(board, potential)
    }
}

impl Default for OpeningBook {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn book_has_a_reply_to_e4() {
        let mg = MoveGenerator::new();
        let mut board = Board::new();
        board.fen_read(Some(FEN_START_POSITION)).unwrap();

        let e4 = parse::algebraic_move_to_number("e2e4").unwrap();
        let mv = mg.find_move(&board, e4).unwrap();
        assert!(board.make(mv, &mg));

        let book = OpeningBook::new();
        assert!(book.get_move(&board, &mg).is_some());
    }

    #[test]
    fn book_is_empty_once_out_of_theory() {
        let mg = MoveGenerator::new();
        let mut board = Board::new();
        board
            .fen_read(Some("8/8/8/4k3/8/8/4K3/7R w - - 0 50"))
            .unwrap();

        let book = OpeningBook::new();
        assert!(book.get_move(&board, &mg).is_none());
    }
}
