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

pub mod kingsafety;
pub mod mobility;
pub mod pawn;
pub mod psqt;
pub mod threats;

use crate::board::Board;
use crate::defs::{Sides, MATE_BASE, MAX_PLY};
use crate::movegen::MoveGenerator;

// Scores outside this window are reserved for mate-distance encoding; the
// evaluator must never produce one (see search::defs for how search layers
// mate scores on top).
const EVAL_MIN: i16 = -(MATE_BASE - MAX_PLY as i16);
const EVAL_MAX: i16 = MATE_BASE - MAX_PLY as i16;

/// Static evaluation of `board`, in centipawns, from the perspective of the
/// side to move (positive: side to move is better). Deterministic and free
/// of side effects on the board other than its ordinary mobility cache.
pub fn evaluate_position(board: &mut Board, mg: &MoveGenerator) -> i16 {
    board.update_mobility_cache(mg);

    let material_and_psqt = board.game_state.psqt[Sides::WHITE] - board.game_state.psqt[Sides::BLACK];
    let king_safety = kingsafety::evaluate_king_safety(board, mg);
    let pawn_structure = pawn::evaluate_pawn_structure(board);
    let mobility = board.game_state.mobility_score;
    let threats = threats::evaluate_threats(board);

    let white_relative = material_and_psqt + king_safety + pawn_structure + mobility + threats;
    let side_relative = if board.us() == Sides::WHITE {
        white_relative
    } else {
        -white_relative
    };

    side_relative.clamp(EVAL_MIN, EVAL_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defs::FEN_START_POSITION;

    fn board_from_fen(fen: &str) -> Board {
        let mut board = Board::new();
        board.fen_read(Some(fen)).unwrap();
        board
    }

    #[test]
    fn starting_position_is_balanced() {
        let mut board = board_from_fen(FEN_START_POSITION);
        let mg = MoveGenerator::new();
        let score = evaluate_position(&mut board, &mg);
        assert_eq!(score, 0, "symmetric starting position must evaluate to 0");
    }

    #[test]
    fn color_mirrored_positions_agree() {
        // Same material skeleton, mirrored so white-to-move and
        // black-to-move should see the same relative advantage.
        let white_up_a_pawn = "rnbqkbnr/1ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        let mut board = board_from_fen(white_up_a_pawn);
        let mg = MoveGenerator::new();
        let score = evaluate_position(&mut board, &mg);
        assert!(score > 0, "side to move with an extra pawn should score positively");
    }

    #[test]
    fn never_produces_a_mate_range_score() {
        let mut board = board_from_fen(FEN_START_POSITION);
        let mg = MoveGenerator::new();
        let score = evaluate_position(&mut board, &mg);
        assert!(score > EVAL_MIN && score < EVAL_MAX);
    }
}
