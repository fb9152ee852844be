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

use crate::board::defs::Pieces;
use crate::board::Board;
use crate::defs::{NrOf, Sides};

// Material values, in centipawns. The king is never captured so it has no
// material value; its table below still scores king safety-by-placement.
pub const PIECE_VALUES: [i16; NrOf::PIECE_TYPES] = [0, 900, 500, 330, 320, 100];

// PSQT_MG[piece][square] is read directly for a side's piece on `square`
// with NO further mirroring, and read through FLIP[square] for the other
// side. Concretely: the tables below are written so that a higher index
// (towards square 63) is more advanced for the side read without FLIP.
// board::put_piece/remove_piece reads black pieces unflipped and white
// pieces through FLIP, so the tables are authored from Black's point of
// view: index 8..16 (rank 2) is Black's most advanced non-start rank,
// mirroring correctly gives White the same bonus shape on its own side of
// the board.
pub const FLIP: [usize; NrOf::SQUARES] = init_flip();

const fn init_flip() -> [usize; NrOf::SQUARES] {
    let mut flip = [0; NrOf::SQUARES];
    let mut square = 0;
    while square < NrOf::SQUARES {
        flip[square] = square ^ 56;
        square += 1;
    }
    flip
}

pub const PSQT_MG: [[i16; NrOf::SQUARES]; NrOf::PIECE_TYPES] = init_psqt();

const fn init_psqt() -> [[i16; NrOf::SQUARES]; NrOf::PIECE_TYPES] {
    let mut tables = [[0i16; NrOf::SQUARES]; NrOf::PIECE_TYPES];

    let mut square = 0;
    while square < NrOf::SQUARES {
        let file = (square % 8) as i32;
        let rank = (square / 8) as i32;
        let centrality = 3 - center_distance(file, rank);

        tables[Pieces::KNIGHT][square] = PIECE_VALUES[Pieces::KNIGHT] + (centrality * 6) as i16;
        tables[Pieces::BISHOP][square] = PIECE_VALUES[Pieces::BISHOP] + (centrality * 4) as i16;
        tables[Pieces::QUEEN][square] = PIECE_VALUES[Pieces::QUEEN] + (centrality * 2) as i16;

        // Rooks like open, central files and the rank just past their own
        // side, i.e. rank 2 in this Black-oriented table (index 8..16).
        let rook_rank_bonus: i16 = if rank == 1 { 16 } else { 0 };
        tables[Pieces::ROOK][square] = PIECE_VALUES[Pieces::ROOK] + rook_rank_bonus;

        // Pawns are rewarded for advancing towards rank 1 in this
        // orientation; rank 0 and rank 7 never hold a pawn.
        let pawn_rank_bonus: i16 = match rank {
            1 => 50,
            2 => 30,
            3 => 20,
            4 => 10,
            5 => 5,
            _ => 0,
        };
        let pawn_file_bonus: i16 = if file == 3 || file == 4 { 5 } else { 0 };
        tables[Pieces::PAWN][square] = PIECE_VALUES[Pieces::PAWN] + pawn_rank_bonus + pawn_file_bonus;

        // Kings prefer their own back rank and the corners early on; the
        // king safety evaluator layers on the dynamic part of this.
        let king_rank_bonus: i16 = if rank == 0 { 20 } else { (-10 * rank) as i16 };
        let king_file_bonus: i16 = if file == 0 || file == 7 || (file >= 2 && file <= 5) {
            5
        } else {
            0
        };
        tables[Pieces::KING][square] = king_rank_bonus + king_file_bonus;

        square += 1;
    }

    tables
}

const fn center_distance(file: i32, rank: i32) -> i32 {
    let df = if file < 4 { 3 - file } else { file - 4 };
    let dr = if rank < 4 { 3 - rank } else { rank - 4 };
    if df > dr {
        df
    } else {
        dr
    }
}

// Compute the initial (white, black) psqt sums for a freshly set-up board.
// Later updates happen incrementally in Board::put_piece/remove_piece.
pub fn apply(board: &Board) -> (i16, i16) {
    let mut totals = [0i16; Sides::BOTH];

    for side in [Sides::WHITE, Sides::BLACK] {
        for piece in 0..NrOf::PIECE_TYPES {
            let mut pieces = board.get_pieces(piece, side);
            while pieces != 0 {
                let square = pieces.trailing_zeros() as usize;
                pieces &= pieces - 1;
                let flip = side == Sides::WHITE;
                let s = if flip { FLIP[square] } else { square };
                totals[side] += PSQT_MG[piece][s];
            }
        }
    }

    (totals[Sides::WHITE], totals[Sides::BLACK])
}
