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

pub mod defs;

pub use defs::{Move, MoveList, MoveType, ShortMove};

use crate::board::defs::{Castling, Pieces};
use crate::board::Board;
use crate::defs::{Bitboard, NrOf, Piece, Side, Sides, Square};
use crate::misc::bits;
use crate::misc::parse::PotentialMove;
use if_chain::if_chain;

// Pseudo-legal move generation and attack queries. Sliding-piece attacks
// are computed by ray casting against the board's occupancy rather than
// through magic bitboards, trading some speed for simplicity; this is
// fast enough at club-level search depths.
pub struct MoveGenerator {
    knight_attacks: [Bitboard; NrOf::SQUARES],
    king_attacks: [Bitboard; NrOf::SQUARES],
}

impl MoveGenerator {
    pub fn new() -> Self {
        let mut mg = Self {
            knight_attacks: [0; NrOf::SQUARES],
            king_attacks: [0; NrOf::SQUARES],
        };

        for square in 0..NrOf::SQUARES {
            mg.knight_attacks[square] = Self::init_knight_attacks(square);
            mg.king_attacks[square] = Self::init_king_attacks(square);
        }

        mg
    }

    fn init_knight_attacks(square: Square) -> Bitboard {
        const DELTAS: [(i8, i8); 8] = [
            (-2, -1),
            (-2, 1),
            (-1, -2),
            (-1, 2),
            (1, -2),
            (1, 2),
            (2, -1),
            (2, 1),
        ];
        Self::deltas_to_bitboard(square, &DELTAS)
    }

    fn init_king_attacks(square: Square) -> Bitboard {
        const DELTAS: [(i8, i8); 8] = [
            (1, 0),
            (1, 1),
            (0, 1),
            (-1, 1),
            (-1, 0),
            (-1, -1),
            (0, -1),
            (1, -1),
        ];
        Self::deltas_to_bitboard(square, &DELTAS)
    }

    fn deltas_to_bitboard(square: Square, deltas: &[(i8, i8)]) -> Bitboard {
        let file = (square % 8) as i8;
        let rank = (square / 8) as i8;
        let mut bb = 0;

        for (df, dr) in deltas.iter() {
            let f = file + df;
            let r = rank + dr;
            if (0..8).contains(&f) && (0..8).contains(&r) {
                bb |= 1u64 << (r * 8 + f);
            }
        }

        bb
    }

    pub fn knight_attacks(&self, square: Square) -> Bitboard {
        self.knight_attacks[square]
    }

    pub fn king_attacks(&self, square: Square) -> Bitboard {
        self.king_attacks[square]
    }

    // Attack bitboard for a non-sliding piece (knight or king), independent
    // of board occupancy. Used by the evaluator's mobility terms.
    pub fn get_non_slider_attacks(&self, piece: Piece, square: Square) -> Bitboard {
        match piece {
            Pieces::KNIGHT => self.knight_attacks[square],
            Pieces::KING => self.king_attacks[square],
            _ => 0,
        }
    }

    // Attack bitboard for a sliding piece given an arbitrary occupancy,
    // stopping (inclusive) at the first blocker in each direction. Takes
    // occupancy directly rather than a Board so the evaluator can reuse it
    // without borrowing a board reference it doesn't otherwise need.
    pub fn get_slider_attacks(&self, piece: Piece, square: Square, occupancy: Bitboard) -> Bitboard {
        let directions: &[(i8, i8)] = match piece {
            Pieces::BISHOP => &[(1, 1), (1, -1), (-1, 1), (-1, -1)],
            Pieces::ROOK => &[(1, 0), (-1, 0), (0, 1), (0, -1)],
            Pieces::QUEEN => &[
                (1, 1),
                (1, -1),
                (-1, 1),
                (-1, -1),
                (1, 0),
                (-1, 0),
                (0, 1),
                (0, -1),
            ],
            _ => return 0,
        };

        let file = (square % 8) as i8;
        let rank = (square / 8) as i8;
        let mut attacks = 0u64;

        for (df, dr) in directions.iter() {
            let mut f = file + df;
            let mut r = rank + dr;

            while (0..8).contains(&f) && (0..8).contains(&r) {
                let sq = (r * 8 + f) as Square;
                attacks |= 1u64 << sq;

                if occupancy & (1u64 << sq) != 0 {
                    break;
                }

                f += df;
                r += dr;
            }
        }

        attacks
    }

    // Is `square` attacked by any piece of `by_side`?
    pub fn square_attacked(&self, board: &Board, square: Square, by_side: Side) -> bool {
        let target = 1u64 << square;

        if self.knight_attacks[square] & board.get_pieces(Pieces::KNIGHT, by_side) != 0 {
            return true;
        }

        if self.king_attacks[square] & board.get_pieces(Pieces::KING, by_side) != 0 {
            return true;
        }

        // Pawn attacks: a pawn of `by_side` attacks `square` if `square`
        // lies one of the pawn's two forward-diagonal squares; equivalent
        // to asking whether a pawn of the opposite side placed on `square`
        // would attack back onto one of `by_side`'s pawns.
        let opposite_direction: i8 = if by_side == Sides::WHITE { -1 } else { 1 };
        let file = (square % 8) as i8;
        let rank = (square / 8) as i8;
        let pawns = board.get_pieces(Pieces::PAWN, by_side);
        for df in [-1i8, 1].iter() {
            let f = file + df;
            let r = rank + opposite_direction;
            if (0..8).contains(&f) && (0..8).contains(&r) {
                let origin = (r * 8 + f) as Square;
                if pawns & (1u64 << origin) != 0 {
                    return true;
                }
            }
        }

        for &piece in &[Pieces::BISHOP, Pieces::ROOK, Pieces::QUEEN] {
            let mut sliders = board.get_pieces(piece, by_side);
            while sliders != 0 {
                let from = bits::next(&mut sliders);
                if board.get_attacks_from(by_side, piece, from) & target != 0 {
                    return true;
                }
            }
        }

        false
    }

    // Matches a from/to/promotion triple against this position's pseudo-legal
    // move list. Used to turn wire-format moves (UCI input, book entries)
    // into the packed Move the rest of the engine works with; final legality
    // is still decided by Board::make.
    pub fn find_move(&self, board: &Board, potential: PotentialMove) -> Option<Move> {
        let mut list = MoveList::new();
        self.generate_moves(board, &mut list, MoveType::All);

        for i in 0..list.len() {
            let current = list.get_move(i);
            if_chain! {
                if potential.from == current.from();
                if potential.to == current.to();
                if potential.promoted == current.promoted();
                then {
                    return Some(current);
                }
            }
        }
        None
    }

    pub fn generate_moves(&self, board: &Board, list: &mut MoveList, move_type: MoveType) {
        self.generate_pawn_moves(board, list, move_type);
        self.generate_piece_moves(board, list, move_type, Pieces::KNIGHT);
        self.generate_piece_moves(board, list, move_type, Pieces::BISHOP);
        self.generate_piece_moves(board, list, move_type, Pieces::ROOK);
        self.generate_piece_moves(board, list, move_type, Pieces::QUEEN);
        self.generate_king_moves(board, list, move_type);
    }

    fn generate_piece_moves(
        &self,
        board: &Board,
        list: &mut MoveList,
        move_type: MoveType,
        piece: Piece,
    ) {
        let us = board.us();
        let own_occupancy = board.bb_side[us];
        let their_occupancy = board.bb_side[board.opponent()];
        let mut pieces = board.get_pieces(piece, us);

        while pieces != 0 {
            let from = bits::next(&mut pieces);
            let attacks = match piece {
                Pieces::KNIGHT => self.knight_attacks[from],
                _ => board.get_attacks_from(us, piece, from),
            } & !own_occupancy;

            let mut targets = match move_type {
                MoveType::All => attacks,
                MoveType::Captures => attacks & their_occupancy,
                MoveType::Quiets => attacks & !their_occupancy,
            };

            while targets != 0 {
                let to = bits::next(&mut targets);
                let captured = board.piece_list[to];
                list.push(Move::new(from, to, piece, captured, Pieces::NONE, false, false, false));
            }
        }
    }

    fn generate_king_moves(&self, board: &Board, list: &mut MoveList, move_type: MoveType) {
        let us = board.us();
        let from = board.king_square(us);
        let own_occupancy = board.bb_side[us];
        let their_occupancy = board.bb_side[board.opponent()];
        let attacks = self.king_attacks[from] & !own_occupancy;

        let mut targets = match move_type {
            MoveType::All => attacks,
            MoveType::Captures => attacks & their_occupancy,
            MoveType::Quiets => attacks & !their_occupancy,
        };

        while targets != 0 {
            let to = bits::next(&mut targets);
            let captured = board.piece_list[to];
            list.push(Move::new(from, to, Pieces::KING, captured, Pieces::NONE, false, false, false));
        }

        if move_type != MoveType::Captures {
            self.generate_castling_moves(board, list);
        }
    }

    fn generate_castling_moves(&self, board: &Board, list: &mut MoveList) {
        let us = board.us();
        let opponent = board.opponent();
        let occupancy = board.occupancy();
        let castling = board.game_state.castling;

        if us == Sides::WHITE {
            if castling & Castling::WK != 0
                && occupancy & ((1u64 << 5) | (1u64 << 6)) == 0
                && !self.square_attacked(board, 4, opponent)
                && !self.square_attacked(board, 5, opponent)
                && !self.square_attacked(board, 6, opponent)
            {
                list.push(Move::new(4, 6, Pieces::KING, Pieces::NONE, Pieces::NONE, true, false, false));
            }
            if castling & Castling::WQ != 0
                && occupancy & ((1u64 << 1) | (1u64 << 2) | (1u64 << 3)) == 0
                && !self.square_attacked(board, 4, opponent)
                && !self.square_attacked(board, 3, opponent)
                && !self.square_attacked(board, 2, opponent)
            {
                list.push(Move::new(4, 2, Pieces::KING, Pieces::NONE, Pieces::NONE, true, false, false));
            }
        } else {
            if castling & Castling::BK != 0
                && occupancy & ((1u64 << 61) | (1u64 << 62)) == 0
                && !self.square_attacked(board, 60, opponent)
                && !self.square_attacked(board, 61, opponent)
                && !self.square_attacked(board, 62, opponent)
            {
                list.push(Move::new(60, 62, Pieces::KING, Pieces::NONE, Pieces::NONE, true, false, false));
            }
            if castling & Castling::BQ != 0
                && occupancy & ((1u64 << 57) | (1u64 << 58) | (1u64 << 59)) == 0
                && !self.square_attacked(board, 60, opponent)
                && !self.square_attacked(board, 59, opponent)
                && !self.square_attacked(board, 58, opponent)
            {
                list.push(Move::new(60, 58, Pieces::KING, Pieces::NONE, Pieces::NONE, true, false, false));
            }
        }
    }

    fn generate_pawn_moves(&self, board: &Board, list: &mut MoveList, move_type: MoveType) {
        let us = board.us();
        let opponent = board.opponent();
        let occupancy = board.occupancy();
        let their_occupancy = board.bb_side[opponent];
        let mut pawns = board.get_pieces(Pieces::PAWN, us);

        let (direction, start_rank, promotion_rank): (i8, i8, i8) = if us == Sides::WHITE {
            (1, 1, 7)
        } else {
            (-1, 6, 0)
        };

        while pawns != 0 {
            let from = bits::next(&mut pawns);
            let file = (from % 8) as i8;
            let rank = (from / 8) as i8;

            // Single and double pushes.
            if move_type != MoveType::Captures {
                let one_rank = rank + direction;
                if (0..8).contains(&one_rank) {
                    let one_step = (one_rank * 8 + file) as Square;
                    if occupancy & (1u64 << one_step) == 0 {
                        self.push_pawn_move(list, from, one_step, Pieces::NONE, false, promotion_rank, one_rank);

                        let two_rank = rank + 2 * direction;
                        if rank == start_rank && (0..8).contains(&two_rank) {
                            let two_step = (two_rank * 8 + file) as Square;
                            if occupancy & (1u64 << two_step) == 0 {
                                list.push(Move::new(from, two_step, Pieces::PAWN, Pieces::NONE, Pieces::NONE, false, false, true));
                            }
                        }
                    }
                }
            }

            // Captures, including en passant.
            if move_type != MoveType::Quiets {
                let capture_rank = rank + direction;
                if (0..8).contains(&capture_rank) {
                    for df in [-1i8, 1].iter() {
                        let capture_file = file + df;
                        if !(0..8).contains(&capture_file) {
                            continue;
                        }
                        let to = (capture_rank * 8 + capture_file) as Square;
                        let to_bb = 1u64 << to;

                        if their_occupancy & to_bb != 0 {
                            let captured = board.piece_list[to];
                            self.push_pawn_move(list, from, to, captured, false, promotion_rank, capture_rank);
                        } else if board.game_state.en_passant == Some(to as u8) {
                            list.push(Move::new(from, to, Pieces::PAWN, Pieces::PAWN, Pieces::NONE, false, true, false));
                        }
                    }
                }
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn push_pawn_move(
        &self,
        list: &mut MoveList,
        from: Square,
        to: Square,
        captured: Piece,
        _unused: bool,
        promotion_rank: i8,
        to_rank: i8,
    ) {
        if to_rank == promotion_rank {
            for &promoted in &[Pieces::QUEEN, Pieces::ROOK, Pieces::BISHOP, Pieces::KNIGHT] {
                list.push(Move::new(from, to, Pieces::PAWN, captured, promoted, false, false, false));
            }
        } else {
            list.push(Move::new(from, to, Pieces::PAWN, captured, Pieces::NONE, false, false, false));
        }
    }
}

impl Default for MoveGenerator {
    fn default() -> Self {
        Self::new()
    }
}
