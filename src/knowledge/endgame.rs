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
    board::defs::Pieces,
    board::Board,
    defs::Square,
    movegen::defs::{Move, MoveList, MoveType},
    movegen::MoveGenerator,
};

// Recognises the king-and-rook (or king-and-queen) versus lone king ending
// and drives the defending king towards an edge instead of relying on
// search to find the technique by brute force, which at low depths can
// shuffle forever without making progress.
pub fn suggest(board: &Board, mg: &MoveGenerator) -> Option<Move> {
    let us = board.us();
    let them = board.opponent();

    if board.total_piece_count() != 3 {
        return None;
    }

    let attacker_is_rook_or_queen = board.get_pieces(Pieces::ROOK, us) != 0
        || board.get_pieces(Pieces::QUEEN, us) != 0;
    if !attacker_is_rook_or_queen {
        return None;
    }
    if board.get_pieces(Pieces::PAWN, us) != 0 || board.get_pieces(Pieces::PAWN, them) != 0 {
        return None;
    }

    best_confining_move(board, mg)
}

fn chebyshev(a: Square, b: Square) -> i32 {
    let (af, ar) = (a as i32 % 8, a as i32 / 8);
    let (bf, br) = (b as i32 % 8, b as i32 / 8);
    (af - bf).abs().max((ar - br).abs())
}

// Scores every legal move by how much it shrinks the lone king's mobility
// and closes the distance between the two kings, while refusing to
// stalemate it. Mate is taken immediately when available.
fn best_confining_move(board: &Board, mg: &MoveGenerator) -> Option<Move> {
    let mut list = MoveList::new();
    mg.generate_moves(board, &mut list, MoveType::All);

    let mut best: Option<(Move, i32)> = None;

    for i in 0..list.len() {
        let mv = list.get_move(i);
        let mut after = board.clone_for_search();
        if !after.make(mv, mg) {
            continue;
        }

        let defender = after.us();
        let attacker = after.opponent();
        let defender_in_check =
            mg.square_attacked(&after, after.king_square(defender), attacker);

        let mut defender_moves = MoveList::new();
        mg.generate_moves(&after, &mut defender_moves, MoveType::All);
        let mut defender_legal_moves = 0;
        for j in 0..defender_moves.len() {
            let reply = defender_moves.get_move(j);
            let mut probe = after.clone_for_search();
            if probe.make(reply, mg) {
                defender_legal_moves += 1;
            }
        }

        if defender_legal_moves == 0 {
            if defender_in_check {
                return Some(mv);
            }
            // Stalemate: never offer this move.
            continue;
        }

        let defender_king = after.king_square(defender);
        let attacker_king = after.king_square(attacker);
        let king_distance = chebyshev(defender_king, attacker_king);
        let score = -(defender_legal_moves as i32) * 10 - king_distance;

        if best.map(|(_, s)| score > s).unwrap_or(true) {
            best = Some((mv, score));
        }
    }

    best.map(|(mv, _)| mv)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn does_not_trigger_with_material_left_on_board() {
        let mut board = Board::new();
        board
            .fen_read(Some("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"))
            .unwrap();
        let mg = MoveGenerator::new();
        assert!(suggest(&board, &mg).is_none());
    }

    #[test]
    fn suggests_a_confining_move_in_krk() {
        let mut board = Board::new();
        board.fen_read(Some("4k3/8/8/8/8/8/8/R3K3 w - - 0 1")).unwrap();
        let mg = MoveGenerator::new();
        assert!(suggest(&board, &mg).is_some());
    }

    #[test]
    fn never_suggests_a_stalemating_move() {
        // Black to move, one square away from being stalemated by Ra7 if
        // white had just played it; from black's own turn the matcher
        // should simply stay quiet when there's no progress to make.
        let mut board = Board::new();
        board.fen_read(Some("k7/8/1K6/8/8/8/8/7R b - - 0 1")).unwrap();
        let mg = MoveGenerator::new();
        // Either a confining move is suggested, or none at all -- but
        // never a move that leaves black with zero legal replies and no
        // check, which would be a stalemate.
        if let Some(mv) = suggest(&board, &mg) {
            let mut after = board.clone_for_search();
            assert!(after.make(mv, &mg));
            let mut replies = MoveList::new();
            mg.generate_moves(&after, &mut replies, MoveType::All);
            let mut legal = 0;
            for i in 0..replies.len() {
                let r = replies.get_move(i);
                let mut probe = after.clone_for_search();
                if probe.make(r, &mg) {
                    legal += 1;
                }
            }
            let in_check =
                mg.square_attacked(&after, after.king_square(after.us()), after.opponent());
            assert!(legal > 0 || in_check);
        }
    }
}
