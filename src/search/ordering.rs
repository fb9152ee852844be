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

use super::{defs::SearchRefs, Search};
use crate::{
    evaluation::{psqt::PIECE_VALUES, threats},
    movegen::defs::{Move, MoveList, ShortMove},
};

// Ordering buckets, highest first. A TT move is tried before anything
// else; losing captures (negative SEE) sort even below quiet moves, since
// a losing trade is rarely worth searching early.
const TT_MOVE_SCORE: i32 = 1_000_000;
const GOOD_CAPTURE_BASE: i32 = 200_000;
const PROMOTION_BASE: i32 = 150_000;
const KILLER_1_SCORE: i32 = 90_000;
const KILLER_2_SCORE: i32 = 89_000;
const COUNTER_MOVE_SCORE: i32 = 80_000;
const BAD_CAPTURE_BASE: i32 = -200_000;

impl Search {
    // Assigns every move in `move_list` an ordering score so that
    // `pick_move` surfaces the most promising ones first. Run once per
    // node, right after move generation.
    pub fn score_moves(move_list: &mut MoveList, tt_move: ShortMove, refs: &mut SearchRefs) {
        let ply = refs.search_info.ply as usize;
        let us = refs.board.us();
        let killers = if ply < refs.search_info.killer_moves.len() {
            Some(refs.search_info.killer_moves[ply])
        } else {
            None
        };

        for i in 0..move_list.len() {
            let mv = move_list.get_move(i);
            let score = Self::score_move(&mv, &tt_move, killers, us, refs);
            move_list.set_score(i, score);
        }
    }

    fn score_move(
        mv: &Move,
        tt_move: &ShortMove,
        killers: Option<[ShortMove; 2]>,
        us: usize,
        refs: &SearchRefs,
    ) -> i32 {
        if tt_move.matches(mv) {
            return TT_MOVE_SCORE;
        }

        if mv.is_capture() {
            let exchange = threats::see(refs.board, mv.to(), us) as i32;
            return if exchange >= 0 {
                GOOD_CAPTURE_BASE + exchange
            } else {
                BAD_CAPTURE_BASE + exchange
            };
        }

        if mv.is_promotion() {
            return PROMOTION_BASE + PIECE_VALUES[mv.promoted()] as i32;
        }

        if let Some(killers) = killers {
            let short = mv.to_short_move();
            if killers[0].get_move() == short.get_move() {
                return KILLER_1_SCORE;
            }
            if killers[1].get_move() == short.get_move() {
                return KILLER_2_SCORE;
            }
        }

        let counter = refs.search_info.counter_moves[us][mv.piece()][mv.to()];
        if counter.matches(mv) {
            return COUNTER_MOVE_SCORE;
        }

        refs.search_info.history_heuristic[us][mv.piece()][mv.to()] as i32
    }

    // Thin wrapper kept so callers go through `Search::` consistently with
    // every other move-ordering entry point.
    pub fn pick_move(move_list: &mut MoveList, start: usize) -> Move {
        move_list.pick_move(start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        board::Board,
        engine::defs::{Information, SearchData, TT},
        movegen::{defs::MoveType, MoveGenerator},
        search::defs::{SearchControl, SearchInfo, SearchParams, ThreadLocalData},
    };
    use crossbeam_channel::unbounded;
    use std::sync::{Arc, RwLock};

    #[test]
    fn tt_move_outranks_everything_else() {
        let mut board = Board::new();
        board
            .fen_read(Some("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"))
            .unwrap();
        let mg = Arc::new(MoveGenerator::new());
        let tt: Arc<RwLock<TT<SearchData>>> = Arc::new(RwLock::new(TT::new(1)));
        let mut search_params = SearchParams::new();
        let mut search_info = SearchInfo::new();
        let mut thread_local_data = ThreadLocalData::new(0);
        let (_ctx, crx) = unbounded::<SearchControl>();
        let (rtx, _rrx) = unbounded::<Information>();

        let mut move_list = MoveList::new();
        mg.generate_moves(&board, &mut move_list, MoveType::All);
        let tt_move = move_list.get_move(move_list.len() / 2).to_short_move();

        let mut refs = SearchRefs {
            board: &mut board,
            mg: &mg,
            tt: &tt,
            tt_enabled: true,
            search_params: &mut search_params,
            search_info: &mut search_info,
            control_rx: &crx,
            report_tx: &rtx,
            thread_local_data: &mut thread_local_data,
        };

        Search::score_moves(&mut move_list, tt_move, &mut refs);
        let picked = Search::pick_move(&mut move_list, 0);
        assert_eq!(picked.to_short_move().get_move(), tt_move.get_move());
    }
}
