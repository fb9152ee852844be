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

use super::{
    defs::{SearchRefs, SearchTerminate, CHECK_TERMINATION, CHECKMATE, INF},
    Search,
};
use crate::{
    defs::MAX_PLY,
    evaluation::{self, psqt::PIECE_VALUES},
    movegen::defs::{Move, MoveList, MoveType},
};

// Margin added on top of the captured piece's value when delta-pruning a
// capture that cannot possibly raise alpha even if it wins the exchange
// outright. Generous enough to still consider "fortress-breaking" captures
// at club strength.
const DELTA_MARGIN: i16 = 200;

impl Search {
    // Extends the search along capture sequences only, so alpha_beta never
    // evaluates a position in the middle of a hanging exchange. Returns a
    // score from the side-to-move's perspective, same convention as
    // alpha_beta.
    pub fn quiescence(mut alpha: i16, beta: i16, pv: &mut Vec<Move>, refs: &mut SearchRefs) -> i16 {
        refs.thread_local_data.increment_nodes();
        refs.search_info.nodes += 1;

        if refs.search_info.nodes & CHECK_TERMINATION == 0 {
            Search::check_termination(refs);
        }

        if refs.search_info.terminate != SearchTerminate::Nothing {
            return 0;
        }

        if (refs.search_info.ply as i16) >= MAX_PLY {
            return evaluation::evaluate_position(refs.board, refs.mg);
        }

        let is_check = refs.mg.square_attacked(
            refs.board,
            refs.board.king_square(refs.board.us()),
            refs.board.opponent(),
        );

        // In check, there is no quiet "stand pat" option: every legal
        // response must be tried, same as in the main search.
        let (mut best_score, move_type) = if is_check {
            (-INF, MoveType::All)
        } else {
            let stand_pat = evaluation::evaluate_position(refs.board, refs.mg);
            if stand_pat >= beta {
                return beta;
            }
            if stand_pat > alpha {
                alpha = stand_pat;
            }
            (stand_pat, MoveType::Captures)
        };

        let mut move_list = MoveList::new();
        refs.mg.generate_moves(refs.board, &mut move_list, move_type);
        Search::score_moves(&mut move_list, crate::movegen::defs::ShortMove::new(0, 0, 0), refs);

        let mut legal_moves_found = 0;

        for i in 0..move_list.len() {
            if Search::time_up(refs) {
                break;
            }

            Search::pick_move(&mut move_list, i);
            let mv = move_list.get_move(i);

            if !is_check && mv.is_capture() {
                let captured_value = PIECE_VALUES[mv.captured()];
                if best_score.saturating_add(captured_value).saturating_add(DELTA_MARGIN) < alpha {
                    // Even winning this capture outright cannot reach alpha.
                    continue;
                }
            }

            if !refs.board.make(mv, refs.mg) {
                continue;
            }

            legal_moves_found += 1;
            refs.search_info.ply += 1;
            let mut tmp_pv: Vec<Move> = Vec::new();
            let score = -Search::quiescence(-beta, -alpha, &mut tmp_pv, refs);
            refs.board.unmake();
            refs.search_info.ply -= 1;

            if refs.search_info.terminate != SearchTerminate::Nothing {
                break;
            }

            if score > best_score {
                best_score = score;
                if score > alpha {
                    alpha = score;
                    pv.clear();
                    pv.push(mv);
                    pv.extend(tmp_pv);

                    if score >= beta {
                        return beta;
                    }
                }
            }
        }

        if is_check && legal_moves_found == 0 {
            return -CHECKMATE + refs.search_info.ply as i16;
        }

        best_score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        board::Board,
        engine::defs::{Information, SearchData, TT},
        movegen::MoveGenerator,
        search::defs::{SearchControl, SearchInfo, SearchParams, ThreadLocalData},
    };
    use crossbeam_channel::unbounded;
    use std::sync::{Arc, RwLock};

    fn refs_for(fen: &str) -> (
        Board,
        Arc<MoveGenerator>,
        Arc<RwLock<TT<SearchData>>>,
        SearchParams,
        SearchInfo,
        ThreadLocalData,
        crossbeam_channel::Receiver<SearchControl>,
        crossbeam_channel::Sender<Information>,
    ) {
        let mut board = Board::new();
        board.fen_read(Some(fen)).unwrap();
        let mg = Arc::new(MoveGenerator::new());
        let tt = Arc::new(RwLock::new(TT::new(1)));
        let (_ctx, crx) = unbounded::<SearchControl>();
        let (rtx, _rrx) = unbounded::<Information>();
        (
            board,
            mg,
            tt,
            SearchParams::new(),
            SearchInfo::new(),
            ThreadLocalData::new(0),
            crx,
            rtx,
        )
    }

    #[test]
    fn quiet_position_returns_stand_pat_bound() {
        let (mut board, mg, tt, mut sp, mut si, mut tld, crx, rtx) =
            refs_for("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        let mut refs = SearchRefs {
            board: &mut board,
            mg: &mg,
            tt: &tt,
            tt_enabled: false,
            search_params: &mut sp,
            search_info: &mut si,
            control_rx: &crx,
            report_tx: &rtx,
            thread_local_data: &mut tld,
        };
        let mut pv = Vec::new();
        let score = Search::quiescence(-INF, INF, &mut pv, &mut refs);
        assert!(score.abs() < CHECKMATE);
    }

    #[test]
    fn hanging_queen_is_captured() {
        // White queen on d8 is undefended and capturable by the black rook.
        let (mut board, mg, tt, mut sp, mut si, mut tld, crx, rtx) =
            refs_for("rnbQkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNB1KBNR b KQkq - 0 1");
        let mut refs = SearchRefs {
            board: &mut board,
            mg: &mg,
            tt: &tt,
            tt_enabled: false,
            search_params: &mut sp,
            search_info: &mut si,
            control_rx: &crx,
            report_tx: &rtx,
            thread_local_data: &mut tld,
        };
        let mut pv = Vec::new();
        let score = Search::quiescence(-INF, INF, &mut pv, &mut refs);
        assert!(score > 500, "capturing the hanging queen should score well for black");
    }
}
