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
    defs::{MIN_TIME_STATS, SearchRefs, SearchReport, SearchStats, SearchTerminate},
    Search,
};
use crate::{
    board::{defs::Pieces, Board},
    engine::defs::{ErrFatal, Information},
};
use crossbeam_channel::TryRecvError;

impl Search {
    // Polls the control channel for a Stop/Quit command and, if none is
    // pending, falls back to the time check. Cheap enough to call every
    // CHECK_TERMINATION nodes without measurably slowing the search down.
    pub fn check_termination(refs: &mut SearchRefs) {
        match refs.control_rx.try_recv() {
            Ok(super::defs::SearchControl::Stop) => {
                refs.search_info.terminate = SearchTerminate::Stop;
                return;
            }
            Ok(super::defs::SearchControl::Quit) => {
                refs.search_info.terminate = SearchTerminate::Quit;
                return;
            }
            Ok(_) | Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => (),
        }

        if Search::out_of_time(refs) {
            refs.search_info.terminate = SearchTerminate::Stop;
        }
    }

    // Sends a lightweight progress report to the GUI, throttled so a fast
    // search doesn't flood the output with "info" lines.
    pub fn send_stats_to_gui(refs: &mut SearchRefs) {
        let elapsed = refs.search_info.timer_elapsed();
        if elapsed.saturating_sub(refs.search_info.last_stats_sent) < MIN_TIME_STATS {
            return;
        }

        let nodes = refs.search_info.nodes;
        let nps = if elapsed > 0 {
            ((nodes as u128 * 1000) / elapsed) as usize
        } else {
            0
        };
        let hash_full = refs.tt.read().expect(ErrFatal::LOCK).hash_full();
        let stats = SearchStats::new(elapsed, nodes, nps, hash_full);

        let _ = refs
            .report_tx
            .send(Information::Search(SearchReport::SearchStats(stats)));
        refs.search_info.last_stats_sent = elapsed;
    }

    // Counts how many times the current position's key already appears in
    // the history stack, searched back only as far as the fifty-move
    // counter allows.
    pub fn is_repetition(board: &Board) -> usize {
        board
            .history
            .count_repetitions(board.game_state.zobrist_key, board.game_state.halfmove_clock)
    }

    // True when the side to move has nothing but king and pawns. Null-move
    // pruning is unsound in such positions (zugzwang is common), so the
    // caller skips it whenever this returns true.
    pub fn is_insufficient_material(refs: &SearchRefs) -> bool {
        let us = refs.board.us();
        let mut non_pawn_material = 0u32;
        for piece in Pieces::QUEEN..=Pieces::KNIGHT {
            non_pawn_material += refs.board.bb_pieces[us][piece].count_ones();
        }
        non_pawn_material == 0
    }
}
