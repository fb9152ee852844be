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

use super::Engine;
use crate::{comm::CommControl, search::defs::SearchReport};

// Handles reports coming up from the search threads: progress information
// is rendered straight away, while the final move is held back if the
// engine is still pondering (UCI forbids sending bestmove before a
// ponderhit or stop arrives).
impl Engine {
    pub fn search_reports(&mut self, search_report: &SearchReport) {
        match search_report {
            SearchReport::Finished(best_move) => {
                let ponder_move = self.last_pv.get(1).copied();
                self.last_pv.clear();

                if self.pondering {
                    self.delayed_bestmove = Some((*best_move, ponder_move));
                } else {
                    self.comm.send(CommControl::BestMove(*best_move, ponder_move));
                    self.comm.send(CommControl::Update);
                }
            }

            SearchReport::SearchSummary(summary) => {
                self.last_pv = summary.pv.clone();
                self.comm.send(CommControl::SearchSummary(summary.clone()));
            }

            SearchReport::SearchCurrentMove(curr_move) => {
                self.comm.send(CommControl::SearchCurrentMove(curr_move.clone()));
            }

            SearchReport::SearchStats(stats) => {
                self.comm.send(CommControl::SearchStats(stats.clone()));
            }

            SearchReport::InfoString(msg) => {
                self.comm.send(CommControl::InfoString(msg.clone()));
            }
        }
    }
}
