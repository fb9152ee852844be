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

mod alpha_beta;
mod control;
pub mod defs;
pub mod ordering;
pub mod quiescence;
mod time;

use crate::{
    board::Board,
    engine::defs::{ErrFatal, Information, SearchData, TT},
    movegen::{defs::Move, MoveGenerator},
    search::defs::{
        SearchControl, SearchInfo, SearchParams, SearchRefs, SearchReport, SearchResult,
        SearchSummary, SearchTerminate, ThreadId, ThreadLocalData, ASPIRATION_WINDOW, INF,
    },
};
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::{
    sync::{Arc, Mutex, RwLock},
    thread::{self, JoinHandle},
};

// Marker struct every `impl Search` block attaches to. Search carries no
// state of its own; each thread's state lives in SearchRefs instead.
pub struct Search;

// Handle to a single running search thread: the thread itself, plus the
// channel used to push control commands to it.
struct SearchWorker {
    handle: Option<JoinHandle<()>>,
    control_tx: Sender<SearchControl>,
}

// Owns the pool of search worker threads and fans control commands out to
// all of them. Every worker searches the same position to the same
// parameters; each reports its own Finished move independently, and the
// engine acts on the first one it sees.
pub struct SearchManager {
    thread_count: usize,
    workers: Vec<SearchWorker>,
}

impl SearchManager {
    pub fn new(thread_count: usize) -> Self {
        Self {
            thread_count: thread_count.max(1),
            workers: Vec::new(),
        }
    }

    // Spawns `thread_count` worker threads, each running its own search
    // loop against shared board/move-generator/TT state.
    pub fn init(
        &mut self,
        report_tx: Sender<Information>,
        board: Arc<Mutex<Board>>,
        mg: Arc<MoveGenerator>,
        tt: Arc<RwLock<TT<SearchData>>>,
        tt_enabled: bool,
    ) {
        self.shutdown();

        for id in 0..self.thread_count {
            let (control_tx, control_rx) = unbounded::<SearchControl>();
            let board = Arc::clone(&board);
            let mg = Arc::clone(&mg);
            let tt = Arc::clone(&tt);
            let report_tx = report_tx.clone();
            let thread_id = id as ThreadId;

            let handle = thread::spawn(move || {
                Search::thread_loop(thread_id, control_rx, report_tx, board, mg, tt, tt_enabled);
            });

            self.workers.push(SearchWorker {
                handle: Some(handle),
                control_tx,
            });
        }
    }

    pub fn send(&self, control: SearchControl) {
        for worker in &self.workers {
            let _ = worker.control_tx.send(control.clone());
        }
    }

    // Named symmetrically with stop_search(); workers pick Start commands
    // up from their own control channel, so there is nothing extra to kick
    // off here beyond the Start message the caller sends right after.
    pub fn start_search(&self) {}

    pub fn stop_search(&self) {
        self.send(SearchControl::Stop);
    }

    fn shutdown(&mut self) {
        for worker in self.workers.drain(..) {
            let _ = worker.control_tx.send(SearchControl::Quit);
            if let Some(handle) = worker.handle {
                let _ = handle.join();
            }
        }
    }
}

impl Drop for SearchManager {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl Search {
    // Body of a single worker thread: blocks on control_rx for a Start
    // command, runs iterative deepening against its own board clone, then
    // goes back to waiting for the next command.
    #[allow(clippy::too_many_arguments)]
    fn thread_loop(
        thread_id: ThreadId,
        control_rx: Receiver<SearchControl>,
        report_tx: Sender<Information>,
        board: Arc<Mutex<Board>>,
        mg: Arc<MoveGenerator>,
        tt: Arc<RwLock<TT<SearchData>>>,
        tt_enabled: bool,
    ) {
        loop {
            match control_rx.recv() {
                Ok(SearchControl::Start(mut search_params)) => {
                    let mut local_board = board.lock().expect(ErrFatal::LOCK).clone_for_search();
                    let (best_move, terminate) = Search::iterative_deepening(
                        thread_id,
                        &mut local_board,
                        &mg,
                        &tt,
                        tt_enabled,
                        &mut search_params,
                        &control_rx,
                        &report_tx,
                    );
                    let _ = terminate;
                    let _ = report_tx.send(Information::Search(SearchReport::Finished(best_move)));
                }
                Ok(SearchControl::Stop) | Ok(SearchControl::Nothing) => continue,
                Ok(SearchControl::Quit) | Err(_) => break,
            }
        }
    }

    // Iterative deepening driver: repeatedly calls alpha_beta at increasing
    // depth with a narrowing aspiration window, reporting a SearchSummary
    // after each completed iteration, until the search mode's termination
    // condition is met.
    #[allow(clippy::too_many_arguments)]
    fn iterative_deepening(
        thread_id: ThreadId,
        board: &mut Board,
        mg: &Arc<MoveGenerator>,
        tt: &Arc<RwLock<TT<SearchData>>>,
        tt_enabled: bool,
        search_params: &mut SearchParams,
        control_rx: &Receiver<SearchControl>,
        report_tx: &Sender<Information>,
    ) -> SearchResult {
        let mut search_info = SearchInfo::new();
        let mut thread_local_data = ThreadLocalData::new(thread_id);

        search_info.timer_start();
        thread_local_data.start_search();
        search_info.max_depth = if search_params.depth > 0 {
            search_params.depth
        } else {
            crate::defs::MAX_PLY as i8
        };

        {
            let refs = SearchRefs {
                board,
                mg,
                tt,
                tt_enabled,
                search_params,
                search_info: &mut search_info,
                control_rx,
                report_tx,
                thread_local_data: &mut thread_local_data,
            };
            refs.search_info.allocated_time = Search::allocate_time(&refs);
        }

        let mut best_move = Move::default();
        let mut alpha = -INF;
        let mut beta = INF;
        let mut depth: i8 = 1;

        while depth <= search_info.max_depth {
            search_info.depth = depth;
            search_info.ply = 0;

            let mut refs = SearchRefs {
                board,
                mg,
                tt,
                tt_enabled,
                search_params,
                search_info: &mut search_info,
                control_rx,
                report_tx,
                thread_local_data: &mut thread_local_data,
            };

            let mut pv: Vec<Move> = Vec::new();
            let mut score = Search::alpha_beta(depth, alpha, beta, &mut pv, &mut refs);

            // Aspiration window failed; re-search this depth with a full
            // window rather than accepting a clipped score.
            if score <= alpha || score >= beta {
                alpha = -INF;
                beta = INF;
                pv.clear();
                score = Search::alpha_beta(depth, alpha, beta, &mut pv, &mut refs);
            }

            let interrupted = refs.search_info.terminate != SearchTerminate::Nothing;

            // A partial/aborted iteration's pv does not reflect a fully
            // searched line; keep the previous completed iteration's move
            // rather than overwrite it with unvalidated data.
            if !interrupted {
                if let Some(mv) = pv.first() {
                    best_move = *mv;
                    refs.thread_local_data.update_best_move(*mv);
                }

                alpha = score - ASPIRATION_WINDOW;
                beta = score + ASPIRATION_WINDOW;
                Search::send_search_summary(&pv, depth, score, &mut refs);
            }

            Search::flush_tt_batch(&mut refs);

            if interrupted || Search::time_up(&mut refs) {
                break;
            }

            depth += 1;
        }

        let terminate = if search_info.terminate == SearchTerminate::Quit {
            SearchTerminate::Quit
        } else {
            SearchTerminate::Stop
        };

        (best_move, terminate)
    }

    fn send_search_summary(pv: &[Move], depth: i8, score: i16, refs: &mut SearchRefs) {
        let nodes = refs.search_info.nodes;
        let time = refs.search_info.timer_elapsed();
        let nps = if time > 0 {
            ((nodes as u128 * 1000) / time) as usize
        } else {
            0
        };
        let hash_full = refs.tt.read().expect(ErrFatal::LOCK).hash_full();

        let mate = if score.abs() >= defs::CHECKMATE_THRESHOLD {
            let plies_to_mate = defs::CHECKMATE - score.abs();
            ((plies_to_mate + 1) / 2) as u8
        } else {
            0
        };

        let summary = SearchSummary {
            depth,
            seldepth: refs.search_info.seldepth,
            time,
            cp: score,
            mate,
            nodes,
            nps,
            hash_full,
            pv: pv.to_vec(),
        };

        let _ = refs
            .report_tx
            .send(Information::Search(SearchReport::SearchSummary(summary)));
    }
}
