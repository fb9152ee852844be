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

mod about;
mod comm_reports;
pub mod defs;
mod perft;
mod transposition;
mod utils;
mod search_reports;

use crate::{
    board::Board,
    comm::{Comm, CommControl},
    defs::EngineRunResult,
    engine::defs::{EngineOptionDefaults, ErrFatal, Information, Settings, TT},
    knowledge::Knowledge,
    misc::cmdline::CmdLine,
    movegen::defs::Move,
    movegen::MoveGenerator,
    search::SearchManager,
};
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::sync::{Arc, Mutex, RwLock};

// Ties together every subsystem: the board, move generator, transposition
// table, search thread pool and the Comm front-end. Engine::run() is the
// single blocking call a binary needs to make to drive the whole thing.
pub struct Engine {
    cmdline: CmdLine,
    settings: Settings,
    board: Arc<Mutex<Board>>,
    mg: Arc<MoveGenerator>,
    tt_search: Arc<RwLock<TT<defs::SearchData>>>,
    search: SearchManager,
    comm: Comm,
    knowledge: Knowledge,
    report_tx: Sender<Information>,
    info_rx: Option<Receiver<Information>>,
    pondering: bool,
    delayed_bestmove: Option<(Move, Option<Move>)>,
    last_pv: Vec<Move>,
    quit: bool,
}

impl Engine {
    pub fn new() -> Self {
        let cmdline = CmdLine::new();
        let settings = Settings {
            threads: cmdline.threads(),
            quiet: cmdline.has_quiet(),
            tt_size: cmdline.hash(),
            sharp_margin: EngineOptionDefaults::SHARP_MARGIN_DEFAULT,
            multi_pv: EngineOptionDefaults::MULTI_PV_DEFAULT,
            move_overhead: EngineOptionDefaults::MOVE_OVERHEAD_DEFAULT,
            contempt: EngineOptionDefaults::CONTEMPT_DEFAULT,
            uci_analyse_mode: EngineOptionDefaults::UCI_ANALYSE_MODE_DEFAULT,
            ponder: EngineOptionDefaults::PONDER_DEFAULT,
            own_book: EngineOptionDefaults::OWN_BOOK_DEFAULT,
            null_move: EngineOptionDefaults::NULL_MOVE_DEFAULT,
            lmr: EngineOptionDefaults::LMR_DEFAULT,
        };
        let (report_tx, info_rx) = unbounded::<Information>();

        Self {
            cmdline,
            settings,
            board: Arc::new(Mutex::new(Board::new())),
            mg: Arc::new(MoveGenerator::new()),
            tt_search: Arc::new(RwLock::new(TT::new(0))),
            search: SearchManager::new(1),
            comm: Comm::new(),
            knowledge: Knowledge::new(),
            report_tx,
            info_rx: Some(info_rx),
            pondering: false,
            delayed_bestmove: None,
            last_pv: Vec::new(),
            quit: false,
        }
    }

    // Runs the engine until a "quit" command (or stdin EOF) is received.
    // Perft is a diagnostic side-channel: if requested on the command
    // line, it runs once and the engine exits without entering UCI mode.
    pub fn run(&mut self) -> EngineRunResult {
        self.print_ascii_logo();
        self.print_about(&self.settings);
        self.setup_position()?;

        let depth = self.cmdline.perft();
        if depth > 0 {
            let mut board = self.board.lock().expect(ErrFatal::LOCK).clone_for_search();
            perft::run(&mut board, &self.mg, depth);
            return Ok(());
        }

        self.tt_search.write().expect(ErrFatal::LOCK).resize(self.settings.tt_size);
        self.search.init(
            self.report_tx.clone(),
            Arc::clone(&self.board),
            Arc::clone(&self.mg),
            Arc::clone(&self.tt_search),
            self.settings.tt_size > 0,
        );
        self.comm.init(self.report_tx.clone());

        let info_rx = self.info_rx.take().ok_or(ErrFatal::NO_INFO_RX)?;
        while !self.quit {
            if let Ok(information) = info_rx.recv() {
                match information {
                    Information::Comm(report) => self.comm_reports(&report),
                    Information::Search(report) => self.search_reports(&report),
                }
            } else {
                break;
            }
        }
        self.info_rx = Some(info_rx);

        Ok(())
    }

    pub fn quit(&mut self) {
        self.quit = true;
        self.search.stop_search();
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
