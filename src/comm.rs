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

pub mod uci;

use crate::{
    defs::About,
    engine::defs::{EngineOptionDefaults, Information},
    movegen::defs::Move,
    search::defs::{SearchCurrentMove, SearchStats, SearchSummary},
};
use crossbeam_channel::Sender;
use std::io::{self, BufRead};
use std::thread::{self, JoinHandle};

use uci::UciReport;

// Wraps every kind of report the Comm module can send back to the engine.
// Currently there is only one protocol, but keeping a wrapper enum means
// the engine's dispatch code doesn't have to change if a second protocol
// is ever added.
#[derive(PartialEq, Clone)]
pub enum CommReport {
    Uci(UciReport),
}

// Commands the engine sends down to Comm for output. Built so that Comm
// itself never has to reach back into board or search state: the engine
// renders whatever text is needed before sending the command.
#[derive(PartialEq, Clone)]
pub enum CommControl {
    Identify,
    Ready,
    InfoString(String),
    BestMove(Move, Option<Move>),
    SearchSummary(SearchSummary),
    SearchCurrentMove(SearchCurrentMove),
    SearchStats(SearchStats),
    Update,
    PrintBoard(String),
    PrintHistory(String),
    PrintHelp,
}

// Runs the stdin-reading thread and renders outgoing UCI text. The input
// thread is detached for the lifetime of the engine; Comm itself is just
// a thin handle around the channel that feeds it.
pub struct Comm {
    input_handle: Option<JoinHandle<()>>,
}

impl Comm {
    pub fn new() -> Self {
        Self { input_handle: None }
    }

    // Spawns the stdin-reading thread. Every parsed line is forwarded to
    // the engine as Information::Comm(CommReport::Uci(...)).
    pub fn init(&mut self, report_tx: Sender<Information>) {
        let handle = thread::spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let line = match line {
                    Ok(l) => l,
                    Err(_) => break,
                };

                let report = uci::parse(&line);
                let quit = report == UciReport::Quit;

                if report_tx
                    .send(Information::Comm(CommReport::Uci(report)))
                    .is_err()
                {
                    break;
                }

                if quit {
                    break;
                }
            }
        });

        self.input_handle = Some(handle);
    }

    pub fn send(&self, control: CommControl) {
        match control {
            CommControl::Identify => Self::identify(),
            CommControl::Ready => println!("readyok"),
            CommControl::InfoString(msg) => println!("info string {msg}"),
            CommControl::BestMove(m, ponder) => match ponder {
                Some(p) => println!("bestmove {} ponder {}", m.as_string(), p.as_string()),
                None => println!("bestmove {}", m.as_string()),
            },
            CommControl::SearchSummary(s) => Self::print_search_summary(&s),
            CommControl::SearchCurrentMove(c) => println!(
                "info currmove {} currmovenumber {}",
                c.curr_move.as_string(),
                c.curr_move_number
            ),
            CommControl::SearchStats(s) => println!(
                "info time {} nodes {} nps {} hashfull {}",
                s.time, s.nodes, s.nps, s.hash_full
            ),
            CommControl::Update => (),
            CommControl::PrintBoard(s) => println!("{s}"),
            CommControl::PrintHistory(s) => println!("{s}"),
            CommControl::PrintHelp => Self::print_help(),
        }
    }

    fn print_search_summary(s: &SearchSummary) {
        let score = if s.mate > 0 {
            let signed = if s.cp < 0 { -(s.mate as i32) } else { s.mate as i32 };
            format!("mate {signed}")
        } else {
            format!("cp {}", s.cp)
        };

        println!(
            "info depth {} seldepth {} score {} nodes {} nps {} hashfull {} time {} pv{}",
            s.depth,
            s.seldepth,
            score,
            s.nodes,
            s.nps,
            s.hash_full,
            s.time,
            s.pv_as_string(),
        );
    }

    fn identify() {
        println!("id name {} {}", About::ENGINE, About::VERSION);
        println!("id author {}", About::AUTHOR);
        println!(
            "option name Hash type spin default {} min {} max {}",
            EngineOptionDefaults::HASH_DEFAULT,
            EngineOptionDefaults::HASH_MIN,
            EngineOptionDefaults::HASH_MAX_64_BIT,
        );
        println!("option name Clear Hash type button");
        println!(
            "option name Sharp Margin type spin default {} min {} max {}",
            EngineOptionDefaults::SHARP_MARGIN_DEFAULT,
            EngineOptionDefaults::SHARP_MARGIN_MIN,
            EngineOptionDefaults::SHARP_MARGIN_MAX,
        );
        println!("option name Threads type spin default 1 min 1 max 64");
        println!(
            "option name MultiPV type spin default {} min {} max {}",
            EngineOptionDefaults::MULTI_PV_DEFAULT,
            EngineOptionDefaults::MULTI_PV_MIN,
            EngineOptionDefaults::MULTI_PV_MAX,
        );
        println!(
            "option name Move Overhead type spin default {} min {} max {}",
            EngineOptionDefaults::MOVE_OVERHEAD_DEFAULT,
            EngineOptionDefaults::MOVE_OVERHEAD_MIN,
            EngineOptionDefaults::MOVE_OVERHEAD_MAX,
        );
        println!(
            "option name Contempt type spin default {} min {} max {}",
            EngineOptionDefaults::CONTEMPT_DEFAULT,
            EngineOptionDefaults::CONTEMPT_MIN,
            EngineOptionDefaults::CONTEMPT_MAX,
        );
        println!(
            "option name UCI_AnalyseMode type check default {}",
            EngineOptionDefaults::UCI_ANALYSE_MODE_DEFAULT,
        );
        println!(
            "option name Ponder type check default {}",
            EngineOptionDefaults::PONDER_DEFAULT,
        );
        println!(
            "option name OwnBook type check default {}",
            EngineOptionDefaults::OWN_BOOK_DEFAULT,
        );
        println!(
            "option name NullMove type check default {}",
            EngineOptionDefaults::NULL_MOVE_DEFAULT,
        );
        println!(
            "option name LMR type check default {}",
            EngineOptionDefaults::LMR_DEFAULT,
        );
        println!("uciok");
    }

    fn print_help() {
        println!("info string Sharpmate custom commands:");
        println!("info string board    - print the current board");
        println!("info string history  - print the move history");
        println!("info string eval     - print the static evaluation");
        println!("info string help     - print this message");
    }

    pub fn shutdown(&mut self) {
        if let Some(handle) = self.input_handle.take() {
            // The stdin-reading thread blocks on a read syscall with no
            // way to interrupt it from here; it exits on its own once
            // stdin closes or a "quit" line comes through.
            let _ = handle.join();
        }
    }
}

impl Default for Comm {
    fn default() -> Self {
        Self::new()
    }
}
