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
use crate::{defs::About, engine::defs::Settings};

// This notice is displayed if the engine is a debug binary. (Debug
// binaries are unoptimized and slower than release binaries.)
#[cfg(debug_assertions)]
const NOTICE_DEBUG_MODE: &str = "Notice: Running in debug mode";

impl Engine {
    pub fn print_ascii_logo(&self) {
        println!();
        println!(" .dP\"Y8 88  88    db    88\"\"Yb 88\"\"Yb 8b    d8    db    888888 888888");
        println!(" `Ybo.\" 88  88   dPYb   88__dP 88__dP 88b  d88   dPYb     88   88__  ");
        println!(" o.`Y8b 888888  dP__Yb  88\"Yb  88\"\"\"  88YbdP88  dP__Yb    88   88\"\"  ");
        println!(" 8bodP' 88  88 dP\"\"\"\"Yb 88  Yb 88     88 YY 88 dP\"\"\"\"Yb   88   888888");
        println!();
    }

    // Print information about the engine.
    pub fn print_about(&self, s: &Settings) {
        let bits = std::mem::size_of::<usize>() * 8;
        let hash = if s.tt_size == 0 {
            String::from("off")
        } else {
            format!("{} MB", s.tt_size)
        };
        let threads = format!("{}", s.threads);
        let sharp = format!("{}", s.sharp_margin);
        let book = if s.own_book { "on" } else { "off" };
        let pruning = format!(
            "null-move {}, LMR {}, contempt {}",
            if s.null_move { "on" } else { "off" },
            if s.lmr { "on" } else { "off" },
            s.contempt,
        );

        println!("{:<10} {} {}", "Engine:", About::ENGINE, About::VERSION);
        println!("{:<10} {}", "Author:", About::AUTHOR);
        println!("{:<10} {}", "EMail:", About::EMAIL);
        println!("{:<10} {}", "Website:", About::WEBSITE);
        println!("{:<10} {bits}-bit", "Type:");
        println!("{:<10} {hash}", "Hash:");
        println!("{:<10} {threads}", "Threads:");
        println!("{:<10} {sharp}", "SharpMargin:");
        println!("{:<10} {book}", "OwnBook:");
        println!("{:<10} {pruning}", "Pruning:");

        #[cfg(debug_assertions)]
        println!("{NOTICE_DEBUG_MODE}");
    }
}
