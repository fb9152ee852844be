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
    board::Board,
    movegen::defs::{MoveList, MoveType},
    movegen::MoveGenerator,
};
use std::time::Instant;

// Standalone diagnostic entered via the --perft command-line flag: counts
// leaf nodes at the given depth and prints a per-root-move breakdown, the
// standard way of cross-checking move generation against known-correct
// node counts for a position.
pub fn run(board: &mut Board, mg: &MoveGenerator, depth: i8) {
    let start = Instant::now();
    let mut total = 0u64;

    let mut move_list = MoveList::new();
    mg.generate_moves(board, &mut move_list, MoveType::All);

    for i in 0..move_list.len() {
        let mv = move_list.get_move(i);
        if !board.make(mv, mg) {
            continue;
        }

        let nodes = count_nodes(board, mg, depth - 1);
        board.unmake();

        total += nodes;
        println!("{}: {}", mv.as_string(), nodes);
    }

    let elapsed = start.elapsed().as_millis().max(1) as u64;
    let nps = (total * 1000) / elapsed;

    println!();
    println!("Nodes searched: {total}");
    println!("Time: {elapsed} ms ({nps} nps)");
}

fn count_nodes(board: &mut Board, mg: &MoveGenerator, depth: i8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut move_list = MoveList::new();
    mg.generate_moves(board, &mut move_list, MoveType::All);

    let mut nodes = 0;
    for i in 0..move_list.len() {
        let mv = move_list.get_move(i);
        if !board.make(mv, mg) {
            continue;
        }
        nodes += count_nodes(board, mg, depth - 1);
        board.unmake();
    }

    nodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defs::FEN_START_POSITION;

    fn node_count(fen: &str, depth: i8) -> u64 {
        let mut board = Board::new();
        board.fen_read(Some(fen)).unwrap();
        let mg = MoveGenerator::new();
        count_nodes(&mut board, &mg, depth)
    }

    #[test]
    fn startpos_depth_1_has_20_moves() {
        assert_eq!(node_count(FEN_START_POSITION, 1), 20);
    }

    #[test]
    fn startpos_depth_2_has_400_moves() {
        assert_eq!(node_count(FEN_START_POSITION, 2), 400);
    }
}
