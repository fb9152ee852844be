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

use crate::{defs::FEN_START_POSITION, engine::defs::EngineOptionName, search::defs::GameTime};

// Everything the engine can receive over the UCI protocol, plus a small
// set of custom commands ("board", "history", "eval", "help") useful when
// driving the engine from a plain terminal instead of a GUI.
#[derive(PartialEq, Clone, Debug)]
pub enum UciReport {
    Uci,
    UciNewGame,
    IsReady,
    SetOption(EngineOptionName),
    Position(String, Vec<String>),
    GoInfinite,
    GoDepth(i8),
    GoMoveTime(u128),
    GoNodes(usize),
    GoGameTime(GameTime),
    GoPonder(GameTime),
    Stop,
    Quit,
    PonderHit,
    Board,
    History,
    Eval,
    Help,
    Unknown,
}

// Parses a single line of input into a UciReport. Unrecognised or
// malformed commands become Unknown rather than an error: the UCI
// protocol expects engines to silently ignore garbage input.
pub fn parse(line: &str) -> UciReport {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    match tokens.first() {
        Some(&"uci") => UciReport::Uci,
        Some(&"isready") => UciReport::IsReady,
        Some(&"ucinewgame") => UciReport::UciNewGame,
        Some(&"stop") => UciReport::Stop,
        Some(&"quit") => UciReport::Quit,
        Some(&"ponderhit") => UciReport::PonderHit,
        Some(&"position") => parse_position(&tokens),
        Some(&"go") => parse_go(&tokens),
        Some(&"setoption") => parse_setoption(&tokens),
        Some(&"board") => UciReport::Board,
        Some(&"history") => UciReport::History,
        Some(&"eval") => UciReport::Eval,
        Some(&"help") => UciReport::Help,
        _ => UciReport::Unknown,
    }
}

fn parse_position(tokens: &[&str]) -> UciReport {
    if tokens.len() < 2 {
        return UciReport::Unknown;
    }

    let moves_index = tokens.iter().position(|&t| t == "moves");

    let fen = if tokens[1] == "startpos" {
        FEN_START_POSITION.to_string()
    } else if tokens[1] == "fen" {
        let end = moves_index.unwrap_or(tokens.len());
        if end <= 2 {
            return UciReport::Unknown;
        }
        tokens[2..end].join(" ")
    } else {
        return UciReport::Unknown;
    };

    let moves = match moves_index {
        Some(i) => tokens[(i + 1)..].iter().map(|s| s.to_string()).collect(),
        None => Vec::new(),
    };

    UciReport::Position(fen, moves)
}

fn parse_go(tokens: &[&str]) -> UciReport {
    if tokens.len() < 2 {
        return UciReport::GoInfinite;
    }

    match tokens[1] {
        "infinite" => UciReport::GoInfinite,
        "ponder" => UciReport::GoPonder(parse_game_time(tokens)),
        "depth" => tokens
            .get(2)
            .and_then(|v| v.parse::<i8>().ok())
            .map(UciReport::GoDepth)
            .unwrap_or(UciReport::Unknown),
        "movetime" => tokens
            .get(2)
            .and_then(|v| v.parse::<u128>().ok())
            .map(UciReport::GoMoveTime)
            .unwrap_or(UciReport::Unknown),
        "nodes" => tokens
            .get(2)
            .and_then(|v| v.parse::<usize>().ok())
            .map(UciReport::GoNodes)
            .unwrap_or(UciReport::Unknown),
        "wtime" | "btime" | "winc" | "binc" | "movestogo" => {
            UciReport::GoGameTime(parse_game_time(tokens))
        }
        _ => UciReport::Unknown,
    }
}

fn parse_game_time(tokens: &[&str]) -> GameTime {
    let mut wtime = 0u128;
    let mut btime = 0u128;
    let mut winc = 0u128;
    let mut binc = 0u128;
    let mut moves_to_go = None;

    // Walk token-by-token rather than in fixed-size steps: "ponder" takes
    // no value of its own and can precede the wtime/btime/... fields.
    let mut i = 1;
    while i < tokens.len() {
        let consumed = match tokens[i] {
            "wtime" => {
                wtime = tokens.get(i + 1).and_then(|v| v.parse().ok()).unwrap_or(0);
                2
            }
            "btime" => {
                btime = tokens.get(i + 1).and_then(|v| v.parse().ok()).unwrap_or(0);
                2
            }
            "winc" => {
                winc = tokens.get(i + 1).and_then(|v| v.parse().ok()).unwrap_or(0);
                2
            }
            "binc" => {
                binc = tokens.get(i + 1).and_then(|v| v.parse().ok()).unwrap_or(0);
                2
            }
            "movestogo" => {
                moves_to_go = tokens.get(i + 1).and_then(|v| v.parse().ok());
                2
            }
            _ => 1,
        };
        i += consumed;
    }

    GameTime::new(wtime, btime, winc, binc, moves_to_go)
}

fn parse_setoption(tokens: &[&str]) -> UciReport {
    let name_pos = tokens.iter().position(|&t| t == "name");
    let value_pos = tokens.iter().position(|&t| t == "value");

    let name_pos = match name_pos {
        Some(p) => p,
        None => return UciReport::SetOption(EngineOptionName::Nothing),
    };

    let name_end = value_pos.unwrap_or(tokens.len());
    if name_end <= name_pos + 1 {
        return UciReport::SetOption(EngineOptionName::Nothing);
    }
    let name = tokens[(name_pos + 1)..name_end].join(" ");
    let value = match value_pos {
        Some(p) => tokens[(p + 1)..].join(" "),
        None => String::new(),
    };

    let option = match name.as_str() {
        EngineOptionName::HASH => EngineOptionName::Hash(value),
        EngineOptionName::CLEAR_HASH => EngineOptionName::ClearHash,
        EngineOptionName::SHARP_MARGIN => EngineOptionName::SharpMargin(value),
        EngineOptionName::THREADS => EngineOptionName::Threads(value),
        EngineOptionName::MULTI_PV => EngineOptionName::MultiPv(value),
        EngineOptionName::MOVE_OVERHEAD => EngineOptionName::MoveOverhead(value),
        EngineOptionName::CONTEMPT => EngineOptionName::Contempt(value),
        EngineOptionName::UCI_ANALYSE_MODE => EngineOptionName::UciAnalyseMode(value),
        EngineOptionName::PONDER => EngineOptionName::Ponder(value),
        EngineOptionName::OWN_BOOK => EngineOptionName::OwnBook(value),
        EngineOptionName::NULL_MOVE => EngineOptionName::NullMove(value),
        EngineOptionName::LMR => EngineOptionName::Lmr(value),
        _ => EngineOptionName::Nothing,
    };

    UciReport::SetOption(option)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_startpos_with_moves() {
        let report = parse("position startpos moves e2e4 e7e5");
        assert_eq!(
            report,
            UciReport::Position(
                FEN_START_POSITION.to_string(),
                vec!["e2e4".to_string(), "e7e5".to_string()]
            )
        );
    }

    #[test]
    fn parses_fen_without_moves() {
        let fen = "8/8/8/8/8/8/8/K6k w - - 0 1";
        let line = format!("position fen {fen}");
        let report = parse(&line);
        assert_eq!(report, UciReport::Position(fen.to_string(), Vec::new()));
    }

    #[test]
    fn parses_go_depth() {
        assert_eq!(parse("go depth 6"), UciReport::GoDepth(6));
    }

    #[test]
    fn parses_go_movetime() {
        assert_eq!(parse("go movetime 5000"), UciReport::GoMoveTime(5000));
    }

    #[test]
    fn parses_setoption_with_multi_word_name() {
        let report = parse("setoption name Sharp Margin value 42");
        assert_eq!(
            report,
            UciReport::SetOption(EngineOptionName::SharpMargin("42".to_string()))
        );
    }

    #[test]
    fn unknown_command_does_not_panic() {
        assert_eq!(parse("frobnicate"), UciReport::Unknown);
    }
}
