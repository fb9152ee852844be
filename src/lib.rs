// Library interface for the Sharpmate chess engine.
// Allows the crate to be used as both a binary and a library.

pub mod board;
pub mod comm;
pub mod defs;
pub mod engine;
pub mod evaluation;
pub mod knowledge;
pub mod misc;
pub mod movegen;
pub mod search;

// Re-export commonly used items
pub use board::Board;
pub use defs::FEN_START_POSITION;
pub use evaluation::evaluate_position;
pub use movegen::MoveGenerator;
