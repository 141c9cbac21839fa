pub mod board;
pub mod error;
pub mod guard;
pub mod logger_extensions;
pub mod parallel;
pub mod search;
pub mod tree;
pub mod types;

pub use board::GameBoard;
pub use error::{SearchError, SearchResult};
pub use guard::AppliedMove;
pub use logger_extensions::AILoggerExtensions;
pub use parallel::legal_moves_concurrent;
pub use search::SearchEngine;
pub use tree::{MoveNode, MoveTree, NodeId};
pub use types::*;
