//! Engine seams the dispatch handlers call into.

mod engine;
pub use engine::{ClientSetup, Engines, QueryEngine, ResultPage, SearchEngine};
