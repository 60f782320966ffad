mod aligner;

pub mod grid;
pub mod iso;

pub use aligner::*;
