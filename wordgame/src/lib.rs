pub use board::*;
pub use errors::*;
pub use lexicon::*;
pub use notation::*;
pub use pool::*;
pub use protocol::*;
pub use rack::*;
pub use tiles::*;
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
mod board;
mod errors;
mod lexicon;
mod notation;
mod pool;
mod protocol;
mod rack;
mod tiles;
mod visualization;
