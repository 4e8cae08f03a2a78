pub mod blocks;
pub mod classify;
pub mod normalize;

pub use normalize::{normalize, CleanedLyrics};
