pub mod leader;
pub use leader::*;

pub mod player;
pub use player::*;
