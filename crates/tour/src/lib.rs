pub mod catalog;
pub mod scene;
pub mod tiles;

pub use catalog::*;
pub use scene::*;
pub use tiles::*;
