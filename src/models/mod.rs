pub mod edits;
pub mod roster;
pub mod time;

pub use edits::*;
pub use roster::*;
pub use time::*;
