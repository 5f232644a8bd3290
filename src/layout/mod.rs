pub mod handles;
pub mod sizing;

pub use handles::*;
pub use sizing::*;
