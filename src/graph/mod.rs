pub mod edge;
pub mod node;
pub mod pipeline;

pub use edge::*;
pub use node::*;
pub use pipeline::*;
