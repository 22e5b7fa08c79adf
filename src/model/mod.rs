pub mod bindings;
pub mod executable;
pub mod plan;
pub mod workflow;

pub use bindings::*;
pub use executable::*;
pub use plan::*;
pub use workflow::*;
