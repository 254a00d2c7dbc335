pub mod definition;
pub mod registry;

pub use definition::*;
pub use registry::*;
