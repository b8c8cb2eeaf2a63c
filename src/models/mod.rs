pub mod policy;
pub mod task;

pub use policy::*;
pub use task::*;
