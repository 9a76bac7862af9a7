pub mod traits;
pub mod workflow;
