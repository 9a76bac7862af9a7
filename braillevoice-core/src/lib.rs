pub mod history;
pub mod settings;
pub mod stats;
pub mod types;
pub mod upload;

// Keep the public surface small and intentional.
pub use history::*;
pub use settings::*;
pub use stats::*;
pub use types::*;
pub use upload::*;
