pub mod catalog;
pub mod model;
pub mod traits;
pub mod writer;

// Re-export common types for convenience
pub use model::*;
pub use traits::*;
pub use writer::*;
