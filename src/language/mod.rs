// Types representing bulk test case entries

mod error;
mod types;

// Re-export all public symbols
pub use error::*;
pub use types::*;
