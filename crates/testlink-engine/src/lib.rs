pub mod codec;
pub mod io;
pub mod models;
pub mod pipeline;
pub mod sanitize;

#[cfg(test)]
pub mod tests;

/// Log target carried by every diagnostic the engine emits
pub const LOG_TARGET: &str = "testlink";

// Re-export key types for easier usage
pub use codec::*;
pub use models::*;
pub use pipeline::*;
pub use sanitize::clean_text;
